use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use xxhash_rust::xxh64::xxh64;

// Import the bucket hash from the main crate
use hashchain::infrastructure::hash::{bucket_index, find_next_prime, polynomial_hash};

// Generate a random string of specified length
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let mut s = String::with_capacity(length);

    for _ in 0..length {
        let idx = rng.gen_range(0..CHARSET.len());
        s.push(CHARSET[idx] as char);
    }

    s
}

fn xxh64_bucket(s: &str, capacity: usize) -> usize {
    (xxh64(s.as_bytes(), 0) % capacity as u64) as usize
}

fn crc32_bucket(s: &str, capacity: usize) -> usize {
    (crc32fast::hash(s.as_bytes()) as usize) % capacity
}

// Bucket placement for strings of a given length
fn bench_strings(c: &mut Criterion, group_name: &str, length: usize) {
    let s = generate_random_string(length);
    let capacity = 1021;

    let mut group = c.benchmark_group(group_name);

    group.bench_function("polynomial_hash", |b: &mut criterion::Bencher| {
        b.iter(|| polynomial_hash(black_box(&s), capacity))
    });
    group.bench_function("xxh64_bucket", |b: &mut criterion::Bencher| {
        b.iter(|| xxh64_bucket(black_box(&s), capacity))
    });
    group.bench_function("crc32_bucket", |b: &mut criterion::Bencher| {
        b.iter(|| crc32_bucket(black_box(&s), capacity))
    });

    group.finish();
}

pub fn bench_short_strings(c: &mut Criterion) {
    bench_strings(c, "ShortStrings", 10);
}

pub fn bench_long_strings(c: &mut Criterion) {
    bench_strings(c, "LongStrings", 1000);
}

// Integer keys go through their decimal text
pub fn bench_integer_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("IntegerKeys");
    let capacity = 1021;

    group.bench_function("bucket_index_u32", |b: &mut criterion::Bencher| {
        b.iter(|| {
            for id in 0..1000u32 {
                bucket_index(black_box(&id), capacity);
            }
        })
    });

    group.finish();
}

pub fn bench_find_next_prime(c: &mut Criterion) {
    let mut group = c.benchmark_group("FindNextPrime");

    group.bench_function("find_next_prime", |b: &mut criterion::Bencher| {
        b.iter(|| {
            let mut capacity = 11;
            while capacity < 1_000_000 {
                capacity = find_next_prime(black_box(capacity * 2));
            }
            capacity
        })
    });

    group.finish();
}

// Export the benchmark group for criterion
criterion_group!(
    benches,
    bench_short_strings,
    bench_long_strings,
    bench_integer_keys,
    bench_find_next_prime
);

// Only run the benchmark group when this file is executed directly
criterion_main!(benches);
