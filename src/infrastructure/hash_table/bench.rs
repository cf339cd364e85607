use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

// Import the tables and their shared interface from the crate
use hashchain::infrastructure::hash_table::{HashTable, OpenAddressingTable, RecordTable};

// Test configuration
const OPERATIONS: u32 = 10_000;

fn fill<T: RecordTable<(u32, &'static str)>>(table: &mut T) {
    for i in 0..OPERATIONS {
        table.insert((i, "test_value")).unwrap();
    }
}

// 90% reads, 10% writes over a populated table
fn read_heavy<T: RecordTable<(u32, &'static str)>>(table: &mut T) {
    for i in 0..OPERATIONS {
        if i % 10 == 0 {
            table.insert((i, "updated_value")).unwrap();
        } else {
            assert!(table.search(&i).is_some());
        }
    }
}

pub fn bench_insertions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insertions");

    group.bench_function("Chaining", |b| {
        b.iter(|| {
            let mut table = HashTable::new(11);
            fill(&mut table);
        });
    });

    group.bench_function("OpenAddressing", |b| {
        b.iter(|| {
            let mut table = OpenAddressingTable::new(11);
            fill(&mut table);
        });
    });

    group.bench_function("StdHashMap", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..OPERATIONS {
                map.insert(i, "test_value");
            }
        });
    });

    group.finish();
}

pub fn bench_read_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReadHeavy");

    group.bench_function("Chaining", |b| {
        let mut table = HashTable::new(11);
        fill(&mut table);
        b.iter(|| read_heavy(&mut table));
    });

    group.bench_function("OpenAddressing", |b| {
        let mut table = OpenAddressingTable::new(11);
        fill(&mut table);
        b.iter(|| read_heavy(&mut table));
    });

    group.finish();
}

pub fn bench_insert_delete_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("InsertDeleteCycle");

    group.bench_function("Chaining", |b| {
        b.iter(|| {
            let mut table = HashTable::new(11);
            fill(&mut table);
            for i in 0..OPERATIONS {
                table.delete(&i);
            }
        });
    });

    group.bench_function("OpenAddressing", |b| {
        b.iter(|| {
            let mut table = OpenAddressingTable::new(11);
            fill(&mut table);
            for i in 0..OPERATIONS {
                table.delete(&i);
            }
        });
    });

    group.finish();
}

// Export the benchmark group for criterion
criterion_group!(
    benches,
    bench_insertions,
    bench_read_heavy,
    bench_insert_delete_cycle
);

// Only run the benchmark group when this file is executed directly
criterion_main!(benches);
