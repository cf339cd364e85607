use super::*;

fn collect<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn test_linked_list_append_and_iterate() {
    let mut list = LinkedList::new();
    assert!(list.is_empty());

    list.append_last(1);
    list.append_last(2);
    list.append_last(3);

    assert_eq!(list.len(), 3);
    assert_eq!(collect(&list), vec![1, 2, 3]);

    // Iteration is restartable
    assert_eq!(list.iter().count(), 3);
    assert_eq!(list.iter().next(), Some(&1));
}

#[test]
fn test_linked_list_insert_first() {
    let mut list = LinkedList::new();
    list.append_last("b");
    list.insert_first("a");
    list.append_last("c");

    assert_eq!(collect(&list), vec!["a", "b", "c"]);
    assert_eq!(list.peek_first(), Some(&"a"));
}

#[test]
fn test_linked_list_remove_first() {
    let mut list: LinkedList<i32> = (1..=3).collect();

    assert_eq!(list.remove_first(), Ok(1));
    assert_eq!(list.remove_first(), Ok(2));
    assert_eq!(list.len(), 1);
    assert_eq!(list.remove_first(), Ok(3));

    assert!(list.is_empty());
    assert_eq!(list.peek_first(), None);
    assert_eq!(list.remove_first(), Err(ListError::Empty));
    assert_eq!(list.len(), 0);
}

#[test]
fn test_linked_list_remove_by_head_middle_tail() {
    let mut list: LinkedList<i32> = (1..=5).collect();

    assert_eq!(list.remove_by(|v| *v == 1), Some(1));
    assert_eq!(collect(&list), vec![2, 3, 4, 5]);

    assert_eq!(list.remove_by(|v| *v == 4), Some(4));
    assert_eq!(collect(&list), vec![2, 3, 5]);

    assert_eq!(list.remove_by(|v| *v == 5), Some(5));
    assert_eq!(collect(&list), vec![2, 3]);
    assert_eq!(list.len(), 2);

    // Appending after a tail removal still links correctly
    list.append_last(6);
    assert_eq!(collect(&list), vec![2, 3, 6]);
}

#[test]
fn test_linked_list_remove_by_miss_leaves_chain() {
    let mut list: LinkedList<i32> = (1..=3).collect();

    assert_eq!(list.remove_by(|v| *v == 42), None);
    assert_eq!(list.len(), 3);
    assert_eq!(collect(&list), vec![1, 2, 3]);

    let mut empty: LinkedList<i32> = LinkedList::new();
    assert_eq!(empty.remove_by(|_| true), None);
    assert_eq!(empty.len(), 0);
}

#[test]
fn test_linked_list_remove_by_first_match_only() {
    let mut list = LinkedList::new();
    list.append_last((1, "first"));
    list.append_last((2, "other"));
    list.append_last((1, "second"));

    assert_eq!(list.remove_by(|(k, _)| *k == 1), Some((1, "first")));
    assert_eq!(list.find(|(k, _)| *k == 1), Some((2, &(1, "second"))));
}

#[test]
fn test_linked_list_find_and_find_mut() {
    let mut list: LinkedList<i32> = vec![10, 20, 30].into_iter().collect();

    assert_eq!(list.find(|v| *v == 30), Some((3, &30)));
    assert_eq!(list.find(|v| *v == 99), None);

    if let Some((pos, value)) = list.find_mut(|v| *v == 20) {
        assert_eq!(pos, 2);
        *value = 25;
    }
    assert_eq!(collect(&list), vec![10, 25, 30]);

    for value in list.iter_mut() {
        *value += 1;
    }
    assert_eq!(collect(&list), vec![11, 26, 31]);
}

#[test]
fn test_linked_list_into_iter_and_size_hint() {
    let list: LinkedList<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
    assert_eq!(list.iter().len(), 2);

    let drained: Vec<String> = list.into_iter().collect();
    assert_eq!(drained, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn test_linked_list_len_matches_reachable_nodes() {
    let mut list = LinkedList::new();
    for i in 0..100 {
        list.append_last(i);
    }
    for i in (0..100).step_by(3) {
        list.remove_by(|v| *v == i);
    }

    assert_eq!(list.len(), list.iter().count());
    assert_eq!(list.len(), 66);
}

#[test]
fn test_linked_list_drop_long_chain() {
    let mut list = LinkedList::new();
    for i in 0..200_000 {
        list.insert_first(i);
    }
    assert_eq!(list.len(), 200_000);
    drop(list);
}

#[test]
fn test_linked_list_debug() {
    let list: LinkedList<i32> = (1..=3).collect();
    assert_eq!(format!("{:?}", list), "[1, 2, 3]");
}

#[test]
fn test_queue_fifo() {
    let mut queue = Queue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), Err(ListError::Empty));

    queue.enqueue("Emergency");
    queue.enqueue("Radiology");
    queue.enqueue("Pharmacy");

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(), Some(&"Emergency"));
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["Emergency", "Radiology", "Pharmacy"]);

    assert_eq!(queue.dequeue(), Ok("Emergency"));
    assert_eq!(queue.dequeue(), Ok("Radiology"));
    queue.enqueue("ICU");
    assert_eq!(queue.dequeue(), Ok("Pharmacy"));
    assert_eq!(queue.dequeue(), Ok("ICU"));
    assert!(queue.is_empty());
}

#[test]
fn test_list_error_display() {
    assert_eq!(ListError::Empty.to_string(), "List is empty");
}
