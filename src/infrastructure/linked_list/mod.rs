// Singly linked list with an owning chain of boxed nodes

use std::fmt;
use thiserror::Error;

/// Linked list error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Removal attempted on a list with no elements
    #[error("List is empty")]
    Empty,
}

/// Result type for linked list operations
pub type ListResult<T> = Result<T, ListError>;

/// Linked list node structure
struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// Singly linked list.
///
/// Every node exclusively owns its successor, so unlinking a node hands its
/// value back to the caller and releases the cell. `len` is cached and always
/// equals the number of reachable nodes.
pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Create a new empty list
    pub fn new() -> Self {
        LinkedList { head: None, len: 0 }
    }

    /// Append a value after the current tail
    pub fn append_last(&mut self, value: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Link a value in front of the current head
    pub fn insert_first(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Detach the head and return its value
    pub fn remove_first(&mut self) -> ListResult<T> {
        let node = self.head.take().ok_or(ListError::Empty)?;
        let Node { value, next } = *node;
        self.head = next;
        self.len -= 1;
        Ok(value)
    }

    /// Borrow the value at the head, if any
    pub fn peek_first(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Unlink the first value matching `predicate` and return it.
    ///
    /// The chain is left untouched when nothing matches.
    pub fn remove_by<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        // Trailing link: `cursor` is the slot owning the node under inspection
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| !predicate(&node.value))
        {
            cursor = &mut cursor.as_mut()?.next;
        }

        let node = cursor.take()?;
        let Node { value, next } = *node;
        *cursor = next;
        self.len -= 1;
        Some(value)
    }

    /// Find the first value matching `predicate` along with its 1-based position
    pub fn find<F>(&self, mut predicate: F) -> Option<(usize, &T)>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .enumerate()
            .find(|(_, value)| predicate(value))
            .map(|(pos, value)| (pos + 1, value))
    }

    /// Mutable counterpart of [`LinkedList::find`]
    pub fn find_mut<F>(&mut self, mut predicate: F) -> Option<(usize, &mut T)>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter_mut()
            .enumerate()
            .find(|(_, value)| predicate(value))
            .map(|(pos, value)| (pos + 1, value))
    }

    /// Forward iterator over the values in insertion order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Forward iterator over mutable references to the values
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// Number of values in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unlink nodes one at a time so long chains do not recurse on drop
impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        let mut tail = &mut list.head;
        for value in iter {
            let node = tail.insert(Box::new(Node { value, next: None }));
            tail = &mut node.next;
            list.len += 1;
        }
        list
    }
}

/// Borrowing iterator over a [`LinkedList`]
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable iterator over a [`LinkedList`]
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Owning iterator, drains the list from the head
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// FIFO queue backed by a [`LinkedList`]
pub struct Queue<T> {
    items: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Queue {
            items: LinkedList::new(),
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.items.append_last(value);
    }

    pub fn dequeue(&mut self) -> ListResult<T> {
        self.items.remove_first()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.peek_first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
