//! Singly linked list holding one bucket of a [`ChainedMap`](crate::ChainedMap)
//!
//! `Clone`, `Debug` and `Drop` walk the nodes in a loop; a derived impl recurses once per node.

use std::fmt;

/// Owning pointer to the next node
type Link<V> = Option<Box<Node<V>>>;

/// A key-value pair linked into a chain
struct Node<V> {
    /// The key the node was stored under
    key: String,
    /// The value associated with the key
    value: V,
    /// The node appended after this one
    next: Link<V>,
}

/// The key-value pairs of one bucket, in insertion order
pub(crate) struct Chain<V> {
    /// First node, `None` for an empty bucket
    head: Link<V>,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self { head: None }
    }
}

impl<V: Clone> Clone for Chain<V> {
    fn clone(&self) -> Self {
        let mut cloned = Self::default();
        let mut tail = &mut cloned.head;
        for (key, value) in self.iter() {
            let node = Node { key: key.to_string(), value: value.clone(), next: None };
            tail = &mut tail.insert(Box::new(node)).next;
        }
        cloned
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink node by node instead of letting the boxes drop recursively
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V> Chain<V> {
    /// Returns true if the bucket holds no nodes
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends a node at the tail. The caller makes sure `key` is not already present.
    pub(crate) fn push_back(&mut self, key: String, value: V) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node { key, value, next: None }));
    }

    /// Value stored under `key`
    pub(crate) fn find(&self, key: &str) -> Option<&V> {
        self.iter().find_map(|(node_key, value)| (node_key == key).then_some(value))
    }

    /// Mutable value stored under `key`
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut link = self.head.as_deref_mut();
        while let Some(node) = link {
            if node.key == key {
                return Some(&mut node.value);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the node holding `key` and returns its value
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        let Node { value, .. } = *removed;
        Some(value)
    }

    /// Iterates the nodes from head to tail
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

/// Borrowing iterator over a chain
pub(crate) struct Iter<'a, V> {
    /// Node yielded by the next call
    next: Option<&'a Node<V>>,
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = self.next.map(|node| (&node.key, &node.value));
        f.debug_struct("Iter").field("next", &next).finish()
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

/// Owning iterator that takes the nodes off a chain one by one
#[derive(Debug)]
pub(crate) struct IntoIter<V> {
    /// Remaining nodes
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.chain.head.take()?;
        self.chain.head = node.next.take();
        let Node { key, value, .. } = *node;
        Some((key, value))
    }
}
