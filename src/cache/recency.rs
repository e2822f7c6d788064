//! Recency Tracker Module
//!
//! Tracks least-recently-used order of keys for cache eviction.

use std::collections::HashMap;
use std::mem;

/// Null link.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    key: String,
    prev: usize,
    next: usize,
}

// == Recency Tracker ==
/// Tracks access order for LRU eviction.
///
/// Keys live in a doubly-linked list threaded through a slab of nodes:
/// - Head = least recently used
/// - Tail = most recently used
///
/// A key -> slot index gives O(1) `touch`, `remove` and `contains`. Freed
/// slots are recycled, so the slab never grows past the peak key count.
#[derive(Debug)]
pub struct RecencyTracker {
    /// Slot of every tracked key
    index: HashMap<String, usize>,
    /// Node slab, indexed by slot
    nodes: Vec<Node>,
    /// Recyclable slots
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl RecencyTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// Tracked keys are moved to the tail, new keys are appended there.
    pub fn touch(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => {
                if slot != self.tail {
                    self.unlink(slot);
                    self.push_tail(slot);
                }
            }
            None => {
                let slot = self.alloc(key);
                self.index.insert(key.to_string(), slot);
                self.push_tail(slot);
            }
        }
    }

    // == Remove ==
    /// Stops tracking a key. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.unlink(slot);
                self.nodes[slot].key = String::new();
                self.free.push(slot);
                true
            }
            None => false,
        }
    }

    // == Oldest ==
    /// Returns up to `n` keys, least recently used first.
    pub fn oldest(&self, n: usize) -> Vec<String> {
        self.iter().take(n).map(str::to_string).collect()
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Forgets every key and releases the slab.
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    fn alloc(&mut self, key: &str) -> usize {
        let node = Node {
            key: key.to_string(),
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn unlink(&mut self, slot: usize) {
        let prev = mem::replace(&mut self.nodes[slot].prev, NIL);
        let next = mem::replace(&mut self.nodes[slot].next, NIL);

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
    }

    fn push_tail(&mut self, slot: usize) {
        self.nodes[slot].prev = self.tail;
        self.nodes[slot].next = NIL;

        if self.tail == NIL {
            self.head = slot;
        } else {
            self.nodes[self.tail].next = slot;
        }
        self.tail = slot;
    }
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Least-to-most recently used iterator over tracked keys.
pub struct Iter<'a> {
    tracker: &'a RecencyTracker,
    cursor: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.tracker.nodes[self.cursor];
        self.cursor = node.next;
        Some(node.key.as_str())
    }
}
