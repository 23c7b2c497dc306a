//! LRU List Module
//!
//! Recency tracking for cache eviction with O(1) touch, remove, and evict.
//!
//! Keys are indexed by a HashMap pointing into a slab-allocated doubly linked
//! list. Freed slots are recycled through a free list, so a long-lived cache
//! does not grow its node storage past its high-water mark.

use std::collections::HashMap;

/// Sentinel slot index meaning "no node".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    key: String,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Tracks access order for LRU eviction.
///
/// Head = most recently used, tail = least recently used.
#[derive(Debug, Default)]
pub struct LruList {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    head: usize,
    tail: usize,
    free: Vec<usize>,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty LRU list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if unknown.
    pub fn touch(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            if self.head != idx {
                self.unlink(idx);
                self.push_front(idx);
            }
            return;
        }

        let idx = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot].key = key.to_string();
                slot
            }
            None => {
                self.nodes.push(Node {
                    key: key.to_string(),
                    prev: NIL,
                    next: NIL,
                });
                self.nodes.len() - 1
            }
        };
        self.index.insert(key.to_string(), idx);
        self.push_front(idx);
    }

    // == Remove ==
    /// Removes a key from the list; returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.release(idx);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key, if any.
    pub fn evict_oldest(&mut self) -> Option<String> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        self.unlink(idx);
        let key = std::mem::take(&mut self.nodes[idx].key);
        self.index.remove(&key);
        self.free.push(idx);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        if self.tail == NIL {
            None
        } else {
            Some(self.nodes[self.tail].key.as_str())
        }
    }

    // == Clear ==
    /// Drops all tracked keys and recycled slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Detaches a node from the list without releasing its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Links a detached node in at the head (most recently used).
    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    /// Returns a node's slot to the free list.
    fn release(&mut self, idx: usize) {
        self.nodes[idx].key.clear();
        self.free.push(idx);
    }
}
