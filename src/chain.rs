//! Chain: per-bucket singly linked list of owned `Store` copies.
//!
//! Nodes live in a chain-local `SlotMap` and link to each other through
//! generational keys. The arena is owned outright, so cloning a chain
//! clones every node (and every `Store`) while keeping the links intact.

use crate::store::Store;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Clone, Debug)]
struct Node {
    store: Store,
    next: Option<DefaultKey>,
}

/// Unordered sequence of stores sharing a bucket. New entries go to the head.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    nodes: SlotMap<DefaultKey, Node>,
    head: Option<DefaultKey>,
}

/// Iterator over the stores of a chain, head to tail.
pub struct Iter<'a> {
    nodes: &'a SlotMap<DefaultKey, Node>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Store;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some(&node.store)
    }
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepend a copy of `store`. Keys are not deduplicated.
    pub fn insert(&mut self, store: &Store) {
        let node = Node {
            store: store.clone(),
            next: self.head,
        };
        self.head = Some(self.nodes.insert(node));
    }

    /// Copy of the first store (from the head) owned by `owner`.
    pub fn find(&self, owner: &str) -> Option<Store> {
        if owner.is_empty() {
            return None;
        }
        self.iter().find(|s| s.owner() == owner).cloned()
    }

    /// Unlink and return the first store owned by `owner`.
    pub fn remove(&mut self, owner: &str) -> Option<Store> {
        if owner.is_empty() {
            return None;
        }
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            let next = node.next;
            if node.store.owner() == owner {
                match prev {
                    None => self.head = next,
                    Some(p) => {
                        if let Some(pn) = self.nodes.get_mut(p) {
                            pn.next = next;
                        }
                    }
                }
                return self.nodes.remove(k).map(|n| n.store);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// Copies of every store, head to tail.
    pub fn to_vec(&self) -> Vec<Store> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        out
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
        }
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Store;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, s) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{s}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners(c: &Chain) -> Vec<&str> {
        c.iter().map(Store::owner).collect()
    }

    /// Invariant: inserts prepend, so iteration is most-recent-first.
    #[test]
    fn insert_prepends() {
        let mut c = Chain::new();
        assert!(c.is_empty());
        for o in ["a", "b", "c"] {
            c.insert(&Store::new(o, 1.0));
        }
        assert_eq!(c.len(), 3);
        assert_eq!(owners(&c), ["c", "b", "a"]);
    }

    /// Invariant: the chain keeps its own copy; mutating the caller's
    /// store after insert does not reach the chain.
    #[test]
    fn insert_copies_argument() {
        let mut c = Chain::new();
        let mut s = Store::new("Lidl", 300.0);
        c.insert(&s);
        s.set_sales(0.0);
        assert_eq!(c.find("Lidl").unwrap().sales(), 300.0);
    }

    /// Invariant: `find` returns a fresh copy; mutating it leaves the
    /// stored element unchanged.
    #[test]
    fn find_returns_detached_copy() {
        let mut c = Chain::new();
        c.insert(&Store::new("Target", 850.25));
        let mut found = c.find("Target").expect("present");
        found.set_sales(0.0);
        assert_eq!(c.find("Target").unwrap().sales(), 850.25);
    }

    /// Invariant: with duplicate keys `find` sees the head-most match.
    #[test]
    fn duplicate_keys_coexist() {
        let mut c = Chain::new();
        c.insert(&Store::new("dup", 1.0));
        c.insert(&Store::new("dup", 2.0));
        assert_eq!(c.len(), 2);
        assert_eq!(c.find("dup").unwrap().sales(), 2.0);
    }

    #[test]
    fn find_missing_or_empty_is_none() {
        let mut c = Chain::new();
        assert!(c.find("x").is_none());
        c.insert(&Store::new("", 5.0));
        c.insert(&Store::new("y", 5.0));
        assert!(c.find("x").is_none());
        assert!(c.find("").is_none());
    }

    /// Invariant: `to_vec` preserves head-to-tail order and yields copies.
    #[test]
    fn to_vec_order_and_isolation() {
        let mut c = Chain::new();
        c.insert(&Store::new("a", 1.0));
        c.insert(&Store::new("b", 2.0));
        let mut v = c.to_vec();
        assert_eq!(v, vec![Store::new("b", 2.0), Store::new("a", 1.0)]);
        v[0].set_sales(99.0);
        assert_eq!(c.find("b").unwrap().sales(), 2.0);
    }

    /// Invariant: a cloned chain has equal contents in the same order and
    /// diverges independently afterward.
    #[test]
    fn clone_is_deep_and_ordered() {
        let mut c = Chain::new();
        for (o, v) in [("a", 1.0), ("b", 2.0), ("c", 3.0)] {
            c.insert(&Store::new(o, v));
        }
        let mut copy = c.clone();
        assert_eq!(copy.to_vec(), c.to_vec());

        copy.insert(&Store::new("d", 4.0));
        let _ = copy.remove("a");
        assert_eq!(owners(&c), ["c", "b", "a"]);
        assert_eq!(owners(&copy), ["d", "c", "b"]);
    }

    /// Invariant: removal relinks around head, middle and tail nodes.
    #[test]
    fn remove_relinks() {
        let mut c = Chain::new();
        for o in ["t", "m", "h"] {
            c.insert(&Store::new(o, 0.0));
        }
        assert_eq!(c.remove("m").map(|s| s.owner().to_string()), Some("m".into()));
        assert_eq!(owners(&c), ["h", "t"]);
        assert!(c.remove("h").is_some());
        assert_eq!(owners(&c), ["t"]);
        assert!(c.remove("t").is_some());
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.remove("t").is_none());
    }

    #[test]
    fn display_lists_head_first() {
        let mut c = Chain::new();
        assert_eq!(c.to_string(), "[]");
        c.insert(&Store::new("a", 1.0));
        c.insert(&Store::new("b", 2.5));
        assert_eq!(
            c.to_string(),
            "[Store{Owner='b', Sales=2.50}, Store{Owner='a', Sales=1.00}]"
        );
    }
}
