//! Prefix index over a snapshot of store entry names.
//!
//! Built once per batch from a single listing, then queried for every
//! desired secret: an exact lookup for the current marker and a prefix
//! lookup for stale markers. Both cost time proportional to the queried
//! string, independent of how many entries the store holds.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,
}

/// Character trie of entry names.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: Node,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every name in `names`. Duplicates are stored once.
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            index.insert(name.as_ref());
        }
        index
    }

    /// Add `name`; returns `false` if it was already indexed.
    pub fn insert(&mut self, name: &str) -> bool {
        let mut node = &mut self.root;
        for c in name.chars() {
            node = node.children.entry(c).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    pub fn exists(&self, name: &str) -> bool {
        self.node(name).is_some_and(|node| node.terminal)
    }

    /// Every indexed name beginning with `prefix`, including `prefix` itself
    /// when indexed.
    pub fn find_by_prefix(&self, prefix: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if let Some(node) = self.node(prefix) {
            let mut path = prefix.to_owned();
            collect(node, &mut path, &mut found);
        }
        found
    }

    /// Every indexed name, in lexicographic order.
    pub fn names(&self) -> BTreeSet<String> {
        self.find_by_prefix("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, key: &str) -> Option<&Node> {
        let mut node = &self.root;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}

fn collect(node: &Node, path: &mut String, found: &mut BTreeSet<String>) {
    if node.terminal {
        found.insert(path.clone());
    }
    for (c, child) in &node.children {
        path.push(*c);
        collect(child, path, found);
        path.pop();
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::build(iter)
    }
}
