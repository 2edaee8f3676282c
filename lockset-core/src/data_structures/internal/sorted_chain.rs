use std::fmt;

use crate::error::LockSetError;

/// Key held by the head sentinel. Smaller than any legal key.
pub const HEAD_KEY: i32 = i32::MIN;

/// Key held by the tail sentinel. Larger than any legal key.
pub const TAIL_KEY: i32 = i32::MAX;

type Link = Option<Box<ChainNode>>;

/// Returns `true` if `key` is one of the sentinel guard values.
#[inline]
pub fn is_reserved(key: i32) -> bool {
    key == HEAD_KEY || key == TAIL_KEY
}

struct ChainNode {
    key: i32,
    next: Link,
}

impl ChainNode {
    fn boxed(key: i32, next: Link) -> Box<Self> {
        Box::new(ChainNode { key, next })
    }
}

///
/// Sorted singly-linked chain bounded by two sentinel nodes.
///
// =============================================================================
// CHAIN LAYOUT
// =============================================================================
//
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  3   │───►│  5   │───►│ TAIL │───► None
// │ MIN  │    │      │    │      │    │ MAX  │
// └──────┘    └──────┘    └──────┘    └──────┘
//
// INVARIANTS:
// 1. Keys strictly ascending from HEAD to TAIL
// 2. No duplicate keys
// 3. HEAD and TAIL are never unlinked and never change their keys
//
// Every node is owned by its predecessor's `next` link; HEAD is owned by the
// chain. Because TAIL holds MAX, a search for any legal key stops on or
// before TAIL, so traversal never runs off the end.
//
// The chain does no synchronization of its own. Callers hold `&mut` for
// `add`/`remove` and `&` for reads, which the lock strategies hand out
// through their guards.
//
pub struct SortedChain {
    head: Box<ChainNode>,
}

impl SortedChain {
    /// Create a chain holding only the two sentinels.
    pub(crate) fn new() -> Self {
        let tail = ChainNode::boxed(TAIL_KEY, None);
        SortedChain {
            head: ChainNode::boxed(HEAD_KEY, Some(tail)),
        }
    }

    /// Returns the link holding the first node whose key is `>= key`.
    ///
    /// The link always holds a node: for a legal key the walk stops at the
    /// tail sentinel at the latest.
    fn seek_mut(&mut self, key: i32) -> &mut Link {
        let mut link = &mut self.head.next;
        while link.as_ref().is_some_and(|node| node.key < key) {
            if let Some(node) = link {
                link = &mut node.next;
            }
        }
        link
    }

    /// Returns the first node whose key is `>= key`.
    fn seek(&self, key: i32) -> &ChainNode {
        let mut current: &ChainNode = &self.head;
        while current.key < key {
            match current.next.as_deref() {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Insert `key`. Returns `false` if it is already present.
    pub(crate) fn add(&mut self, key: i32) -> bool {
        debug_assert!(!is_reserved(key));

        let link = self.seek_mut(key);
        if link.as_ref().is_some_and(|current| current.key == key) {
            return false;
        }

        let current = link.take();
        *link = Some(ChainNode::boxed(key, current));
        true
    }

    /// Unlink and drop `key`. Returns `false` if it is absent.
    pub(crate) fn remove(&mut self, key: i32) -> bool {
        debug_assert!(!is_reserved(key));

        let link = self.seek_mut(key);
        if !link.as_ref().is_some_and(|current| current.key == key) {
            return false;
        }

        if let Some(mut removed) = link.take() {
            *link = removed.next.take();
        }
        true
    }

    /// Check whether `key` is present.
    pub fn contains(&self, key: i32) -> bool {
        !is_reserved(key) && self.seek(key).key == key
    }

    /// Number of keys, sentinels excluded.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head
            .next
            .as_ref()
            .is_none_or(|first| first.key == TAIL_KEY)
    }

    /// Iterate over the keys in ascending order, sentinels excluded.
    pub fn iter(&self) -> Keys<'_> {
        Keys {
            current: self.head.next.as_deref(),
        }
    }

    /// Collects all keys into a Vec.
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Walk the whole chain and check the sentinel and ordering invariants.
    pub fn validate(&self) -> Result<(), LockSetError> {
        if self.head.key != HEAD_KEY {
            return Err(LockSetError::BrokenInvariant(format!(
                "head sentinel holds {} instead of {}",
                self.head.key, HEAD_KEY
            )));
        }

        let mut pred: &ChainNode = &self.head;
        while let Some(current) = pred.next.as_deref() {
            if current.key <= pred.key {
                return Err(LockSetError::BrokenInvariant(format!(
                    "key {} follows key {}",
                    current.key, pred.key
                )));
            }
            pred = current;
        }

        if pred.key != TAIL_KEY {
            return Err(LockSetError::BrokenInvariant(format!(
                "chain ends at {} instead of the tail sentinel",
                pred.key
            )));
        }
        Ok(())
    }
}

impl Drop for SortedChain {
    // Unlink iteratively; the default recursive drop of `Box` links would
    // overflow the stack on long chains.
    fn drop(&mut self) {
        let mut link = self.head.next.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl fmt::Debug for SortedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a SortedChain {
    type Item = i32;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of a [`SortedChain`].
pub struct Keys<'a> {
    current: Option<&'a ChainNode>,
}

impl Iterator for Keys<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        if node.key == TAIL_KEY {
            self.current = None;
            return None;
        }
        self.current = node.next.as_deref();
        Some(node.key)
    }
}
