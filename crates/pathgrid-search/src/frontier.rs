//! The open set: nodes discovered but not yet expanded.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::graph::NodeId;

/// Ordering key: priority first, then insertion sequence.
type Key = (OrderedFloat<f32>, u64);

/// Priority set of node ids with decrease-key.
///
/// Each node is present at most once. Equal priorities are served in
/// insertion order; re-keying a member counts as a fresh insertion.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    // PriorityQueue pops the highest priority, hence `Reverse`.
    queue: PriorityQueue<NodeId, Reverse<Key>>,
    next_seq: u64,
}

impl Frontier {
    /// Create a frontier sized for a graph of `n` nodes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            queue: PriorityQueue::with_capacity(n),
            next_seq: 0,
        }
    }

    /// Insert `id` with priority `f`, or re-key it if already present.
    ///
    /// Returns `true` if the node was not a member before.
    pub fn insert(&mut self, id: NodeId, f: f32) -> bool {
        let key = (OrderedFloat(f), self.next_seq);
        self.next_seq += 1;
        self.queue.push(id, Reverse(key)).is_none()
    }

    /// Remove and return the node with the lowest priority.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        self.queue.pop().map(|(id, _)| id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.queue.get_priority(&id).is_some()
    }

    /// Current priority of `id`, if it is a member.
    #[inline]
    pub fn priority(&self, id: NodeId) -> Option<f32> {
        self.queue.get_priority(&id).map(|&Reverse((f, _))| f.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Members in pop order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut members: Vec<(Key, NodeId)> = self
            .queue
            .iter()
            .map(|(&id, &Reverse(key))| (key, id))
            .collect();
        members.sort_unstable();
        members.into_iter().map(|(_, id)| id)
    }
}
