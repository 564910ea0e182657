use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::state::{ProcId, Process};
use crate::scheduler::QueueOrder;

/// Heap position of a queued process: the ordering key, then the insertion
/// sequence number so that equal keys leave in FIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank<K> {
    pub key: K,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-queue of process ids ordered by a pluggable [`QueueOrder`].
///
/// The key is computed once when a process is pushed; a process has to be
/// popped and pushed again for a changed key to take effect.
#[derive(Debug)]
pub struct ProcQueue<O: QueueOrder> {
    order: O,
    entries: KeyedPriorityQueue<ProcId, Rank<O::Key>>,
    next_seq: u64,
}

impl<O: QueueOrder> ProcQueue<O> {
    pub fn new(order: O) -> Self {
        Self {
            order,
            entries: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, id: ProcId, proc: &Process) {
        let rank = Rank {
            key: self.order.key(proc),
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let previous = self.entries.push(id, rank);
        debug_assert!(previous.is_none(), "Process {id:?} queued twice");
    }

    pub fn pop(&mut self) -> Option<ProcId> {
        self.entries.pop().map(|(id, _)| id)
    }

    pub fn peek(&self) -> Option<ProcId> {
        self.entries.peek().map(|(id, _)| *id)
    }

    pub fn contains(&self, id: ProcId) -> bool {
        self.entries.get_priority(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
