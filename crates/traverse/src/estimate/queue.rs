//! Pending-box queue: subdivision kept as data, not recursion.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::types::QueueOrder;
use crate::geom::Box2;

/// A box awaiting classification.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cell {
    pub bx: Box2,
    pub depth: u32,
    seq: u64,
}

impl Cell {
    #[inline]
    fn key(&self) -> (u32, u64) {
        (self.depth, self.seq)
    }
}

/// Heap entry; the max-heap pops the smallest `(depth, seq)`.
#[derive(Debug)]
struct Shallowest(Cell);

impl PartialEq for Shallowest {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}
impl Eq for Shallowest {}
impl PartialOrd for Shallowest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Shallowest {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.key().cmp(&self.0.key())
    }
}

#[derive(Debug)]
enum Store {
    Fifo(VecDeque<Cell>),
    Largest(BinaryHeap<Shallowest>),
}

#[derive(Debug)]
pub(crate) struct Pending {
    store: Store,
    next_seq: u64,
}

impl Pending {
    pub fn new(order: QueueOrder) -> Self {
        let store = match order {
            QueueOrder::Fifo => Store::Fifo(VecDeque::new()),
            QueueOrder::LargestFirst => Store::Largest(BinaryHeap::new()),
        };
        Self { store, next_seq: 0 }
    }

    pub fn push(&mut self, bx: Box2, depth: u32) {
        let cell = Cell {
            bx,
            depth,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        match &mut self.store {
            Store::Fifo(q) => q.push_back(cell),
            Store::Largest(h) => h.push(Shallowest(cell)),
        }
    }

    pub fn pop(&mut self) -> Option<Cell> {
        match &mut self.store {
            Store::Fifo(q) => q.pop_front(),
            Store::Largest(h) => h.pop().map(|s| s.0),
        }
    }

    pub fn len(&self) -> usize {
        match &self.store {
            Store::Fifo(q) => q.len(),
            Store::Largest(h) => h.len(),
        }
    }
}
