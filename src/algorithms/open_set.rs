use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::grid::Cell;

/// How entries with equal f-scores are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Prefer the larger g-score, then the earlier insertion.
    #[default]
    HigherG,
    /// Prefer the earlier insertion only.
    Fifo,
}

/// f64 with a total order.
#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A live entry popped from the open set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpenEntry {
    pub cell: Cell,
    pub g: f64,
    pub f: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueEntry {
    f: FloatOrd,
    g: FloatOrd,
    seq: u64,
    cell: Cell,
    tie_break: TieBreak,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest f first.
        let by_f = other.f.cmp(&self.f);
        let by_g = match self.tie_break {
            TieBreak::HigherG => self.g.cmp(&other.g),
            TieBreak::Fifo => Ordering::Equal,
        };
        by_f.then(by_g).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells keyed by f-score.
///
/// Updating a cell pushes a fresh entry and stamps the cell with a new
/// sequence number; older entries for that cell are discarded when they
/// surface.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<QueueEntry>,
    live: FxHashMap<Cell, u64>,
    next_seq: u64,
    tie_break: TieBreak,
    stale: usize,
}

impl OpenSet {
    pub fn new(tie_break: TieBreak) -> Self {
        OpenSet {
            tie_break,
            ..OpenSet::default()
        }
    }

    /// Inserts `cell`, or replaces its priority if it is already open.
    pub fn push_or_update(&mut self, cell: Cell, g: f64, f: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(cell, seq);
        self.heap.push(QueueEntry {
            f: FloatOrd(f),
            g: FloatOrd(g),
            seq,
            cell,
            tie_break: self.tie_break,
        });
    }

    /// Removes and returns the live entry with the smallest f-score.
    pub fn pop_min(&mut self) -> Option<OpenEntry> {
        while let Some(entry) = self.heap.pop() {
            if self.live.get(&entry.cell) == Some(&entry.seq) {
                self.live.remove(&entry.cell);
                return Some(OpenEntry {
                    cell: entry.cell,
                    g: entry.g.0,
                    f: entry.f.0,
                });
            }
            self.stale += 1;
        }
        None
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.live.contains_key(&cell)
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Superseded entries discarded so far.
    pub fn stale_discarded(&self) -> usize {
        self.stale
    }
}
