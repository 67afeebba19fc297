//! List ordering
//!
//! Sort modes for orderable collections and the neighbour lookup used by
//! move-up / move-down.

use serde::{Deserialize, Serialize};

use crate::resource::Orderable;

/// How a list of orderable records is sorted for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSort {
    /// `order` ascending
    #[default]
    ByOrder,
    /// Active records first, then `order` ascending
    ActiveFirst,
}

/// Direction of a single reorder step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort records in place. The sort is stable, so records with equal keys
/// keep the order the server returned them in.
pub fn sort_records<T: Orderable>(records: &mut [T], sort: ListSort) {
    match sort {
        ListSort::ByOrder => records.sort_by_key(|r| r.order()),
        ListSort::ActiveFirst => records.sort_by_key(|r| (!r.is_active(), r.order())),
    }
}

/// Index of the neighbour a record at `index` swaps with, or `None` at the
/// boundary (or when `index` is already out of range).
pub fn neighbor_index(len: usize, index: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => {
            let next = index + 1;
            (next < len).then_some(next)
        }
    }
}
