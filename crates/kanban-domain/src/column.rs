use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::task::TaskStatus;

/// One of the board's three fixed columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    /// Key used for this column in the persisted `order` object.
    pub fn key(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inProgress",
            ColumnId::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    /// Status a task takes when it is placed in this column.
    pub fn status(self) -> TaskStatus {
        match self {
            ColumnId::Todo => TaskStatus::Todo,
            ColumnId::InProgress => TaskStatus::InProgress,
            ColumnId::Done => TaskStatus::Done,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&['-', '_'][..], "").as_str() {
            "todo" => Ok(ColumnId::Todo),
            "inprogress" => Ok(ColumnId::InProgress),
            "done" => Ok(ColumnId::Done),
            _ => Err(format!(
                "unknown column '{}' (expected todo, in-progress or done)",
                s
            )),
        }
    }
}

/// One value per column.
///
/// Serializes as an object with exactly the keys `todo`, `inProgress` and
/// `done`; any other key is rejected on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnMap<T> {
    pub todo: T,
    pub in_progress: T,
    pub done: T,
}

impl<T> ColumnMap<T> {
    pub fn from_fn(mut f: impl FnMut(ColumnId) -> T) -> Self {
        Self {
            todo: f(ColumnId::Todo),
            in_progress: f(ColumnId::InProgress),
            done: f(ColumnId::Done),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &T)> {
        ColumnId::ALL.into_iter().map(move |column| (column, &self[column]))
    }

    pub fn map<U>(&self, mut f: impl FnMut(ColumnId, &T) -> U) -> ColumnMap<U> {
        ColumnMap::from_fn(|column| f(column, &self[column]))
    }
}

impl<T> Index<ColumnId> for ColumnMap<T> {
    type Output = T;

    fn index(&self, column: ColumnId) -> &T {
        match column {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }
}

impl<T> IndexMut<ColumnId> for ColumnMap<T> {
    fn index_mut(&mut self, column: ColumnId) -> &mut T {
        match column {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }
}
