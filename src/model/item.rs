// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What sort of task this is, together with the dates that sort carries.
///
/// An `Event` is expected to satisfy `start <= end`; the command layer and
/// `TaskList::add_event` enforce that, the type itself does not.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskKind {
    Todo,
    Deadline { due: NaiveDate },
    Event { start: NaiveDate, end: NaiveDate },
}

impl TaskKind {
    /// One-letter tag used both on screen and in the task file.
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub is_done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self::with_kind(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, due: NaiveDate) -> Self {
        Self::with_kind(description, TaskKind::Deadline { due })
    }

    pub fn event(description: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::with_kind(description, TaskKind::Event { start, end })
    }

    fn with_kind(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            is_done: false,
            kind,
        }
    }

    pub fn tag(&self) -> char {
        self.kind.tag()
    }

    pub fn set_done(&mut self, done: bool) {
        self.is_done = done;
    }

    pub fn matches(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }
}
