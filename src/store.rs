// File: src/store.rs
use crate::error::CommandError;
use crate::model::Task;
use chrono::NaiveDate;
use std::fmt::Write;

pub const EMPTY_LIST_MESSAGE: &str = "Nothing on the list. Lazy, huh?";
pub const NO_MATCH_MESSAGE: &str = "Nothing matches that. Typical.";

/// The session's tasks, in insertion order.
///
/// Every index taken or shown by this type is 1-based; position `n` is
/// always the n-th task, so removing one renumbers everything after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn add_todo(&mut self, description: &str) {
        self.add(Task::todo(description));
    }

    pub fn add_deadline(&mut self, description: &str, due: NaiveDate) {
        self.add(Task::deadline(description, due));
    }

    /// Appends an event, refusing one that ends before it starts.
    pub fn add_event(
        &mut self,
        description: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), CommandError> {
        if end < start {
            return Err(CommandError::LogicalOrder);
        }
        self.add(Task::event(description, start, end));
        Ok(())
    }

    pub fn mark(&mut self, index: i64) -> Result<&Task, CommandError> {
        self.set_done(index, true)
    }

    pub fn unmark(&mut self, index: i64) -> Result<&Task, CommandError> {
        self.set_done(index, false)
    }

    fn set_done(&mut self, index: i64, done: bool) -> Result<&Task, CommandError> {
        let pos = self.position(index)?;
        self.tasks[pos].set_done(done);
        Ok(&self.tasks[pos])
    }

    /// Removes the task at `index` and hands it back.
    pub fn delete(&mut self, index: i64) -> Result<Task, CommandError> {
        let pos = self.position(index)?;
        Ok(self.tasks.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|pos| self.tasks.get(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Numbered rendering of every task, one per line.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return EMPTY_LIST_MESSAGE.to_string();
        }
        Self::render_numbered(self.numbered())
    }

    /// Rendering of the tasks whose description contains `keyword`.
    ///
    /// Matches keep their position in the full list as their number.
    pub fn find_matches(&self, keyword: &str) -> String {
        let mut hits = self.numbered().filter(|(_, t)| t.matches(keyword)).peekable();
        if hits.peek().is_none() {
            return NO_MATCH_MESSAGE.to_string();
        }
        Self::render_numbered(hits)
    }

    fn numbered(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, t)| (i + 1, t))
    }

    fn render_numbered<'a>(rows: impl Iterator<Item = (usize, &'a Task)>) -> String {
        let mut out = String::new();
        for (n, task) in rows {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "{}.{}", n, task);
        }
        out
    }

    fn position(&self, index: i64) -> Result<usize, CommandError> {
        usize::try_from(index)
            .ok()
            .filter(|i| (1..=self.tasks.len()).contains(i))
            .map(|i| i - 1)
            .ok_or(CommandError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
