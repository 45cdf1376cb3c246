// File: ./src/model/display.rs
use crate::model::item::{Task, TaskKind};
use crate::model::parser::format_date;
use std::fmt;

pub trait TaskDisplay {
    fn type_symbol(&self) -> String;
    fn checkbox_symbol(&self) -> &'static str;
    fn dates_suffix(&self) -> String;
}

impl TaskDisplay for Task {
    fn type_symbol(&self) -> String {
        format!("[{}]", self.tag())
    }

    fn checkbox_symbol(&self) -> &'static str {
        if self.is_done { "[X]" } else { "[ ]" }
    }

    fn dates_suffix(&self) -> String {
        match self.kind {
            TaskKind::Todo => String::new(),
            TaskKind::Deadline { due } => format!(" (by: {})", format_date(due)),
            TaskKind::Event { start, end } => {
                format!(" (from: {} to: {})", format_date(start), format_date(end))
            }
        }
    }
}

/// `[D][ ] submit (by: 2024-05-01)`
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}{}",
            self.type_symbol(),
            self.checkbox_symbol(),
            self.description,
            self.dates_suffix()
        )
    }
}
