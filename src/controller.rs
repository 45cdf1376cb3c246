// File: src/controller.rs
//! Command dispatch for a session.
//!
//! `CommandParser` turns one input line into a `Command`; `Session` runs it
//! against the task list and the task file and always answers with a string.
//! No error gets past `Session::handle`: every failure becomes the reply.
use crate::error::{CommandError, StorageResult};
use crate::model::parser::{parse_date, parse_index, split_args};
use crate::storage::{LoadOutcome, LocalStorage};
use crate::store::TaskList;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

const WRONG_ARG_COUNT: &str = "Give the correct number of arguments! This should be simple by now.";
const EMPTY_NAME: &str = "Give a non-empty name for the task, you stupid!";

/// Command keyword at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    List,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    Save,
    Help,
    Bye,
}

/// Verbs that take arguments, in the order a line's prefix is tried.
/// `unmark` never starts with `mark`, so the order only matters for odd
/// lines like `deadlinedelete`.
const PREFIX_VERBS: [Verb; 7] = [
    Verb::Mark,
    Verb::Unmark,
    Verb::Find,
    Verb::Todo,
    Verb::Deadline,
    Verb::Event,
    Verb::Delete,
];

impl Verb {
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// How many space-separated parts the line is cut into, verb included.
    /// The last part takes the rest of the line.
    pub fn parts(self) -> usize {
        match self {
            Verb::List | Verb::Save | Verb::Help | Verb::Bye => 1,
            Verb::Todo | Verb::Mark | Verb::Unmark | Verb::Delete | Verb::Find => 2,
            Verb::Deadline => 3,
            Verb::Event => 4,
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Verb::List => "list                      show everything",
            Verb::Todo => "todo DESCRIPTION          add a plain task",
            Verb::Deadline => "deadline NAME DATE        add a task due on DATE",
            Verb::Event => "event NAME START END      add an event spanning START..END",
            Verb::Mark => "mark N                    mark task N as done",
            Verb::Unmark => "unmark N                  mark task N as not done",
            Verb::Delete => "delete N                  remove task N",
            Verb::Find => "find KEYWORD              show tasks containing KEYWORD",
            Verb::Save => "save                      write the list to disk",
            Verb::Help => "help                      this text",
            Verb::Bye => "bye                       leave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Save,
    Help,
    Bye,
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Find(String),
    Todo(String),
    Deadline {
        description: String,
        due: NaiveDate,
    },
    Event {
        description: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        // Argument-less verbs must be the whole line; the others only need
        // to start it, so `marked 1` is `mark 1` and `todoX y` adds `y`.
        let verb = Verb::iter()
            .filter(|v| v.parts() == 1)
            .find(|v| input == v.keyword())
            .or_else(|| {
                PREFIX_VERBS
                    .into_iter()
                    .find(|v| input.starts_with(v.keyword()))
            })
            .ok_or(CommandError::NotUnderstood)?;
        let words = split_args(input, verb.parts());

        match verb {
            Verb::List => Ok(Command::List),
            Verb::Save => Ok(Command::Save),
            Verb::Help => Ok(Command::Help),
            Verb::Bye => Ok(Command::Bye),
            Verb::Mark | Verb::Unmark => {
                let arg = Self::required(&words, "Give a number you silly goose, stupid!")?;
                let index = parse_index(arg)?;
                Ok(if verb == Verb::Mark {
                    Command::Mark(index)
                } else {
                    Command::Unmark(index)
                })
            }
            Verb::Delete => {
                if words.len() < verb.parts() {
                    return Err(CommandError::InputFormat(WRONG_ARG_COUNT));
                }
                Ok(Command::Delete(parse_index(words[1])?))
            }
            Verb::Find => {
                let keyword =
                    Self::required(&words, "Give a non-empty search query, you stupid!")?;
                Ok(Command::Find(keyword.to_string()))
            }
            Verb::Todo => {
                let description = Self::required(&words, EMPTY_NAME)?;
                Ok(Command::Todo(description.to_string()))
            }
            Verb::Deadline => {
                if words.len() < verb.parts() {
                    return Err(CommandError::InputFormat(WRONG_ARG_COUNT));
                }
                let due = parse_date(words[2])?;
                Ok(Command::Deadline {
                    description: Self::non_empty(words[1])?,
                    due,
                })
            }
            Verb::Event => {
                if words.len() < verb.parts() {
                    return Err(CommandError::InputFormat(WRONG_ARG_COUNT));
                }
                let start = parse_date(words[2])?;
                let end = parse_date(words[3])?;
                Ok(Command::Event {
                    description: Self::non_empty(words[1])?,
                    start,
                    end,
                })
            }
        }
    }

    /// The single argument of a two-part verb, which must be present and non-empty.
    fn required<'a>(words: &[&'a str], message: &'static str) -> Result<&'a str, CommandError> {
        match words.get(1) {
            Some(&arg) if !arg.is_empty() => Ok(arg),
            _ => Err(CommandError::InputFormat(message)),
        }
    }

    fn non_empty(description: &str) -> Result<String, CommandError> {
        if description.is_empty() {
            return Err(CommandError::InputFormat(EMPTY_NAME));
        }
        Ok(description.to_string())
    }
}

/// One user's conversation with the assistant.
///
/// Owns the task list and knows where to save it. The front end feeds it
/// lines through `handle` and stops once `is_exit_requested` turns true.
#[derive(Debug)]
pub struct Session {
    tasks: TaskList,
    task_path: PathBuf,
    save_on_exit: bool,
    exit_requested: bool,
}

impl Session {
    pub fn new(tasks: TaskList, task_path: impl Into<PathBuf>) -> Self {
        Self {
            tasks,
            task_path: task_path.into(),
            save_on_exit: false,
            exit_requested: false,
        }
    }

    /// Loads the task file at `task_path` and starts a session on it.
    /// Skipped records are returned as warnings.
    pub fn open(task_path: impl Into<PathBuf>) -> StorageResult<(Self, Vec<String>)> {
        let task_path = task_path.into();
        let LoadOutcome { tasks, warnings } = LocalStorage::load(&task_path)?;
        Ok((Self::new(tasks, task_path), warnings))
    }

    pub fn with_save_on_exit(mut self, save_on_exit: bool) -> Self {
        self.save_on_exit = save_on_exit;
        self
    }

    /// Runs one input line and returns the reply.
    pub fn handle(&mut self, input: &str) -> String {
        log::debug!("Handling input: {:?}", input);
        match CommandParser::parse(input).and_then(|command| self.execute(command)) {
            Ok(reply) => reply,
            Err(e) => {
                log::debug!("Rejected {:?}: {:?}", input, e);
                e.to_string()
            }
        }
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn task_path(&self) -> &Path {
        &self.task_path
    }

    pub fn save(&self) -> Result<(), CommandError> {
        LocalStorage::write(&self.task_path, &self.tasks)?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        let reply = match command {
            Command::List => self.tasks.render(),
            Command::Find(keyword) => self.tasks.find_matches(&keyword),
            Command::Help => Self::help_text(),
            Command::Save => {
                self.save()?;
                "Saved. Happy now?".to_string()
            }
            Command::Bye => {
                // A failed save keeps the session alive so nothing is lost.
                if self.save_on_exit {
                    self.save()?;
                }
                self.exit_requested = true;
                "Bye. Don't come back too soon.".to_string()
            }
            Command::Mark(index) => {
                self.tasks.mark(index)?;
                "Ok it's done. What else do you want...".to_string()
            }
            Command::Unmark(index) => {
                self.tasks.unmark(index)?;
                "Ok it's done. What else do you want...".to_string()
            }
            Command::Delete(index) => {
                self.tasks.delete(index)?;
                "Ok it's gone. What else do you want...".to_string()
            }
            Command::Todo(description) => {
                self.tasks.add_todo(&description);
                "k added...".to_string()
            }
            Command::Deadline { description, due } => {
                self.tasks.add_deadline(&description, due);
                "k".to_string()
            }
            Command::Event {
                description,
                start,
                end,
            } => {
                self.tasks.add_event(&description, start, end)?;
                "k".to_string()
            }
        };
        Ok(reply)
    }

    fn help_text() -> String {
        let mut out = String::from("Fine. Here's what I understand:");
        for verb in Verb::iter() {
            out.push_str("\n  ");
            out.push_str(verb.usage());
        }
        out.push_str("\nDates are yyyy-MM-dd. Names for deadlines and events are one word.");
        out
    }
}
