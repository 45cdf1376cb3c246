// Manages the plain-text task file.
//
// One record per task, one field per line:
//   tag (T/D/E), completion flag (true/false), description,
//   then the due date (D) or the start and end dates (E).
// Descriptions are written verbatim, so a newline inside one breaks the file.
use crate::error::{StorageError, StorageResult};
use crate::model::parser::{format_date, parse_date};
use crate::model::{Task, TaskKind};
use crate::store::TaskList;
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_TASK_FILENAME: &str = "tasks.txt";

/// Result of reading the task file.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tasks: TaskList,
    /// One entry per record that was skipped.
    pub warnings: Vec<String>,
}

pub struct LocalStorage;

impl LocalStorage {
    /// Reads the task file, creating an empty one when it does not exist yet.
    ///
    /// A record with an unknown tag is skipped with a warning. A bad date, a
    /// bad completion flag or a truncated record fails the whole load; the
    /// file itself is never modified here.
    pub fn load(path: &Path) -> StorageResult<LoadOutcome> {
        Self::ensure_parent(path)?;
        let outcome = Self::with_lock(path, || {
            fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)?;
            let content = fs::read_to_string(path)?;
            Self::parse_records(&content)
        })?;
        log::info!(
            "Loaded {} tasks from {} ({} records skipped)",
            outcome.tasks.len(),
            path.display(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    /// Replaces the task file with the current list.
    ///
    /// The new content goes to a temporary file that is then renamed over the
    /// old one, so a failed write leaves the previous file in place.
    pub fn write(path: &Path, tasks: &TaskList) -> StorageResult<()> {
        Self::ensure_parent(path)?;
        let body = Self::to_records_string(tasks);
        Self::with_lock(path, || Ok::<_, StorageError>(Self::atomic_write(path, &body)?))?;
        log::info!("Saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }

    pub fn to_records_string(tasks: &TaskList) -> String {
        let mut out = String::new();
        for task in tasks {
            out.push(task.tag());
            out.push('\n');
            out.push_str(if task.is_done { "true" } else { "false" });
            out.push('\n');
            out.push_str(&task.description);
            out.push('\n');
            match task.kind {
                TaskKind::Todo => {}
                TaskKind::Deadline { due } => {
                    out.push_str(&format_date(due));
                    out.push('\n');
                }
                TaskKind::Event { start, end } => {
                    out.push_str(&format_date(start));
                    out.push('\n');
                    out.push_str(&format_date(end));
                    out.push('\n');
                }
            }
        }
        out
    }

    pub fn parse_records(content: &str) -> StorageResult<LoadOutcome> {
        let mut reader = RecordReader::new(content);
        let mut outcome = LoadOutcome::default();

        while !reader.at_end() {
            let record_line = reader.line_no();
            let tag = reader.take("type tag")?;
            if !matches!(tag, "T" | "D" | "E") {
                // A damaged record may still carry date lines; resume at the
                // next line that looks like the start of a record.
                let skipped_to = reader.skip_to_next_record();
                let warning = format!(
                    "line {}: unrecognized task type {:?}, lines {}-{} skipped",
                    record_line, tag, record_line, skipped_to
                );
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
                continue;
            }
            let flag = reader.take("completion flag")?;
            let description = reader.take("description")?;

            let kind = match tag {
                "D" => TaskKind::Deadline {
                    due: reader.take_date("due date")?,
                },
                "E" => {
                    let start = reader.take_date("start date")?;
                    let end = reader.take_date("end date")?;
                    TaskKind::Event { start, end }
                }
                _ => TaskKind::Todo,
            };

            let is_done = match flag {
                "true" => true,
                "false" => false,
                other => {
                    return Err(StorageError::CorruptData {
                        line: record_line + 1,
                        reason: format!("completion flag must be true or false, got {:?}", other),
                    });
                }
            };

            outcome.tasks.add(Task {
                description: description.to_string(),
                is_done,
                kind,
            });
        }
        Ok(outcome)
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T, E>(file_path: &Path, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<io::Error>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    fn ensure_parent(path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }
}

struct RecordReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    /// One past the last non-blank line.
    end: usize,
}

impl<'a> RecordReader<'a> {
    fn new(content: &'a str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        Self {
            lines,
            pos: 0,
            end,
        }
    }

    /// True once only blank lines remain.
    fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// Advances to the next `T`/`D`/`E` line followed by a completion flag,
    /// or to the end of the content. Returns the last line number passed over.
    fn skip_to_next_record(&mut self) -> usize {
        while self.pos < self.end && !self.record_starts_here() {
            self.pos += 1;
        }
        self.pos
    }

    fn record_starts_here(&self) -> bool {
        matches!(self.lines[self.pos], "T" | "D" | "E")
            && matches!(self.lines.get(self.pos + 1), Some(&"true") | Some(&"false"))
    }

    /// 1-based number of the next line to be read.
    fn line_no(&self) -> usize {
        self.pos + 1
    }

    fn take(&mut self, what: &str) -> StorageResult<&'a str> {
        let line = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| StorageError::CorruptData {
                line: self.line_no(),
                reason: format!("record ends before its {}", what),
            })?;
        self.pos += 1;
        Ok(line)
    }

    fn take_date(&mut self, what: &str) -> StorageResult<NaiveDate> {
        let line = self.line_no();
        let text = self.take(what)?;
        parse_date(text).map_err(|_| StorageError::CorruptData {
            line,
            reason: format!("{} {:?} is not a yyyy-MM-dd date", what, text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_is_skipped_with_warning() {
        let content = "T\nfalse\nbuy milk\nX\ntrue\nmystery\nD\ntrue\nsubmit\n2024-05-01\n";
        let outcome = LocalStorage::parse_records(content).unwrap();

        assert_eq!(outcome.tasks.len(), 2);
        assert_eq!(outcome.tasks.get(1).unwrap().description, "buy milk");
        assert_eq!(outcome.tasks.get(2).unwrap().description, "submit");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("line 4:"));
    }

    #[test]
    fn damaged_dated_record_does_not_misalign_the_rest() {
        let content = "Q\nfalse\nmystery\n2024-05-01\nT\nfalse\nbuy milk\n\
                       Z\ntrue\ntrip\n2024-05-01\n2024-05-03\nE\ntrue\ntrip\n2024-05-01\n2024-05-03\n";
        let outcome = LocalStorage::parse_records(content).unwrap();

        assert_eq!(outcome.tasks.len(), 2);
        assert_eq!(outcome.tasks.get(1).unwrap().description, "buy milk");
        assert_eq!(outcome.tasks.get(2).unwrap().tag(), 'E');
        assert_eq!(
            outcome.warnings,
            vec![
                "line 1: unrecognized task type \"Q\", lines 1-4 skipped".to_string(),
                "line 8: unrecognized task type \"Z\", lines 8-12 skipped".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_record_at_end_of_file() {
        let content = "T\nfalse\nbuy milk\nQ\nfalse\nmystery\n2024-05-01\n\n";
        let outcome = LocalStorage::parse_records(content).unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn truncated_unknown_record_is_still_skipped() {
        let content = "T\nfalse\nbuy milk\nQ\n";
        let outcome = LocalStorage::parse_records(content).unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec!["line 4: unrecognized task type \"Q\", lines 4-4 skipped".to_string()]
        );
    }

    #[test]
    fn blank_content_is_an_empty_list() {
        for content in ["", "\n", "  \n\n\t\n"] {
            let outcome = LocalStorage::parse_records(content).unwrap();
            assert!(outcome.tasks.is_empty());
            assert!(outcome.warnings.is_empty());
        }
    }

    #[test]
    fn bad_date_fails_whole_load() {
        let content = "T\nfalse\nok\nD\nfalse\nsubmit\n2024-13-01\n";
        match LocalStorage::parse_records(content) {
            Err(StorageError::CorruptData { line, .. }) => assert_eq!(line, 7),
            other => panic!("expected corrupt data, got {:?}", other),
        }
    }

    #[test]
    fn bad_flag_fails_whole_load() {
        let content = "T\nyes\nbuy milk\n";
        assert!(matches!(
            LocalStorage::parse_records(content),
            Err(StorageError::CorruptData { line: 2, .. })
        ));
    }

    #[test]
    fn truncated_record_fails() {
        let content = "E\nfalse\ntrip\n2024-05-01\n";
        assert!(matches!(
            LocalStorage::parse_records(content),
            Err(StorageError::CorruptData { line: 5, .. })
        ));
    }

    #[test]
    fn trailing_blank_lines_end_the_file() {
        let content = "T\ntrue\nbuy milk\n\n\n";
        let outcome = LocalStorage::parse_records(content).unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert!(outcome.tasks.get(1).unwrap().is_done);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn lock_path_keeps_extension() {
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/tasks.txt")),
            PathBuf::from("/tmp/tasks.txt.lock")
        );
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/tasks")),
            PathBuf::from("/tmp/tasks.lock")
        );
    }
}
