//! Command dispatch over one task session.
//!
//! The [`Interpreter`] owns the in-memory task list and the save file. Each
//! input line is parsed, applied to memory, persisted, and answered before the
//! next one is read.

use std::io;

use crate::command::{apply_update, parse_command, Command, CommandError, Field};
use crate::log::SessionLogger;
use crate::storage::Storage;
use crate::task::{IndexError, Task, TaskList};

pub const GREETING: &str = "Hello! I'm Taskmate\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

const LIST_HEADER: &str = "Displaying list items";
const LIST_EMPTY: &str = "List is empty! Add tasks to display";
const FIND_HEADER: &str = "Displaying items that match your query";
const FIND_EMPTY: &str = "Unable to find any matches for your query!";

/// Outcome of loading the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Reply to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    /// The session should end after this reply.
    pub exit: bool,
}

impl Response {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }

    fn error(err: &CommandError) -> Self {
        Self::reply(format!("Error: {}", err))
    }
}

/// How a successful command touched the store.
enum Change {
    None,
    Appended,
    Rewritten,
}

/// Session context: task store, save file and optional diagnostics log.
pub struct Interpreter {
    tasks: TaskList,
    storage: Storage,
    logger: Option<SessionLogger>,
    /// The save file mirrors `tasks` exactly.
    in_sync: bool,
}

impl Interpreter {
    /// Load every saved task and build a session around them.
    ///
    /// Blank lines are ignored. Lines that fail to parse are skipped and
    /// logged; the first mutation afterwards rewrites the file without them.
    pub fn start(storage: Storage, logger: Option<SessionLogger>) -> io::Result<(Self, LoadReport)> {
        let lines = storage.load_all()?;
        let mut report = LoadReport::default();
        let mut tasks = TaskList::new();

        for (i, line) in lines.iter().enumerate() {
            let parsed = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => Task::from_save_line(line).map_err(|e| format!("{} ({})", e, line)),
                Err(e) => Err(format!(
                    "not valid UTF-8 ({})",
                    String::from_utf8_lossy(e.as_bytes())
                )),
            };
            match parsed {
                Ok(task) => {
                    tasks.add(task);
                    report.loaded += 1;
                }
                Err(reason) => {
                    report.skipped += 1;
                    if let Some(logger) = &logger {
                        let _ = logger.warn(&format!("skipped save line {}: {}", i + 1, reason));
                    }
                }
            }
        }

        if let Some(logger) = &logger {
            let _ = logger.info(&format!(
                "loaded {} tasks from {} ({} skipped)",
                report.loaded,
                storage.path().display(),
                report.skipped
            ));
        }

        let interp = Self {
            tasks,
            storage,
            logger,
            in_sync: report.skipped == 0,
        };
        Ok((interp, report))
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Handle one line of user input.
    pub fn handle(&mut self, line: &str) -> Response {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                self.log_info(&format!("rejected `{}`: {}", line.trim(), e));
                return Response::error(&e);
            }
        };

        let keyword = command.keyword();
        match self.execute(command) {
            Ok((mut response, change)) => {
                self.log_info(&format!("{} ok", keyword));
                if let Err(e) = self.persist(change) {
                    self.in_sync = false;
                    if let Some(logger) = &self.logger {
                        let _ = logger.error(&format!(
                            "could not write {}: {}",
                            self.storage.path().display(),
                            e
                        ));
                    }
                    response.message.push_str(&format!(
                        "\nWarning: could not save to {}: {}",
                        self.storage.path().display(),
                        e
                    ));
                }
                response
            }
            Err(e) => {
                self.log_info(&format!("{} rejected: {}", keyword, e));
                Response::error(&e)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<(Response, Change), CommandError> {
        match command {
            Command::Todo { description } => self.add(Task::todo(description)?),
            Command::Deadline { description, by } => self.add(Task::deadline(description, by)?),
            Command::Event { description, span } => self.add(Task::event(description, span)?),
            Command::Mark { ordinal } => {
                let task = self.set_done(ordinal, true)?;
                Ok((
                    Response::reply(format!("Task successfully marked as done:\n{}", task)),
                    Change::Rewritten,
                ))
            }
            Command::Unmark { ordinal } => {
                let task = self.set_done(ordinal, false)?;
                Ok((
                    Response::reply(format!("Task successfully marked as NOT done:\n{}", task)),
                    Change::Rewritten,
                ))
            }
            Command::Delete { ordinal } => {
                let index = self.tasks.resolve(ordinal)?;
                let removed = self.tasks.remove(index)?;
                Ok((
                    Response::reply(format!(
                        "Task successfully deleted:\n{}\nTask counter: {}",
                        removed,
                        self.tasks.len()
                    )),
                    Change::Rewritten,
                ))
            }
            Command::Update { ordinal, field, value } => self.update(ordinal, field, &value),
            Command::Find { query } => Ok((self.find(&query), Change::None)),
            Command::List => Ok((self.list(), Change::None)),
            Command::Bye => Ok((
                Response {
                    message: FAREWELL.to_string(),
                    exit: true,
                },
                Change::None,
            )),
        }
    }

    fn add(&mut self, task: Task) -> Result<(Response, Change), CommandError> {
        let count = self.tasks.add(task);
        let added = self
            .tasks
            .get(count - 1)
            .map(Task::to_line)
            .unwrap_or_default();
        Ok((
            Response::reply(format!(
                "Task successfully added:\n{}\nTask counter: {}",
                added, count
            )),
            Change::Appended,
        ))
    }

    fn set_done(&mut self, ordinal: i64, done: bool) -> Result<String, CommandError> {
        let index = self.tasks.resolve(ordinal)?;
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(CommandError::Index(IndexError { ordinal, len }))?;
        if done {
            task.mark_done();
        } else {
            task.mark_not_done();
        }
        Ok(task.to_line())
    }

    fn update(&mut self, ordinal: i64, field: Field, value: &str) -> Result<(Response, Change), CommandError> {
        let index = self.tasks.resolve(ordinal)?;
        let len = self.tasks.len();
        let current = self
            .tasks
            .get(index)
            .ok_or(CommandError::Index(IndexError { ordinal, len }))?;
        let updated = apply_update(current, field, value)?;
        let line = updated.to_line();
        self.tasks.replace(index, updated)?;
        Ok((
            Response::reply(format!("Task successfully updated:\n{}", line)),
            Change::Rewritten,
        ))
    }

    fn list(&self) -> Response {
        if self.tasks.is_empty() {
            return Response::reply(LIST_EMPTY);
        }
        let mut message = String::from(LIST_HEADER);
        for (i, task) in self.tasks.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", i + 1, task));
        }
        Response::reply(message)
    }

    fn find(&self, query: &str) -> Response {
        let mut matches = self.tasks.find(query).peekable();
        if matches.peek().is_none() {
            return Response::reply(FIND_EMPTY);
        }
        let mut message = String::from(FIND_HEADER);
        for (i, task) in matches {
            message.push_str(&format!("\n{}. {}", i + 1, task));
        }
        Response::reply(message)
    }

    fn persist(&mut self, change: Change) -> io::Result<()> {
        match change {
            Change::None => return Ok(()),
            Change::Appended if self.in_sync => {
                let count = self.tasks.len();
                match self.tasks.get(count.saturating_sub(1)) {
                    Some(task) => self.storage.append_one(task, count)?,
                    None => self.storage.rewrite_all(self.tasks.as_slice())?,
                }
            }
            Change::Appended | Change::Rewritten => {
                self.storage.rewrite_all(self.tasks.as_slice())?;
            }
        }
        self.in_sync = true;
        Ok(())
    }

    fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.info(message);
        }
    }

    /// Record the end of the session in the diagnostics log.
    pub fn finish(&self) {
        self.log_info("session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn start_in(dir: &Path) -> Interpreter {
        let storage = Storage::open(dir.join("tasks.txt")).unwrap();
        Interpreter::start(storage, None).unwrap().0
    }

    fn saved(interp: &Interpreter) -> String {
        fs::read_to_string(interp.storage().path()).unwrap()
    }

    #[test]
    fn test_add_reports_counter_and_appends() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());

        let response = interp.handle("todo read book");
        assert_eq!(
            response.message,
            "Task successfully added:\n[T][ ] read book\nTask counter: 1"
        );
        assert!(!response.exit);

        interp.handle("deadline submit /by 2024-12-31");
        assert_eq!(
            saved(&interp),
            "1. [T][ ] read book\n2. [D][ ] submit (by: 2024-12-31)\n"
        );
    }

    #[test]
    fn test_mark_and_unmark_rewrite_file() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        interp.handle("todo a");
        interp.handle("todo b");

        let response = interp.handle("mark 2");
        assert_eq!(response.message, "Task successfully marked as done:\n[T][X] b");
        assert_eq!(saved(&interp), "1. [T][ ] a\n2. [T][X] b\n");

        let response = interp.handle("unmark 2");
        assert_eq!(
            response.message,
            "Task successfully marked as NOT done:\n[T][ ] b"
        );
        assert_eq!(saved(&interp), "1. [T][ ] a\n2. [T][ ] b\n");
    }

    #[test]
    fn test_delete_renumbers() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        interp.handle("todo a");
        interp.handle("todo b");
        interp.handle("todo c");

        let response = interp.handle("delete 2");
        assert_eq!(
            response.message,
            "Task successfully deleted:\n[T][ ] b\nTask counter: 2"
        );
        assert_eq!(saved(&interp), "1. [T][ ] a\n2. [T][ ] c\n");
    }

    #[test]
    fn test_out_of_range_index_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        interp.handle("todo a");
        let before = saved(&interp);

        for line in ["mark 5", "unmark 0", "delete -1", "update 9 description x"] {
            let response = interp.handle(line);
            assert!(response.message.starts_with("Error: invalid task number"), "{}", line);
        }

        assert_eq!(interp.tasks().len(), 1);
        assert_eq!(saved(&interp), before);
    }

    #[test]
    fn test_update_fields() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        interp.handle("event trip /from 2024-06-01 /to 2024-06-10");

        let response = interp.handle("update 1 to 2024-06-12");
        assert_eq!(
            response.message,
            "Task successfully updated:\n[E][ ] trip (from: 2024-06-01 to: 2024-06-12)"
        );

        let response = interp.handle("update 1 date 2024-06-12");
        assert_eq!(response.message, "Error: event tasks have no `date` field");
        assert_eq!(
            saved(&interp),
            "1. [E][ ] trip (from: 2024-06-01 to: 2024-06-12)\n"
        );
    }

    #[test]
    fn test_list_and_find() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        assert_eq!(interp.handle("list").message, LIST_EMPTY);

        interp.handle("todo read book");
        interp.handle("todo buy milk");
        interp.handle("todo return book");

        assert_eq!(
            interp.handle("list").message,
            "Displaying list items\n1. [T][ ] read book\n2. [T][ ] buy milk\n3. [T][ ] return book"
        );
        assert_eq!(
            interp.handle("find book").message,
            "Displaying items that match your query\n1. [T][ ] read book\n3. [T][ ] return book"
        );
        assert_eq!(interp.handle("find Book").message, FIND_EMPTY);
    }

    #[test]
    fn test_bye_exits() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        let response = interp.handle("bye");
        assert_eq!(response.message, FAREWELL);
        assert!(response.exit);
    }

    #[test]
    fn test_rejections_do_not_touch_file() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());

        assert!(interp.handle("blah").message.starts_with("Error: unknown command"));
        assert!(interp
            .handle("deadline submit /by tomorrow")
            .message
            .starts_with("Error: invalid date"));
        assert!(interp
            .handle("event x /from 2024-01-01 /to 2024-01-01T10:00:00")
            .message
            .starts_with("Error: "));

        assert!(interp.tasks().is_empty());
        assert_eq!(saved(&interp), "");
    }

    #[test]
    fn test_start_skips_malformed_lines_and_rewrites_on_first_add() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.txt");
        fs::write(
            &path,
            "1. [T][X] read book\n\ngarbage\n2. [D][ ] submit (by: 2024-12-31)\n3. [Q][ ] what\n",
        )
        .unwrap();

        let logs = temp.path().join("logs");
        let storage = Storage::open(&path).unwrap();
        let (mut interp, report) =
            Interpreter::start(storage, Some(SessionLogger::new(&logs))).unwrap();

        assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
        assert_eq!(interp.tasks().len(), 2);

        interp.handle("todo new");
        assert_eq!(
            saved(&interp),
            "1. [T][X] read book\n2. [D][ ] submit (by: 2024-12-31)\n3. [T][ ] new\n"
        );

        let log = fs::read_to_string(logs.join("taskmate.log")).unwrap();
        assert!(log.contains("WARN | skipped save line 3"));
        assert!(log.contains("WARN | skipped save line 5"));
    }

    #[test]
    fn test_failed_write_warns_and_keeps_memory() {
        let temp = TempDir::new().unwrap();
        let mut interp = start_in(temp.path());
        interp.handle("todo a");

        // Replace the save file with a directory so writes fail
        let path = interp.storage().path().to_path_buf();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let response = interp.handle("todo b");
        assert!(response.message.starts_with("Task successfully added:"));
        assert!(response.message.contains("\nWarning: could not save"));
        assert_eq!(interp.tasks().len(), 2);

        fs::remove_dir(&path).unwrap();
        interp.handle("todo c");
        assert_eq!(saved(&interp), "1. [T][ ] a\n2. [T][ ] b\n3. [T][ ] c\n");
    }
}
