use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use taskmate::interpreter::{Interpreter, LoadReport};
use taskmate::log::SessionLogger;
use taskmate::storage::{format_line, Storage};
use taskmate::task::{Moment, Span, TaskKind};

fn tasks_path(dir: &Path) -> PathBuf {
    dir.join("data").join("tasks.txt")
}

fn start(dir: &Path) -> (Interpreter, LoadReport) {
    let storage = Storage::open(tasks_path(dir)).expect("open storage");
    Interpreter::start(storage, None).expect("start session")
}

fn saved(dir: &Path) -> String {
    fs::read_to_string(tasks_path(dir)).expect("read save file")
}

/// The save file must equal the in-memory list rendered with fresh ordinals.
fn assert_mirrors_memory(interp: &Interpreter, dir: &Path) {
    let expected: String = interp
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}\n", format_line(i + 1, task)))
        .collect();
    assert_eq!(saved(dir), expected);
}

fn moment(s: &str) -> Moment {
    Moment::parse(s).expect("valid moment")
}

#[test]
fn test_todo_is_added_and_saved() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());

    interp.handle("todo read book");

    let task = interp.tasks().get(0).expect("one task");
    assert_eq!(interp.tasks().len(), 1);
    assert_eq!(task.description(), "read book");
    assert!(!task.is_done());
    assert_eq!(*task.kind(), TaskKind::ToDo);
    assert_eq!(saved(temp.path()), "1. [T][ ] read book\n");
}

#[test]
fn test_deadline_is_saved_with_by_marker() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());

    interp.handle("deadline submit /by 2024-12-31");

    let task = interp.tasks().get(0).expect("one task");
    assert_eq!(
        *task.kind(),
        TaskKind::Deadline {
            by: moment("2024-12-31")
        }
    );
    assert_eq!(saved(temp.path()), "1. [D][ ] submit (by: 2024-12-31)\n");
}

#[test]
fn test_mark_then_delete_single_task() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());
    interp.handle("todo read book");

    interp.handle("mark 1");
    assert!(interp.tasks().get(0).expect("task").is_done());
    assert_eq!(saved(temp.path()), "1. [T][X] read book\n");

    interp.handle("delete 1");
    assert!(interp.tasks().is_empty());
    assert_eq!(saved(temp.path()), "");
}

#[test]
fn test_mixed_event_is_rejected_without_changes() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());
    interp.handle("todo read book");
    let before = saved(temp.path());

    let response = interp.handle("event trip /from 2024-06-01 /to 2024-06-10T10:00:00");

    assert!(response.message.starts_with("Error: "));
    assert_eq!(interp.tasks().len(), 1);
    assert_eq!(saved(temp.path()), before);
}

#[test]
fn test_find_keeps_store_order() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());
    interp.handle("todo read book");
    interp.handle("todo write code");
    interp.handle("todo read news");

    let found: Vec<&str> = interp
        .tasks()
        .find("read")
        .map(|(_, task)| task.description())
        .collect();
    assert_eq!(found, vec!["read book", "read news"]);

    let response = interp.handle("find read");
    assert_eq!(
        response.message,
        "Displaying items that match your query\n1. [T][ ] read book\n3. [T][ ] read news"
    );
}

#[test]
fn test_out_of_range_indices_leave_store_and_file_alone() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());
    interp.handle("todo a");
    interp.handle("deadline b /by 2024-01-01");
    let before_tasks = interp.tasks().clone();
    let before_file = saved(temp.path());

    for line in [
        "mark 0",
        "mark 3",
        "unmark 0",
        "unmark 3",
        "delete 0",
        "delete 3",
        "update 0 description x",
        "update 3 description x",
    ] {
        let response = interp.handle(line);
        assert!(response.message.starts_with("Error: "), "{} -> {}", line, response.message);
        assert_eq!(*interp.tasks(), before_tasks, "{}", line);
        assert_eq!(saved(temp.path()), before_file, "{}", line);
    }
}

#[test]
fn test_reload_reproduces_live_list() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, _) = start(temp.path());

    for line in [
        "todo read book",
        "deadline submit report /by 2024-12-31T23:59:00",
        "event trip /from 2024-06-01 /to 2024-06-10",
        "event standup (daily) /from 2024-06-03T09:00:00 /to 2024-06-03T09:15:00",
        "todo call (by: friday) mom",
        "mark 2",
        "delete 1",
        "update 2 to 2024-06-12",
        "update 1 description submit final report",
        "todo water plants",
        "unmark 1",
        "mark 4",
    ] {
        interp.handle(line);
        assert_mirrors_memory(&interp, temp.path());
    }

    let live = interp.tasks().clone();
    drop(interp);

    let (reloaded, report) = start(temp.path());
    assert_eq!(report, LoadReport { loaded: live.len(), skipped: 0 });
    assert_eq!(*reloaded.tasks(), live);

    let event = reloaded.tasks().get(1).expect("event");
    assert_eq!(
        *event.kind(),
        TaskKind::Event {
            span: Span::new(moment("2024-06-01"), moment("2024-06-12")).expect("span")
        }
    );
    assert_eq!(
        reloaded.tasks().get(3).expect("todo").description(),
        "call (by: friday) mom"
    );
}

#[test]
fn test_malformed_lines_are_skipped_and_dropped_on_next_change() {
    let temp = TempDir::new().expect("temp dir");
    let path = tasks_path(temp.path());
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(
        &path,
        "1. [T][ ] keep me\n2. [D][ ] no date (by: someday)\n3. [E][X] trip (from: 2024-06-01 to: 2024-06-02)\nnot a task\n",
    )
    .expect("seed save file");

    let logs = temp.path().join("logs");
    let storage = Storage::open(&path).expect("open storage");
    let (mut interp, report) =
        Interpreter::start(storage, Some(SessionLogger::new(&logs))).expect("start");

    assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
    // Nothing is written until the first change
    assert!(saved(temp.path()).contains("not a task"));

    interp.handle("list");
    assert!(saved(temp.path()).contains("not a task"));

    interp.handle("todo fresh");
    assert_eq!(
        saved(temp.path()),
        "1. [T][ ] keep me\n2. [E][X] trip (from: 2024-06-01 to: 2024-06-02)\n3. [T][ ] fresh\n"
    );

    let log = fs::read_to_string(logs.join("taskmate.log")).expect("log");
    assert!(log.contains("skipped save line 2"));
    assert!(log.contains("skipped save line 4"));
    assert!(log.contains("loaded 2 tasks"));
}

#[test]
fn test_line_that_is_not_utf8_is_skipped_not_fatal() {
    let temp = TempDir::new().expect("temp dir");
    let path = tasks_path(temp.path());
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, b"1. [T][ ] good\n2. [T][ ] caf\xE9\n3. [T][X] also good\n")
        .expect("seed save file");

    let logs = temp.path().join("logs");
    let storage = Storage::open(&path).expect("open storage");
    let (mut interp, report) =
        Interpreter::start(storage, Some(SessionLogger::new(&logs))).expect("start");

    assert_eq!(report, LoadReport { loaded: 2, skipped: 1 });
    assert_eq!(interp.tasks().get(0).expect("first").description(), "good");

    interp.handle("todo fresh");
    assert_mirrors_memory(&interp, temp.path());
    assert_eq!(
        saved(temp.path()),
        "1. [T][ ] good\n2. [T][X] also good\n3. [T][ ] fresh\n"
    );

    let log = fs::read_to_string(logs.join("taskmate.log")).expect("log");
    assert!(log.contains("skipped save line 2: not valid UTF-8"));
}

#[test]
fn test_saved_event_with_reversed_range_survives_changes() {
    let temp = TempDir::new().expect("temp dir");
    let path = tasks_path(temp.path());
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(
        &path,
        "1. [E][ ] trip (from: 2024-06-10 to: 2024-06-01)\n2. [T][ ] a\n",
    )
    .expect("seed save file");

    let (mut interp, report) = start(temp.path());
    assert_eq!(report, LoadReport { loaded: 2, skipped: 0 });

    interp.handle("todo b");
    interp.handle("mark 2");
    assert_eq!(
        saved(temp.path()),
        "1. [E][ ] trip (from: 2024-06-10 to: 2024-06-01)\n2. [T][X] a\n3. [T][ ] b\n"
    );

    // New events still have to run forwards
    let response = interp.handle("event back /from 2024-06-10 /to 2024-06-01");
    assert!(response.message.starts_with("Error: "));
    assert_eq!(interp.tasks().len(), 3);
}

#[test]
fn test_missing_save_file_starts_empty() {
    let temp = TempDir::new().expect("temp dir");
    let (mut interp, report) = start(temp.path());

    assert_eq!(report, LoadReport::default());
    assert!(tasks_path(temp.path()).exists());
    assert_eq!(interp.handle("list").message, "List is empty! Add tasks to display");
}
