//! Interactive task tracker entry point.
//!
//! # Responsibility
//! - Drive the five-action menu loop over a single owned `TaskStore`.
//! - Keep prompting and rendering out of the core crate.
//!
//! # Invariants
//! - The store instance is constructed here and owned by the loop; core
//!   exposes no process-wide state.
//! - Every store failure surfaces as a plain message; only an unreadable
//!   task file aborts startup.

use log::warn;
use std::io::{self, BufRead, Write};
use std::path::Path;
use taskdeck_core::{
    core_version, default_log_level, init_logging, JsonTaskArchive, StoreError, Task, TaskId,
    TaskStore,
};

/// Backing file, fixed in the process working directory.
const TASKS_FILE: &str = "tasks.json";
const LOG_DIR: &str = "logs";

const TABLE_WIDTH: usize = 120;
const TITLE_CLIP_CHARS: usize = 18;
const DESCRIPTION_CLIP_CHARS: usize = 28;

fn main() {
    if let Err(err) = init_logging(default_log_level(), Path::new(LOG_DIR)) {
        eprintln!("Warning: file logging disabled: {err}");
    }

    let mut store = match TaskStore::load(JsonTaskArchive::new(TASKS_FILE)) {
        Ok(store) => store,
        Err(StoreError::Archive(err)) if err.is_content_error() => {
            warn!("event=archive_recover module=cli status=fallback error={err}");
            eprintln!("Error loading task data. Starting with empty task list.");
            TaskStore::with_tasks(JsonTaskArchive::new(TASKS_FILE), Vec::new())
        }
        Err(err) => {
            eprintln!("Error: could not open task file: {err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();
        let Some(choice) = read_or_cancel(&mut input, "Enter your choice (1-5): ") else {
            break;
        };

        match choice.as_str() {
            "1" => add_task(&mut input, &mut store),
            "2" => list_tasks(store.list()),
            "3" => complete_task(&mut input, &mut store),
            "4" => delete_task(&mut input, &mut store),
            "5" => {
                println!("Exiting TaskDeck. Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please enter a number from 1 to 5."),
        }
    }
}

fn print_menu() {
    println!();
    println!("TASKDECK v{}", core_version());
    println!("1. Add Task");
    println!("2. List Tasks");
    println!("3. Mark Task as Complete");
    println!("4. Delete Task");
    println!("5. Exit");
}

fn add_task(input: &mut impl BufRead, store: &mut TaskStore<JsonTaskArchive>) {
    let Some(title) = read_or_cancel(input, "Enter task title: ") else {
        return;
    };
    let Some(description) = read_or_cancel(input, "Enter task description: ") else {
        return;
    };

    match store.add(&title, &description) {
        Ok(task) => println!("Task '{}' added successfully!", task.title),
        Err(err) => println!("Error: {err}"),
    }
}

fn list_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    println!();
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!(
        "{:<36} {:<20} {:<10} {:<20} {:<30}",
        "ID", "TITLE", "STATUS", "CREATED DATE", "DESCRIPTION"
    );
    println!("{}", "-".repeat(TABLE_WIDTH));

    for task in tasks {
        println!(
            "{:<36} {:<20} {:<10} {:<20} {:<30}",
            task.id,
            clip(&task.title, TITLE_CLIP_CHARS),
            task.status.as_str(),
            task.created_date_text(),
            clip(&task.description, DESCRIPTION_CLIP_CHARS),
        );
    }

    println!("{}\n", "=".repeat(TABLE_WIDTH));
}

fn complete_task(input: &mut impl BufRead, store: &mut TaskStore<JsonTaskArchive>) {
    let Some(id) = read_task_id(input, "Enter task ID to mark as complete: ") else {
        return;
    };

    match store.mark_complete(id) {
        Ok(task) => println!("Task '{}' marked as completed!", task.title),
        Err(StoreError::NotFound(_)) => println!("Task with ID {id} not found."),
        Err(err) => println!("Error: {err}"),
    }
}

fn delete_task(input: &mut impl BufRead, store: &mut TaskStore<JsonTaskArchive>) {
    let Some(id) = read_task_id(input, "Enter task ID to delete: ") else {
        return;
    };

    match store.delete(id) {
        Ok(task) => println!("Task '{}' deleted successfully!", task.title),
        Err(StoreError::NotFound(_)) => println!("Task with ID {id} not found."),
        Err(err) => println!("Error: {err}"),
    }
}

/// Prompts for a task id; empty input is a validation error, and input that
/// is not a well-formed id is reported the same way an unknown id would be.
fn read_task_id(input: &mut impl BufRead, label: &str) -> Option<TaskId> {
    let raw = read_or_cancel(input, label)?;
    if raw.is_empty() {
        println!("Error: Task ID cannot be empty.");
        return None;
    }
    match TaskId::parse_str(&raw) {
        Ok(id) => Some(id),
        Err(_) => {
            println!("Task with ID {raw} not found.");
            None
        }
    }
}

/// Prompts for one trimmed line; maps EOF to `None` and reports read errors.
fn read_or_cancel(input: &mut impl BufRead, label: &str) -> Option<String> {
    match prompt(input, label) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: failed to read input: {err}");
            None
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
