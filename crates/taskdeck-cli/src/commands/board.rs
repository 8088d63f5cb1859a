//! Task board commands.
//!
//! The board is seeded on every invocation and never written back, so
//! create/toggle/delete print the result of the change on the seed set.

use clap::{Args, Subcommand};
use taskdeck_core::{mock, NewTask, Priority, StatusFilter, TaskFilter};

use super::{date_or_today, print_json, CmdResult};

#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive text to look for in title or description
    #[arg(long, default_value = "")]
    search: String,
    /// Status filter: all, pending, in-progress or completed
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

impl From<FilterArgs> for TaskFilter {
    fn from(args: FilterArgs) -> Self {
        TaskFilter {
            search: args.search,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List tasks matching the filter
    List(FilterArgs),
    /// Show tasks bucketed into pending / in-progress / completed columns
    Columns(FilterArgs),
    /// Create a task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Estimated time, free text (e.g. "2 hours")
        #[arg(long, default_value = "")]
        estimate: String,
        /// Category
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Advance a task to its next status
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: BoardAction) -> CmdResult {
    let mut board = mock::board();

    match action {
        BoardAction::List(filter) => print_json(&board.filter(&filter.into())),
        BoardAction::Columns(filter) => {
            let columns = board.columns(&filter.into());
            print_json(&columns)
        }
        BoardAction::Create {
            title,
            description,
            priority,
            due,
            estimate,
            category,
        } => {
            let due_date = due.as_deref().map(|d| date_or_today(Some(d))).transpose()?;
            let task = board.create(NewTask {
                title,
                description,
                priority,
                due_date,
                estimated_time: estimate,
                category,
            })?;
            print_json(task)
        }
        BoardAction::Toggle { id } => {
            let status = board.toggle_status(&id)?;
            print_json(&serde_json::json!({ "id": id, "status": status }))
        }
        BoardAction::Delete { id } => {
            let removed = board.delete(&id)?;
            eprintln!("Task deleted: {}", removed.title);
            print_json(&board.tasks())
        }
    }
}
