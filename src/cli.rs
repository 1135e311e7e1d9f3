use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "enrollments", version, about = "Manage student course enrollments")]
pub struct Cli {
    /// Base URL of the enrollment backend (e.g., "http://localhost:3001")
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to config file (overrides default search)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive enrollment screen (default)
    Ui,
    /// Print all enrollments
    List,
    /// Enroll a student in a course
    Enroll {
        /// Student id
        #[arg(short, long)]
        student: i64,

        /// Course id
        #[arg(short, long)]
        course: i64,
    },
    /// Change the student or course of an existing enrollment
    Update {
        /// Enrollment id
        id: i64,

        /// New student id (keeps the current one if omitted)
        #[arg(short, long)]
        student: Option<i64>,

        /// New course id (keeps the current one if omitted)
        #[arg(short, long)]
        course: Option<i64>,
    },
    /// Delete an enrollment
    Delete {
        /// Enrollment id
        id: i64,
    },
}

impl Cli {
    /// The subcommand to run; the interactive screen when none is given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Ui)
    }
}
