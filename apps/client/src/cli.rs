use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "screener")]
#[command(about = "Upload resumes for scoring and browse the candidate list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Screening API base URL (overrides SCREENER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show candidates, optionally filtered by role
    List {
        /// Case-insensitive role substring
        #[arg(short, long, default_value = "")]
        role: String,
    },

    /// Delete a candidate by id
    Delete {
        id: i64,
    },

    /// Upload a resume (PDF or DOCX) and score it against a job description
    Upload {
        /// Path to the resume file
        #[arg(long)]
        resume: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Role to apply for; "custom" uses --custom-role instead
        #[arg(long)]
        role: String,

        #[arg(long, default_value = "")]
        custom_role: String,

        /// Job description text to match against
        #[arg(long)]
        job_desc: String,
    },

    /// Line-oriented session with live role filtering
    Interactive,
}
