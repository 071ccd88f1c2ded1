//! Interactive line-oriented session.
//!
//! `filter <text>` replays the text one keystroke at a time through the filter
//! debouncer, so a burst of typing turns into a single reload.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::models::SelectedFile;
use crate::state::ClientState;
use crate::view::{CandidateView, TerminalView};

pub const HELP: &str = "\
Commands:
  filter [text]          set the role filter (debounced reload)
  refresh                reload the list with the current filter
  delete <id>            delete a candidate
  file <path>            choose a resume file
  drop <path> [path...]  drop files onto the upload area (first one is kept)
  name|email|job <text>  fill an upload field
  role <value>           choose a role; \"custom\" enables the custom role field
  custom <text>          fill the custom role field
  status                 show the upload form
  submit                 upload the resume
  help                   show this text
  quit                   leave";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Filter(String),
    Refresh,
    Delete(i64),
    File(PathBuf),
    Drop(Vec<PathBuf>),
    Name(String),
    Email(String),
    JobDesc(String),
    Role(String),
    CustomRole(String),
    Status,
    Submit,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "filter" | "f" => SessionCommand::Filter(rest.to_string()),
            "refresh" | "r" => SessionCommand::Refresh,
            "delete" | "rm" => {
                let id = rest
                    .parse::<i64>()
                    .map_err(|_| format!("'{rest}' is not a candidate id"))?;
                SessionCommand::Delete(id)
            }
            "file" => SessionCommand::File(PathBuf::from(required(verb, rest)?)),
            "drop" => {
                required(verb, rest)?;
                SessionCommand::Drop(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "name" => SessionCommand::Name(required(verb, rest)?),
            "email" => SessionCommand::Email(required(verb, rest)?),
            "job" => SessionCommand::JobDesc(required(verb, rest)?),
            "role" => SessionCommand::Role(required(verb, rest)?),
            "custom" => SessionCommand::CustomRole(rest.to_string()),
            "status" => SessionCommand::Status,
            "submit" => SessionCommand::Submit,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
        };
        Ok(Some(command))
    }
}

fn required(verb: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("'{verb}' needs a value"))
    } else {
        Ok(rest.to_string())
    }
}

/// Every prefix of `text`, as a user typing it would produce them.
fn keystrokes(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    text.char_indices()
        .map(|(i, c)| text[..i + c.len_utf8()].to_string())
        .collect()
}

pub async fn run(state: ClientState, view: Arc<TerminalView>) -> Result<()> {
    info!("Interactive session against {}", state.config.api_url);
    println!("{HELP}");
    state.feed.load_feed("").await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                view.notify_error(&message);
                continue;
            }
        };
        debug!("session command: {command:?}");

        match command {
            SessionCommand::Filter(text) => {
                for typed in keystrokes(&text) {
                    view.form().filter = typed.clone();
                    state.filter.call(typed);
                }
            }
            SessionCommand::Refresh => {
                let filter = state.feed.current_filter();
                state.feed.load_feed(&filter).await;
            }
            SessionCommand::Delete(id) => {
                state.feed.delete_candidate(id).await;
            }
            SessionCommand::File(path) => match SelectedFile::load(&path).await {
                Ok(file) => view.form().select_file(file),
                Err(e) => view.notify_error(&e.user_message()),
            },
            SessionCommand::Drop(paths) => {
                let mut files = Vec::with_capacity(paths.len());
                for path in &paths {
                    match SelectedFile::load(path).await {
                        Ok(file) => files.push(file),
                        Err(e) => view.notify_error(&e.user_message()),
                    }
                }
                view.form().drop_files(files);
            }
            SessionCommand::Name(v) => view.form().name = v,
            SessionCommand::Email(v) => view.form().email = v,
            SessionCommand::JobDesc(v) => view.form().job_desc = v,
            SessionCommand::Role(v) => view.form().select_role(&v),
            SessionCommand::CustomRole(v) => view.form().custom_role = v,
            SessionCommand::Status => println!("{}", describe_form(&view)),
            SessionCommand::Submit => {
                let (missing, snapshot) = {
                    let form = view.form();
                    (form.missing_required(), form.snapshot())
                };
                match missing {
                    Some(field) => view.notify_error(&format!("Please fill in the {field} field")),
                    None => {
                        state.upload.submit(snapshot).await;
                    }
                }
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }

    state.filter.cancel();
    Ok(())
}

fn describe_form(view: &TerminalView) -> String {
    let form = view.form();
    let mut lines = vec![
        format!("Resume: {}", display_or_dash(form.selected_file_label())),
        format!("Name: {}", display_or_dash(&form.name)),
        format!("Email: {}", display_or_dash(&form.email)),
        format!("Role: {}", display_or_dash(form.role())),
    ];
    if form.custom_role_visible() {
        let marker = if form.custom_role_required() { " (required)" } else { "" };
        lines.push(format!(
            "Custom role{marker}: {}",
            display_or_dash(&form.custom_role)
        ));
    }
    lines.push(format!("Job description: {}", display_or_dash(&form.job_desc)));
    lines.push(format!("Filter: {}", display_or_dash(&form.filter)));
    lines.join("\n")
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
