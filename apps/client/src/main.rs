mod api_client;
mod busy;
mod cli;
mod config;
mod debounce;
mod errors;
mod feed;
mod form;
mod models;
mod render;
mod session;
mod state;
mod upload;
mod view;

#[cfg(test)]
mod testing;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::HttpScreeningApi;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::models::SelectedFile;
use crate::state::ClientState;
use crate::view::{CandidateView, TerminalView};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_url(cli.api_url.clone());

    // Logs go to stderr so the candidate list on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting screener client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let api = Arc::new(HttpScreeningApi::new(&config.api_url, config.http_timeout)?);
    let view = Arc::new(TerminalView::new(cli.yes));
    let state = ClientState::new(config, api, view.clone());

    let succeeded = match cli.command {
        Commands::List { role } => {
            view.form().filter = role.clone();
            state.feed.load_feed(&role).await
        }
        Commands::Delete { id } => state.feed.delete_candidate(id).await,
        Commands::Upload {
            resume,
            name,
            email,
            role,
            custom_role,
            job_desc,
        } => {
            let file = match SelectedFile::load(&resume).await {
                Ok(file) => file,
                Err(e) => {
                    view.notify_error(&e.user_message());
                    return Ok(ExitCode::FAILURE);
                }
            };

            let (missing, snapshot) = {
                let mut form = view.form();
                form.select_file(file);
                form.name = name;
                form.email = email;
                form.select_role(&role);
                form.custom_role = custom_role;
                form.job_desc = job_desc;
                (form.missing_required(), form.snapshot())
            };

            match missing {
                Some(field) => {
                    view.notify_error(&format!("Please fill in the {field} field"));
                    false
                }
                None => state.upload.submit(snapshot).await.is_some(),
            }
        }
        Commands::Interactive => {
            session::run(state, view.clone()).await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
