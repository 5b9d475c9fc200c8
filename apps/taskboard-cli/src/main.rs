//! Taskboard CLI
//!
//! Runs the page controllers against a taskboard server and prints what the
//! page would show.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskboard_core::date_field::due_date_input;
use taskboard_core::{
    ClientConfig, NameAutocomplete, NameField, NotificationPanel, PanelEvent, PanelView,
    RefreshOutcome, SuggestOutcome, TaskboardClient, TaskboardError,
};

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Taskboard page controllers")]
struct Cli {
    /// Config file (defaults to ~/.taskboard/client.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server origin, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    url: Option<String>,

    /// Session user
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the notification dropdown and print its entries
    Notifications {
        /// Print the dropdown markup instead of a list
        #[arg(long)]
        html: bool,
    },
    /// Type into a name field and print the suggestions offered
    Suggest {
        partial: String,
        #[arg(long, default_value = "assignee", value_parser = parse_field)]
        field: NameField,
    },
    /// Print the due-date input as initialized today
    DueDate,
}

fn parse_field(s: &str) -> Result<NameField, String> {
    NameField::parse(s).ok_or_else(|| format!("unknown field {:?} (expected assignee or assigner)", s))
}

fn load_config(cli: &Cli) -> Result<ClientConfig, TaskboardError> {
    let file = cli
        .config
        .clone()
        .or_else(|| ClientConfig::standard_path().filter(|path| path.exists()));
    resolve_config(cli, file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `file`, then `env`, then the command-line flags
fn resolve_config(
    cli: &Cli,
    file: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, TaskboardError> {
    let mut config = match file {
        Some(path) => {
            tracing::debug!("Loading client config from {:?}", path);
            ClientConfig::load_from_file(path)?
        }
        None => ClientConfig::default(),
    };
    config.apply_overrides(env)?;
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(user) = &cli.user {
        config.session_user = Some(user.clone());
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::DueDate = cli.command {
        println!("{}", due_date_input().to_html());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let client = TaskboardClient::new(&config)?;
    tracing::debug!("Using server {}", client.base_url());

    match cli.command {
        Command::Notifications { html } => {
            let panel = NotificationPanel::new(client, PanelView::new())
                .with_timeout(config.timeout());
            let outcome = panel.handle(PanelEvent::Open).await;
            let view = panel.snapshot();

            if html {
                println!("{}", view.to_html());
            } else {
                for entry in view.entries() {
                    println!("{}  {}  ({})", entry.timestamp, entry.text, entry.href);
                }
                if let Some(notice) = view.notice() {
                    println!("{}", notice);
                }
            }

            if let Some(RefreshOutcome::Failed(err)) = outcome {
                tracing::warn!("{}", err);
                std::process::exit(1);
            }
        }
        Command::Suggest { partial, field } => {
            let autocomplete =
                NameAutocomplete::new(field, client).with_timeout(config.timeout());
            let outcome = autocomplete.on_input(&partial).await;
            let list = autocomplete.snapshot();

            for name in list.suggestions() {
                println!("{}", name);
            }
            if let Some(notice) = list.notice() {
                eprintln!("{}", notice);
            }

            if let SuggestOutcome::Failed(err) = outcome {
                tracing::warn!("{}", err);
                std::process::exit(1);
            }
        }
        Command::DueDate => {}
    }

    Ok(())
}
