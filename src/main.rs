//! FileDeck CLI
//!
//! Command-line front end to the file API:
//! - Sign in, register, sign out
//! - List, upload and delete files
//! - Edit tags
//! - Generate share links and watch view counts

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedeck::config::generate_default_config;
use filedeck::*;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "filedeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload, tag and share media files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./filedeck.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Remove the stored session token
    Logout,

    /// List your files
    List,

    /// Upload an image or video (JPEG, PNG, GIF, MP4; 10MB max)
    Upload {
        path: PathBuf,
    },

    /// Add or remove a tag
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Delete a file
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a share link
    Share {
        id: String,
        /// Origin of the web app the link points at
        #[arg(long, default_value = "http://localhost:8080")]
        origin: String,
    },

    /// Show a file's view count
    Stats {
        id: String,
    },

    /// Poll a file's view count until Ctrl-C
    Watch {
        id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TagAction {
    Add { id: String, tag: String },
    Remove { id: String, tag: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);

    let session: SharedSession = Arc::new(FileSessionStore::new(&config.session.token_file));
    let api = HttpClient::new(&config.api, Arc::clone(&session))?;
    let notifier = Notifier::new();

    tracing::debug!("Using API at {}", api.base_url());

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let forms = AuthForms::new(&api, session, notifier.clone());
            let result = forms.submit_login(&Credentials::new(email, password)).await;
            finish(&notifier, result)?;
        }

        Commands::Register {
            email,
            password,
            confirm_password,
        } => {
            let forms = AuthForms::new(&api, session, notifier.clone());
            let form = Registration::new(email, password, confirm_password);
            let result = forms.submit_register(&form).await;
            finish(&notifier, result)?;
        }

        Commands::Logout => {
            session.clear()?;
            println!("Logged out");
        }

        Commands::List => {
            let dashboard = mount(api, session, notifier).await?;
            print_files(&dashboard.files());
        }

        Commands::Upload { path } => {
            let dashboard = mount(api, session, notifier.clone()).await?;
            let result = match UploadFile::from_path_with_policy(&path, dashboard.policy()).await {
                Ok(file) => dashboard.upload(file).await,
                Err(e @ ClientError::Validation(_)) => {
                    notifier.error("Error", &e.to_string());
                    Err(e)
                }
                Err(e) => {
                    notifier.show(Alert::upload_failed(&e));
                    Err(e)
                }
            };
            let record = finish(&notifier, result)?;
            println!("{}  {}", record.id, record.display_name());
        }

        Commands::Tag { action } => {
            let dashboard = mount(api, session, notifier.clone()).await?;
            let result = match &action {
                TagAction::Add { id, tag } => dashboard.add_tag(id, tag).await,
                TagAction::Remove { id, tag } => dashboard.remove_tag(id, tag).await,
            };
            let tags = finish(&notifier, result)?;
            println!("Tags: {}", format_tags(&tags));
        }

        Commands::Delete { id, yes } => {
            let dashboard = mount(api, session, notifier.clone()).await?;
            let approved = yes || confirm("Are you sure you want to delete this file?")?;
            let result = dashboard.delete(&id, || approved).await;
            if !finish(&notifier, result)? {
                println!("Cancelled");
            }
        }

        Commands::Share { id, origin } => {
            let dashboard = mount(api, session, notifier.clone()).await?;
            let result = dashboard.share(&id, &origin).await;
            let url = finish(&notifier, result)?;
            println!("{}", url);
            if let Some(file) = dashboard.file(&id) {
                println!("Views: {}", file.views);
            }
        }

        Commands::Stats { id } => {
            let views = api
                .view_count(&id)
                .await
                .with_context(|| format!("fetching view count for {}", id))?;
            println!("{}", views);
        }

        Commands::Watch { id } => {
            watch(api, id, config.polling.view_interval()).await?;
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("filedeck={}", config.logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the file list, failing when there is no usable session
async fn mount(
    api: HttpClient,
    session: SharedSession,
    notifier: Notifier,
) -> anyhow::Result<Dashboard<HttpClient>> {
    let dashboard = Dashboard::new(api, session, notifier.clone());
    let nav = finish(&notifier, dashboard.mount().await)?;
    if let Navigation::Redirect(route) = nav {
        anyhow::bail!("Not logged in ({}). Run `filedeck login` first.", route);
    }
    Ok(dashboard)
}

/// Print the alert the action left behind and convert its result
fn finish<T>(notifier: &Notifier, result: ClientResult<T>) -> anyhow::Result<T> {
    let alert = notifier.current();
    match result {
        Ok(value) => {
            if let Some(alert) = alert.filter(|a| !a.is_error()) {
                println!("{}", alert.message);
            }
            Ok(value)
        }
        Err(e) => match alert.filter(Alert::is_error) {
            Some(alert) => Err(anyhow::anyhow!("{}: {}", alert.title, alert.message)),
            None => Err(e.into()),
        },
    }
}

async fn watch(api: HttpClient, id: String, interval: std::time::Duration) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = ViewPoller::spawn(Arc::new(api), id, interval, tx);

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Some(update) => println!("{}  views={}", update.file_id, update.views),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.shutdown().await;
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

fn print_files(files: &[FileRecord]) {
    if files.is_empty() {
        println!("No files uploaded yet.");
        println!();
        println!("Upload your first file with:");
        println!("  filedeck upload ./photo.png");
        return;
    }

    println!(
        "{:<26} {:<28} {:<10} {:>6}  {}",
        "ID", "Name", "Size", "Views", "Tags"
    );
    println!("{}", "-".repeat(84));

    for file in files {
        println!(
            "{:<26} {:<28} {:<10} {:>6}  {}",
            file.id,
            truncate(file.display_name(), 28),
            file.formatted_size(),
            file.views,
            format_tags(&file.tags)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
