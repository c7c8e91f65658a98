use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nexusiq::cli::{self, OutputFormat};
use nexusiq::config;
use nexusiq::data::Datasets;
use nexusiq::view::ViewState;
use nexusiq::web::{self, Dashboard};

#[derive(Debug, Parser)]
#[command(name = "nexusiq")]
#[command(about = "Observability dashboard for the Nexus query optimizer")]
struct App {
    /// Directory holding data.json, adoption.json and feedback.json
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the web dashboard
    Serve {
        /// Address to bind (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Don't open the browser automatically
        #[arg(long)]
        no_open: bool,
    },
    /// Headline numbers from every dataset plus the health scores
    Overview {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Query performance, user adoption and content health scores
    Scores {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Query rewriter effectiveness, latency and answer quality
    Rewriter {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Case-insensitive substring match on query text
        #[arg(long)]
        search: Option<String>,
        /// Only queries that matched this entity
        #[arg(long)]
        entity: Option<String>,
    },
    /// Active users, engagement and top users
    Adoption {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// User feedback totals and the filtered feedback list
    Feedback {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Case-insensitive substring match on comment text
        #[arg(long)]
        search: Option<String>,
        /// Category to keep, or "all"
        #[arg(long)]
        category: Option<String>,
        /// thumbsUp, thumbsDown, or all
        #[arg(long = "type")]
        polarity: Option<String>,
    },
    /// Zero-result queries and recommended content fixes
    Gaps {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Case-insensitive substring match on query text
        #[arg(long)]
        search: Option<String>,
        /// yes, no, or all
        #[arg(long)]
        rewritten: Option<String>,
    },
    /// Check configuration and dataset status
    Check,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Create a default config file at ~/.nexusiq/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value (e.g. `nexusiq config set server.addr 0.0.0.0:9747`)
    Set {
        /// Dotted key path (e.g. scoring.latency_weight)
        key: String,
        /// Value to set
        value: String,
    },
    /// Reset config to defaults
    Reset,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NEXUSIQ_LOG")
                .unwrap_or_else(|_| EnvFilter::new("nexusiq=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let app = App::parse();

    if let Commands::Config { action } = &app.command {
        return match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(*force),
            ConfigAction::Set { key, value } => cli::run_config_set(key, value),
            ConfigAction::Reset => cli::run_config_reset(),
        };
    }

    let mut cfg = config::load();
    if let Some(dir) = app.data_dir {
        cfg.data.dir = dir;
    }
    if let Commands::Check = app.command {
        return cli::run_check(&Datasets::inspect(&cfg.data), &cfg);
    }
    let datasets = Datasets::load(&cfg.data)?;

    match app.command {
        Commands::Serve { addr, no_open } => {
            let addr = addr.unwrap_or_else(|| cfg.server.addr.clone());
            let open = !no_open && cfg.server.open_browser;
            let dashboard = Dashboard::new(datasets, cfg);
            web::serve(&dashboard, &addr, open)
        }
        Commands::Overview { format } => {
            cli::run_overview(&datasets, &cfg, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Scores { format } => {
            cli::run_scores(&datasets, &cfg, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Rewriter {
            format,
            search,
            entity,
        } => {
            let state = ViewState::from_pairs([("q", search), ("entity", entity)]);
            cli::run_rewriter(
                &datasets,
                &cfg,
                OutputFormat::from_str_opt(Some(&format)),
                &state,
            )
        }
        Commands::Adoption { format } => {
            cli::run_adoption(&datasets, &cfg, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Feedback {
            format,
            search,
            category,
            polarity,
        } => {
            let state = ViewState::from_pairs([
                ("q", search),
                ("category", category),
                ("type", polarity),
            ]);
            cli::run_feedback(
                &datasets,
                &cfg,
                OutputFormat::from_str_opt(Some(&format)),
                &state,
            )
        }
        Commands::Gaps {
            format,
            search,
            rewritten,
        } => {
            let state = ViewState::from_pairs([("q", search), ("rewritten", rewritten)]);
            cli::run_gaps(
                &datasets,
                &cfg,
                OutputFormat::from_str_opt(Some(&format)),
                &state,
            )
        }
        Commands::Check | Commands::Config { .. } => Ok(()),
    }
}
