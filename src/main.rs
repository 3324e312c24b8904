//! mkdocs-runner - Run MkDocs documentation builds from Rust build pipelines.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mkdocs_runner::commands;
use mkdocs_runner::config::ConfigLoader;
use mkdocs_runner::mkdocs::TracingSink;

#[derive(Parser)]
#[command(
    name = "mkdocs-runner",
    about = "Run MkDocs build, serve and gh-deploy from build pipelines",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a mkdocs-runner config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site.
    Build {
        /// Abort the build on any warning.
        #[arg(long)]
        strict: bool,
        /// Directory the site is generated into.
        #[arg(long)]
        site_dir: Option<PathBuf>,
    },
    /// Serve the documentation with the mkdocs dev server.
    Serve {
        /// Server host name.
        #[arg(long)]
        host: Option<String>,
        /// Server port.
        #[arg(long)]
        port: Option<u16>,
        /// Disable live reloading.
        #[arg(long)]
        no_livereload: bool,
    },
    /// Deploy the documentation to GitHub Pages.
    #[command(name = "gh-deploy")]
    GhDeploy {
        /// Commit message for the pages branch.
        #[arg(long)]
        message: Option<String>,
        /// Force the push to the repository.
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = match cli.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let sink = Arc::new(TracingSink);

    let result = match cli.command {
        Commands::Build { strict, site_dir } => {
            if strict {
                config.build.strict = true;
            }
            if let Some(dir) = site_dir {
                config.build.site_dir = dir;
            }
            commands::run_build(&config, sink, &cancel).await
        }
        Commands::Serve {
            host,
            port,
            no_livereload,
        } => {
            if host.is_some() {
                config.serve.host = host;
            }
            if port.is_some() {
                config.serve.port = port;
            }
            if no_livereload {
                config.serve.livereload = false;
            }
            commands::run_serve(&config, sink, &cancel).await
        }
        Commands::GhDeploy { message, force } => {
            if message.is_some() {
                config.deploy.message = message;
            }
            if force {
                config.deploy.force = true;
            }
            commands::run_deploy(&config, sink, &cancel).await
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mkdocs operation failed");
            ExitCode::FAILURE
        }
    }
}
