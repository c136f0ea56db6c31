//! crdl - download a Chromium snapshot build for a milestone and launch it.

use std::process::ExitCode;

use anyhow::{Context, Result};
use crdl_fetch::ReqwestClient;
use crdl_install::{Installer, Origin};
use crdl_platform::Platform;
use crdl_store::CacheStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::launch::Launcher;
use crate::ui::tracker::DownloadTracker;

mod cli;
mod config;
mod launch;
mod ui;

#[tokio::main]
async fn main() -> ExitCode {
    let Some(cli) = cli::parse_from(std::env::args_os()) else {
        println!("{}", cli::USAGE);
        return ExitCode::FAILURE;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    debug!("cache root {}", config.cache_root.display());

    let platform = Platform::current();
    let key = platform.resolve()?;
    let client = ReqwestClient::new().context("failed to set up the HTTP client")?;

    let tracker = DownloadTracker::new(format!("chromium {}", cli.version));
    let installer = Installer::new(client, config.fetch, CacheStore::new(config.cache_root), key)
        .on_progress(tracker.callback());

    let installed = match installer.install(&cli.version).await {
        Ok(installed) => installed,
        Err(e) => {
            tracker.abandon();
            return Err(e).with_context(|| format!("failed to install chromium {}", cli.version));
        }
    };

    if let Origin::Downloaded { position } = installed.origin {
        debug!("installed build position {position} into {}", installed.path.display());
        info!("Successfully downloaded chromium {}. Now launching...", cli.version);
    }

    Launcher::new(platform.os).launch(&installed.path)
}
