mod cli;
mod config;
mod mission;
mod model;
mod storage;

use std::{env, io, process};

use tracing_subscriber::EnvFilter;

use config::Config;
use storage::Storage;

fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    init_tracing(&config);

    let root = config.storage_root.clone().or_else(Storage::default_root);
    let Some(root) = root else {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    };

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Filter resolution: `TREK_LOG` env var, then config, then `info`.
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &Config) {
    let filter = env::var("TREK_LOG")
        .ok()
        .filter(|f| !f.is_empty())
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}
