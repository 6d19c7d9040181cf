//! dinelog-vs configuration
//!
//! Command-line arguments (with environment fallbacks) are layered over the
//! TOML bootstrap file, which is layered over built-in defaults.

use std::path::PathBuf;

use clap::Parser;
use dinelog_common::config::{resolve_root_folder, TomlConfig};

/// Default service port
pub const DEFAULT_PORT: u16 = 5001;

/// Command-line arguments for dinelog-vs
#[derive(Parser, Debug)]
#[command(name = "dinelog-vs")]
#[command(about = "Restaurant visit service for dinelog")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DINELOG_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1", env = "DINELOG_BIND")]
    pub bind: String,

    /// Folder holding dinelog.db
    #[arg(short, long, env = "DINELOG_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// TOML bootstrap file
    #[arg(short, long, env = "DINELOG_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub root_folder: PathBuf,
    pub db_path: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Layer `args` over `toml` over defaults
    pub fn resolve(args: &Args, toml: &TomlConfig) -> Self {
        let root_folder = resolve_root_folder(args.root_folder.as_deref(), toml);
        let db_path = toml.database_path(&root_folder);

        Self {
            bind: args.bind.clone(),
            port: args.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            root_folder,
            db_path,
            log_level: toml.logging.level.clone(),
        }
    }

    /// `bind:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
