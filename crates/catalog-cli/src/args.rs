use catalog_page::ValidationPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::config::Backend;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Manage a product catalog persisted in a local key/value mirror", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $CATALOG_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the data directory and load or seed the catalog")]
    Init {
        /// Page whose product markup seeds an empty catalog
        #[arg(long)]
        page: Option<PathBuf>,

        #[arg(long)]
        backend: Option<Backend>,

        #[arg(long)]
        validation: Option<ValidationPolicy>,
    },

    #[command(about = "List products, optionally filtered by name")]
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<PathBuf>,
    },

    #[command(about = "Add a product through the add-product form")]
    Add {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        desc: String,

        #[arg(long, default_value = "")]
        price: String,

        #[arg(long, default_value = "")]
        img: String,

        /// Search term active while adding
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<PathBuf>,
    },

    #[command(about = "Write the catalog page as HTML")]
    Render {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    #[command(about = "Remove the persisted catalog")]
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
