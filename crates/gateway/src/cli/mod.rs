pub mod config;
pub mod run;

use clap::{Args, Parser, Subcommand};

/// ProjectLens: analyze and query source trees with a generative model.
#[derive(Debug, Parser)]
#[command(name = "projectlens", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Summarize a directory tree.
    Analyze {
        /// Root directory to walk.
        directory: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Ask a question about a directory tree.
    Query {
        /// Root directory to walk.
        directory: String,
        /// The question to answer.
        question: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Analyze a single file.
    File {
        /// Path to the file.
        path: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Work with stored projects.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Summarize a stored project.
    Analyze {
        /// Project id (file stem under `[projects].path`).
        id: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Ask a question about a stored project.
    Query {
        id: String,
        question: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Analyze one file of a stored project.
    File {
        id: String,
        /// Relative path of the file within the project.
        path: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// Flags shared by every one-shot analysis command.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Model override (e.g. "gemini-2.5-pro").
    #[arg(long)]
    pub model: Option<String>,
    /// Output the full result as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
    /// Print the assembled prompt and exit without calling the model.
    #[arg(long)]
    pub dry_run: bool,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `PL_CONFIG` (or
/// `config.toml` by default). A missing file means all defaults. Returns
/// the parsed [`Config`](pl_domain::config::Config) and the path used.
pub fn load_config() -> anyhow::Result<(pl_domain::config::Config, String)> {
    let config_path = std::env::var("PL_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

pub fn load_config_from(config_path: &str) -> anyhow::Result<pl_domain::config::Config> {
    if !std::path::Path::new(config_path).exists() {
        return Ok(pl_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))
}
