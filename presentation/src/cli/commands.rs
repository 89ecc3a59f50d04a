//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for career-counsel
#[derive(Parser, Debug)]
#[command(name = "career-counsel")]
#[command(author, version, about = "AI career counselor chat backend")]
#[command(long_about = r#"
Career Counsel serves a chat API in which each user holds private
conversations with an AI career counselor.

Replies are generated through the Replicate predictions API. Set
REPLICATE_API_TOKEN (or provider.api_token) before sending messages.

Configuration files are loaded from (in priority order):
1. COUNSEL_* environment variables (e.g. COUNSEL_SERVER__BIND)
2. --config <path>     Explicit config file
3. ./counsel.toml      Project-level config
4. ~/.config/career-counsel/config.toml   Global config

Example:
  career-counsel --bind 0.0.0.0:8080 --database chats.db
  career-counsel --database :memory: -vv
"#)]
pub struct Cli {
    /// Address to listen on (overrides server.bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// SQLite database path, or :memory: (overrides database.path)
    #[arg(long, value_name = "PATH")]
    pub database: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
