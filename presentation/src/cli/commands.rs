//! CLI command definitions

use askboard_domain::{BoardVariant, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable board
    Text,
    /// JSON for scripting
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Board variant on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Anyone can ask under any name
    Open,
    /// Sign in with a magic code; edit and delete your own questions
    #[value(alias = "auth")]
    Authenticated,
}

impl From<VariantArg> for BoardVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Open => BoardVariant::Open,
            VariantArg::Authenticated => BoardVariant::Authenticated,
        }
    }
}

/// CLI arguments for askboard
#[derive(Parser, Debug)]
#[command(name = "askboard")]
#[command(author, version, about = "Live question board with a leaderboard of askers")]
#[command(long_about = r#"
askboard collects questions from an audience and ranks askers by how many
questions they asked.

Two board variants are available:
  open           Anyone types a name and asks (default)
  authenticated  Sign in with an emailed magic code; edit or delete your own questions

Configuration files are loaded from (in priority order):
1. ASKBOARD_<SECTION>__<KEY>   Environment variables
2. --config <path>             Explicit config file
3. ./askboard.toml             Project-level config
4. ~/.config/askboard/config.toml   Global config

Example:
  askboard ask --name alice "How does the leaderboard handle ties?"
  askboard --variant authenticated login alice@example.com
  askboard watch
  askboard repl --name alice
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Board variant (overrides [board] variant)
    #[arg(long, value_enum, global = true)]
    pub variant: Option<VariantArg>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; a bare `askboard` shows the board.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Board)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the questions, the leaderboard and the total
    Board,
    /// Show only the questions
    List,
    /// Show only the leaderboard
    Leaderboard,
    /// Ask a question
    Ask {
        /// Your name (open boards; authenticated boards use your email)
        #[arg(short, long)]
        name: Option<String>,
        /// The question
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Change the text of one of your questions
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete one of your questions
    Delete { id: String },
    /// Sign in with a magic code sent to EMAIL
    Login { email: String },
    /// Sign out
    Logout,
    /// Follow the board live until Ctrl-C
    Watch,
    /// Interactive mode
    Repl {
        /// Name to ask under (open boards)
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Join free-text arguments back into one string.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
