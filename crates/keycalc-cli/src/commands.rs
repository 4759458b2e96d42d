//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{ColorChoice, LogFormat, OutputFormat};

/// keycalc: a keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress log output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Result format (text, json)
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputArg,

    /// Log event format on stderr (text, json)
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press calculator tokens: 0-9 . + - * / = clr del -/+
    ///
    /// Each argument may hold one token or a whole script, so
    /// `keycalc run 1 2 + 3 =` and `keycalc run 12+3=` are the same.
    Run(RunArgs),

    /// Press keyboard keys by name (Enter, Escape, Backspace, 7, +, ...)
    ///
    /// Keys with no calculator meaning are skipped.
    Keys(KeysArgs),

    /// Open the interactive terminal calculator
    Tui,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tokens or token scripts, pressed in order (after any flags)
    #[arg(allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Additional script pressed after the tokens, e.g. "12+3="
    #[arg(short, long)]
    pub script: Option<String>,

    /// Only print the final display
    #[arg(long)]
    pub final_only: bool,
}

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Key names, pressed in order
    #[arg(allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Only print the final display
    #[arg(long)]
    pub final_only: bool,
}

/// Color argument for clap
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for clap
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputArg {
    /// Display lines and log
    #[default]
    Text,
    /// JSON document
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => Self::Text,
            OutputArg::Json => Self::Json,
        }
    }
}

/// Log format argument for clap
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON objects
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}
