//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Routing decision plus every agent's section
    Full,
    /// Only the assistant reply
    Reply,
    /// The whole turn outcome as JSON
    Json,
}

impl From<OutputFormat> for sage_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => sage_domain::OutputFormat::Full,
            OutputFormat::Reply => sage_domain::OutputFormat::Reply,
            OutputFormat::Json => sage_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for sage
#[derive(Parser, Debug)]
#[command(name = "sage")]
#[command(author, version, about = "SAGE - a multi-agent academic assistant")]
#[command(long_about = r#"
SAGE answers study requests with a small team of specialist agents.

Each turn runs in four phases:
1. Coordination: a coordinator picks the agents the request needs
2. Profile Analysis: your learning style and energy pattern are derived
3. Agents: Planner, Note Writer and Advisor run, concurrently where possible
4. Synthesis: their results are merged into one reply

Configuration files are loaded from (in priority order):
1. SAGE_* environment variables (e.g. SAGE_LLM__MODEL)
2. --config <path>     Explicit config file
3. ./sage.toml         Project-level config
4. ~/.config/sage/config.toml   Global config

The Gemini API key is read from GOOGLE_API_KEY.

Example:
  sage --profile data/profile.json --calendar data/calendar.json "Plan my week"
  sage --chat --student-id student_456
  sage -o json "Write notes for my algorithms course"
"#)]
pub struct Cli {
    /// The request to answer (not required in chat mode)
    pub request: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (defaults to the config file, then "reply")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Gemini model to use
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Student whose profile is loaded
    #[arg(long, value_name = "ID")]
    pub student_id: Option<String>,

    /// Profiles JSON file
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Calendar JSON file
    #[arg(long, value_name = "PATH")]
    pub calendar: Option<PathBuf>,

    /// Tasks JSON file
    #[arg(long, value_name = "PATH")]
    pub tasks: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL transcript of turn events to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Write daily-rolling diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request() {
        let cli = Cli::try_parse_from(["sage", "-vv", "-o", "full", "Plan my week"]).unwrap();
        assert_eq!(cli.request.as_deref(), Some("Plan my week"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Full));
        assert!(!cli.chat);
    }

    #[test]
    fn test_chat_with_data_paths() {
        let cli = Cli::try_parse_from([
            "sage",
            "--chat",
            "--student-id",
            "student_456",
            "--profile",
            "data/profile.json",
            "--conversation-log",
            "turns.jsonl",
        ])
        .unwrap();
        assert!(cli.chat);
        assert!(cli.request.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.student_id.as_deref(), Some("student_456"));
        assert_eq!(cli.profile, Some(PathBuf::from("data/profile.json")));
        assert_eq!(cli.conversation_log, Some(PathBuf::from("turns.jsonl")));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["sage", "-o", "synthesis", "hi"]).is_err());
    }

    #[test]
    fn test_format_maps_to_domain() {
        assert_eq!(
            sage_domain::OutputFormat::from(OutputFormat::Json),
            sage_domain::OutputFormat::Json
        );
    }
}
