//! Command-line argument parsing for nl-ask.
//!
//! With a question on the command line the program runs one-shot and prints
//! the answer to stdout; without one it starts the TUI.

use clap::Parser;
use std::path::PathBuf;

/// A terminal client for natural-language-to-SQL backends.
#[derive(Parser, Debug)]
#[command(name = "ask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Question to ask in one-shot mode; words are joined with spaces.
    /// Omit to start the interactive TUI.
    #[arg(value_name = "QUESTION")]
    pub question: Vec<String>,

    /// Backend base URL (e.g., http://localhost:8000)
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// Use named backend profile from config
    #[arg(short = 'p', long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "NL_ASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the raw response body as JSON instead of a table (one-shot)
    #[arg(long)]
    pub json: bool,

    /// Ask the Nth golden question (1-based) and exit
    #[arg(long, value_name = "N")]
    pub golden: Option<usize>,

    /// Print the configured golden questions and exit
    #[arg(long)]
    pub list_golden: bool,

    /// Use the built-in mock backend (no server required)
    #[arg(long)]
    pub mock: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the question from the command line, words joined.
    pub fn question_text(&self) -> Option<String> {
        if self.question.is_empty() {
            None
        } else {
            Some(self.question.join(" "))
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns the named profile to use, if specified.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Returns true when a one-shot run was requested.
    pub fn is_one_shot(&self) -> bool {
        !self.question.is_empty() || self.golden.is_some() || self.list_golden
    }

    /// Validates flag combinations.
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.json && self.question.is_empty() && self.golden.is_none() {
            return Err("--json requires a question or --golden".to_string());
        }
        if self.golden == Some(0) {
            return Err("golden question numbers start at 1".to_string());
        }
        if self.golden.is_some() && !self.question.is_empty() {
            return Err("give either a question or --golden, not both".to_string());
        }
        Ok(())
    }
}
