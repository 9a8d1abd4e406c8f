//! nl-ask - A terminal client for natural-language-to-SQL backends.

use std::sync::Arc;
use std::time::Instant;

use nl_ask::api::{Backend, HttpBackend, MockBackend};
use nl_ask::cli::Cli;
use nl_ask::config::{Config, ProfileConfig};
use nl_ask::error::{AskError, Result};
use nl_ask::render;
use nl_ask::session::surface_message;
use nl_ask::{logging, tui};
use tracing::info;

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    if let Err(msg) = cli.validate() {
        eprintln!("Error: {}", msg);
        std::process::exit(2);
    }

    // TUI mode logs to a file so the alternate screen stays clean
    if cli.is_one_shot() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e.message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    if cli.list_golden {
        for (i, question) in config.golden_questions.iter().enumerate() {
            println!("{}. {}", i + 1, question);
        }
        return Ok(());
    }

    let profile = resolve_profile(&cli, &config)?;
    let backend = build_backend(&cli, &profile)?;
    info!("Backend: {}", backend.describe());

    let question = match cli.golden {
        Some(n) => Some(golden_question(&config, n)?),
        None => cli.question_text(),
    };

    match question {
        Some(question) => one_shot(backend.as_ref(), &question, cli.json).await,
        None => tui::run(backend, config.golden_questions).await,
    }
}

/// Resolves the backend profile from CLI args, config file, and environment.
fn resolve_profile(cli: &Cli, config: &Config) -> Result<ProfileConfig> {
    let mut profile = match cli.profile_name() {
        Some(name) => config
            .get_profile(Some(name))
            .cloned()
            .ok_or_else(|| {
                AskError::config(format!("Profile '{}' not found in config file", name))
            })?,
        None => config.get_profile(None).cloned().unwrap_or_default(),
    };

    profile.apply_env_defaults();

    // CLI flags win over everything
    if let Some(url) = &cli.url {
        profile.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        profile.timeout_secs = Some(secs);
    }

    Ok(profile)
}

/// Builds the backend: the configured HTTP service, or the mock with --mock.
fn build_backend(cli: &Cli, profile: &ProfileConfig) -> Result<Arc<dyn Backend>> {
    if cli.mock {
        return Ok(Arc::new(MockBackend::new()));
    }
    Ok(Arc::new(HttpBackend::new(profile.to_http_config())?))
}

/// Looks up the Nth golden question (1-based).
fn golden_question(config: &Config, n: usize) -> Result<String> {
    config
        .golden_questions
        .get(n - 1)
        .cloned()
        .ok_or_else(|| {
            AskError::config(format!(
                "Golden question {} does not exist ({} configured)",
                n,
                config.golden_questions.len()
            ))
        })
}

/// Asks one question and prints the answer to stdout.
async fn one_shot(backend: &dyn Backend, question: &str, json: bool) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::config("Question is empty"));
    }

    let started = Instant::now();
    let reply = backend.ask(question).await;
    let elapsed = started.elapsed();

    let response = reply.map_err(|e| {
        // Map the raw error through the same surfacing rules the TUI uses
        match e {
            AskError::Backend(_) => AskError::backend(surface_message(&e)),
            other => AskError::transport(surface_message(&other)),
        }
    })?;

    if json {
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| AskError::internal(format!("Failed to serialize response: {}", e)))?;
        println!("{}", body);
        return Ok(());
    }

    println!("{}", response.sql);
    if let Some(result) = &response.result {
        let table = render::render_result(result);
        if !table.is_empty() {
            println!();
            println!("{}", table);
        }
    }
    println!();
    println!("Response time: {} ms", elapsed.as_millis());

    Ok(())
}
