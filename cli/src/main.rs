//! CLI entrypoint for SAGE
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use sage_application::{NoProgress, RunTurnInput, RunTurnUseCase};
use sage_infrastructure::{
    ConfigLoader, DataLoader, FileConfig, FileDataConfig, GeminiClient, GeminiGateway,
    JsonlConversationLogger, StudentData,
};
use sage_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, ReplConfig,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    let log_dir = cli.log_dir.clone().or_else(|| config.logging.log_dir.clone());
    let _guard = init_tracing(cli.verbose, log_dir.as_deref());

    info!("Starting SAGE");

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let api_key = match std::env::var(&config.llm.api_key_env) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => bail!(
            "{} is not set. Export your Gemini API key before running sage.",
            config.llm.api_key_env
        ),
    };

    let mut client = GeminiClient::new(api_key);
    if let Some(base_url) = &config.llm.base_url {
        client = client.with_base_url(base_url);
    }
    let model = cli.model.clone().unwrap_or_else(|| config.llm.model.clone());
    let gateway = Arc::new(
        GeminiGateway::new(client, model)
            .with_generation(config.llm.temperature, config.llm.max_output_tokens),
    );

    let data = load_student_data(&cli, &config)?;

    let mut use_case = RunTurnUseCase::new(gateway, config.execution_params());
    let conversation_log = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.clone());
    if let Some(path) = conversation_log {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => use_case = use_case.with_logger(Arc::new(logger)),
            None => warn!(path = %path.display(), "Conversation log disabled"),
        }
    }

    let output = OutputConfig {
        format: cli.output.map(Into::into).unwrap_or(config.output.format),
        color: config.output.color,
    };

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
            max_history: config.repl.max_history,
        };
        let mut repl = ChatRepl::new(Arc::new(use_case))
            .with_data(data.profile, data.calendar, data.tasks)
            .with_output(output)
            .with_repl_config(repl_config);

        repl.run().await?;
        return Ok(());
    }

    // Single request mode - request is required
    let request = match cli.request {
        Some(r) => r,
        None => bail!("A request is required. Use --chat for interactive mode."),
    };

    let input = RunTurnInput::new(request).with_data(data.profile, data.calendar, data.tasks);

    let outcome = if cli.quiet {
        use_case.execute_with_progress(input, &NoProgress).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    };

    println!("{}", ConsoleFormatter.render(&outcome, output.format));

    Ok(())
}

/// Stderr logging filtered by verbosity, plus an optional daily file log.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "sage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// Data settings from the config file, with CLI flags taking precedence.
fn data_config(cli: &Cli, config: &FileConfig) -> FileDataConfig {
    let mut data_config = config.data.clone();
    if let Some(id) = &cli.student_id {
        data_config.student_id = id.clone();
    }
    if cli.profile.is_some() {
        data_config.profile = cli.profile.clone();
    }
    if cli.calendar.is_some() {
        data_config.calendar = cli.calendar.clone();
    }
    if cli.tasks.is_some() {
        data_config.tasks = cli.tasks.clone();
    }
    data_config
}

fn load_student_data(cli: &Cli, config: &FileConfig) -> Result<StudentData> {
    let loader = DataLoader::from_config(&data_config(cli, config));
    let data = loader
        .load()
        .with_context(|| format!("Failed to load data for {}", loader.student_id()))?;

    if data.profile.is_empty() {
        warn!(student_id = loader.student_id(), "No profile found; continuing without one");
    }
    info!(
        student_id = loader.student_id(),
        events = data.event_count(),
        tasks = data.task_count(),
        "Student data loaded"
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_flags_override_data_config() {
        let mut config = FileConfig::default();
        config.data.calendar = Some(PathBuf::from("config/calendar.json"));
        config.data.tasks = Some(PathBuf::from("config/tasks.json"));

        let cli = Cli::parse_from(["sage", "--student-id", "student_9", "--tasks", "cli/tasks.json", "hi"]);
        let data = data_config(&cli, &config);

        assert_eq!(data.student_id, "student_9");
        assert_eq!(data.calendar, Some(PathBuf::from("config/calendar.json")));
        assert_eq!(data.tasks, Some(PathBuf::from("cli/tasks.json")));
        assert_eq!(data.lookahead_days, config.data.lookahead_days);
    }
}
