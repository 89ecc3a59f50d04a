//! CLI entrypoint for Career Counsel
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves the HTTP API.

use anyhow::{Context, Result, bail};
use axum::http::HeaderName;
use clap::Parser;
use counsel_application::{
    ConversationLogger, ConversationStore, GenerateReplyUseCase, NoConversationLogger,
    SessionDirectory, SubmitTurnUseCase,
};
use counsel_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ReplicatePredictionProvider,
    ReplicateSettings, Severity, SqliteConversationStore, SystemClock,
};
use counsel_presentation::{AppState, Cli, router};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }

    let _log_guard = init_tracing(cli.verbose, config.logging.directory.as_deref());
    info!("Starting Career Counsel");

    let mut fatal = false;
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => {
                error!("{}", issue.message);
                fatal = true;
            }
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if fatal {
        bail!("invalid configuration");
    }

    // === Dependency Injection ===
    let state = build_state(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging based on verbosity level, unless `RUST_LOG` is set.
///
/// The returned guard must live as long as the file writer is needed.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "career-counsel.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn build_state(config: &FileConfig) -> Result<AppState> {
    let clock = Arc::new(SystemClock);

    let store: Arc<dyn ConversationStore> = match config.database.file_path() {
        Some(path) => {
            info!("Using SQLite database {}", path.display());
            Arc::new(SqliteConversationStore::open(&path)?)
        }
        None => {
            warn!("Using in-memory database; conversations are lost on exit");
            Arc::new(SqliteConversationStore::open_in_memory()?)
        }
    };

    let conversation_logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log
    {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let provider = Arc::new(ReplicatePredictionProvider::new(ReplicateSettings {
        base_url: config.provider.base_url.clone(),
        api_token: config.provider.resolve_token(),
        user_agent: config.provider.user_agent.clone(),
        request_timeout: config.provider.request_timeout(),
    })?);

    let replies = Arc::new(
        GenerateReplyUseCase::new(provider, clock.clone(), config.reply_config())
            .with_conversation_logger(conversation_logger.clone()),
    );
    let turns = SubmitTurnUseCase::new(store.clone(), replies, clock.clone())
        .with_conversation_logger(conversation_logger)
        .with_serialized_sessions(config.chat.serialize_turns);
    let directory = SessionDirectory::new(store, clock);

    let user_header = HeaderName::from_bytes(config.auth.user_header.trim().as_bytes())
        .with_context(|| format!("invalid auth.user_header '{}'", config.auth.user_header))?;

    Ok(AppState::new(
        Arc::new(directory),
        Arc::new(turns),
        user_header,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
