//! HealthMate: terminal wellness wizard.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthmate::adapters::sanitize::SanitizingMakeWriter;
use healthmate::config::Settings;
use healthmate::tui::App;

fn main() -> Result<()> {
    // A missing .env is normal; variables may come from the shell.
    let _ = dotenvy::dotenv();

    // Credential check happens before the terminal is touched.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("healthmate: {e}");
            std::process::exit(2);
        }
    };

    // Initialize logging.
    //
    // IMPORTANT: writing logs to the terminal will corrupt the TUI (alternate screen).
    // Default behavior:
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if settings.log_mode.use_file(interactive) {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    tracing::info!(
        model = %settings.model,
        timeout_secs = settings.timeout.as_secs(),
        "Starting HealthMate..."
    );

    let mut app = App::new(&settings)?;
    app.run()?;

    tracing::info!("HealthMate shutdown complete.");
    Ok(())
}
