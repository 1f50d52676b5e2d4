use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use textlens_config::Config;
use textlens_core::{TextExtractor, UiState};
use textlens_logging::init_logger;
use textlens_tui::{App, Controller};
use textlens_understanding::GeminiExtractor;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "Extract the visible text from an image with Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Image to preload into the interactive UI
    #[arg(short, long, global = true)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from one image and print it to stdout
    Extract {
        /// PNG, JPEG or WEBP file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Without a credential nothing can work, so fail before touching the terminal.
    let config = Config::from_env().context("Invalid configuration")?;

    let console = matches!(cli.command, Some(Commands::Extract { .. }));
    init_logger(&config.log_dir, &config.log_level, console)?;

    info!(
        model = %config.model,
        locale = %config.locale,
        api_key = %config.api_key,
        "Starting textlens"
    );

    let extractor: Arc<dyn TextExtractor> = Arc::new(
        GeminiExtractor::new(config.api_key.expose(), &config.model)
            .with_base_url(&config.base_url),
    );
    let controller = Controller::new(extractor, config.locale);

    match cli.command {
        Some(Commands::Extract { path }) => {
            let text = extract_once(controller, &path).await?;
            println!("{text}");
        }
        None => run_ui(controller, cli.image.as_deref()).await?,
    }

    Ok(())
}

/// Select, analyze and wait for the single result.
async fn extract_once(mut controller: Controller, path: &Path) -> Result<String> {
    let selection = controller
        .select_image(path)
        .await
        .with_context(|| format!("Cannot use {}", path.display()))?;
    if selection.is_oversized() {
        warn!(path = %path.display(), "{}", controller.messages().oversized);
    }

    controller.start_analysis()?;
    controller.next_outcome().await;

    match controller.state() {
        UiState::Success(text) => Ok(text.clone()),
        UiState::Failure(message) => bail!("{message}"),
        other => bail!("analysis ended in unexpected state {other:?}"),
    }
}

async fn run_ui(controller: Controller, image: Option<&Path>) -> Result<()> {
    let mut app = App::new(controller);
    if let Some(path) = image {
        app.load_image(path).await;
    }
    textlens_tui::run(app).await
}
