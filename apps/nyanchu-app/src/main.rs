mod application;

use anyhow::Result;
use application::{Application, RunSettings};
use clap::Parser;
use nyanchu_common::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, WindowConfig, WindowSize};
use nyanchu_engine::{EngineConfig, PlatformHost, PlatformRenderer};
use nyanchu_platform::{HeadlessHost, WindowHost};
use nyanchu_render::{MetalRenderer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nyanchu", about = "Nyanthu engine application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Run without an OS window, using the placeholder renderer
    #[arg(long, requires = "max_frames")]
    headless: bool,

    /// Exit with an error if the renderer fails to initialize
    #[arg(long)]
    strict: bool,

    /// Window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            window: WindowConfig {
                title: self.title.clone(),
                size: WindowSize::new(self.width, self.height),
            },
            ..EngineConfig::default()
        }
    }

    fn run_settings(&self) -> RunSettings {
        RunSettings {
            max_frames: self.max_frames,
            strict: self.strict,
            ..RunSettings::default()
        }
    }
}

fn launch<H: WindowHost, R: Renderer>(cli: &Cli) -> Result<()> {
    let mut app = Application::<H, R>::new(cli.engine_config(), cli.run_settings());
    app.initialize()?;
    let stats = app.run();
    app.shutdown();
    tracing::info!("ran {} frames over {:.2}s", stats.frames, stats.elapsed);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("nyanchu starting");

    if cli.headless {
        launch::<HeadlessHost, MetalRenderer>(&cli)
    } else {
        launch::<PlatformHost, PlatformRenderer>(&cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_window_defaults() {
        let cli = Cli::parse_from(["nyanchu"]);
        let config = cli.engine_config();
        assert_eq!(config.window, WindowConfig::default());
        assert!(!cli.headless);
        assert!(cli.run_settings().max_frames.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::parse_from([
            "nyanchu", "--width", "320", "--height", "240", "--title", "demo", "--strict",
        ]);
        let config = cli.engine_config();
        assert_eq!(config.window.size, WindowSize::new(320, 240));
        assert_eq!(config.window.title, "demo");
        assert!(cli.run_settings().strict);
    }

    #[test]
    fn headless_requires_frame_limit() {
        assert!(Cli::try_parse_from(["nyanchu", "--headless"]).is_err());
        let cli = Cli::try_parse_from(["nyanchu", "--headless", "--max-frames", "5"]).unwrap();
        assert!(cli.headless);
        assert_eq!(cli.max_frames, Some(5));
    }
}
