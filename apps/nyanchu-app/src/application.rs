use anyhow::{Context, Result, bail};
use nyanchu_engine::{Engine, EngineConfig, PlatformHost, PlatformRenderer};
use nyanchu_platform::WindowHost;
use nyanchu_render::Renderer;
use std::path::PathBuf;

pub const DEFAULT_MESH: &str = "assets/materials/con.obj";
pub const DEFAULT_SOUND: &str = "assets/materials/bgm.wav";

/// What the frame loop does each iteration, and when it stops on its own.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub mesh: String,
    pub sound: PathBuf,
    /// Stop after this many frames. `None` runs until the window closes.
    pub max_frames: Option<u64>,
    /// Fail `initialize` when the renderer does not come up.
    pub strict: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            mesh: DEFAULT_MESH.to_owned(),
            sound: PathBuf::from(DEFAULT_SOUND),
            max_frames: None,
            strict: false,
        }
    }
}

/// Totals of one `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    pub frames: u64,
    /// Sum of the clamped frame deltas, in seconds.
    pub elapsed: f64,
}

/// Owns the engine and runs the frame loop.
pub struct Application<H: WindowHost = PlatformHost, R: Renderer = PlatformRenderer> {
    engine: Engine<H, R>,
    settings: RunSettings,
}

impl<H: WindowHost, R: Renderer> Application<H, R> {
    pub fn new(config: EngineConfig, settings: RunSettings) -> Self {
        Self {
            engine: Engine::new(config),
            settings,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        let report = self.engine.init().context("failed to initialize engine")?;
        if let Some(err) = &report.renderer {
            if self.settings.strict {
                bail!("{} renderer failed to initialize: {err}", report.backend);
            }
            tracing::warn!("{} renderer unavailable; running without rendering", report.backend);
        }
        Ok(())
    }

    /// Run frames until the window closes, a stop is requested or the frame
    /// limit is reached.
    pub fn run(&mut self) -> RunStats {
        tracing::info!("entering frame loop");
        let mut stats = RunStats::default();
        while self.engine.is_running() {
            self.engine.poll_events();
            let Some(time) = self.engine.begin_frame() else {
                break;
            };
            tracing::trace!(frame = time.frame_index, dt = time.dt, "frame");

            if let Some(renderer) = self.engine.renderer_mut() {
                renderer.draw_mesh(&self.settings.mesh);
            }
            if let Some(audio) = self.engine.audio_mut() {
                audio.play_sound(&self.settings.sound);
            }

            self.engine.end_frame();
            stats.frames += 1;
            stats.elapsed += f64::from(time.dt);

            if self
                .settings
                .max_frames
                .is_some_and(|max| self.engine.frame_count() >= max)
            {
                tracing::info!("frame limit reached");
                self.engine.request_stop();
            }
        }
        tracing::debug!(
            "left frame loop after {} frames ({:.2}s)",
            stats.frames,
            stats.elapsed
        );
        stats
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    pub fn engine(&self) -> &Engine<H, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<H, R> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyanchu_engine::EngineState;
    use nyanchu_platform::{HeadlessHost, PlatformEvent};
    use nyanchu_render::MetalRenderer;

    type HeadlessApp = Application<HeadlessHost, MetalRenderer>;

    fn app(max_frames: Option<u64>) -> HeadlessApp {
        let settings = RunSettings {
            max_frames,
            ..RunSettings::default()
        };
        let mut app = HeadlessApp::new(EngineConfig::default(), settings);
        app.initialize().unwrap();
        app
    }

    #[test]
    fn runs_until_frame_limit() {
        let mut app = app(Some(3));
        let stats = app.run();
        assert_eq!(stats.frames, 3);
        assert!(stats.elapsed > 0.0);
        assert!(stats.elapsed <= 3.0 * 0.25);

        let engine = app.engine();
        assert_eq!(engine.frame_count(), 3);
        assert_eq!(engine.renderer().unwrap().frames(), 3);
        assert_eq!(engine.audio().unwrap().request_count(DEFAULT_SOUND), 3);

        app.shutdown();
        assert_eq!(app.engine().state(), EngineState::Terminated);
    }

    #[test]
    fn close_request_stops_after_current_frame() {
        let mut app = app(None);
        app.engine_mut()
            .host_mut()
            .unwrap()
            .push_event(PlatformEvent::CloseRequested);
        app.run();
        assert_eq!(app.engine().frame_count(), 1);
    }

    #[test]
    fn stopped_engine_runs_no_frames() {
        let mut app = app(None);
        app.engine_mut().request_stop();
        app.run();
        assert_eq!(app.engine().frame_count(), 0);
    }

    #[test]
    fn run_after_shutdown_is_a_no_op() {
        let mut app = app(Some(1));
        app.shutdown();
        assert_eq!(app.run(), RunStats::default());
        app.shutdown();
        assert_eq!(app.engine().frame_count(), 0);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn strict_mode_rejects_degraded_renderer() {
        use nyanchu_render_wgpu::WgpuRenderer;

        let settings = RunSettings {
            strict: true,
            ..RunSettings::default()
        };
        let mut app: Application<HeadlessHost, WgpuRenderer> =
            Application::new(EngineConfig::default(), settings);
        let err = app.initialize().unwrap_err();
        assert!(err.to_string().contains("wgpu renderer failed"));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn lenient_mode_runs_degraded() {
        use nyanchu_render_wgpu::WgpuRenderer;

        let settings = RunSettings {
            max_frames: Some(2),
            ..RunSettings::default()
        };
        let mut app: Application<HeadlessHost, WgpuRenderer> =
            Application::new(EngineConfig::default(), settings);
        app.initialize().unwrap();
        app.run();
        assert_eq!(app.engine().frame_count(), 2);
    }
}
