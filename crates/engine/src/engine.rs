use crate::backend::{PlatformHost, PlatformRenderer};
use crate::state::EngineState;
use crate::time::{FrameClock, FrameTime};
use nyanchu_audio::Audio;
use nyanchu_common::WindowConfig;
use nyanchu_ecs::Ecs;
use nyanchu_platform::{KeyCode, NativeHandle, PlatformError, PlatformEvent, WindowHost};
use nyanchu_render::{DEFAULT_SHADER_ROOTS, RenderError, RenderTarget, Renderer};
use std::path::PathBuf;

/// Engine errors surfaced to the caller of [`Engine::init`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("window creation failed: {0}")]
    Window(#[from] PlatformError),
    #[error("{operation} is not valid while the engine is {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },
}

/// Fixed start-up parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub window: WindowConfig,
    /// Shader directories, searched in order.
    pub shader_roots: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shader_roots: DEFAULT_SHADER_ROOTS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Outcome of a successful [`Engine::init`].
#[derive(Debug)]
pub struct InitReport {
    pub backend: &'static str,
    pub window: NativeHandle,
    /// Set when the renderer failed to come up. The engine runs anyway.
    pub renderer: Option<RenderError>,
}

impl InitReport {
    /// True when the frame loop runs without a working renderer.
    pub fn is_degraded(&self) -> bool {
        self.renderer.is_some()
    }
}

/// Owner of the window, the renderer, audio and the ECS world.
///
/// The backends are type parameters; the defaults are the ones selected for
/// the build target, so `Engine` alone names the platform engine.
pub struct Engine<H: WindowHost = PlatformHost, R: Renderer = PlatformRenderer> {
    config: EngineConfig,
    state: EngineState,
    host: Option<H>,
    renderer: Option<R>,
    audio: Option<Audio>,
    ecs: Option<Ecs>,
    clock: FrameClock,
    events: Vec<PlatformEvent>,
    stop_requested: bool,
    in_frame: bool,
    frame_count: u64,
}

impl<H: WindowHost, R: Renderer> Engine<H, R> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            host: None,
            renderer: None,
            audio: None,
            ecs: None,
            clock: FrameClock::new(),
            events: Vec::new(),
            stop_requested: false,
            in_frame: false,
            frame_count: 0,
        }
    }

    /// Create the window, the renderer and the subsystems, then enter `Running`.
    ///
    /// A window failure is returned and leaves the engine `Uninitialized`.
    /// A renderer failure is logged and reported in [`InitReport::renderer`];
    /// the engine still enters `Running`.
    pub fn init(&mut self) -> Result<InitReport, EngineError> {
        if self.state != EngineState::Uninitialized {
            tracing::error!("init called while engine is {}", self.state);
            return Err(EngineError::InvalidState {
                operation: "init",
                state: self.state,
            });
        }

        let host = H::open(&self.config.window).inspect_err(|e| {
            tracing::error!("failed to create window: {e}");
        })?;
        let window = host.native_handle();
        tracing::debug!("native window handle: {window}");

        let mut renderer = R::default();
        let backend = renderer.backend_name();
        let target = RenderTarget {
            window: host.native_window(),
            size: host.size(),
            shader_roots: self.config.shader_roots.clone(),
        };
        let renderer_error = match renderer.initialize(target) {
            Ok(()) => {
                tracing::info!(backend, "renderer initialized");
                None
            }
            Err(e) => {
                tracing::error!(backend, "renderer initialization failed: {e}");
                Some(e)
            }
        };

        self.host = Some(host);
        self.renderer = Some(renderer);
        self.audio = Some(Audio::new());
        self.ecs = Some(Ecs::new());
        self.clock.reset();
        self.state = EngineState::Running;
        tracing::info!(backend, "engine running");

        Ok(InitReport {
            backend,
            window,
            renderer: renderer_error,
        })
    }

    /// True while the frame loop should keep going.
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
            && !self.stop_requested
            && self.host.as_ref().is_some_and(|h| !h.close_requested())
    }

    /// Ask the frame loop to end after the current iteration.
    pub fn request_stop(&mut self) {
        if !self.stop_requested {
            tracing::info!("stop requested");
        }
        self.stop_requested = true;
    }

    /// Drain pending OS events and react to the ones the engine handles.
    pub fn poll_events(&mut self) {
        if !self.accepts("poll_events") {
            return;
        }
        let Some(host) = self.host.as_mut() else {
            return;
        };

        self.events = host.poll_events();
        for event in &self.events {
            match event {
                PlatformEvent::CloseRequested => {
                    tracing::info!("window close requested");
                    host.request_close();
                }
                PlatformEvent::Resized(size) => {
                    tracing::debug!("window resized to {size}");
                    if let Some(renderer) = self.renderer.as_mut() {
                        renderer.resize(*size);
                    }
                }
                event if event.is_key_press(KeyCode::Escape) => {
                    tracing::info!("escape pressed");
                    self.stop_requested = true;
                }
                _ => {}
            }
        }
    }

    /// Events returned by the last `poll_events`.
    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }

    /// Open a frame. `None` when the engine is not running.
    pub fn begin_frame(&mut self) -> Option<FrameTime> {
        if !self.accepts("begin_frame") {
            return None;
        }
        if self.in_frame {
            tracing::debug!("begin_frame called with a frame already open");
        }
        self.in_frame = true;
        Some(self.clock.tick())
    }

    /// Render and present the open frame.
    pub fn end_frame(&mut self) {
        if !self.accepts("end_frame") {
            return;
        }
        if !self.in_frame {
            tracing::debug!("end_frame called without begin_frame; ignored");
            return;
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render();
        }
        self.in_frame = false;
        self.frame_count += 1;
    }

    /// Release everything `init` created, renderer first and window last.
    ///
    /// Repeat calls do nothing.
    pub fn shutdown(&mut self) {
        match self.state {
            EngineState::Uninitialized => {
                tracing::debug!("shutdown before init");
                self.state = EngineState::Terminated;
                return;
            }
            state if state.is_shut_down() => {
                tracing::debug!("shutdown already done");
                return;
            }
            _ => {}
        }

        self.state = EngineState::ShuttingDown;
        tracing::info!("engine shutting down");

        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown();
        }
        self.audio = None;
        self.ecs = None;
        if let Some(mut host) = self.host.take() {
            host.close();
        }
        self.events.clear();
        self.in_frame = false;

        self.state = EngineState::Terminated;
        tracing::info!("engine terminated after {} frames", self.frame_count);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Frames completed with `end_frame`.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        if self.state != EngineState::Running {
            return None;
        }
        self.renderer.as_mut()
    }

    pub fn audio(&self) -> Option<&Audio> {
        self.audio.as_ref()
    }

    pub fn audio_mut(&mut self) -> Option<&mut Audio> {
        if self.state != EngineState::Running {
            return None;
        }
        self.audio.as_mut()
    }

    pub fn ecs(&self) -> Option<&Ecs> {
        self.ecs.as_ref()
    }

    pub fn ecs_mut(&mut self) -> Option<&mut Ecs> {
        if self.state != EngineState::Running {
            return None;
        }
        self.ecs.as_mut()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    fn accepts(&self, operation: &str) -> bool {
        if self.state == EngineState::Running {
            return true;
        }
        if self.state.is_shut_down() {
            tracing::warn!("{operation} ignored: engine is {}", self.state);
        } else {
            tracing::warn!("{operation} ignored: engine not initialized");
        }
        false
    }
}

impl<H: WindowHost, R: Renderer> Drop for Engine<H, R> {
    fn drop(&mut self) {
        if self.state == EngineState::Running {
            self.shutdown();
        }
    }
}
