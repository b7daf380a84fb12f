use crate::event::{KeyCode, PlatformEvent};
use crate::host::{PlatformError, WindowHost};
use crate::native::{NativeHandle, native_handle};
use nyanchu_common::{NativeWindow, WindowConfig, WindowSize};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Pump attempts allowed for the OS to deliver `resumed` during `open`.
const OPEN_PUMP_ATTEMPTS: usize = 64;

/// Host backed by a real OS window through winit.
///
/// The event loop is pumped with a zero timeout from [`WindowHost::poll_events`]
/// so the caller keeps a plain `while` frame loop instead of handing control to
/// winit.
pub struct DesktopHost {
    event_loop: EventLoop<()>,
    state: DesktopState,
}

/// Handler state receiving winit callbacks.
struct DesktopState {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    pending: Vec<PlatformEvent>,
    close_requested: bool,
    create_error: Option<String>,
}

impl DesktopState {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            pending: Vec::new(),
            close_requested: false,
            create_error: None,
        }
    }
}

impl ApplicationHandler for DesktopState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.create_error.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.size.width,
                self.config.size.height,
            ));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                tracing::info!(
                    "window created: \"{}\" {}",
                    self.config.title,
                    self.config.size
                );
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                self.create_error = Some(e.to_string());
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(event) = translate(&event) {
            if event == PlatformEvent::CloseRequested {
                self.close_requested = true;
            }
            self.pending.push(event);
        }
    }
}

/// Map a winit window event onto the engine's vocabulary.
///
/// Events the engine does not react to yield `None`.
fn translate(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::CloseRequested),
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized(WindowSize::new(
            size.width,
            size.height,
        ))),
        WindowEvent::Focused(focused) => Some(PlatformEvent::Focused(*focused)),
        WindowEvent::KeyboardInput { event, .. } => {
            translate_key(event.physical_key, event.state, event.repeat)
        }
        _ => None,
    }
}

/// Auto-repeat and keys without a physical code are dropped.
fn translate_key(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<PlatformEvent> {
    match key {
        PhysicalKey::Code(code) if !repeat => Some(PlatformEvent::Key {
            code: KeyCode::from(code),
            pressed: state == ElementState::Pressed,
        }),
        _ => None,
    }
}

impl WindowHost for DesktopHost {
    fn open(config: &WindowConfig) -> Result<Self, PlatformError> {
        let mut event_loop = EventLoop::new()?;
        let mut state = DesktopState::new(config.clone());

        // The window is created from `resumed`, which the OS delivers during
        // the first pumps.
        for _ in 0..OPEN_PUMP_ATTEMPTS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut state)
            {
                return Err(PlatformError::ExitedEarly(code));
            }
            if let Some(e) = state.create_error.take() {
                return Err(PlatformError::WindowCreation(e));
            }
            if state.window.is_some() {
                return Ok(Self { event_loop, state });
            }
        }

        Err(PlatformError::WindowCreation(
            "platform never resumed the application".into(),
        ))
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state)
        {
            tracing::debug!("event loop exited with code {code}");
            self.state.close_requested = true;
        }
        std::mem::take(&mut self.state.pending)
    }

    fn close_requested(&self) -> bool {
        self.state.close_requested
    }

    fn request_close(&mut self) {
        self.state.close_requested = true;
    }

    fn size(&self) -> WindowSize {
        match &self.state.window {
            Some(window) => {
                let s = window.inner_size();
                WindowSize::new(s.width, s.height)
            }
            None => self.state.config.size,
        }
    }

    fn native_window(&self) -> Option<Arc<dyn NativeWindow>> {
        self.state
            .window
            .clone()
            .map(|w| w as Arc<dyn NativeWindow>)
    }

    fn native_handle(&self) -> NativeHandle {
        match &self.state.window {
            Some(window) => native_handle(window.as_ref()),
            None => NativeHandle::None,
        }
    }

    fn close(&mut self) {
        if self.state.window.take().is_some() {
            tracing::info!("window destroyed");
        }
        self.state.pending.clear();
    }
}
