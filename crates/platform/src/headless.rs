use crate::event::PlatformEvent;
use crate::host::{PlatformError, WindowHost};
use crate::native::NativeHandle;
use nyanchu_common::{NativeWindow, WindowConfig, WindowSize};
use std::collections::VecDeque;
use std::sync::Arc;

/// A host with no OS window.
///
/// Used for smoke runs on machines without a display and for driving the
/// frame loop from tests. Events are injected with [`HeadlessHost::push_event`].
#[derive(Debug)]
pub struct HeadlessHost {
    title: String,
    size: WindowSize,
    queue: VecDeque<PlatformEvent>,
    close_requested: bool,
    open: bool,
}

impl HeadlessHost {
    /// Queue an event to be returned by the next `poll_events`.
    pub fn push_event(&mut self, event: PlatformEvent) {
        self.queue.push_back(event);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl WindowHost for HeadlessHost {
    fn open(config: &WindowConfig) -> Result<Self, PlatformError> {
        tracing::debug!("headless host opened ({}, {})", config.title, config.size);
        Ok(Self {
            title: config.title.clone(),
            size: config.size,
            queue: VecDeque::new(),
            close_requested: false,
            open: true,
        })
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let events: Vec<PlatformEvent> = self.queue.drain(..).collect();
        for event in &events {
            match event {
                PlatformEvent::CloseRequested => self.close_requested = true,
                PlatformEvent::Resized(size) => self.size = *size,
                _ => {}
            }
        }
        events
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn size(&self) -> WindowSize {
        self.size
    }

    fn native_window(&self) -> Option<Arc<dyn NativeWindow>> {
        None
    }

    fn native_handle(&self) -> NativeHandle {
        NativeHandle::None
    }

    fn close(&mut self) {
        if self.open {
            tracing::debug!("headless host closed");
        }
        self.open = false;
        self.queue.clear();
    }
}
