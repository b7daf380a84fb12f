use nyanchu_common::WindowSize;

/// Keys the engine reacts to. Everything else is reported as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Space,
    Enter,
    Other,
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(code: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as K;
        match code {
            K::Escape => Self::Escape,
            K::Space => Self::Space,
            K::Enter | K::NumpadEnter => Self::Enter,
            _ => Self::Other,
        }
    }
}

/// An OS event translated into the engine's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user or the OS asked the window to close.
    CloseRequested,
    /// The drawable area changed size.
    Resized(WindowSize),
    /// The window gained (`true`) or lost (`false`) focus.
    Focused(bool),
    /// A key changed state. Auto-repeat presses are not reported.
    Key { code: KeyCode, pressed: bool },
}

impl PlatformEvent {
    /// True for a press of the given key.
    pub fn is_key_press(&self, key: KeyCode) -> bool {
        matches!(self, Self::Key { code, pressed: true } if *code == key)
    }
}
