use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::fmt;

/// Raw OS identifier of a window, one variant per supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeHandle {
    /// Windows `HWND`.
    Win32 { hwnd: isize },
    /// X11 window id through Xlib.
    Xlib { window: u64 },
    /// X11 window id through XCB.
    Xcb { window: u32 },
    /// `wl_surface` pointer.
    Wayland { surface: usize },
    /// macOS `NSView` pointer.
    AppKit { ns_view: usize },
    /// The platform exposes a handle type this layer does not map.
    Unsupported,
    /// No OS window exists (headless, closed, or not yet created).
    None,
}

impl NativeHandle {
    /// The handle as an integer, for logging and FFI hand-off.
    pub fn raw_value(&self) -> Option<usize> {
        match *self {
            Self::Win32 { hwnd } => Some(hwnd as usize),
            Self::Xlib { window } => Some(window as usize),
            Self::Xcb { window } => Some(window as usize),
            Self::Wayland { surface } => Some(surface),
            Self::AppKit { ns_view } => Some(ns_view),
            Self::Unsupported | Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win32 { hwnd } => write!(f, "win32:{hwnd:#x}"),
            Self::Xlib { window } => write!(f, "xlib:{window:#x}"),
            Self::Xcb { window } => write!(f, "xcb:{window:#x}"),
            Self::Wayland { surface } => write!(f, "wayland:{surface:#x}"),
            Self::AppKit { ns_view } => write!(f, "appkit:{ns_view:#x}"),
            Self::Unsupported => f.write_str("unsupported"),
            Self::None => f.write_str("none"),
        }
    }
}

/// Extract the platform-specific raw handle of `window`.
pub fn native_handle(window: &dyn HasWindowHandle) -> NativeHandle {
    let raw = match window.window_handle() {
        Ok(handle) => handle.as_raw(),
        Err(e) => {
            tracing::warn!("window handle unavailable: {e}");
            return NativeHandle::None;
        }
    };

    match raw {
        RawWindowHandle::Win32(h) => NativeHandle::Win32 { hwnd: h.hwnd.get() },
        RawWindowHandle::Xlib(h) => NativeHandle::Xlib {
            window: h.window as u64,
        },
        RawWindowHandle::Xcb(h) => NativeHandle::Xcb {
            window: h.window.get(),
        },
        RawWindowHandle::Wayland(h) => NativeHandle::Wayland {
            surface: h.surface.as_ptr() as usize,
        },
        RawWindowHandle::AppKit(h) => NativeHandle::AppKit {
            ns_view: h.ns_view.as_ptr() as usize,
        },
        other => {
            tracing::debug!("unmapped window handle kind: {other:?}");
            NativeHandle::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{
        HandleError, Win32WindowHandle, WindowHandle, XcbWindowHandle, XlibWindowHandle,
    };
    use std::num::{NonZeroIsize, NonZeroU32};

    struct FakeWindow(RawWindowHandle);

    impl HasWindowHandle for FakeWindow {
        fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
            // SAFETY: the handle values are never dereferenced.
            Ok(unsafe { WindowHandle::borrow_raw(self.0) })
        }
    }

    struct Unavailable;

    impl HasWindowHandle for Unavailable {
        fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
            Err(HandleError::Unavailable)
        }
    }

    #[test]
    fn xlib_handle_is_extracted() {
        let w = FakeWindow(RawWindowHandle::Xlib(XlibWindowHandle::new(42)));
        let handle = native_handle(&w);
        assert_eq!(handle, NativeHandle::Xlib { window: 42 });
        assert_eq!(handle.raw_value(), Some(42));
    }

    #[test]
    fn win32_handle_is_extracted() {
        let hwnd = NonZeroIsize::new(0x1234).unwrap();
        let w = FakeWindow(RawWindowHandle::Win32(Win32WindowHandle::new(hwnd)));
        assert_eq!(native_handle(&w), NativeHandle::Win32 { hwnd: 0x1234 });
        assert_eq!(native_handle(&w).to_string(), "win32:0x1234");
    }

    #[test]
    fn xcb_handle_is_extracted() {
        let id = NonZeroU32::new(7).unwrap();
        let w = FakeWindow(RawWindowHandle::Xcb(XcbWindowHandle::new(id)));
        assert_eq!(native_handle(&w), NativeHandle::Xcb { window: 7 });
    }

    #[test]
    fn unavailable_handle_maps_to_none() {
        let handle = native_handle(&Unavailable);
        assert!(handle.is_none());
        assert_eq!(handle.raw_value(), None);
    }
}
