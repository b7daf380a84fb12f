use std::fmt;

/// Lifecycle of an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    #[default]
    Uninitialized,
    Running,
    ShuttingDown,
    Terminated,
}

impl EngineState {
    /// True once shutdown has started.
    pub fn is_shut_down(self) -> bool {
        matches!(self, Self::ShuttingDown | Self::Terminated)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Running => "running",
            Self::ShuttingDown => "shutting down",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_uninitialized() {
        assert_eq!(EngineState::default(), EngineState::Uninitialized);
    }

    #[test]
    fn shut_down_states() {
        assert!(!EngineState::Uninitialized.is_shut_down());
        assert!(!EngineState::Running.is_shut_down());
        assert!(EngineState::ShuttingDown.is_shut_down());
        assert!(EngineState::Terminated.is_shut_down());
    }

    #[test]
    fn display() {
        assert_eq!(EngineState::ShuttingDown.to_string(), "shutting down");
    }
}
