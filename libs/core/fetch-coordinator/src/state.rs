use std::fmt;

/// Observable state of a [`FetchCoordinator`](crate::FetchCoordinator).
///
/// ```text
///              start()
///   ┌──────────────────────────────┐
///   │                              │
/// ┌─▼───────┐   ok    ┌────────┐   │
/// │ LOADING ├────────►│ NORMAL ├───┤
/// └─┬─────┬─┘         └────────┘   │
///   │     │   err     ┌────────┐   │
///   │     └──────────►│ ERROR  ├───┤
///   │ cancel()        └────────┘   │
///   │                 ┌──────────┐ │
///   └────────────────►│CANCELLED ├─┘
///                     └──────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// An attempt is in flight, or nothing has been started yet
    #[default]
    Loading,
    /// The latest attempt succeeded; its value is available
    Normal,
    /// The latest attempt failed with this message
    Error(String),
    /// The in-flight attempt was cancelled without a replacement
    Cancelled,
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Whether no attempt is in flight
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchState::Loading => f.write_str("loading"),
            FetchState::Normal => f.write_str("normal"),
            FetchState::Error(message) => write!(f, "error: {}", message),
            FetchState::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A state change together with the attempt that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub generation: u64,
    pub state: FetchState,
}
