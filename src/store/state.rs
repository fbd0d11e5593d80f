//! Loading state of the article store.

use std::fmt;

use serde::Serialize;

/// Where the store is in its one-time initialization.
///
/// `Idle → Loading → Success | Error`.  Only a fresh initialization attempt
/// moves the store back to `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl LoadingState {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadingState::Idle => "idle",
            LoadingState::Loading => "loading",
            LoadingState::Success => "success",
            LoadingState::Error => "error",
        }
    }

    pub fn is_loading(self) -> bool {
        self == LoadingState::Loading
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
