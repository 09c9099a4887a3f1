//! Application state for the web server.

/// Shared, read-only application state.
///
/// Requests carry their own rows and build their own dataset, so nothing
/// here is mutable.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Largest number of rows accepted in one dataset payload.
    pub max_rows: usize,
    /// Crate version reported by the health endpoint.
    pub version: &'static str,
}

impl AppState {
    /// Create new application state.
    pub fn new(max_rows: usize) -> Self {
        Self {
            max_rows,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(100_000)
    }
}
