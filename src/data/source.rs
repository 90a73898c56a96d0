// ABOUTME: StateSource trait abstraction for snapshot access
// Provides a generic interface for reading saved graph state, enabling alternative implementations

use crate::data::model::GraphState;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::any::Any;

/// Trait for abstracting snapshot access in desmos-tables
///
/// This trait defines the interface for obtaining a graph state snapshot,
/// allowing for different implementations (e.g. a saved state file, a
/// snapshot directory, piped stdin, mock data). All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Get the concrete type as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Check if the underlying snapshot has changed since last read
    ///
    /// Returns true if the snapshot has been modified, false otherwise.
    /// Implementations should track modification time internally. One-shot
    /// sources (stdin) always return false.
    async fn has_changed(&mut self) -> Result<bool>;

    /// Load the current snapshot
    ///
    /// Returns the parsed graph state as of this call. The returned value is
    /// a read-only copy; the host application still owns the data.
    async fn load_state(&self) -> Result<GraphState>;

    /// Human-readable description of where the snapshot comes from,
    /// used in logs and error guidance
    fn describe(&self) -> String;
}

/// Mock implementation of StateSource for testing
#[cfg(test)]
pub struct MockStateSource {
    pub has_changed_response: bool,
    pub state: Option<GraphState>,
}

#[cfg(test)]
impl MockStateSource {
    pub fn new() -> Self {
        Self {
            has_changed_response: false,
            state: None,
        }
    }

    pub fn with_state(state: GraphState) -> Self {
        Self {
            has_changed_response: false,
            state: Some(state),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl StateSource for MockStateSource {
    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn has_changed(&mut self) -> Result<bool> {
        Ok(self.has_changed_response)
    }

    async fn load_state(&self) -> Result<GraphState> {
        self.state
            .clone()
            .ok_or_else(|| crate::utils::error::ExportError::Config("No mock state set".to_string()))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
