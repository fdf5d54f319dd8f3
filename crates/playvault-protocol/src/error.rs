//! Error types for the protocol layer.

/// Errors that can occur while parsing protocol-level values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The slot name is not one of the three fixed save slots.
    #[error("unrecognized save slot: {0:?}")]
    InvalidSlot(String),
}
