//! Error types for the protocol layer.
//!
//! Each Sketchduel crate defines its own error enum. A `ProtocolError`
//! always means bytes could not be turned into a value or back, never that
//! a game rule was broken.

/// Errors that can occur while encoding or decoding wire values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, a missing field, or a value
    /// out of range (a player slot other than 1 or 2, for example).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
