//! Routing error types
//!
//! None of these are fatal: the command dispatcher reports them on the
//! diagnostic channel and the device keeps running.

use thiserror::Error;

/// Errors reported by the routing device
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Wrong number of startup arguments
    #[error("invalid number of arguments ({got}). usage: ioType (i.e. midi_inputs) [channelOffset]")]
    ArgumentCount { got: usize },

    /// Axis selector is not one of the four known IO kinds
    #[error("unknown ioType '{0}' (expected midi_inputs, midi_outputs, audio_inputs or audio_outputs)")]
    InvalidAxis(String),

    /// Channel offset is not a non-negative integer
    #[error("invalid channelOffset '{0}' (expected a zero-based integer)")]
    InvalidChannelOffset(String),

    /// A command arrived before a successful init
    #[error("called {command} before init; init must be triggered once the device is loaded")]
    Uninitialized { command: &'static str },

    /// Menu index is not a finite, non-negative integer
    #[error("invalid argument for {command}: {value}; expected a menu item index")]
    InvalidIndex { command: &'static str, value: String },

    /// Menu index does not resolve to a routing type
    #[error("invalid routing type: {index} ({available} available)")]
    InvalidRoutingType { index: usize, available: usize },

    /// Menu index does not resolve to a routing channel
    #[error("invalid routing channel: {index} ({available} available)")]
    InvalidRoutingChannel { index: usize, available: usize },

    /// Inbound message with an unknown selector
    #[error("unknown message '{0}' (expected init, settype, setchannel or routethistrack)")]
    UnknownCommand(String),
}

impl RoutingError {
    /// True for every flavour of rejected menu index
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            RoutingError::InvalidIndex { .. }
                | RoutingError::InvalidRoutingType { .. }
                | RoutingError::InvalidRoutingChannel { .. }
        )
    }
}

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_classification() {
        assert!(RoutingError::InvalidRoutingType { index: 4, available: 3 }.is_index_error());
        assert!(RoutingError::InvalidRoutingChannel { index: 1, available: 0 }.is_index_error());
        assert!(RoutingError::InvalidIndex {
            command: "settype",
            value: "\"x\"".to_string()
        }
        .is_index_error());
        assert!(!RoutingError::Uninitialized { command: "settype" }.is_index_error());
        assert!(!RoutingError::ArgumentCount { got: 0 }.is_index_error());
    }

    #[test]
    fn test_messages_name_offending_value() {
        let err = RoutingError::InvalidIndex {
            command: "setchannel",
            value: "-1".to_string(),
        };
        assert!(err.to_string().contains("setchannel"));
        assert!(err.to_string().contains("-1"));

        let err = RoutingError::InvalidRoutingType { index: 7, available: 3 };
        assert_eq!(err.to_string(), "invalid routing type: 7 (3 available)");
    }
}
