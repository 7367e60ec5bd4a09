use std::fmt;

use thiserror::Error;

/// Which side of the remapper a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

/// Fatal problems while opening the MIDI ports.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("MIDI {direction} port matching '{name}' not found")]
    PortNotFound {
        direction: PortDirection,
        name: String,
    },

    #[error("failed to initialise MIDI {direction} driver: {reason}")]
    Init {
        direction: PortDirection,
        reason: String,
    },

    #[error("failed to connect MIDI {direction} port '{name}': {reason}")]
    Connect {
        direction: PortDirection,
        name: String,
        reason: String,
    },
}

/// A single outbound send that did not go through.
#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("failed to send cc {controller} on channel {channel}: {reason}")]
    Send {
        channel: u8,
        controller: u8,
        reason: String,
    },

    #[error("MIDI output not connected")]
    Disconnected,
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to write config file: {0}")]
    Write(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Config validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),
}
