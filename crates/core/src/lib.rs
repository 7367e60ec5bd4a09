//! Core of the trackswitch MIDI remapper.
//!
//! A press on the controller becomes an ordered burst of Control Change
//! triggers on a virtual bus, keeping exactly one track active at a time:
//!
//! ```text
//! controller --CC--> ControlEvent --resolve--> ActionSequence --dispatch--> output bus
//! ```
//!
//! The mapping itself is a pure table lookup. Everything stateful (ports,
//! the event stream, shutdown) lives at the edges in [`midi`], [`session`]
//! and [`shutdown`].

pub use config::{ConfigManager, Settings};
pub use controls::{ActionKind, InputControl, OutputAction, Track};
pub use dispatch::{dispatch, DispatchReport};
pub use error::{ConfigError, PortDirection, StartupError, TransmitError};
pub use mapping::{resolve, resolve_cc, ActionSequence, MAPPING_TABLE};
pub use midi::{ControlChange, ControlEvent, ControlSink, MidiTransport, PortListing};
pub use session::{Remapper, SessionStats};
pub use shutdown::{ShutdownSignal, ShutdownTrigger};

pub mod config;
pub mod controls;
pub mod dispatch;
pub mod error;
pub mod mapping;
pub mod midi;
pub mod session;
pub mod shutdown;
