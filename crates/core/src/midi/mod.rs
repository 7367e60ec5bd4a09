//! MIDI wire types and the midir transport.

mod event;
mod transport;

pub use event::{ControlChange, ControlEvent, CONTROL_CHANGE};
pub use transport::{
    find_port, ControlSink, MidiListener, MidiOutputSink, MidiTransport, PortListing,
};
