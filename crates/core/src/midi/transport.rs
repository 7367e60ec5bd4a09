use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tokio::sync::mpsc;

use super::event::{ControlChange, ControlEvent};
use crate::config::Settings;
use crate::error::{PortDirection, StartupError, TransmitError};

/// Destination for outbound Control Change messages.
pub trait ControlSink {
    fn send(&mut self, message: ControlChange) -> Result<(), TransmitError>;
}

impl<S: ControlSink + ?Sized> ControlSink for &mut S {
    fn send(&mut self, message: ControlChange) -> Result<(), TransmitError> {
        (**self).send(message)
    }
}

impl<S: ControlSink + ?Sized> ControlSink for Box<S> {
    fn send(&mut self, message: ControlChange) -> Result<(), TransmitError> {
        (**self).send(message)
    }
}

/// Port names reported by the MIDI driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortListing {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Index of the first port whose name contains `pattern`.
pub fn find_port<S: AsRef<str>>(names: &[S], pattern: &str) -> Option<usize> {
    names.iter().position(|name| name.as_ref().contains(pattern))
}

/// midir-backed MIDI transport.
pub struct MidiTransport;

impl MidiTransport {
    /// Enumerate the available input and output ports.
    pub fn list_ports(client_name: &str) -> Result<PortListing, StartupError> {
        let midi_in = new_input(client_name)?;
        let midi_out = new_output(client_name)?;

        let inputs = midi_in
            .ports()
            .iter()
            .filter_map(|port| midi_in.port_name(port).ok())
            .collect();
        let outputs = midi_out
            .ports()
            .iter()
            .filter_map(|port| midi_out.port_name(port).ok())
            .collect();

        Ok(PortListing { inputs, outputs })
    }

    /// Connect to the configured controller and output bus.
    ///
    /// The output is connected first so no event can arrive before there is
    /// somewhere to send its actions.
    pub fn open(settings: &Settings) -> Result<(MidiListener, MidiOutputSink), StartupError> {
        let sink = MidiOutputSink::connect(&settings.client_name, &settings.output_port)?;
        let listener = MidiListener::connect(&settings.client_name, &settings.input_port)?;
        Ok((listener, sink))
    }
}

fn new_input(client_name: &str) -> Result<MidiInput, StartupError> {
    MidiInput::new(&format!("{}-in", client_name)).map_err(|e| StartupError::Init {
        direction: PortDirection::Input,
        reason: e.to_string(),
    })
}

fn new_output(client_name: &str) -> Result<MidiOutput, StartupError> {
    MidiOutput::new(&format!("{}-out", client_name)).map_err(|e| StartupError::Init {
        direction: PortDirection::Output,
        reason: e.to_string(),
    })
}

/// Open connection to the controller.
///
/// Decoded Control Change events are queued on a single-consumer channel in
/// arrival order. Dropping the listener closes the port.
pub struct MidiListener {
    connection: MidiInputConnection<()>,
    events: Option<mpsc::UnboundedReceiver<ControlEvent>>,
    port_name: String,
}

impl MidiListener {
    fn connect(client_name: &str, pattern: &str) -> Result<Self, StartupError> {
        let mut midi_in = new_input(client_name)?;
        midi_in.ignore(Ignore::All);

        let ports = midi_in.ports();
        let names: Vec<String> = ports
            .iter()
            .map(|port| midi_in.port_name(port).unwrap_or_default())
            .collect();

        let index = find_port(&names, pattern).ok_or_else(|| StartupError::PortNotFound {
            direction: PortDirection::Input,
            name: pattern.to_string(),
        })?;
        let port_name = names[index].clone();

        let (tx, rx) = mpsc::unbounded_channel();
        let connection = midi_in
            .connect(
                &ports[index],
                &format!("{}-listener", client_name),
                move |_timestamp, message, _| {
                    if let Some(event) = ControlEvent::decode(message) {
                        if tx.send(event).is_err() {
                            log::debug!("Dropping control change, no listener");
                        }
                    }
                },
                (),
            )
            .map_err(|e| StartupError::Connect {
                direction: PortDirection::Input,
                name: port_name.clone(),
                reason: e.to_string(),
            })?;

        log::info!("Listening on MIDI input '{}'", port_name);

        Ok(Self {
            connection,
            events: Some(rx),
            port_name,
        })
    }

    /// Take the event stream. Only the first call returns it.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<ControlEvent>> {
        self.events.take()
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Stop listening and release the port.
    pub fn close(self) {
        let _ = self.connection.close();
        log::info!("Closed MIDI input '{}'", self.port_name);
    }
}

/// Open connection to the output bus.
pub struct MidiOutputSink {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidiOutputSink {
    fn connect(client_name: &str, pattern: &str) -> Result<Self, StartupError> {
        let midi_out = new_output(client_name)?;

        let ports = midi_out.ports();
        let names: Vec<String> = ports
            .iter()
            .map(|port| midi_out.port_name(port).unwrap_or_default())
            .collect();

        let index = find_port(&names, pattern).ok_or_else(|| StartupError::PortNotFound {
            direction: PortDirection::Output,
            name: pattern.to_string(),
        })?;
        let port_name = names[index].clone();

        let connection = midi_out
            .connect(&ports[index], &format!("{}-sender", client_name))
            .map_err(|e| StartupError::Connect {
                direction: PortDirection::Output,
                name: port_name.clone(),
                reason: e.to_string(),
            })?;

        log::info!("Sending to MIDI output '{}'", port_name);

        Ok(Self {
            connection,
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn close(self) {
        let _ = self.connection.close();
        log::info!("Closed MIDI output '{}'", self.port_name);
    }
}

impl ControlSink for MidiOutputSink {
    fn send(&mut self, message: ControlChange) -> Result<(), TransmitError> {
        self.connection
            .send(&message.to_bytes())
            .map_err(|e| TransmitError::Send {
                channel: message.channel,
                controller: message.controller,
                reason: e.to_string(),
            })
    }
}
