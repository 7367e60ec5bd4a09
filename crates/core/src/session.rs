//! The listening loop: decode, gate, resolve, dispatch.

use tokio::sync::mpsc;

use crate::config::Settings;
use crate::controls::InputControl;
use crate::dispatch::{dispatch, DispatchReport};
use crate::error::TransmitError;
use crate::mapping::resolve;
use crate::midi::{ControlChange, ControlEvent, ControlSink};
use crate::shutdown::ShutdownSignal;

/// Counters for one listening session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Control Change events received, presses and releases alike.
    pub events_received: u64,
    /// Presses of a bound control.
    pub events_mapped: u64,
    pub sends_attempted: u64,
    pub sends_failed: u64,
}

/// Translates controller presses into transport actions on a sink.
#[derive(Debug, Clone)]
pub struct Remapper {
    send_channel: u8,
    send_value: u8,
}

impl Remapper {
    pub fn new(settings: &Settings) -> Self {
        Self {
            send_channel: settings.send_channel,
            send_value: settings.send_value,
        }
    }

    /// Wire message for one action.
    pub fn message_for(&self, cc: u8) -> ControlChange {
        ControlChange::new(self.send_channel, cc, self.send_value)
    }

    /// Process a single event.
    ///
    /// Releases and unbound controllers return `None` without touching the
    /// sink. Send failures are logged once for the whole sequence.
    pub fn handle_event<S: ControlSink>(
        &self,
        event: ControlEvent,
        sink: &mut S,
    ) -> Option<DispatchReport<TransmitError>> {
        if !event.is_press() {
            return None;
        }

        let Some(control) = InputControl::from_cc(event.controller) else {
            log::debug!("Ignoring unmapped control change {}", event.controller);
            return None;
        };

        log::info!(
            "Received control change {} ({}) on channel {}",
            event.controller,
            control,
            event.channel
        );

        let report = dispatch(resolve(control), |action| {
            log::info!("Sending {} (cc {})", action, action.cc());
            sink.send(self.message_for(action.cc()))
        });

        if !report.is_success() {
            let summary: Vec<String> = report
                .failures()
                .map(|(action, e)| format!("{}: {}", action, e))
                .collect();
            log::warn!(
                "{} of {} sends failed for {}: {}",
                summary.len(),
                report.attempted(),
                control,
                summary.join("; ")
            );
        }

        Some(report)
    }

    /// Consume events in arrival order until shutdown or the stream closes.
    ///
    /// Shutdown is only observed between events, so a sequence that has
    /// started is always sent in full.
    pub async fn run<S: ControlSink>(
        &self,
        mut events: mpsc::UnboundedReceiver<ControlEvent>,
        sink: &mut S,
        mut shutdown: ShutdownSignal,
    ) -> SessionStats {
        let mut stats = SessionStats::default();

        loop {
            if shutdown.is_cancelled() {
                log::info!("Shutdown requested, no longer accepting input");
                break;
            }

            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    log::info!("Shutdown requested, no longer accepting input");
                    break;
                }
                event = events.recv() => event,
            };

            let Some(event) = event else {
                log::info!("Control event stream closed");
                break;
            };

            stats.events_received += 1;
            if let Some(report) = self.handle_event(event, sink) {
                stats.events_mapped += 1;
                stats.sends_attempted += report.attempted() as u64;
                stats.sends_failed += report.failure_count() as u64;
            }
        }

        events.close();
        stats
    }
}
