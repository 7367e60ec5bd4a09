//! Sequential, best-effort sending of an action sequence.

use crate::controls::OutputAction;
use crate::mapping::ActionSequence;

/// Per-action outcome of one dispatch, in send order.
#[derive(Debug)]
pub struct DispatchReport<E> {
    outcomes: Vec<(OutputAction, Result<(), E>)>,
}

impl<E> DispatchReport<E> {
    pub fn outcomes(&self) -> &[(OutputAction, Result<(), E>)] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<(OutputAction, Result<(), E>)> {
        self.outcomes
    }

    /// Number of send attempts made.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = (OutputAction, &E)> {
        self.outcomes
            .iter()
            .filter_map(|(action, result)| result.as_ref().err().map(|e| (*action, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, result)| result.is_ok())
    }
}

/// Send every action in order, once each.
///
/// A failed send does not stop the remaining actions from being attempted.
pub fn dispatch<F, E>(sequence: ActionSequence, mut send: F) -> DispatchReport<E>
where
    F: FnMut(OutputAction) -> Result<(), E>,
{
    let outcomes = sequence
        .iter()
        .map(|&action| (action, send(action)))
        .collect();

    DispatchReport { outcomes }
}
