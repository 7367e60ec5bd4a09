//! Control-to-action mapping.
//!
//! Every activating control first stops the other tracks, then selects and
//! starts its own. No transport state is tracked: stops are sent for every
//! other track even if it is already stopped, and receivers are expected to
//! treat repeated stop/select commands as no-ops.

use std::slice;

use crate::controls::{InputControl, OutputAction, Track};

use OutputAction::*;

/// The complete mapping from controls to outbound actions, in send order.
pub const MAPPING_TABLE: [(InputControl, &[OutputAction]); 8] = [
    (
        InputControl::Play1,
        &[StopTrack2, StopTrack3, SelectTrack1, PlayTrack1],
    ),
    (
        InputControl::Play2,
        &[StopTrack1, StopTrack3, SelectTrack2, PlayTrack2],
    ),
    (
        InputControl::Play3,
        &[StopTrack1, StopTrack2, SelectTrack3, PlayTrack3],
    ),
    (
        InputControl::Rec1,
        &[StopTrack2, StopTrack3, SelectTrack1, RecordTrack1],
    ),
    (
        InputControl::Rec2,
        &[StopTrack1, StopTrack3, SelectTrack2, RecordTrack2],
    ),
    (
        InputControl::Rec3,
        &[StopTrack1, StopTrack2, SelectTrack3, RecordTrack3],
    ),
    (
        InputControl::PlayDrums,
        &[StopTrack1, StopTrack2, StopTrack3, PlayDrums],
    ),
    (InputControl::StopAll, &[StopAll]),
];

/// Ordered actions produced for a single control press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSequence(&'static [OutputAction]);

impl ActionSequence {
    pub const EMPTY: ActionSequence = ActionSequence(&[]);

    pub fn as_slice(&self) -> &'static [OutputAction] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'static, OutputAction> {
        self.0.iter()
    }

    /// Track made active by this sequence, if any.
    pub fn activated_track(&self) -> Option<Track> {
        self.0
            .iter()
            .find(|action| action.kind().is_activating())
            .and_then(|action| action.track())
    }
}

impl IntoIterator for ActionSequence {
    type Item = &'static OutputAction;
    type IntoIter = slice::Iter<'static, OutputAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolve a control to the actions it triggers.
pub fn resolve(input: InputControl) -> ActionSequence {
    MAPPING_TABLE
        .iter()
        .find(|(control, _)| *control == input)
        .map(|&(_, actions)| ActionSequence(actions))
        .unwrap_or(ActionSequence::EMPTY)
}

/// Resolve a raw inbound controller number. Unbound numbers map to nothing.
pub fn resolve_cc(cc: u8) -> ActionSequence {
    InputControl::from_cc(cc)
        .map(resolve)
        .unwrap_or(ActionSequence::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ActionKind;

    #[test]
    fn test_play_mapping() {
        assert_eq!(
            resolve(InputControl::Play1).as_slice(),
            &[StopTrack2, StopTrack3, SelectTrack1, PlayTrack1]
        );
        assert_eq!(
            resolve(InputControl::Play2).as_slice(),
            &[StopTrack1, StopTrack3, SelectTrack2, PlayTrack2]
        );
        assert_eq!(
            resolve(InputControl::Play3).as_slice(),
            &[StopTrack1, StopTrack2, SelectTrack3, PlayTrack3]
        );
    }

    #[test]
    fn test_record_mapping() {
        assert_eq!(
            resolve(InputControl::Rec1).as_slice(),
            &[StopTrack2, StopTrack3, SelectTrack1, RecordTrack1]
        );
        assert_eq!(
            resolve(InputControl::Rec2).as_slice(),
            &[StopTrack1, StopTrack3, SelectTrack2, RecordTrack2]
        );
        assert_eq!(
            resolve(InputControl::Rec3).as_slice(),
            &[StopTrack1, StopTrack2, SelectTrack3, RecordTrack3]
        );
    }

    #[test]
    fn test_drums_and_stop_all() {
        assert_eq!(
            resolve(InputControl::PlayDrums).as_slice(),
            &[StopTrack1, StopTrack2, StopTrack3, PlayDrums]
        );
        assert_eq!(resolve(InputControl::StopAll).as_slice(), &[StopAll]);
    }

    #[test]
    fn test_every_control_is_bound() {
        for control in InputControl::ALL {
            assert!(!resolve(control).is_empty(), "{} is unbound", control);
        }
    }

    #[test]
    fn test_unbound_cc_resolves_empty() {
        assert!(resolve_cc(0).is_empty());
        assert!(resolve_cc(9).is_empty());
        assert!(resolve_cc(64).is_empty());
        assert!(resolve_cc(127).is_empty());
        assert!(resolve_cc(255).is_empty());
    }

    #[test]
    fn test_resolve_cc_matches_resolve() {
        for control in InputControl::ALL {
            assert_eq!(resolve_cc(control.cc()), resolve(control));
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for control in InputControl::ALL {
            let first = resolve(control);
            for _ in 0..3 {
                assert_eq!(resolve(control), first);
            }
        }
    }

    #[test]
    fn test_one_track_active_at_a_time() {
        for control in InputControl::ALL {
            let sequence = resolve(control);
            let Some(target) = sequence.activated_track() else {
                continue;
            };

            let first_activation = sequence
                .iter()
                .position(|a| a.kind().is_activating())
                .unwrap();

            for (index, action) in sequence.iter().enumerate() {
                let track = action.track();
                if action.kind().is_activating() {
                    assert_eq!(track, Some(target), "{} activates two tracks", control);
                }
                if action.kind() == ActionKind::Stop && track != Some(target) {
                    assert!(
                        index < first_activation,
                        "{}: {} sent after activation",
                        control,
                        action
                    );
                }
            }
        }
    }

    #[test]
    fn test_activations_stop_every_other_track() {
        for control in InputControl::ALL {
            let sequence = resolve(control);
            let Some(target) = sequence.activated_track() else {
                continue;
            };
            for track in Track::ALL.into_iter().filter(|t| *t != target) {
                assert!(sequence
                    .iter()
                    .any(|a| a.kind() == ActionKind::Stop && a.track() == Some(track)));
            }
        }
    }

    #[test]
    fn test_drums_stop_all_tracks_first() {
        let sequence = resolve(InputControl::PlayDrums);
        assert_eq!(sequence.activated_track(), None);
        assert_eq!(sequence.as_slice().last(), Some(&PlayDrums));
        assert!(sequence.as_slice()[..3]
            .iter()
            .all(|a| a.kind() == ActionKind::Stop));
    }

    #[test]
    fn test_sequence_length_bounds() {
        for (_, actions) in MAPPING_TABLE {
            assert!(!actions.is_empty() && actions.len() <= 4);
        }
    }
}
