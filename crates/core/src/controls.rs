//! Physical controls and outbound transport actions.
//!
//! # Input CC layout (controller, channel ignored)
//!
//! ```text
//! CC 1-3: Play track 1-3
//! CC 4:   Play drums
//! CC 5-7: Record track 1-3
//! CC 8:   Stop all
//! ```
//!
//! # Output CC layout (virtual bus)
//!
//! ```text
//! CC 1:     Play drums
//! CC 2:     Stop all
//! CC 5-8:   Track 1 stop, select, play, record
//! CC 9-12:  Track 2 stop, select, play, record
//! CC 13-16: Track 3 stop, select, play, record
//! ```

use std::fmt;

/// A logical recording/playback track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Track {
    One,
    Two,
    Three,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::One, Track::Two, Track::Three];

    /// 1-based track number.
    pub fn number(self) -> u8 {
        match self {
            Track::One => 1,
            Track::Two => 2,
            Track::Three => 3,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {}", self.number())
    }
}

/// A button on the hardware controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputControl {
    Play1,
    Play2,
    Play3,
    PlayDrums,
    Rec1,
    Rec2,
    Rec3,
    StopAll,
}

impl InputControl {
    pub const ALL: [InputControl; 8] = [
        InputControl::Play1,
        InputControl::Play2,
        InputControl::Play3,
        InputControl::PlayDrums,
        InputControl::Rec1,
        InputControl::Rec2,
        InputControl::Rec3,
        InputControl::StopAll,
    ];

    pub const PLAY_1: u8 = 1;
    pub const PLAY_2: u8 = 2;
    pub const PLAY_3: u8 = 3;
    pub const PLAY_DRUMS: u8 = 4;
    pub const REC_1: u8 = 5;
    pub const REC_2: u8 = 6;
    pub const REC_3: u8 = 7;
    pub const STOP_ALL: u8 = 8;

    /// Look up the control bound to an inbound controller number.
    pub fn from_cc(cc: u8) -> Option<Self> {
        match cc {
            Self::PLAY_1 => Some(InputControl::Play1),
            Self::PLAY_2 => Some(InputControl::Play2),
            Self::PLAY_3 => Some(InputControl::Play3),
            Self::PLAY_DRUMS => Some(InputControl::PlayDrums),
            Self::REC_1 => Some(InputControl::Rec1),
            Self::REC_2 => Some(InputControl::Rec2),
            Self::REC_3 => Some(InputControl::Rec3),
            Self::STOP_ALL => Some(InputControl::StopAll),
            _ => None,
        }
    }

    /// Controller number this control sends.
    pub fn cc(self) -> u8 {
        match self {
            InputControl::Play1 => Self::PLAY_1,
            InputControl::Play2 => Self::PLAY_2,
            InputControl::Play3 => Self::PLAY_3,
            InputControl::PlayDrums => Self::PLAY_DRUMS,
            InputControl::Rec1 => Self::REC_1,
            InputControl::Rec2 => Self::REC_2,
            InputControl::Rec3 => Self::REC_3,
            InputControl::StopAll => Self::STOP_ALL,
        }
    }
}

impl fmt::Display for InputControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputControl::Play1 => "play 1",
            InputControl::Play2 => "play 2",
            InputControl::Play3 => "play 3",
            InputControl::PlayDrums => "play drums",
            InputControl::Rec1 => "rec 1",
            InputControl::Rec2 => "rec 2",
            InputControl::Rec3 => "rec 3",
            InputControl::StopAll => "stop all",
        };
        f.write_str(name)
    }
}

/// What an outbound action does, independent of the track it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Stop,
    Select,
    Play,
    Record,
    PlayDrums,
    StopAll,
}

impl ActionKind {
    /// Select, play and record make a track the active one.
    pub fn is_activating(self) -> bool {
        matches!(self, ActionKind::Select | ActionKind::Play | ActionKind::Record)
    }
}

/// An instruction sent to the virtual bus as a single CC trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputAction {
    PlayDrums,
    StopAll,
    StopTrack1,
    SelectTrack1,
    PlayTrack1,
    RecordTrack1,
    StopTrack2,
    SelectTrack2,
    PlayTrack2,
    RecordTrack2,
    StopTrack3,
    SelectTrack3,
    PlayTrack3,
    RecordTrack3,
}

impl OutputAction {
    pub const ALL: [OutputAction; 14] = [
        OutputAction::PlayDrums,
        OutputAction::StopAll,
        OutputAction::StopTrack1,
        OutputAction::SelectTrack1,
        OutputAction::PlayTrack1,
        OutputAction::RecordTrack1,
        OutputAction::StopTrack2,
        OutputAction::SelectTrack2,
        OutputAction::PlayTrack2,
        OutputAction::RecordTrack2,
        OutputAction::StopTrack3,
        OutputAction::SelectTrack3,
        OutputAction::PlayTrack3,
        OutputAction::RecordTrack3,
    ];

    pub const PLAY_DRUMS: u8 = 1;
    pub const STOP_ALL: u8 = 2;
    pub const STOP_TRACK_1: u8 = 5;
    pub const SELECT_TRACK_1: u8 = 6;
    pub const PLAY_TRACK_1: u8 = 7;
    pub const RECORD_TRACK_1: u8 = 8;
    pub const STOP_TRACK_2: u8 = 9;
    pub const SELECT_TRACK_2: u8 = 10;
    pub const PLAY_TRACK_2: u8 = 11;
    pub const RECORD_TRACK_2: u8 = 12;
    pub const STOP_TRACK_3: u8 = 13;
    pub const SELECT_TRACK_3: u8 = 14;
    pub const PLAY_TRACK_3: u8 = 15;
    pub const RECORD_TRACK_3: u8 = 16;

    /// Controller number sent on the output bus.
    pub fn cc(self) -> u8 {
        match self {
            OutputAction::PlayDrums => Self::PLAY_DRUMS,
            OutputAction::StopAll => Self::STOP_ALL,
            OutputAction::StopTrack1 => Self::STOP_TRACK_1,
            OutputAction::SelectTrack1 => Self::SELECT_TRACK_1,
            OutputAction::PlayTrack1 => Self::PLAY_TRACK_1,
            OutputAction::RecordTrack1 => Self::RECORD_TRACK_1,
            OutputAction::StopTrack2 => Self::STOP_TRACK_2,
            OutputAction::SelectTrack2 => Self::SELECT_TRACK_2,
            OutputAction::PlayTrack2 => Self::PLAY_TRACK_2,
            OutputAction::RecordTrack2 => Self::RECORD_TRACK_2,
            OutputAction::StopTrack3 => Self::STOP_TRACK_3,
            OutputAction::SelectTrack3 => Self::SELECT_TRACK_3,
            OutputAction::PlayTrack3 => Self::PLAY_TRACK_3,
            OutputAction::RecordTrack3 => Self::RECORD_TRACK_3,
        }
    }

    /// Track targeted by this action, `None` for the global actions.
    pub fn track(self) -> Option<Track> {
        match self {
            OutputAction::StopTrack1
            | OutputAction::SelectTrack1
            | OutputAction::PlayTrack1
            | OutputAction::RecordTrack1 => Some(Track::One),
            OutputAction::StopTrack2
            | OutputAction::SelectTrack2
            | OutputAction::PlayTrack2
            | OutputAction::RecordTrack2 => Some(Track::Two),
            OutputAction::StopTrack3
            | OutputAction::SelectTrack3
            | OutputAction::PlayTrack3
            | OutputAction::RecordTrack3 => Some(Track::Three),
            OutputAction::PlayDrums | OutputAction::StopAll => None,
        }
    }

    pub fn kind(self) -> ActionKind {
        match self {
            OutputAction::PlayDrums => ActionKind::PlayDrums,
            OutputAction::StopAll => ActionKind::StopAll,
            OutputAction::StopTrack1 | OutputAction::StopTrack2 | OutputAction::StopTrack3 => {
                ActionKind::Stop
            }
            OutputAction::SelectTrack1
            | OutputAction::SelectTrack2
            | OutputAction::SelectTrack3 => ActionKind::Select,
            OutputAction::PlayTrack1 | OutputAction::PlayTrack2 | OutputAction::PlayTrack3 => {
                ActionKind::Play
            }
            OutputAction::RecordTrack1
            | OutputAction::RecordTrack2
            | OutputAction::RecordTrack3 => ActionKind::Record,
        }
    }
}

impl fmt::Display for OutputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.track()) {
            (ActionKind::PlayDrums, _) => f.write_str("play drums"),
            (ActionKind::StopAll, _) => f.write_str("stop all"),
            (ActionKind::Stop, Some(track)) => write!(f, "stop {}", track),
            (ActionKind::Select, Some(track)) => write!(f, "select {}", track),
            (ActionKind::Play, Some(track)) => write!(f, "play {}", track),
            (ActionKind::Record, Some(track)) => write!(f, "record {}", track),
            (_, None) => write!(f, "cc {}", self.cc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_input_cc_round_trip() {
        for control in InputControl::ALL {
            assert_eq!(InputControl::from_cc(control.cc()), Some(control));
        }
    }

    #[test]
    fn test_unbound_input_cc() {
        assert_eq!(InputControl::from_cc(0), None);
        assert_eq!(InputControl::from_cc(9), None);
        assert_eq!(InputControl::from_cc(127), None);
    }

    #[test]
    fn test_output_cc_numbers_are_unique() {
        let numbers: HashSet<u8> = OutputAction::ALL.iter().map(|a| a.cc()).collect();
        assert_eq!(numbers.len(), OutputAction::ALL.len());
    }

    #[test]
    fn test_track_block_layout() {
        assert_eq!(OutputAction::StopTrack2.cc(), 9);
        assert_eq!(OutputAction::RecordTrack3.cc(), 16);
        assert_eq!(OutputAction::PlayTrack1.track(), Some(Track::One));
        assert_eq!(OutputAction::SelectTrack3.kind(), ActionKind::Select);
        assert_eq!(OutputAction::StopAll.track(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputAction::SelectTrack2.to_string(), "select track 2");
        assert_eq!(OutputAction::PlayDrums.to_string(), "play drums");
        assert_eq!(InputControl::Rec3.to_string(), "rec 3");
    }
}
