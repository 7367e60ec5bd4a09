/// Status nibble for a Control Change message.
pub const CONTROL_CHANGE: u8 = 0xB0;

/// A Control Change received from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

impl ControlEvent {
    pub fn new(channel: u8, controller: u8, value: u8) -> Self {
        Self {
            channel,
            controller,
            value,
        }
    }

    /// Decode raw MIDI bytes. Anything other than a complete Control Change
    /// is ignored.
    pub fn decode(message: &[u8]) -> Option<Self> {
        match message {
            [status, controller, value, ..] if status & 0xF0 == CONTROL_CHANGE => Some(Self {
                channel: status & 0x0F,
                controller: controller & 0x7F,
                value: value & 0x7F,
            }),
            _ => None,
        }
    }

    /// Button pressed rather than released.
    pub fn is_press(&self) -> bool {
        self.value > 0
    }
}

/// A Control Change to send on the output bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

impl ControlChange {
    pub fn new(channel: u8, controller: u8, value: u8) -> Self {
        Self {
            channel,
            controller,
            value,
        }
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [
            CONTROL_CHANGE | (self.channel & 0x0F),
            self.controller & 0x7F,
            self.value & 0x7F,
        ]
    }
}
