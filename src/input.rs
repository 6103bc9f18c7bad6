//! # Input intent flags
//!
//! The host's key handlers never touch simulation state directly; they only
//! set or clear flags here, and the next [`GameCore::tick`] reads them. Drive
//! flags are level-triggered (held keys), attachment intents are one-shots
//! that fire exactly once per press.
//!
//! [`GameCore::tick`]: crate::simulation::GameCore::tick

/// Per-frame input state polled by the game tick
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Drive forward along the excavator's facing
    pub forward: bool,
    /// Drive backward
    pub backward: bool,
    /// Yaw the excavator left
    pub turn_left: bool,
    /// Yaw the excavator right
    pub turn_right: bool,
    /// Raise the boom (decreases the boom angle)
    pub boom_up: bool,
    /// Lower the boom
    pub boom_down: bool,
    /// Curl the stick in
    pub stick_in: bool,
    /// Extend the stick out
    pub stick_out: bool,

    // One-shot intents, set on key press and cleared by the tick that
    // consumes them.
    cycle_attachment: bool,
    magnet_action: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request to cycle to the next attachment
    pub fn press_cycle_attachment(&mut self) {
        self.cycle_attachment = true;
    }

    /// Registers a magnet attract/release request
    pub fn press_magnet_action(&mut self) {
        self.magnet_action = true;
    }

    /// Consumes the pending cycle request, if any
    pub(crate) fn take_cycle_attachment(&mut self) -> bool {
        std::mem::take(&mut self.cycle_attachment)
    }

    /// Consumes the pending magnet request, if any
    pub(crate) fn take_magnet_action(&mut self) -> bool {
        std::mem::take(&mut self.magnet_action)
    }

    /// Clears every flag, including held drive keys
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
