//! Audio cue identifiers
//!
//! The simulation never synthesizes sound. It emits cues as events and the
//! host decides how (or whether) to play them.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// A new attack started
    Swing,
    /// Blades met: blocked swing, mutual clash, or blocked push
    Clash,
    /// Force push released
    Push,
    /// Damage landed (or an unblocked push connected)
    Hit,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Swing => "swing",
            AudioCue::Clash => "clash",
            AudioCue::Push => "push",
            AudioCue::Hit => "hit",
        }
    }
}
