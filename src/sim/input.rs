//! Level-based input snapshot
//!
//! The host keeps a live set of held key codes; every tick it is sampled into
//! an [`InputSnapshot`]. A key held across ticks is seen as pressed on every
//! one of them (holding block re-arms its sustain timer each tick).

use serde::{Deserialize, Serialize};

/// Held actions for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub block: bool,
    /// Force push
    pub ability: bool,
}

impl InputSnapshot {
    /// Horizontal intent: -1, 0 or +1 (right wins when both are held)
    pub fn horizontal(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Key code to action mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub attack: Vec<String>,
    pub block: Vec<String>,
    pub ability: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            left: codes(&["KeyA", "ArrowLeft"]),
            right: codes(&["KeyD", "ArrowRight"]),
            attack: codes(&["KeyJ"]),
            block: codes(&["KeyS"]),
            ability: codes(&["KeyK"]),
        }
    }
}

impl KeyBindings {
    /// Sample the currently held key codes
    pub fn snapshot<'a, I>(&self, held: I) -> InputSnapshot
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut input = InputSnapshot::default();
        for code in held {
            let bound = |list: &[String]| list.iter().any(|k| k == code);
            input.left |= bound(&self.left);
            input.right |= bound(&self.right);
            input.attack |= bound(&self.attack);
            input.block |= bound(&self.block);
            input.ability |= bound(&self.ability);
        }
        input
    }
}
