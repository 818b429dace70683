//! Mission briefing and battle report records
//!
//! Narrative text comes from an external service that may fail or time out.
//! Nothing here feeds back into combat; these types only guarantee that the
//! host always has something to show.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DuelError;

/// Opponent difficulty label shown on the briefing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Apprentice,
    #[default]
    Knight,
    Master,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Apprentice => "Apprentice",
            Difficulty::Knight => "Knight",
            Difficulty::Master => "Master",
        }
    }
}

impl FromStr for Difficulty {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apprentice" => Ok(Difficulty::Apprentice),
            "knight" => Ok(Difficulty::Knight),
            "master" => Ok(Difficulty::Master),
            _ => Err(DuelError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Pre-match briefing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionBriefing {
    pub title: String,
    pub enemy_name: String,
    pub taunt: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for MissionBriefing {
    fn default() -> Self {
        Self {
            title: "Encounter in the Reactor Core".to_string(),
            enemy_name: "The Crimson Blade".to_string(),
            taunt: "Your hold on the Force is weak...".to_string(),
            difficulty: Difficulty::Knight,
        }
    }
}

impl MissionBriefing {
    /// Fallback briefing for a requested difficulty
    pub fn fallback(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Accept a generated briefing, falling back on empty or malformed input
    ///
    /// Blank fields in an otherwise valid response are filled from the fallback.
    pub fn from_json_or_fallback(json: &str, difficulty: Difficulty) -> Self {
        if json.trim().is_empty() {
            return Self::fallback(difficulty);
        }
        match serde_json::from_str::<MissionBriefing>(json) {
            Ok(mut briefing) => {
                let fallback = Self::fallback(difficulty);
                if briefing.title.trim().is_empty() {
                    briefing.title = fallback.title;
                }
                if briefing.enemy_name.trim().is_empty() {
                    briefing.enemy_name = fallback.enemy_name;
                }
                if briefing.taunt.trim().is_empty() {
                    briefing.taunt = fallback.taunt;
                }
                briefing
            }
            Err(e) => {
                log::warn!("Briefing response rejected ({e}), using fallback");
                Self::fallback(difficulty)
            }
        }
    }
}

/// Post-match report used when the generated one is missing
pub fn battle_report_fallback(won: bool) -> &'static str {
    if won {
        "The Force is with you, young one. Your blade was true."
    } else {
        "Is that the extent of your power? How disappointing."
    }
}

/// Prefer a generated report, but never show an empty one
pub fn battle_report_or_fallback(report: &str, won: bool) -> String {
    if report.trim().is_empty() {
        battle_report_fallback(won).to_string()
    } else {
        report.to_string()
    }
}
