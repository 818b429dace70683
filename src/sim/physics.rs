//! Horizontal movement integration
//!
//! Vertical position is fixed by layout; only x is simulated.

use super::state::{CombatState, Duelist, Viewport};
use crate::tuning::Tuning;

/// Integrate one duelist for one tick
///
/// Applies velocity, stun friction, the body-separation limit and the
/// viewport bounds, then regenerates force and refreshes facing.
pub fn integrate(duelist: &mut Duelist, opponent: &Duelist, viewport: &Viewport, tuning: &Tuning) {
    if duelist.is_defeated() {
        return;
    }

    let prev_x = duelist.pos.x;
    let mut x = prev_x + duelist.vel.x;

    if duelist.state == CombatState::Stunned {
        duelist.vel.x *= tuning.stun_friction;
    }

    // Never walk into or through the opponent; on a tie the player holds the left
    let sep = tuning.min_separation;
    let on_left =
        prev_x < opponent.pos.x || (prev_x == opponent.pos.x && duelist.is_player());
    if on_left {
        let limit = opponent.pos.x - sep;
        if x > limit {
            x = limit.max(prev_x).min(x);
        }
    } else {
        let limit = opponent.pos.x + sep;
        if x < limit {
            x = limit.min(prev_x).max(x);
        }
    }

    let (min_x, max_x) = viewport.lateral_bounds(duelist.width, tuning.edge_margin);
    duelist.pos.x = x.clamp(min_x, max_x);

    if duelist.force < duelist.max_force {
        duelist.force = (duelist.force + tuning.force_regen).min(duelist.max_force);
    }

    if duelist.state.is_free() {
        duelist.direction = duelist.direction_to(opponent);
    }
}
