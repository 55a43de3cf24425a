//! Demo driver
//!
//! Produces input the way a cautious player would: dodge the closest
//! threatening obstacle, otherwise line up under the next product.

use super::state::{GameState, ObjectKind};
use super::tick::TickInput;

/// How far above the player an obstacle counts as a threat
const THREAT_RANGE: f32 = 260.0;
/// Horizontal slack when lining up or dodging
const MARGIN: f32 = 12.0;

pub fn steer(state: &GameState) -> TickInput {
    let player = state.player.rect();
    let mut input = TickInput {
        down: true,
        ..Default::default()
    };

    let threat = state
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Obstacle)
        .filter(|o| {
            let r = o.rect();
            r.bottom() <= player.bottom()
                && player.top() - r.bottom() < THREAT_RANGE
                && r.right() + MARGIN > player.left()
                && r.left() - MARGIN < player.right()
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(obstacle) = threat {
        // Dodge toward whichever side of the obstacle is closer
        if obstacle.rect().center().x > player.center().x {
            input.left = true;
        } else {
            input.right = true;
        }
        input.boost = true;
        return input;
    }

    let target = state
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Product && o.rect().bottom() <= player.bottom())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(product) = target {
        let dx = product.rect().center().x - player.center().x;
        if dx > MARGIN {
            input.right = true;
        } else if dx < -MARGIN {
            input.left = true;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_kind;
    use crate::sim::state::GamePhase;

    fn playing() -> GameState {
        let mut state = GameState::new(11);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_dodges_obstacle_overhead() {
        let mut state = playing();
        let id = spawn_kind(&mut state, ObjectKind::Obstacle);
        let player = state.player.rect();
        let obj = state.objects.iter_mut().find(|o| o.id == id).unwrap();
        // Slightly right of centre, just above the player
        obj.pos.x = player.center().x - obj.size.x / 2.0 + 5.0;
        obj.pos.y = player.top() - 100.0;

        let input = steer(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_chases_product() {
        let mut state = playing();
        let id = spawn_kind(&mut state, ObjectKind::Product);
        let obj = state.objects.iter_mut().find(|o| o.id == id).unwrap();
        obj.pos.x = 0.0;
        obj.pos.y = 100.0;

        let input = steer(&state);
        assert!(input.left);
    }

    #[test]
    fn test_idle_when_nothing_to_do() {
        let state = playing();
        let input = steer(&state);
        assert!(!input.left && !input.right);
    }
}
