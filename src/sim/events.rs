//! Notifications raised by the simulation
//!
//! The tick only records what happened. The host drains the queue once per
//! frame and forwards it to whoever cares (audio, HUD, leaderboard).

use super::state::GameState;

/// Something observable happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Session left `Idle`
    Started,
    /// Product picked up
    Collected { id: u32, points: u64 },
    /// Obstacle struck the player
    Hit { id: u32, lives_left: u8 },
    /// Score changed to the given value
    ScoreChanged(u64),
    Paused,
    Resumed,
    /// Lives ran out
    GameOver { score: u64, new_best: bool },
}

/// Fire-and-forget receiver for game events
///
/// Every method defaults to a no-op so listeners only implement what they use.
pub trait GameListener {
    fn on_start(&mut self) {}
    fn on_collect(&mut self) {}
    fn on_hit(&mut self) {}
    fn on_game_over(&mut self, _score: u64, _new_best: bool) {}
    fn on_score_change(&mut self, _score: u64) {}
    fn on_pause(&mut self, _paused: bool) {}
}

/// Forward a single event to a listener
pub fn notify(event: &GameEvent, listener: &mut dyn GameListener) {
    match *event {
        GameEvent::Started => listener.on_start(),
        GameEvent::Collected { .. } => listener.on_collect(),
        GameEvent::Hit { .. } => listener.on_hit(),
        GameEvent::ScoreChanged(score) => listener.on_score_change(score),
        GameEvent::Paused => listener.on_pause(true),
        GameEvent::Resumed => listener.on_pause(false),
        GameEvent::GameOver { score, new_best } => listener.on_game_over(score, new_best),
    }
}

/// Drain pending events into every listener, in order
pub fn dispatch_events(state: &mut GameState, listeners: &mut [&mut dyn GameListener]) {
    for event in state.events.drain(..) {
        for listener in listeners.iter_mut() {
            notify(&event, &mut **listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        collects: u32,
        hits: u32,
        game_overs: u32,
        last_score: Option<u64>,
    }

    impl GameListener for Counter {
        fn on_collect(&mut self) {
            self.collects += 1;
        }
        fn on_hit(&mut self) {
            self.hits += 1;
        }
        fn on_game_over(&mut self, _score: u64, _new_best: bool) {
            self.game_overs += 1;
        }
        fn on_score_change(&mut self, score: u64) {
            self.last_score = Some(score);
        }
    }

    #[test]
    fn test_dispatch_drains_queue() {
        let mut state = GameState::new(1);
        state.events.push(GameEvent::Collected { id: 1, points: 10 });
        state.events.push(GameEvent::ScoreChanged(10));
        state.events.push(GameEvent::Hit { id: 2, lives_left: 2 });

        let mut a = Counter::default();
        let mut b = Counter::default();
        let mut listeners: [&mut dyn GameListener; 2] = [&mut a, &mut b];
        dispatch_events(&mut state, &mut listeners);

        assert!(state.events.is_empty());
        for c in [&a, &b] {
            assert_eq!(c.collects, 1);
            assert_eq!(c.hits, 1);
            assert_eq!(c.game_overs, 0);
            assert_eq!(c.last_score, Some(10));
        }
    }
}
