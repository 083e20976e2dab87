use beacon_emitter::{Emitter, event_key};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMove {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStart;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub reason: String,
}

event_key! {
    pub PLAYER_MOVE: PlayerMove = "playerMove";
    pub GAME_START: GameStart = "gameStart";
    pub GAME_OVER: GameOver = "gameOver";
}

/// What happened during [`play`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub moves: Vec<PlayerMove>,
    /// Listeners reached by the `gameStart` emission (none are registered).
    pub start_listeners: usize,
    /// Reasons seen by the once-listener on `gameOver`.
    pub game_over: Vec<String>,
    /// Listeners removed by the final `clear_all`.
    pub cleared: usize,
}

/// Runs the game-events walkthrough on `emitter`.
pub fn play(emitter: &Emitter) -> Summary {
    let moves = Arc::new(Mutex::new(Vec::new()));
    let reasons = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&moves);
    emitter.listen(&PLAYER_MOVE, move |payload| {
        info!("Player moved to ({}, {})", payload.x, payload.y);
        sink.lock().push(*payload);
    });

    let sink = Arc::clone(&reasons);
    emitter.once(&GAME_OVER, move |payload| {
        info!(reason = %payload.reason, "Game over");
        sink.lock().push(payload.reason.clone());
    });

    emitter.emit(&PLAYER_MOVE, &PlayerMove { x: 10, y: 20 });
    let start_listeners = emitter.emit(&GAME_START, &GameStart);

    emitter.emit(&GAME_OVER, &GameOver { reason: "player quit".to_owned() });
    emitter.emit(&GAME_OVER, &GameOver { reason: "reported twice".to_owned() });
    emitter.clear(&GAME_OVER);

    let cleared = emitter.clear_all();

    let moves = moves.lock().clone();
    let game_over = reasons.lock().clone();
    Summary { moves, start_listeners, game_over, cleared }
}
