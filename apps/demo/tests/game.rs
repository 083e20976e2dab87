use beacon_demo::game::{self, GAME_OVER, GAME_START, GameOver, GameStart, PLAYER_MOVE, PlayerMove};
use beacon_emitter::Emitter;

#[test]
fn walkthrough_records_single_move() {
    let emitter = Emitter::new();
    let summary = game::play(&emitter);

    assert_eq!(summary.moves, vec![PlayerMove { x: 10, y: 20 }]);
    assert_eq!(summary.start_listeners, 0);
    assert_eq!(summary.game_over, vec!["player quit".to_owned()]);
    assert_eq!(summary.cleared, 1, "only the move listener is left for clear_all");
    assert!(emitter.is_empty());
}

#[test]
fn emitting_unheard_keys_is_harmless() {
    let emitter = Emitter::new();

    assert_eq!(emitter.emit(&GAME_START, &GameStart), 0);
    assert_eq!(emitter.emit(&GAME_OVER, &GameOver { reason: "nobody".to_owned() }), 0);
    assert_eq!(emitter.clear(&GAME_OVER), 0);
    assert!(emitter.is_empty());
}

#[test]
fn game_keys_are_distinct() {
    assert_ne!(PLAYER_MOVE.id(), GAME_START.id());
    assert_ne!(GAME_START.id(), GAME_OVER.id());
    assert_eq!(PLAYER_MOVE.label(), "playerMove");
}
