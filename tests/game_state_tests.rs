use four_in_a_row::protocol::{GameStateResponse, JoinLobbyResponse, JoinRole, MoveRequest};
use four_in_a_row::{BoardError, GameState, Outcome, Phase, PlayerId};

fn parse(json: &str) -> GameState {
    let resp: GameStateResponse = serde_json::from_str(json).unwrap();
    GameState::try_from(resp).unwrap()
}

const RUNNING: &str = r#"{
    "board": [[" ", " ", " ", " "], [" ", " ", " ", " "], [" ", "u2", " ", " "], ["u1", "u1", " ", " "]],
    "currentPlayer": "u2",
    "players": {"u1": "alice", "u2": "bob"},
    "spectators": {"s1": "eve"},
    "gameOver": false,
    "moveDeadline": 1700000000000
}"#;

#[test]
fn test_game_state_from_server_json() {
    let state = parse(RUNNING);
    let (u1, u2) = (PlayerId::from("u1"), PlayerId::from("u2"));
    assert_eq!(state.board.rows(), 4);
    assert_eq!(state.board.cols(), 4);
    assert!(state.board.is_owned_by(3, 0, &u1));
    assert!(state.board.is_owned_by(2, 1, &u2));
    assert_eq!(state.opponent_of(&u1), Some(&u2));
    assert_eq!(state.nickname(&u2), Some("bob"));
    assert!(state.is_ready());
    assert_eq!(state.phase(&u2), Phase::MyTurn);
    assert_eq!(state.phase(&u1), Phase::OpponentTurn);
    assert_eq!(state.outcome_for(&u1), None);
}

#[test]
fn test_waiting_for_second_player() {
    let state = parse(
        r#"{"board": [[" ", " "], [" ", " "]], "currentPlayer": null, "players": {"u1": "alice"}, "gameOver": false}"#,
    );
    let u1 = PlayerId::from("u1");
    assert!(!state.is_ready());
    assert_eq!(state.opponent_of(&u1), None);
    assert_eq!(state.phase(&u1), Phase::WaitingForPlayers);
}

#[test]
fn test_outcome_uses_winner_field() {
    let state = parse(
        r#"{"board": [[" ", " "], [" ", " "]], "players": {"u1": "a", "u2": "b"}, "gameOver": true, "winner": "u2", "message": "b wins!"}"#,
    );
    assert_eq!(state.phase(&PlayerId::from("u1")), Phase::Over);
    assert_eq!(state.outcome_for(&PlayerId::from("u2")), Some(Outcome::Won));
    assert_eq!(state.outcome_for(&PlayerId::from("u1")), Some(Outcome::Lost));
}

#[test]
fn test_outcome_inferred_from_board() {
    let state = parse(
        r#"{"board": [["u1", "u1", "u1", "u1"], ["u2", "u2", "u2", " "]], "players": {"u1": "a", "u2": "b"}, "gameOver": true, "message": "a wins!"}"#,
    );
    assert_eq!(state.outcome_for(&PlayerId::from("u1")), Some(Outcome::Won));
    assert_eq!(state.outcome_for(&PlayerId::from("u2")), Some(Outcome::Lost));
}

#[test]
fn test_draw_and_other_endings() {
    let draw = parse(
        r#"{"board": [["u1", "u2"], ["u2", "u1"]], "players": {"u1": "a", "u2": "b"}, "gameOver": true, "message": "Draw"}"#,
    );
    assert_eq!(draw.outcome_for(&PlayerId::from("u1")), Some(Outcome::Draw));

    let abandoned = parse(
        r#"{"board": [[" ", " "], ["u2", "u1"]], "players": {"u1": "a", "u2": "b"}, "gameOver": true, "message": "Opponent left"}"#,
    );
    assert_eq!(
        abandoned.outcome_for(&PlayerId::from("u1")),
        Some(Outcome::Ended("Opponent left".to_string()))
    );
}

#[test]
fn test_ragged_board_is_rejected() {
    let resp: GameStateResponse =
        serde_json::from_str(r#"{"board": [[" ", " "], [" "]], "gameOver": false}"#).unwrap();
    assert_eq!(
        GameState::try_from(resp).unwrap_err(),
        BoardError::RaggedRows {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_join_response_role() {
    let player: JoinLobbyResponse =
        serde_json::from_str(r#"{"message": "Joined as player", "lobbyId": "123456"}"#).unwrap();
    assert_eq!(player.role(), JoinRole::Player);
    let spectator: JoinLobbyResponse =
        serde_json::from_str(r#"{"message": "Joined as spectator", "lobbyId": "123456"}"#).unwrap();
    assert_eq!(spectator.role(), JoinRole::Spectator);
}

#[test]
fn test_move_request_wire_names() {
    let req = MoveRequest {
        lobby: "123456".to_string(),
        user_id: "abcd1234".to_string(),
        cell: 3,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"lobby": "123456", "userId": "abcd1234", "cell": 3})
    );
}
