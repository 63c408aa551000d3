use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use four_in_a_row::protocol::{JoinRole, MoveResponse, TimerResponse};
use four_in_a_row::{
    AiPlayer, GameState, InMemoryLobby, LobbyApi, Outcome, Player, PlayerId, PlayerNode,
    PollPolicy, Poller, ServerRules, Session, StrategyKind,
};

fn fast_policy() -> PollPolicy {
    PollPolicy::default().with_interval(Duration::from_millis(1))
}

fn seven_by_seven() -> InMemoryLobby {
    InMemoryLobby::new(ServerRules {
        rows: 7,
        cols: 7,
        seed: Some(11),
        ..ServerRules::default()
    })
}

fn session(id: &str, nick: &str) -> Session {
    Session::with_user_id(PlayerId::from(id), nick).unwrap()
}

fn ai_node(server: &InMemoryLobby, id: &str, kind: StrategyKind) -> PlayerNode {
    PlayerNode::new(
        Box::new(AiPlayer::from_kind(kind)),
        session(id, id),
        Box::new(server.clone()),
        fast_policy(),
    )
}

/// Plays a fixed list of columns and records what the server said.
struct ScriptedPlayer {
    columns: VecDeque<usize>,
    results: Arc<Mutex<Vec<(usize, bool)>>>,
}

impl Player for ScriptedPlayer {
    fn choose_column(&mut self, _state: &GameState, _me: &PlayerId) -> Option<usize> {
        self.columns.pop_front()
    }

    fn handle_move_result(&mut self, column: usize, accepted: bool) {
        self.results.lock().unwrap().push((column, accepted));
    }
}

fn scripted_node(
    server: &InMemoryLobby,
    id: &str,
    columns: &[usize],
) -> (PlayerNode, Arc<Mutex<Vec<(usize, bool)>>>) {
    let results = Arc::new(Mutex::new(Vec::new()));
    let player = ScriptedPlayer {
        columns: columns.iter().copied().collect(),
        results: results.clone(),
    };
    let node = PlayerNode::new(
        Box::new(player),
        session(id, id),
        Box::new(server.clone()),
        fast_policy(),
    );
    (node, results)
}

/// Fails the first `failures` game-state fetches, then delegates.
struct FlakyLobby {
    inner: InMemoryLobby,
    failures: AtomicUsize,
}

#[async_trait::async_trait]
impl LobbyApi for FlakyLobby {
    async fn create_lobby(&self, user: &PlayerId, nickname: &str) -> anyhow::Result<String> {
        self.inner.create_lobby(user, nickname).await
    }

    async fn join_lobby(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<JoinRole> {
        self.inner.join_lobby(lobby, user, nickname).await
    }

    async fn join_as_spectator(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<()> {
        self.inner.join_as_spectator(lobby, user, nickname).await
    }

    async fn fetch_game_state(&self, lobby: &str) -> anyhow::Result<GameState> {
        let left = self.failures.load(Ordering::SeqCst);
        if left > 0 {
            self.failures.store(left - 1, Ordering::SeqCst);
            return Err(anyhow::anyhow!("Server responded with status 503"));
        }
        self.inner.fetch_game_state(lobby).await
    }

    async fn submit_move(
        &self,
        lobby: &str,
        user: &PlayerId,
        column: usize,
    ) -> anyhow::Result<MoveResponse> {
        self.inner.submit_move(lobby, user, column).await
    }

    async fn check_timer(&self, lobby: &str) -> anyhow::Result<TimerResponse> {
        self.inner.check_timer(lobby).await
    }
}

#[tokio::test]
async fn test_ai_vs_ai_with_spectator() {
    let server = seven_by_seven();
    let mut p1 = ai_node(&server, "p1", StrategyKind::WinBlock);
    let mut p2 = ai_node(&server, "p2", StrategyKind::WinBlock);
    let mut watcher = ai_node(&server, "s1", StrategyKind::WinBlock);

    let lobby = p1.create_lobby().await.unwrap();
    assert_eq!(p2.join_lobby(&lobby).await.unwrap(), JoinRole::Player);
    watcher.spectate_lobby(&lobby).await.unwrap();

    let (o1, o2, last) = tokio::try_join!(p1.run(), p2.run(), watcher.spectate()).unwrap();
    match (&o1, &o2) {
        (Outcome::Won, Outcome::Lost) | (Outcome::Lost, Outcome::Won) | (Outcome::Draw, Outcome::Draw) => {}
        other => panic!("inconsistent outcomes: {:?}", other),
    }
    assert!(last.game_over);
    let tokens = last.board.rows() * last.board.cols() - last.board.empty_cells();
    assert_eq!(p1.moves_made() + p2.moves_made(), tokens);
}

#[tokio::test]
async fn test_first_mover_wins_against_passive_opponent() {
    let server = seven_by_seven();
    let mut smart = ai_node(&server, "smart", StrategyKind::WinBlock);
    let (mut passive, _) = scripted_node(&server, "passive", &[6, 6, 5, 5, 4, 4]);

    let lobby = smart.create_lobby().await.unwrap();
    passive.join_lobby(&lobby).await.unwrap();
    let (o1, o2) = tokio::try_join!(smart.run(), passive.run()).unwrap();
    assert_eq!(o1, Outcome::Won);
    assert_eq!(o2, Outcome::Lost);
    let state = server.fetch_game_state(&lobby).await.unwrap();
    assert_eq!(state.message.as_deref(), Some("smart wins!"));
}

#[tokio::test]
async fn test_rejected_move_is_reported_and_retried() {
    let server = seven_by_seven();
    let (mut first, first_results) = scripted_node(&server, "first", &[99, 0, 0, 0, 0]);
    let (mut second, _) = scripted_node(&server, "second", &[1, 1, 1]);

    let lobby = first.create_lobby().await.unwrap();
    second.join_lobby(&lobby).await.unwrap();
    let (o1, o2) = tokio::try_join!(first.run(), second.run()).unwrap();

    assert_eq!(o1, Outcome::Won);
    assert_eq!(o2, Outcome::Lost);
    assert_eq!(
        *first_results.lock().unwrap(),
        vec![(99, false), (0, true), (0, true), (0, true), (0, true)]
    );
    assert_eq!(first.moves_made(), 4);
    assert_eq!(second.moves_made(), 3);
}

#[tokio::test]
async fn test_wait_for_opponent_returns_once_joined() {
    let server = seven_by_seven();
    let mut host = ai_node(&server, "host", StrategyKind::WinBlock);
    let mut guest = ai_node(&server, "guest", StrategyKind::WinBlock);
    let lobby = host.create_lobby().await.unwrap();

    let (state, joined) = tokio::join!(host.wait_for_opponent(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        guest.join_lobby(&lobby).await
    });
    joined.unwrap();
    let state = state.unwrap();
    assert!(state.is_ready());
    assert!(state.is_turn_of(&PlayerId::from("host")));
}

#[tokio::test]
async fn test_cancel_stops_waiting() {
    let server = seven_by_seven();
    let mut host = ai_node(&server, "host", StrategyKind::WinBlock);
    host.create_lobby().await.unwrap();
    let cancel = host.cancel_handle();

    let (res, _) = tokio::join!(host.wait_for_opponent(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
    });
    let err = res.unwrap_err();
    assert_eq!(err.to_string(), "Polling cancelled");
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn test_stalled_lobby_gives_up() {
    let server = seven_by_seven();
    let policy = PollPolicy::default()
        .with_interval(Duration::from_millis(5))
        .with_stall_timeout(Duration::from_millis(30));
    let mut host = PlayerNode::new(
        Box::new(AiPlayer::default()),
        session("host", "host"),
        Box::new(server.clone()),
        policy,
    );
    host.create_lobby().await.unwrap();
    let err = host.wait_for_opponent().await.unwrap_err();
    assert!(err.to_string().contains("stalled"), "{}", err);
}

#[tokio::test]
async fn test_run_requires_a_lobby() {
    let server = seven_by_seven();
    let mut node = ai_node(&server, "lonely", StrategyKind::WinBlock);
    assert!(node.run().await.is_err());
}

#[tokio::test]
async fn test_poller_recovers_after_failures() {
    let server = seven_by_seven();
    let lobby = server
        .create_lobby(&PlayerId::from("host"), "host")
        .await
        .unwrap();
    let flaky = FlakyLobby {
        inner: server.clone(),
        failures: AtomicUsize::new(3),
    };
    let mut poller = Poller::new(fast_policy());

    let first = poller.next(&flaky, &lobby).await.unwrap();
    assert!(first.changed);
    assert_eq!(flaky.failures.load(Ordering::SeqCst), 0);

    let second = poller.next(&flaky, &lobby).await.unwrap();
    assert!(!second.changed);
    assert_eq!(second.state, first.state);
}

#[test]
fn test_backoff_doubles_up_to_cap() {
    let policy = PollPolicy {
        interval: Duration::from_secs(2),
        max_interval: Duration::from_secs(16),
        stall_timeout: Duration::from_secs(600),
    };
    assert_eq!(policy.backoff(Duration::ZERO), Duration::from_secs(2));
    assert_eq!(policy.backoff(Duration::from_secs(2)), Duration::from_secs(4));
    assert_eq!(policy.backoff(Duration::from_secs(8)), Duration::from_secs(16));
    assert_eq!(policy.backoff(Duration::from_secs(16)), Duration::from_secs(16));
    assert_eq!(PollPolicy::default(), policy);
}

/// Serves a full board the server never closes, passing the turn on every
/// fetch the way the move timer does.
struct StuckFullBoard {
    fetches: AtomicUsize,
}

#[async_trait::async_trait]
impl LobbyApi for StuckFullBoard {
    async fn create_lobby(&self, _user: &PlayerId, _nickname: &str) -> anyhow::Result<String> {
        Ok("123456".to_string())
    }

    async fn join_lobby(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _nickname: &str,
    ) -> anyhow::Result<JoinRole> {
        Ok(JoinRole::Player)
    }

    async fn join_as_spectator(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _nickname: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn fetch_game_state(&self, _lobby: &str) -> anyhow::Result<GameState> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        let grid = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["B".to_string(), "A".to_string()],
        ];
        let mut state = GameState::new(four_in_a_row::Board::from_wire(&grid)?);
        state.players.insert(PlayerId::from("A"), "alice".to_string());
        state.players.insert(PlayerId::from("B"), "bob".to_string());
        state.current_player = Some(PlayerId::from(if n % 2 == 0 { "A" } else { "B" }));
        Ok(state)
    }

    async fn submit_move(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _column: usize,
    ) -> anyhow::Result<MoveResponse> {
        Err(anyhow::anyhow!("Column is full"))
    }

    async fn check_timer(&self, _lobby: &str) -> anyhow::Result<TimerResponse> {
        Ok(TimerResponse::default())
    }
}

#[tokio::test]
async fn test_full_board_left_open_ends_in_draw() {
    for id in ["A", "B"] {
        let api = StuckFullBoard {
            fetches: AtomicUsize::new(0),
        };
        let mut node = PlayerNode::new(
            Box::new(AiPlayer::default()),
            session(id, id),
            Box::new(api),
            fast_policy(),
        );
        node.join_lobby("123456").await.unwrap();
        let outcome = tokio::time::timeout(Duration::from_secs(2), node.run())
            .await
            .expect("run did not finish on a full board")
            .unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(node.moves_made(), 0);
    }
}

/// Always fails, cancelling the poller from inside the fetch.
struct CancelDuringFetch {
    cancel: four_in_a_row::CancelHandle,
}

#[async_trait::async_trait]
impl LobbyApi for CancelDuringFetch {
    async fn create_lobby(&self, _user: &PlayerId, _nickname: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("unused"))
    }

    async fn join_lobby(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _nickname: &str,
    ) -> anyhow::Result<JoinRole> {
        Err(anyhow::anyhow!("unused"))
    }

    async fn join_as_spectator(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _nickname: &str,
    ) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("unused"))
    }

    async fn fetch_game_state(&self, _lobby: &str) -> anyhow::Result<GameState> {
        self.cancel.cancel();
        Err(anyhow::anyhow!("Server responded with status 503"))
    }

    async fn submit_move(
        &self,
        _lobby: &str,
        _user: &PlayerId,
        _column: usize,
    ) -> anyhow::Result<MoveResponse> {
        Err(anyhow::anyhow!("unused"))
    }

    async fn check_timer(&self, _lobby: &str) -> anyhow::Result<TimerResponse> {
        Err(anyhow::anyhow!("unused"))
    }
}

#[tokio::test]
async fn test_cancel_during_fetch_skips_backoff_sleep() {
    let mut poller = Poller::new(PollPolicy::default().with_interval(Duration::from_secs(10)));
    let api = CancelDuringFetch {
        cancel: poller.cancel_handle(),
    };
    let res = tokio::time::timeout(Duration::from_secs(1), poller.next(&api, "123456"))
        .await
        .expect("cancelled poller kept sleeping");
    assert_eq!(res.unwrap_err().to_string(), "Polling cancelled");
}

#[tokio::test]
async fn test_cancel_wakes_a_sleeping_poller() {
    let server = seven_by_seven();
    let lobby = server
        .create_lobby(&PlayerId::from("host"), "host")
        .await
        .unwrap();
    let mut poller = Poller::new(PollPolicy::default().with_interval(Duration::from_secs(10)));
    poller.next(&server, &lobby).await.unwrap();
    let cancel = poller.cancel_handle();

    let (res, _) = tokio::join!(
        tokio::time::timeout(Duration::from_secs(1), poller.next(&server, &lobby)),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        }
    );
    let err = res.expect("cancel did not wake the poller").unwrap_err();
    assert_eq!(err.to_string(), "Polling cancelled");
}

#[test]
fn test_zero_interval_still_backs_off() {
    let policy = PollPolicy::default().with_interval(Duration::ZERO);
    assert_eq!(
        policy.backoff(Duration::ZERO),
        four_in_a_row::poll::MIN_RETRY_DELAY
    );
    assert!(policy.backoff(policy.backoff(Duration::ZERO)) > four_in_a_row::poll::MIN_RETRY_DELAY);
}
