use four_in_a_row::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use tokio::time::Duration;

fn outcome_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Won => "Won".to_string(),
        Outcome::Lost => "Lost".to_string(),
        Outcome::Draw => "Draw".to_string(),
        Outcome::Ended(msg) => format!("Ended: {}", msg),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: {} <seed> [first-strategy] [second-strategy]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let first: StrategyKind = match args.get(2) {
        Some(s) => s.parse()?,
        None => StrategyKind::WinBlock,
    };
    let second: StrategyKind = match args.get(3) {
        Some(s) => s.parse()?,
        None => StrategyKind::WinBlock,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let server = InMemoryLobby::new(ServerRules {
        rows: 7,
        cols: 7,
        seed: Some(seed),
        ..ServerRules::default()
    });
    let policy = PollPolicy::default().with_interval(Duration::from_millis(1));

    let mut p1 = PlayerNode::new(
        Box::new(AiPlayer::from_kind(first)),
        Session::new(&mut rng, "player1")?,
        Box::new(server.clone()),
        policy,
    );
    let mut p2 = PlayerNode::new(
        Box::new(AiPlayer::from_kind(second)),
        Session::new(&mut rng, "player2")?,
        Box::new(server.clone()),
        policy,
    );

    let lobby = p1.create_lobby().await?;
    p2.join_lobby(&lobby).await?;
    let (res1, res2) = tokio::try_join!(p1.run(), p2.run())?;

    let winner = match (&res1, &res2) {
        (Outcome::Won, _) => Some("player1"),
        (_, Outcome::Won) => Some("player2"),
        _ => None,
    };
    let final_state = server.snapshot(&lobby)?;

    let result = json!({
        "player1": {"strategy": first.to_string(), "status": outcome_label(&res1), "moves": p1.moves_made()},
        "player2": {"strategy": second.to_string(), "status": outcome_label(&res2), "moves": p2.moves_made()},
        "winner": winner,
        "message": final_state.message,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
