#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use four_in_a_row::{
    init_logging, ui, AiPlayer, ApiVariant, CliPlayer, ClientConfig, HttpLobby, InMemoryLobby,
    LobbyApi, Outcome, Player, PlayerNode, PollPolicy, ServerRules, Session, StrategyKind,
    DEFAULT_SERVER_URL,
};

#[cfg(feature = "std")]
use four_in_a_row::protocol::JoinRole;
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Terminal client for networked four-in-a-row", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum StrategyArg {
    FirstAvailable,
    WinBlock,
}

#[cfg(feature = "std")]
impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FirstAvailable => StrategyKind::FirstAvailable,
            StrategyArg::WinBlock => StrategyKind::WinBlock,
        }
    }
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct NetArgs {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server: String,
    #[arg(long, help = "Lobby routes are mounted under /api")]
    api_prefix: bool,
    #[arg(long, value_enum, default_value_t = StrategyArg::WinBlock)]
    strategy: StrategyArg,
    #[arg(long, value_enum, default_value_t = PlayerType::Ai)]
    player: PlayerType,
    #[arg(long, default_value_t = 2000, help = "Delay between polls in milliseconds")]
    poll_ms: u64,
    #[arg(long, help = "Fix RNG seed for a reproducible user id (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Create a lobby on the server and play once someone joins.
    Create {
        #[arg(long)]
        nickname: String,
        #[command(flatten)]
        net: NetArgs,
    },
    /// Join an existing lobby and play.
    Join {
        #[arg(long)]
        lobby: String,
        #[arg(long)]
        nickname: String,
        #[command(flatten)]
        net: NetArgs,
    },
    /// Watch a lobby without playing.
    Spectate {
        #[arg(long)]
        lobby: String,
        #[arg(long)]
        nickname: String,
        #[command(flatten)]
        net: NetArgs,
    },
    /// Play two AIs against each other on an in-process lobby.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = StrategyArg::WinBlock)]
        first: StrategyArg,
        #[arg(long, value_enum, default_value_t = StrategyArg::WinBlock)]
        second: StrategyArg,
        #[arg(long, default_value_t = 7)]
        rows: usize,
        #[arg(long, default_value_t = 7)]
        cols: usize,
    },
    /// Interactive menu (the default).
    Menu {
        #[command(flatten)]
        net: NetArgs,
    },
    /// What this game is about.
    About,
}

#[cfg(feature = "std")]
impl NetArgs {
    fn config(&self) -> ClientConfig {
        let api = if self.api_prefix {
            ApiVariant::Prefixed
        } else {
            ApiVariant::Root
        };
        ClientConfig::new(self.server.clone(), api)
    }

    fn policy(&self) -> PollPolicy {
        PollPolicy::default().with_interval(Duration::from_millis(self.poll_ms))
    }

    fn player(&self) -> Box<dyn Player> {
        match self.player {
            PlayerType::Human => Box::new(CliPlayer::new()),
            PlayerType::Ai => Box::new(AiPlayer::from_kind(self.strategy.into())),
        }
    }

    fn rng(&self) -> SmallRng {
        seeded_rng(self.seed)
    }

    fn node(&self, nickname: &str) -> anyhow::Result<PlayerNode> {
        let session = Session::new(&mut self.rng(), nickname)?;
        let api: Box<dyn LobbyApi> = Box::new(HttpLobby::new(self.config())?);
        Ok(PlayerNode::new(self.player(), session, api, self.policy()).with_display(true))
    }
}

#[cfg(feature = "std")]
impl Default for NetArgs {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER_URL.to_string(),
            api_prefix: false,
            strategy: StrategyArg::WinBlock,
            player: PlayerType::Ai,
            poll_ms: 2000,
            seed: None,
        }
    }
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Menu {
        net: NetArgs::default(),
    }) {
        Commands::Create { nickname, net } => {
            let mut node = net.node(&nickname)?;
            host_game(&mut node).await?;
        }
        Commands::Join {
            lobby,
            nickname,
            net,
        } => {
            let mut node = net.node(&nickname)?;
            join_game(&mut node, &lobby).await?;
        }
        Commands::Spectate {
            lobby,
            nickname,
            net,
        } => {
            let mut node = net.node(&nickname)?;
            node.spectate_lobby(&lobby).await?;
            println!("Spectating lobby {}.", lobby);
            node.spectate().await?;
        }
        Commands::Local {
            seed,
            first,
            second,
            rows,
            cols,
        } => {
            run_local(seed, first.into(), second.into(), rows, cols).await?;
        }
        Commands::Menu { net } => run_menu(net).await?,
        Commands::About => println!("{}", ui::ABOUT_TEXT),
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn host_game(node: &mut PlayerNode) -> anyhow::Result<Outcome> {
    let lobby = node.create_lobby().await?;
    println!("Lobby created! Lobby ID: {}", lobby);
    node.wait_for_opponent().await?;
    println!("Game started!");
    node.run().await
}

#[cfg(feature = "std")]
async fn join_game(node: &mut PlayerNode, lobby: &str) -> anyhow::Result<Outcome> {
    match node.join_lobby(lobby).await? {
        JoinRole::Player => {
            println!("Joined lobby {}.", lobby);
            println!("Game started!");
            node.run().await
        }
        JoinRole::Spectator => {
            println!("Lobby {} is full, watching as a spectator.", lobby);
            let state = node.spectate().await?;
            Ok(Outcome::Ended(
                state.message.unwrap_or_else(|| "Game ended.".to_string()),
            ))
        }
    }
}

#[cfg(feature = "std")]
async fn run_local(
    seed: Option<u64>,
    first: StrategyKind,
    second: StrategyKind,
    rows: usize,
    cols: usize,
) -> anyhow::Result<()> {
    println!("Starting local AI vs AI game ({} vs {})...", first, second);
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = seeded_rng(seed);
    let server = InMemoryLobby::new(ServerRules {
        rows,
        cols,
        seed,
        ..ServerRules::default()
    });
    let policy = PollPolicy::default().with_interval(Duration::from_millis(10));

    let mut host = PlayerNode::new(
        Box::new(AiPlayer::from_kind(first)),
        Session::new(&mut rng, "Player 1")?,
        Box::new(server.clone()),
        policy,
    )
    .with_display(true);
    let mut guest = PlayerNode::new(
        Box::new(AiPlayer::from_kind(second)),
        Session::new(&mut rng, "Player 2")?,
        Box::new(server),
        policy,
    );

    let lobby = host.create_lobby().await?;
    guest.join_lobby(&lobby).await?;
    let (host_outcome, guest_outcome) = tokio::try_join!(host.run(), guest.run())?;
    println!(
        "Player 1 ({}): {}",
        first,
        ui::outcome_text(&host_outcome)
    );
    println!(
        "Player 2 ({}): {}",
        second,
        ui::outcome_text(&guest_outcome)
    );
    Ok(())
}

#[cfg(feature = "std")]
fn clear_console() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

#[cfg(feature = "std")]
fn prompt(text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(anyhow::anyhow!("stdin closed"));
    }
    Ok(line.trim().to_string())
}

#[cfg(feature = "std")]
async fn run_menu(net: NetArgs) -> anyhow::Result<()> {
    loop {
        clear_console();
        println!("===== 4 in a Row =====");
        match prompt("1. Play\n2. About\n3. Exit\n\nSelect an option (1/2/3): ")?.as_str() {
            "1" => play_menu(&net).await?,
            "2" => {
                clear_console();
                println!("{}", ui::ABOUT_TEXT);
                prompt("\nPress Enter to return to the main menu.")?;
            }
            "3" => return Ok(()),
            _ => println!("Invalid choice. Try again."),
        }
    }
}

#[cfg(feature = "std")]
async fn play_menu(net: &NetArgs) -> anyhow::Result<()> {
    loop {
        clear_console();
        println!("===== Play Menu =====");
        let result = match prompt("1. Create Lobby\n2. Join Lobby\n3. Back\n\nSelect (1/2/3): ")?
            .as_str()
        {
            "1" => {
                let nickname = prompt("Enter your nickname: ")?;
                match net.node(&nickname) {
                    Ok(mut node) => host_game(&mut node).await,
                    Err(e) => Err(e),
                }
            }
            "2" => {
                let lobby = prompt("Enter Lobby ID: ")?;
                let nickname = prompt("Enter your nickname: ")?;
                match net.node(&nickname) {
                    Ok(mut node) => join_game(&mut node, &lobby).await,
                    Err(e) => Err(e),
                }
            }
            "3" => return Ok(()),
            _ => {
                println!("Invalid choice. Try again.");
                continue;
            }
        };
        if let Err(e) = result {
            println!("{}", e);
        }
        prompt("\nPress Enter to return to the main menu.")?;
    }
}
