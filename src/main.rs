use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use battleship_rules::{
    init_logging, CliPlayer, Fleet, GameConfig, GameEngine, GameRunner, Player, PlayerId, Prompt,
    RandomPlayer, BOARD_SIZE,
};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Two-player Battleship in the terminal", long_about = None)]
struct Cli {
    /// Player 1 type; prompted for when omitted.
    #[arg(long, value_enum)]
    player1: Option<PlayerType>,
    /// Player 2 type; prompted for when omitted.
    #[arg(long, value_enum)]
    player2: Option<PlayerType>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FleetChoice::Single)]
    fleet: FleetChoice,
    #[arg(long, default_value_t = BOARD_SIZE)]
    board_size: usize,
    /// JSON game configuration; overrides --fleet and --board-size.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerType {
    Human,
    Ai,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FleetChoice {
    /// A single Carrier.
    Single,
    /// Carrier, Battleship, Cruiser, Submarine and Destroyer.
    Classic,
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    if let Some(path) = &cli.config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        return GameConfig::from_json(&json);
    }
    let fleet = match cli.fleet {
        FleetChoice::Single => Fleet::default(),
        FleetChoice::Classic => Fleet::classic(),
    };
    Ok(GameConfig::new(cli.board_size, fleet)?)
}

fn select_player_type<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    id: PlayerId,
) -> anyhow::Result<PlayerType> {
    let message = format!("Select {} type (1 = Human, 2 = Random AI): ", id);
    let choice = prompt.ask_until(&message, |answer| match answer {
        "1" => Some(PlayerType::Human),
        "2" => Some(PlayerType::Ai),
        _ => None,
    })?;
    Ok(choice)
}

fn build_player(
    kind: PlayerType,
    id: PlayerId,
    board_size: usize,
    seed: Option<u64>,
) -> Box<dyn Player> {
    match kind {
        PlayerType::Human => Box::new(CliPlayer::stdio(format!("{} (Human)", id))),
        PlayerType::Ai => {
            let rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s.wrapping_add(id.index() as u64)),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            Box::new(RandomPlayer::new(format!("{} (AI)", id), board_size, rng))
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let board_size = config.board_size;

    println!("Welcome to Battleship!");
    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (AI moves will be reproducible)", s);
    }

    let mut kinds = [cli.player1, cli.player2];
    if kinds.iter().any(Option::is_none) {
        let mut prompt = Prompt::stdio();
        for id in PlayerId::ALL {
            if kinds[id.index()].is_none() {
                kinds[id.index()] = Some(select_player_type(&mut prompt, id)?);
            }
        }
    }
    let [kind1, kind2] = kinds.map(|k| k.unwrap_or(PlayerType::Ai));

    let engine = GameEngine::with_config(config)?;
    let player1 = build_player(kind1, PlayerId::One, board_size, cli.seed);
    let player2 = build_player(kind2, PlayerId::Two, board_size, cli.seed);

    let mut runner = GameRunner::new(engine, player1, player2, io::stdout());
    runner.run()?;
    println!("\nThanks for playing Battleship!");
    Ok(())
}
