//! Plays two seeded random players against each other and prints the result
//! as JSON.

use std::io;

use battleship_rules::{init_logging, Fleet, GameConfig, GameEngine, GameRunner, RandomPlayer};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <seed1> <seed2> [classic]", program_name(&args));
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let fleet = match args.get(3).map(String::as_str) {
        Some("classic") => Fleet::classic(),
        Some(other) => anyhow::bail!("unknown fleet {:?}", other),
        None => Fleet::default(),
    };

    let config = GameConfig::new(battleship_rules::BOARD_SIZE, fleet)?;
    let size = config.board_size;
    let engine = GameEngine::with_config(config)?;
    let p1 = RandomPlayer::seeded("player1", size, seed1);
    let p2 = RandomPlayer::seeded("player2", size, seed2);

    let mut runner = GameRunner::new(engine, Box::new(p1), Box::new(p2), io::sink());
    let summary = runner.run()?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// Name to show in usage text; argv may be empty.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("sim", String::as_str)
}
