use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

use skirmish::enums::PLAYERS;
use skirmish::game::{GameManager, MoveOutcome};
use skirmish::players::RandomPlayer;
use skirmish::{PlayerId, Rules};

/// Play random bots against each other through the authoritative engine.
#[derive(Debug, Parser)]
#[command(name = "simulate")]
struct Args {
    /// Number of matches to play
    #[arg(short = 'n', long, default_value_t = 1)]
    num_games: u32,

    /// Moves after which a match is called a draw
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print every move
    #[arg(short, long)]
    verbose: bool,

    /// Let straight-axis tokens resolve as moves
    #[arg(long)]
    allow_straight_moves: bool,
}

enum MatchResult {
    Won { winner: PlayerId, turns: u32 },
    Draw { turns: u32 },
}

fn simulate_single_game(args: &Args, rng: &mut XorShiftRng) -> MatchResult {
    let mut game = GameManager::new(Rules {
        allow_straight_moves: args.allow_straight_moves,
    });
    let bots = PLAYERS.map(RandomPlayer::new);

    for bot in &bots {
        for placement in bot.plan_setup(rng) {
            if let Err(e) = game.place_unit(bot.id, &placement) {
                log::error!("Bot placement rejected: {}", e);
            }
        }
    }

    for turn in 1..=args.max_turns {
        let mover = game.current_turn();
        let bot = &bots[mover as usize];
        let Some(command) = bot.decide(&game, rng) else {
            if args.verbose {
                println!("  Player {mover} has no legal move");
            }
            return MatchResult::Draw { turns: turn - 1 };
        };
        if args.verbose {
            println!("  {turn:>3}: Player {mover} plays {command}");
        }
        match game.apply_move(mover, &command) {
            Ok(MoveOutcome::GameOver { winner }) => return MatchResult::Won { winner, turns: turn },
            Ok(MoveOutcome::Updated { .. }) => {}
            Err(e) => {
                log::error!("Engine rejected a legal move {}: {}", command, e);
                return MatchResult::Draw { turns: turn };
            }
        }
    }
    MatchResult::Draw {
        turns: args.max_turns,
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    let mut rng = XorShiftRng::seed_from_u64(seed);

    println!("🎮 Skirmish Simulation");
    println!("======================");
    println!("  - Number of games: {}", args.num_games);
    println!("  - Turn limit: {}", args.max_turns);
    println!("  - Seed: {}", seed);

    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    let mut total_turns = 0u64;

    for game_num in 0..args.num_games {
        if args.num_games > 1 {
            println!("\n🎯 Game {} of {}", game_num + 1, args.num_games);
        }
        match simulate_single_game(&args, &mut rng) {
            MatchResult::Won { winner, turns } => {
                wins[winner as usize] += 1;
                total_turns += u64::from(turns);
                println!("  Winner: Player {} in {} turns", winner, turns);
            }
            MatchResult::Draw { turns } => {
                draws += 1;
                total_turns += u64::from(turns);
                println!("  Draw after {} turns", turns);
            }
        }
    }

    if args.num_games > 1 {
        println!("\n📊 Results:");
        println!("===========");
        for player in PLAYERS {
            let win_count = wins[player as usize];
            let win_rate = f64::from(win_count) / f64::from(args.num_games) * 100.0;
            println!("Player {}: {} wins ({:.1}%)", player, win_count, win_rate);
        }
        println!("Draws: {}", draws);
        println!(
            "Average turns: {:.1}",
            total_turns as f64 / f64::from(args.num_games)
        );
    }
}
