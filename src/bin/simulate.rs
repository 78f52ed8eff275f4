use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use manhunt::config::EngineConfig;
use manhunt::events::LoggingSpectator;
use manhunt::players::{AlphaBetaPlayer, RandomPlayer};
use manhunt::{Color, DistanceCache, Game, ManhuntResult, Player, TransportGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    Search,
    Random,
}

/// Self-play simulation between automated fugitive and pursuers
#[derive(Debug, Parser)]
#[command(name = "simulate", version)]
struct Args {
    /// Board description (JSON edge list)
    #[arg(long, default_value = "boards/mini.json")]
    board: PathBuf,

    /// Engine configuration (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = 1)]
    num_games: usize,

    /// Overrides the configured search depth
    #[arg(short, long)]
    depth: Option<usize>,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Strategy::Search)]
    fugitive: Strategy,

    #[arg(long, value_enum, default_value_t = Strategy::Search)]
    pursuers: Strategy,

    /// Rebuild the distance cache even if persisted tables exist
    #[arg(long)]
    regenerate_cache: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("❌ Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ManhuntResult<()> {
    let mut config = EngineConfig::load_or_default(args.config.as_deref());
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }

    let graph = Arc::new(TransportGraph::from_json_file(&args.board)?);
    info!(
        "Loaded board {} ({} locations, {} edges)",
        args.board.display(),
        graph.node_count(),
        graph.edge_count()
    );

    let cache = if args.regenerate_cache || config.cache.regenerate {
        let cache = DistanceCache::build(&graph);
        if let Err(e) = cache.save(&config.cache.directory) {
            warn!("Could not persist distance cache: {}", e);
        }
        cache
    } else {
        DistanceCache::load_or_build(&graph, &config.cache.directory)
    };
    let cache = Arc::new(cache);

    println!("🕵️ Manhunt Simulation");
    println!("=====================");
    println!("Configuration:");
    println!("  - Board: {}", args.board.display());
    println!("  - Fugitive: {:?}, pursuers: {:?}", args.fugitive, args.pursuers);
    println!("  - Search depth: {}", config.search.depth);
    println!("  - Number of games: {}", args.num_games);

    let mut rng = XorShiftRng::seed_from_u64(args.seed);
    let mut fugitive_wins = 0;
    let mut pursuer_wins = 0;
    let mut total_rounds = 0;

    for game_num in 0..args.num_games {
        let state = config.game.random_start(graph.clone(), &mut rng)?;
        let player_count = state.players().len();
        let mut game = Game::new(state);
        if args.verbose {
            game.register_spectator(Box::new(LoggingSpectator));
        }

        let mut players = build_players(args, &config, &cache, player_count, rng.gen());
        let winners = game.run(&mut players)?;

        total_rounds += game.current_round();
        if winners.contains(&Color::Black) {
            fugitive_wins += 1;
        } else {
            pursuer_wins += 1;
        }
        if args.verbose || args.num_games > 1 {
            println!(
                "  Game {}: {:?} after {} rounds",
                game_num + 1,
                winners,
                game.current_round()
            );
        }
    }

    if args.num_games > 0 {
        let games = args.num_games as f64;
        println!("\n📊 Results:");
        println!("===========");
        println!(
            "Fugitive: {} wins ({:.1}%)",
            fugitive_wins,
            fugitive_wins as f64 / games * 100.0
        );
        println!(
            "Pursuers: {} wins ({:.1}%)",
            pursuer_wins,
            pursuer_wins as f64 / games * 100.0
        );
        println!("Average rounds per game: {:.1}", total_rounds as f64 / games);
    }
    Ok(())
}

fn build_players(
    args: &Args,
    config: &EngineConfig,
    cache: &Arc<DistanceCache>,
    count: usize,
    seed: u64,
) -> Vec<Box<dyn Player>> {
    (0..count)
        .map(|index| {
            let strategy = if index == 0 { args.fugitive } else { args.pursuers };
            let player: Box<dyn Player> = match strategy {
                Strategy::Search => {
                    Box::new(AlphaBetaPlayer::from_config(cache.clone(), &config.search))
                }
                Strategy::Random => Box::new(RandomPlayer::new(seed.wrapping_add(index as u64))),
            };
            player
        })
        .collect()
}
