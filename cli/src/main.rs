use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use floodfill_core as game;
use std::io;
use std::path::PathBuf;

mod config;
mod host;
mod play;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Flood-fill puzzle in the terminal", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Config file, defaults to ./floodfill.toml when it exists
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game interactively
    Play(PlayArgs),
    /// List the rooms of the lobby
    Rooms,
    /// Let the greedy hint play a whole game
    Autoplay(AutoplayArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// easy, medium or hard
    #[arg(short, long, conflicts_with = "room")]
    difficulty: Option<game::Difficulty>,

    /// Room number from the lobby, 1-based
    #[arg(short, long)]
    room: Option<u8>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player id results are booked under
    #[arg(short, long)]
    user: Option<i64>,

    /// Paint cells with terminal colors
    #[arg(long)]
    ansi: bool,
}

#[derive(Args, Debug)]
struct AutoplayArgs {
    /// easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<game::Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final board view as JSON, one line
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = config::Config::load(cli.config.as_deref())?;
    log::debug!("config: {config:?}");

    match cli.command {
        Command::Play(args) => play(&config, args),
        Command::Rooms => {
            list_rooms();
            Ok(())
        }
        Command::Autoplay(args) => autoplay(&config, args),
    }
}

fn seed_or_random(seed: Option<u64>, config: &config::Config) -> u64 {
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");
    seed
}

fn play(config: &config::Config, args: PlayArgs) -> anyhow::Result<()> {
    let difficulty = match (args.room, args.difficulty) {
        (Some(number), _) => {
            let room = number
                .checked_sub(1)
                .and_then(game::room)
                .with_context(|| format!("No room {number}, see `rooms`"))?;
            room.enter()
                .with_context(|| format!("Cannot play {}", room.name))?
        }
        (None, Some(difficulty)) => difficulty,
        (None, None) => config.difficulty()?,
    };
    let seed = seed_or_random(args.seed, config);
    let user_id = args.user.unwrap_or(config.user_id);

    let mut ledger = host::MemoryLedger::new(config.starting_balance);
    let profile = ledger.profile(user_id, &config.user_name);
    println!(
        "{} (level {}), balance {:.4}",
        profile.name, profile.level, profile.balance
    );

    let mut host = host::Host::new(config.session_policy(), ledger);
    host.start(user_id, difficulty, seed, chrono::Utc::now());
    println!("{difficulty} game, seed {seed}");

    let options = play::PlayOptions {
        user_id,
        ansi: args.ansi,
    };
    play::run(
        &mut host,
        &options,
        io::stdin().lock(),
        &mut io::stdout().lock(),
        chrono::Utc::now,
    )?;

    let profile = host.sink_mut().profile(user_id, &config.user_name);
    log::info!(
        "{} has {} wins, balance {:.4}",
        profile.name,
        profile.wins,
        profile.balance
    );
    Ok(())
}

fn list_rooms() {
    for room in game::rooms() {
        let lock = if room.locked { " (locked)" } else { "" };
        println!("{:>2}. {:<8} {}{lock}", room.id + 1, room.name, room.difficulty);
    }
}

fn autoplay(config: &config::Config, args: AutoplayArgs) -> anyhow::Result<()> {
    let difficulty = match args.difficulty {
        Some(difficulty) => difficulty,
        None => config.difficulty()?,
    };
    let seed = seed_or_random(args.seed, config);

    let mut engine = game::FloodEngine::new_game(difficulty, seed);
    while let Some(color) = game::greedy_choice(&engine) {
        log::debug!("autoplay picks {color}");
        engine.choose_color(color);
    }

    let view = engine.view();
    if args.json {
        println!("{}", floodfill_protocol::encode(&view)?);
    } else {
        print!("{}", render::board(&view, false));
        println!("{}", render::status(&view));
    }
    Ok(())
}
