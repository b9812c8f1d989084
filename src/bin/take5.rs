use clap::{Parser, Subcommand};
use log::info;

use take5::{
    BotKind, CostBot, FaultPolicy, GameRng, MatchConfig, MatchEngine, PlayerId, Seat, TerminalStrategy, TerminationPolicy,
    Tournament,
};

#[derive(Parser)]
#[command(name = "take5", about = "Take 5 (6 nimmt!) engine and bot arena")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one match, bots and humans at the terminal
    Play {
        /// Bot to seat: random, ascending, descending, smallest-gap,
        /// shortest-row, cost (repeatable)
        #[arg(long = "bot")]
        bots: Vec<BotKind>,

        /// Human player reading from stdin (repeatable)
        #[arg(long = "human")]
        humans: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,

        /// End at the round the threshold is reached instead of finishing
        /// the hand-out
        #[arg(long)]
        immediate: bool,

        /// Replace illegal choices with the lowest card / cheapest row
        /// instead of aborting
        #[arg(long)]
        fallback: bool,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,

        /// Gap decay used by cost bots
        #[arg(long)]
        alpha: Option<f64>,
    },

    /// Run many bot games and print per-seat statistics
    Bench {
        /// Bot to seat (repeatable)
        #[arg(long = "bot")]
        bots: Vec<BotKind>,

        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: u32,

        /// Score single hand-outs instead of full matches
        #[arg(long)]
        hand_outs: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(clap::Args)]
struct RuleArgs {
    /// Penalty total that ends the match
    #[arg(long, default_value_t = 66)]
    threshold: u32,

    /// Cards per player per hand-out
    #[arg(long, default_value_t = 10)]
    hand_size: usize,

    /// Seed for shuffles and random bots
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl RuleArgs {
    fn config(&self, players: usize) -> MatchConfig {
        MatchConfig::new(players)
            .with_loss_threshold(self.threshold)
            .with_hand_size(self.hand_size)
            .with_seed(self.seed)
    }
}

const DEFAULT_BENCH: [BotKind; 4] = [
    BotKind::Cost,
    BotKind::ShortestRow,
    BotKind::Descending,
    BotKind::SmallestGap,
];

const DEFAULT_OPPONENTS: [BotKind; 3] = [BotKind::Cost, BotKind::ShortestRow, BotKind::SmallestGap];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play {
            bots,
            humans,
            rules,
            immediate,
            fallback,
            json,
            alpha,
        } => play(bots, humans, &rules, immediate, fallback, json, alpha),
        Command::Bench {
            bots,
            games,
            hand_outs,
            rules,
        } => bench(bots, games, hand_outs, &rules),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn play(
    mut bots: Vec<BotKind>,
    mut humans: Vec<String>,
    rules: &RuleArgs,
    immediate: bool,
    fallback: bool,
    json: bool,
    alpha: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if bots.is_empty() && humans.is_empty() {
        humans.push("you".to_string());
        bots.extend(DEFAULT_OPPONENTS);
    }

    let mut config = rules.config(humans.len() + bots.len());
    if immediate {
        config = config.with_termination(TerminationPolicy::Immediate);
    }
    if fallback {
        config = config.with_fault_policy(FaultPolicy::Fallback);
    }

    let base = GameRng::new(config.seed);
    let mut seats: Vec<Seat> = humans
        .into_iter()
        .map(|name| Seat::new(name.clone(), TerminalStrategy::stdio(name)))
        .collect();
    let offset = seats.len();
    seats.extend(bots.into_iter().enumerate().map(|(i, kind)| match (kind, alpha) {
        (BotKind::Cost, Some(alpha)) => Seat::new(kind.name(), CostBot::with_alpha(alpha)),
        _ => Seat::bot(kind, base.for_context(&format!("seat-{}", offset + i))),
    }));

    let mut engine = MatchEngine::new(config, seats)?;
    let report = engine.run()?;
    info!("{} rounds recorded", engine.history().len());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn bench(
    mut bots: Vec<BotKind>,
    games: u32,
    hand_outs: bool,
    rules: &RuleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if bots.is_empty() {
        bots.extend(DEFAULT_BENCH);
    }

    let tournament = Tournament::new(rules.config(bots.len()), bots)?;
    let stats = if hand_outs {
        tournament.run_hand_outs(games)?
    } else {
        tournament.run_matches(games)?
    };

    let unit = if hand_outs { "hand-outs" } else { "matches" };
    println!("Point totals after {} {}:", stats.games, unit);
    for (i, kind) in tournament.lineup().iter().enumerate() {
        let seat = PlayerId::new(i as u8);
        println!(
            "{:>2} {:<14} {:>8} ({:.2} per game, {} wins)",
            i,
            kind.name(),
            stats.total_penalty[i],
            stats.mean_penalty(seat),
            stats.wins[i]
        );
    }
    Ok(())
}
