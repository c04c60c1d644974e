//! Headless Scroll Trials
//!
//! Runs many scrolling sessions against the same equip configuration and
//! reports how the outcomes distribute. Useful for sanity-checking gut
//! feelings about 10% scrolls before burning real meso.

use clap::Parser;
use mapleland_sim::enhance::{EnhanceSession, EquipConfig, Scroll};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Monte Carlo scroll session runner
#[derive(Parser, Debug)]
#[command(name = "enhance_trials")]
#[command(about = "Run repeated scrolling sessions and summarize the outcomes")]
struct Args {
    /// Scroll success rate in percent (clamped to 1-100)
    #[arg(long, default_value_t = 10)]
    percent: u32,

    /// Upgrade slots on the equip
    #[arg(long, default_value_t = 7)]
    slots: u8,

    /// Failures do not consume a slot
    #[arg(long)]
    no_consume: bool,

    /// Failures destroy the equip
    #[arg(long)]
    boom: bool,

    /// Number of sessions to simulate
    #[arg(long, default_value_t = 10_000)]
    trials: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct TrialSummary {
    trials: u32,
    percent: u8,
    slots: u8,
    consume_on_fail: bool,
    boom_on_fail: bool,
    seed: u64,
    mean_successes: f64,
    mean_attempts: f64,
    /// Fraction of sessions that filled every slot
    perfect_rate: f64,
    /// Fraction of sessions that ended in a boom
    destroyed_rate: f64,
    /// Sessions ending with exactly N successes, indexed by N
    success_histogram: Vec<u32>,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = EquipConfig {
        slots: args.slots,
        consume_on_fail: !args.no_consume,
        boom_on_fail: args.boom,
    };
    let scroll = Scroll::custom(args.percent);

    let mut histogram = vec![0u32; args.slots as usize + 1];
    let mut total_successes: u64 = 0;
    let mut total_attempts: u64 = 0;
    let mut destroyed: u32 = 0;

    for _ in 0..args.trials {
        let mut session = EnhanceSession::new(config);
        while session.apply_scroll(scroll, &mut rng).is_some() {}

        histogram[session.successes() as usize] += 1;
        total_successes += session.successes() as u64;
        total_attempts += session.log().len() as u64;
        if session.destroyed() {
            destroyed += 1;
        }
    }

    let trials = args.trials.max(1) as f64;
    let summary = TrialSummary {
        trials: args.trials,
        percent: scroll.percent(),
        slots: args.slots,
        consume_on_fail: config.consume_on_fail,
        boom_on_fail: config.boom_on_fail,
        seed,
        mean_successes: total_successes as f64 / trials,
        mean_attempts: total_attempts as f64 / trials,
        perfect_rate: histogram[args.slots as usize] as f64 / trials,
        destroyed_rate: destroyed as f64 / trials,
        success_histogram: histogram,
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        }
        "text" => print_summary(&summary),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_summary(&summary);
        }
    }
}

fn print_summary(summary: &TrialSummary) {
    println!("Scroll Trials");
    println!("=============");
    println!(
        "{} sessions, {}% scroll, {} slots (consume on fail: {}, boom: {})",
        summary.trials,
        summary.percent,
        summary.slots,
        summary.consume_on_fail,
        summary.boom_on_fail
    );
    println!("Seed: {}", summary.seed);
    println!();
    println!("Mean successes: {:.3}", summary.mean_successes);
    println!("Mean scrolls used: {:.3}", summary.mean_attempts);
    println!("Perfect equips: {:.2}%", summary.perfect_rate * 100.0);
    if summary.boom_on_fail {
        println!("Destroyed: {:.2}%", summary.destroyed_rate * 100.0);
    }
    println!();
    println!("Successes distribution:");
    for (n, count) in summary.success_histogram.iter().enumerate() {
        let share = *count as f64 / summary.trials.max(1) as f64;
        println!("  {:>2}: {:>7} ({:.2}%)", n, count, share * 100.0);
    }
}
