//! SP Cap Table
//!
//! Prints how much SP each advancement tier holds across a level range,
//! for eyeballing build budgets or piping into other tools as JSON.

use clap::Parser;
use mapleland_sim::core::config::config;
use mapleland_sim::core::types::Tier;
use mapleland_sim::skills::{load_job_by_id, TierCaps};
use serde::Serialize;
use std::path::PathBuf;

/// SP cap table generator
#[derive(Parser, Debug)]
#[command(name = "sp_table")]
#[command(about = "Print per-tier SP caps for a job line across a level range")]
struct Args {
    /// Job line id (from the jobs index)
    #[arg(long, default_value = "warrior")]
    job: String,

    /// Directory holding the job data files
    #[arg(long, default_value = "data/jobs")]
    jobs_dir: PathBuf,

    /// First level to print
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Last level to print
    #[arg(long, default_value_t = 200)]
    to: u32,

    /// Level step between rows
    #[arg(long, default_value_t = 1)]
    step: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// One row of the cap table
#[derive(Serialize)]
struct CapRow {
    level: u32,
    first: u32,
    second: u32,
    third: u32,
    fourth: u32,
    total: u32,
}

fn main() {
    let args = Args::parse();

    let line = match load_job_by_id(&args.jobs_dir, &args.job) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Failed to load job '{}': {}", args.job, e);
            std::process::exit(1);
        }
    };

    // The cap calculator expects pre-clamped levels, same as the REPL.
    let to = config().clamp_level(args.to);
    let step = args.step.max(1);
    let mut rows = Vec::new();
    let mut level = config().clamp_level(args.from);
    while level <= to {
        let caps = TierCaps::compute(level, &line.sp_rules);
        rows.push(CapRow {
            level,
            first: caps.cap(Tier::First),
            second: caps.cap(Tier::Second),
            third: caps.cap(Tier::Third),
            fourth: caps.cap(Tier::Fourth),
            total: caps.total(),
        });
        level = level.saturating_add(step);
    }

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows).unwrap());
        }
        "text" => print_table(&line.name, &rows),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_table(&line.name, &rows);
        }
    }
}

fn print_table(job_name: &str, rows: &[CapRow]) {
    println!("SP caps for {}", job_name);
    println!(
        "{:>5} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "level", "1st", "2nd", "3rd", "4th", "total"
    );
    for row in rows {
        println!(
            "{:>5} {:>6} {:>6} {:>6} {:>6} {:>6}",
            row.level, row.first, row.second, row.third, row.fourth, row.total
        );
    }
}
