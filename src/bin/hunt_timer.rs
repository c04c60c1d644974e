//! Hunt Timer
//!
//! Interactive stopwatch for grinding sessions: count up or down, enter
//! meso and exp totals, and get the ten-minute averages as shareable text.

use clap::Parser;
use mapleland_sim::timer::{fmt_grouped, fmt_hms, HuntReport, HuntTimer, TimerMode};
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// Interactive hunt timer
#[derive(Parser, Debug)]
#[command(name = "hunt_timer")]
#[command(about = "Hunt timer with ten-minute meso/exp averages")]
struct Args {
    /// Start in count-down mode with this many minutes configured
    #[arg(long)]
    down: Option<u64>,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut timer = match args.down {
        Some(minutes) => HuntTimer::count_down_minutes(minutes),
        None => HuntTimer::count_up(),
    };
    let mut report = HuntReport::default();

    println!("=== HUNT TIMER ===");
    println!("Commands:");
    println!("  start / pause / reset    - Control the clock");
    println!("  up                       - Switch to count-up mode");
    println!("  down <h> <m> <s>         - Switch to count-down mode");
    println!("  meso <before> <after>    - Enter meso totals");
    println!("  exp <n>                  - Enter exp gained");
    println!("  report                   - Print the shareable summary");
    println!("  quit / q                 - Exit");
    println!();

    loop {
        let now = now_ms();
        if timer.tick(now) {
            println!("Time's up!");
        }
        print_status(&timer, now);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match cmd {
            "quit" | "q" => break,
            "start" => {
                if !timer.start(now_ms()) {
                    println!("Set a countdown first: down <h> <m> <s>");
                }
            }
            "pause" => timer.pause(now_ms()),
            "reset" => timer.reset(),
            "up" => timer.set_mode(TimerMode::CountUp),
            "down" => {
                timer.set_mode(TimerMode::CountDown);
                let h = args.first().and_then(|s| s.parse().ok()).unwrap_or(0);
                let m = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
                let s = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
                if h > 0 || m > 0 || s > 0 {
                    timer.set_countdown(h, m, s);
                }
                println!("Countdown set to {}.", fmt_hms(timer.configured_ms()));
            }
            "meso" => {
                let before = args.first().and_then(|s| s.parse::<i64>().ok());
                let after = args.get(1).and_then(|s| s.parse::<i64>().ok());
                match (before, after) {
                    (Some(b), Some(a)) => {
                        report.start_meso = b.max(0);
                        report.end_meso = a.max(0);
                        println!("Meso gained: {}", fmt_grouped(report.meso_gained() as f64));
                    }
                    _ => println!("Usage: meso <before> <after>"),
                }
            }
            "exp" => match args.first().and_then(|s| s.parse::<i64>().ok()) {
                Some(n) => {
                    report.exp = n.max(0);
                    println!("Exp recorded: {}", fmt_grouped(report.exp as f64));
                }
                None => println!("Usage: exp <n>"),
            },
            "report" => {
                println!();
                println!("{}", report.summary(&timer, now_ms()));
                println!();
            }
            _ => println!("Unknown command."),
        }
    }

    println!("\n{}", report.summary(&timer, now_ms()));
    Ok(())
}

/// Clock line shown between prompts
fn print_status(timer: &HuntTimer, now: u64) {
    let state = if timer.is_running() { "running" } else { "paused" };
    match timer.mode() {
        TimerMode::CountUp => {
            println!("[count-up {} | {}]", fmt_hms(timer.elapsed_ms(now)), state);
        }
        TimerMode::CountDown => {
            println!(
                "[count-down {} left of {} | {}]",
                fmt_hms(timer.remaining_ms(now)),
                fmt_hms(timer.configured_ms()),
                state
            );
        }
    }
}
