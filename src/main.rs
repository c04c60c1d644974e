//! MapleLand Simulator - Entry Point
//!
//! Interactive SP-planning shell: pick a job line, set a character level,
//! and spend skill points under the same rules the game enforces. The
//! working build persists to a session file between runs.

use mapleland_sim::core::config::{config, set_config, SimConfig};
use mapleland_sim::core::error::Result;
use mapleland_sim::core::types::Tier;
use mapleland_sim::session;
use mapleland_sim::skills::{self, JobIndexEntry, SkillBuild};

use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("mapleland_sim=info")
        .init();

    // Optional config overlay next to the binary
    let config_path = Path::new("mapleland-sim.toml");
    if config_path.exists() {
        let loaded = SimConfig::load_toml(config_path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("config already initialized, ignoring mapleland-sim.toml");
        }
    }

    tracing::info!("MapleLand simulator starting");

    let jobs_dir = config().jobs_dir.clone();
    let index = skills::load_job_index(&jobs_dir)?;
    if index.is_empty() {
        tracing::error!(dir = %jobs_dir.display(), "job index is empty");
        println!("No job lines available under {}.", jobs_dir.display());
        return Ok(());
    }

    let mut build = initial_build(&jobs_dir, &index)?;

    // Display welcome message
    println!("\n=== MAPLELAND SP SIMULATOR ===");
    println!("Plan skill builds with the real allocation rules");
    println!();
    print_help();

    // Main command loop
    loop {
        print_status(&build);

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
            "help" | "h" => print_help(),
            "jobs" => {
                for entry in &index {
                    println!("  {:<12} {}", entry.id, entry.name);
                }
            }
            "job" => match args.first() {
                Some(id) => match skills::load_job_by_id(&jobs_dir, id) {
                    Ok(line) => {
                        let level = build.level();
                        build = SkillBuild::with_level(line, level);
                        println!("Switched to {}. Allocation cleared.", build.job().name);
                    }
                    Err(e) => println!("Cannot switch job: {}", e),
                },
                None => println!("Usage: job <id>"),
            },
            "level" => match args.first().and_then(|s| s.parse::<u32>().ok()) {
                Some(n) => {
                    let level = build.set_level(n);
                    println!("Level set to {}.", level);
                }
                None => println!(
                    "Usage: level <{}-{}>",
                    config().min_level,
                    config().max_level
                ),
            },
            "skills" => {
                let filter = args
                    .first()
                    .and_then(|s| s.parse::<u8>().ok())
                    .and_then(Tier::from_number);
                print_skills(&build, filter);
            }
            "tiers" => print_tiers(&build),
            "add" => handle_add(&mut build, &args),
            "remove" => handle_remove(&mut build, &args),
            "master" => handle_master(&mut build, &args),
            "reset" => handle_reset(&mut build, &args),
            "save" => match session::save_build(&build, &config().session_path) {
                Ok(()) => println!("Saved to {}.", config().session_path.display()),
                Err(e) => println!("Save failed: {}", e),
            },
            "load" => match session::load_saved(&config().session_path) {
                Ok(saved) => match skills::load_job_by_id(&jobs_dir, &saved.job_id) {
                    Ok(line) => {
                        build = saved.restore_into(line);
                        println!(
                            "Loaded session: {} Lv.{}, {} SP allocated.",
                            build.job().name,
                            build.level(),
                            build.total_used()
                        );
                    }
                    Err(e) => println!("Saved job unavailable: {}", e),
                },
                Err(e) => println!("No session to load: {}", e),
            },
            _ => println!("Unknown command. Type help for the list."),
        }
    }

    println!(
        "\nGoodbye! {} Lv.{}, {} SP allocated.",
        build.job().name,
        build.level(),
        build.total_used()
    );
    Ok(())
}

/// Restore the previous session if one exists, else start fresh
fn initial_build(jobs_dir: &Path, index: &[JobIndexEntry]) -> Result<SkillBuild> {
    let session_path = &config().session_path;
    if session_path.exists() {
        match session::load_saved(session_path) {
            Ok(saved) => match skills::load_job_by_id(jobs_dir, &saved.job_id) {
                Ok(line) => {
                    tracing::info!(job = %saved.job_id, "restored previous session");
                    return Ok(saved.restore_into(line));
                }
                Err(e) => tracing::warn!("saved job unavailable: {}", e),
            },
            Err(e) => tracing::warn!("could not read session file: {}", e),
        }
    }
    let line = skills::load_job_by_id(jobs_dir, &index[0].id)?;
    Ok(SkillBuild::new(line))
}

fn print_help() {
    println!("Commands:");
    println!("  jobs                - List available job lines");
    println!("  job <id>            - Switch job line (clears allocation)");
    println!("  level <n>           - Set character level");
    println!("  skills [1-4]        - Show skills and points, optionally one tier");
    println!("  tiers               - Show SP caps per advancement");
    println!("  add <skill> [n]     - Spend points on a skill");
    println!("  remove <skill> [n]  - Take points back off a skill");
    println!("  master <skill>      - Pour points in until stopped");
    println!("  reset [tier]        - Clear one tier, or everything");
    println!("  save / load         - Persist or restore the session");
    println!("  quit / q            - Exit");
    println!();
}

/// One-line build summary between prompts
fn print_status(build: &SkillBuild) {
    let caps = build.tier_caps();
    let mut parts = Vec::new();
    for tier in Tier::ALL {
        let cap = caps.cap(tier);
        if cap > 0 {
            parts.push(format!("{} {}/{}", tier, build.used_in(tier), cap));
        }
    }
    println!();
    if parts.is_empty() {
        println!("--- {} Lv.{} | no SP yet ---", build.job().name, build.level());
    } else {
        println!(
            "--- {} Lv.{} | {} ---",
            build.job().name,
            build.level(),
            parts.join(" | ")
        );
    }
}

/// Skill listing, tier by tier, optionally narrowed to one tier
fn print_skills(build: &SkillBuild, filter: Option<Tier>) {
    let caps = build.tier_caps();
    for adv in &build.job().advancements {
        let Some(tier) = Tier::from_number(adv.tier) else {
            continue;
        };
        if filter.is_some_and(|f| f != tier) {
            continue;
        }
        println!();
        println!(
            "=== {} ({}, Lv.{}) - SP {}/{} ===",
            adv.name,
            tier,
            build.job().sp_rules.unlock_level(tier),
            build.used_in(tier),
            caps.cap(tier)
        );
        for skill in &adv.skills {
            let mut notes = Vec::new();
            if skill.required_level > 1 {
                notes.push(format!("needs Lv.{}", skill.required_level));
            }
            if let Some(prereq) = &skill.prerequisite {
                let name = build
                    .job()
                    .find_skill(&prereq.skill_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or(prereq.skill_id.as_str());
                notes.push(format!("needs {} {}", name, prereq.min_level));
            }
            let note = if notes.is_empty() {
                String::new()
            } else {
                format!("  [{}]", notes.join(", "))
            };
            println!(
                "  {:<18} {:<26} {:>2}/{}{}",
                skill.id,
                skill.name,
                build.points(&skill.id),
                skill.max_level,
                note
            );
        }
    }
    println!();
}

/// SP cap / used / remaining per tier
fn print_tiers(build: &SkillBuild) {
    let caps = build.tier_caps();
    println!();
    for (tier, used) in build.used_by_tier() {
        let cap = caps.cap(tier);
        let state = if build.level() < build.job().sp_rules.unlock_level(tier) {
            "locked"
        } else if used >= cap {
            "full"
        } else {
            "open"
        };
        println!(
            "  {:<8} cap {:>3}  used {:>3}  left {:>3}  [{}]",
            tier.to_string(),
            cap,
            used,
            cap.saturating_sub(used),
            state
        );
    }
    println!();
}

/// Resolve a skill by id, falling back to a case-insensitive name match
fn resolve_skill(build: &SkillBuild, query: &str) -> Option<String> {
    if build.job().find_skill(query).is_some() {
        return Some(query.to_string());
    }
    let lower = query.to_lowercase();
    build
        .job()
        .all_skills()
        .find(|s| s.name.to_lowercase() == lower)
        .map(|s| s.id.clone())
}

fn handle_add(build: &mut SkillBuild, args: &[&str]) {
    let Some(query) = args.first() else {
        println!("Usage: add <skill> [count]");
        return;
    };
    let Some(skill_id) = resolve_skill(build, query) else {
        println!("No skill called '{}' in this job line.", query);
        return;
    };
    let count: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut added = 0;
    let mut stopped = None;
    for _ in 0..count {
        match build.try_increment(&skill_id) {
            Ok(_) => added += 1,
            Err(reason) => {
                stopped = Some(reason);
                break;
            }
        }
    }

    let name = build
        .job()
        .find_skill(&skill_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| skill_id.clone());
    if added > 0 {
        println!(
            "Added {} point(s) to {} (now {}).",
            added,
            name,
            build.points(&skill_id)
        );
    }
    if let Some(reason) = stopped {
        println!("Cannot add more: {}.", reason);
    }
}

fn handle_remove(build: &mut SkillBuild, args: &[&str]) {
    let Some(query) = args.first() else {
        println!("Usage: remove <skill> [count]");
        return;
    };
    let Some(skill_id) = resolve_skill(build, query) else {
        println!("No skill called '{}' in this job line.", query);
        return;
    };
    let count: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut removed = 0;
    let mut stopped = None;
    for _ in 0..count {
        match build.try_decrement(&skill_id) {
            Ok(_) => removed += 1,
            Err(reason) => {
                stopped = Some(reason);
                break;
            }
        }
    }

    let name = build
        .job()
        .find_skill(&skill_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| skill_id.clone());
    if removed > 0 {
        println!(
            "Removed {} point(s) from {} (now {}).",
            removed,
            name,
            build.points(&skill_id)
        );
    }
    if let Some(reason) = stopped {
        println!("Cannot remove more: {}.", reason);
    }
}

fn handle_master(build: &mut SkillBuild, args: &[&str]) {
    let Some(query) = args.first() else {
        println!("Usage: master <skill>");
        return;
    };
    let Some(skill_id) = resolve_skill(build, query) else {
        println!("No skill called '{}' in this job line.", query);
        return;
    };

    let outcome = skills::master(build, &skill_id);
    let name = build
        .job()
        .find_skill(&skill_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| skill_id.clone());
    match outcome.stopped_by {
        None => println!(
            "{} mastered at {} (+{} points).",
            name,
            build.points(&skill_id),
            outcome.added
        ),
        Some(reason) => println!(
            "Stopped at {} (+{} points): {}.",
            build.points(&skill_id),
            outcome.added,
            reason
        ),
    }
}

fn handle_reset(build: &mut SkillBuild, args: &[&str]) {
    match args.first() {
        None => {
            build.reset_all();
            println!("Allocation cleared.");
        }
        Some(raw) => match raw.parse::<u8>().ok().and_then(Tier::from_number) {
            Some(tier) => {
                build.reset_tier(tier);
                println!("Cleared all {} points.", tier);
            }
            None => println!("Usage: reset [1-4]"),
        },
    }
}
