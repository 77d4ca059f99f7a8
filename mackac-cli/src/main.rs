//! mackac: terminal front end for the Mačkáč dice bluffing game.
//!
//! Subcommands:
//! - play   Interactive hot-seat game for two players
//! - sim    Non-interactive scripted playouts (engine smoke runs + stats)

mod prompt;

use std::cmp::Ordering;
use std::env;
use std::io::{self, BufRead};
use std::process;

use mackac_core::{
    advance_round, apply_action, initial_state_with_health, Action, ChanceMode, ClaimDecl,
    GameConfig, Outcome, Phase, Resolution, Response, RoundState, CATALOG, CATALOG_SIZE,
};
use mackac_logging::{
    now_ms, ClaimEventV1, GameOverEventV1, GameStartEventV1, NdjsonWriter, ResolutionEventV1,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        process::exit(1);
    }
    match args[0].as_str() {
        "play" => cmd_play(&args[1..]),
        "sim" => cmd_sim(&args[1..]),
        "help" | "-h" | "--help" => print_help(),
        "-V" | "--version" => print_version(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            process::exit(1);
        }
    }
}

fn print_help() {
    eprintln!(
        r#"mackac - the Mačkáč dice bluffing game

USAGE:
    mackac <COMMAND> [OPTIONS]

COMMANDS:
    play    Interactive hot-seat game for two players
    sim     Run non-interactive scripted playouts

OPTIONS:
    -h, --help       Print this help message
    -V, --version    Print version

Run `mackac <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("mackac {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut log_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"mackac play

USAGE:
    mackac play [--config cfg.yaml] [--seed S] [--log game.ndjson]

OPTIONS:
    --config PATH    Load game settings from a YAML file
    --seed S         Fixed RNG seed (default: OS entropy)
    --log PATH       Append an NDJSON transcript of the game
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(take_value(args, &mut i, "--config"));
            }
            "--seed" => {
                let raw = take_value(args, &mut i, "--seed");
                seed = Some(raw.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", raw);
                    process::exit(1);
                }));
            }
            "--log" => {
                log_path = Some(take_value(args, &mut i, "--log"));
            }
            other => {
                eprintln!("Unknown option for `mackac play`: {}", other);
                eprintln!("Run `mackac play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut cfg = match config_path {
        Some(path) => GameConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Failed to load {}: {}", path, e);
            process::exit(1);
        }),
        None => GameConfig::default(),
    };
    if seed.is_some() {
        cfg.seed = seed;
    }
    if log_path.is_some() {
        cfg.transcript = log_path;
    }

    let mut chance = match cfg.seed {
        Some(s) => ChanceMode::seeded(s),
        None => ChanceMode::entropy(),
    };
    let mut writer = cfg.transcript.as_deref().map(|path| {
        NdjsonWriter::open_append(path).unwrap_or_else(|e| {
            eprintln!("Failed to open transcript {}: {}", path, e);
            process::exit(1);
        })
    });
    if let Some(w) = writer.as_mut() {
        let _ = w.write_event(&GameStartEventV1 {
            event: "game_start",
            ts_ms: now_ms(),
            starting_health: cfg.starting_health,
            seed: cfg.seed,
        });
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if let Err(e) = game_loop(cfg.starting_health, &mut chance, &mut input, writer.as_mut()) {
        eprintln!("Game aborted: {}", e);
        process::exit(1);
    }
    if let Some(w) = writer.as_mut() {
        let _ = w.flush();
    }
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    if *i + 1 >= args.len() {
        eprintln!("Missing value for {}", flag);
        process::exit(1);
    }
    let value = args[*i + 1].clone();
    *i += 2;
    value
}

/// Drive one full game over a line-oriented terminal. Returns the winning seat.
fn game_loop(
    starting_health: u8,
    chance: &mut ChanceMode,
    input: &mut impl BufRead,
    mut log: Option<&mut NdjsonWriter>,
) -> Result<u8, String> {
    let mut state =
        initial_state_with_health(starting_health, chance).map_err(|e| e.to_string())?;
    let mut round: u32 = 0;

    loop {
        match state.phase {
            Phase::AwaitingClaim | Phase::AwaitingCounterClaim => {
                round += 1;
                println!();
                println!("--- Round {} ---", round);
                println!(
                    "Player {} to claim (threshold {}). Health: {} vs {}.",
                    state.claimant + 1,
                    state.threshold,
                    state.players[0].health,
                    state.players[1].health
                );
                state = apply_action(state, Action::Roll, chance).map_err(|e| e.to_string())?;
            }
            Phase::Declaring => {
                let c = state.claimant as usize;
                println!(
                    "Player {}, you rolled {}",
                    state.claimant + 1,
                    state.players[c].current_throw
                );
                let decl = prompt::prompt_claim(input)?;
                state =
                    apply_action(state, Action::Announce(decl), chance).map_err(|e| e.to_string())?;
            }
            Phase::AwaitingChallenge => {
                let claim = state.pending_claim.ok_or("missing pending claim")?;
                println!("Player {} announces {}", state.claimant + 1, claim);
                if let Some(w) = log.as_deref_mut() {
                    let _ = w.write_event(&ClaimEventV1 {
                        event: "claim",
                        ts_ms: now_ms(),
                        round,
                        claimant: state.claimant,
                        announced: claim.to_string(),
                        fabricated: state.fabricated,
                    });
                }
                println!("Player {}, your call.", 2 - state.claimant);
                let response = prompt::prompt_response(input)?;
                state = apply_action(state, Action::Respond(response), chance)
                    .map_err(|e| e.to_string())?;
            }
            Phase::Resolved(resolution) => {
                report_resolution(&state, &resolution);
                if let Some(w) = log.as_deref_mut() {
                    let _ = w.write_event(&ResolutionEventV1 {
                        event: "resolution",
                        ts_ms: now_ms(),
                        round,
                        outcome: outcome_label(resolution.outcome).to_string(),
                        damaged: resolution.damaged,
                        healths: [state.players[0].health, state.players[1].health],
                    });
                }
                state = advance_round(state).map_err(|e| e.to_string())?;
            }
            Phase::GameOver { winner } => {
                if let Some(w) = log.as_deref_mut() {
                    let _ = w.write_event(&GameOverEventV1 {
                        event: "game_over",
                        ts_ms: now_ms(),
                        rounds: round,
                        winner,
                    });
                    let _ = w.flush();
                }
                println!();
                println!(
                    "Player {} is out of health. Player {} wins!",
                    2 - winner,
                    winner + 1
                );
                return Ok(winner);
            }
        }
    }
}

fn report_resolution(state: &RoundState, r: &Resolution) {
    match (r.outcome, r.revealed) {
        (Outcome::ChallengeFailed, Some(actual)) => {
            println!("Challenge failed — the claim was honest: {}", actual);
        }
        (Outcome::ChallengeSucceeded, Some(actual)) => {
            println!("Challenge! The real roll was {} — bluff exposed.", actual);
        }
        (Outcome::BelowThreshold, _) => {
            println!("That claim ranks below the standing one. Automatic penalty.");
        }
        (Outcome::SuspicionConfirmed, Some(actual)) => {
            println!("Suspicion! The real roll was {} — bluff exposed.", actual);
        }
        (Outcome::SuspicionMisplaced, Some(actual)) => {
            println!("Suspicion! But the claim was honest: {}", actual);
        }
        (Outcome::Accepted, _) => {
            println!("No one blinks. The claim stands.");
        }
        (outcome, None) => {
            // Reveal-carrying outcomes always set `revealed`; keep the report usable anyway.
            println!("Resolved: {}", outcome_label(outcome));
        }
    }
    if let Some(seat) = r.damaged {
        println!(
            "Player {} takes a hit ({} health left).",
            seat + 1,
            state.players[seat as usize].health
        );
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::ChallengeFailed => "challenge_failed",
        Outcome::ChallengeSucceeded => "challenge_succeeded",
        Outcome::BelowThreshold => "below_threshold",
        Outcome::SuspicionConfirmed => "suspicion_confirmed",
        Outcome::SuspicionMisplaced => "suspicion_misplaced",
        Outcome::Accepted => "accepted",
    }
}

fn cmd_sim(args: &[String]) {
    let mut games: u32 = 1000;
    let mut seed: u64 = 0;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"mackac sim

USAGE:
    mackac sim [--games N] [--seed S]

OPTIONS:
    --games N    Number of games to simulate (default: 1000)
    --seed S     Base RNG seed (default: 0)
"#
                );
                return;
            }
            "--games" => {
                let raw = take_value(args, &mut i, "--games");
                games = raw.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --games value: {}", raw);
                    process::exit(1);
                });
            }
            "--seed" => {
                let raw = take_value(args, &mut i, "--seed");
                seed = raw.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", raw);
                    process::exit(1);
                });
            }
            other => {
                eprintln!("Unknown option for `mackac sim`: {}", other);
                eprintln!("Run `mackac sim --help` for usage.");
                process::exit(1);
            }
        }
    }
    if games == 0 {
        eprintln!("--games must be >= 1");
        process::exit(1);
    }

    let mut wins = [0u64; 2];
    let mut total_rounds = 0u64;
    for g in 0..games {
        let mut chance = ChanceMode::seeded(seed.wrapping_add(u64::from(g)));
        let mut chooser = ChaCha8Rng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15 ^ u64::from(g));
        let (winner, rounds) = play_scripted(&mut chance, &mut chooser).unwrap_or_else(|e| {
            eprintln!("Simulation failed: {}", e);
            process::exit(1);
        });
        wins[winner as usize] += 1;
        total_rounds += u64::from(rounds);
    }

    println!("Simulated {} games (base seed {}):", games, seed);
    for seat in 0..2usize {
        println!(
            "  - Player {} wins: {} ({:.1}%)",
            seat + 1,
            wins[seat],
            100.0 * wins[seat] as f64 / f64::from(games)
        );
    }
    println!(
        "  - Mean rounds per game: {:.1}",
        total_rounds as f64 / f64::from(games)
    );
}

/// Scripted policy game: claim the truth when it beats the threshold, bluff a
/// random at-or-above-threshold claim otherwise; challenge one claim in four.
fn play_scripted(chance: &mut ChanceMode, chooser: &mut ChaCha8Rng) -> Result<(u8, u32), String> {
    let mut state = mackac_core::initial_state(chance).map_err(|e| e.to_string())?;
    let mut rounds: u32 = 0;

    for _step in 0..100_000 {
        state = match state.phase {
            Phase::AwaitingClaim | Phase::AwaitingCounterClaim => {
                rounds += 1;
                apply_action(state, Action::Roll, chance).map_err(|e| e.to_string())?
            }
            Phase::Declaring => {
                let actual = state.players[state.claimant as usize].current_throw;
                let decl = if (state.comparator)(&actual, &state.threshold) != Ordering::Less {
                    ClaimDecl::Truth
                } else {
                    let lo = mackac_core::rank_index(&state.threshold);
                    let (a, b) = CATALOG[chooser.gen_range(lo..CATALOG_SIZE)];
                    ClaimDecl::Declare(a, b)
                };
                apply_action(state, Action::Announce(decl), chance).map_err(|e| e.to_string())?
            }
            Phase::AwaitingChallenge => {
                let response = if chooser.gen_range(0..4) == 0 {
                    Response::Challenge
                } else {
                    Response::Trust
                };
                apply_action(state, Action::Respond(response), chance).map_err(|e| e.to_string())?
            }
            Phase::Resolved(_) => advance_round(state).map_err(|e| e.to_string())?,
            Phase::GameOver { winner } => return Ok((winner, rounds)),
        };
    }
    Err("simulated game did not terminate".to_string())
}
