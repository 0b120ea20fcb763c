//! `sessions` CLI — check tutoring session times against a roster file.
//!
//! The roster is the JSON snapshot the data layer exports
//! (`{"students": [...], "groups": [...]}`). Every command prints pretty JSON
//! on stdout; logs go to stderr (`RUST_LOG=session_engine=debug` for detail).
//!
//! ## Usage
//!
//! ```sh
//! # Would 14:30 for 60 minutes on March 1st collide with anything?
//! sessions --roster roster.json check --date 2026-03-01 --time 14:30 --duration 60
//!
//! # Same, reading the roster from stdin and failing (exit 2) on a hard conflict
//! cat roster.json | sessions check --date 2026-03-01 --time 14:30 --strict
//!
//! # Would restoring a vacation session collide with today's schedule?
//! sessions -r roster.json restore --owner s1 --session v1
//!
//! # Gaps between the sessions of a day
//! sessions -r roster.json gaps --date 2026-03-01
//!
//! # Open slots, all or curated
//! sessions -r roster.json slots --date 2026-03-01 --duration 60
//! sessions -r roster.json suggest --date 2026-03-01 --duration 60 --max 4
//!
//! # Conflict messages on stderr in Arabic
//! sessions -r roster.json --lang ar check --date 2026-03-01 --time 14:00
//!
//! # Every conflicting session in the roster
//! sessions -r roster.json --config engine.toml scan
//!
//! # Expand a student's weekly schedule into dated sessions
//! sessions -r roster.json expand --owner s1 --from 2026-03-01 --until 2026-03-31
//! ```

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use session_engine::{
    Candidate, ConflictResult, EngineConfig, Locale, Roster, SessionOwner, WorkingHours,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status for `--strict` checks that find a blocking conflict.
const EXIT_BLOCKING: i32 = 2;

#[derive(Parser)]
#[command(
    name = "sessions",
    version,
    about = "Tutoring session conflict checks and open-slot search"
)]
struct Cli {
    /// Roster JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    roster: Option<String>,

    /// Engine configuration TOML file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Language of conflict messages logged to stderr (ar or en)
    #[arg(long, global = true, default_value = "en")]
    lang: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a proposed session time for conflicts
    Check {
        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
        /// Duration in minutes (configured default if omitted)
        #[arg(long)]
        duration: Option<u32>,
        /// Id of the session being edited, ignored during the check
        #[arg(long)]
        exclude: Option<String>,
        /// Exit with status 2 when the conflict is blocking
        #[arg(long)]
        strict: bool,
    },
    /// Check whether restoring a cancelled or vacation session would conflict
    Restore {
        /// Student or group id
        #[arg(long)]
        owner: String,
        /// Session id
        #[arg(long)]
        session: String,
        /// Exit with status 2 when the conflict is blocking
        #[arg(long)]
        strict: bool,
    },
    /// List the sessions of a day with the gap after each
    Gaps {
        #[arg(long)]
        date: NaiveDate,
    },
    /// List every open start time on a day
    Slots {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        duration: Option<i32>,
        /// Window start (HH:MM, default 08:00)
        #[arg(long)]
        work_start: Option<String>,
        /// Window end (HH:MM, default 22:00)
        #[arg(long)]
        work_end: Option<String>,
    },
    /// List curated open start times, common teaching hours first
    Suggest {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        duration: Option<i32>,
        /// Window start (HH:MM, default 14:00)
        #[arg(long)]
        work_start: Option<String>,
        /// Window end (HH:MM, default 22:00)
        #[arg(long)]
        work_end: Option<String>,
        /// Maximum number of slots (default 6)
        #[arg(long)]
        max: Option<usize>,
    },
    /// Report every session in the roster that conflicts with another
    Scan,
    /// Expand an owner's weekly schedule into dated sessions
    Expand {
        /// Student or group id
        #[arg(long)]
        owner: String,
        /// First date (inclusive)
        #[arg(long)]
        from: NaiveDate,
        /// Last date (inclusive)
        #[arg(long)]
        until: NaiveDate,
        /// Comma-separated weekday numbers (0 = Sunday); overrides the roster
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let roster = load_roster(cli.roster.as_deref())?;
    info!(
        students = roster.students.len(),
        groups = roster.groups.len(),
        min_gap = config.min_gap_minutes,
        "roster loaded"
    );

    let lang = cli.lang;
    match cli.command {
        Commands::Check {
            date,
            time,
            duration,
            exclude,
            strict,
        } => {
            let candidate = Candidate::new(date, time, duration);
            let result =
                session_engine::check_conflict(&roster, &candidate, exclude.as_deref(), &config);
            report_conflicts(&result, lang);
            print_json(&result)?;
            if strict && result.is_blocking() {
                process::exit(EXIT_BLOCKING);
            }
        }
        Commands::Restore {
            owner,
            session,
            strict,
        } => {
            if roster.find_session(&owner, &session, &config).is_none() {
                info!(owner = %owner, session = %session, "session not found in roster");
            }
            let result = session_engine::check_restore_conflict(&roster, &owner, &session, &config);
            report_conflicts(&result, lang);
            print_json(&result)?;
            if strict && result.is_blocking() {
                process::exit(EXIT_BLOCKING);
            }
        }
        Commands::Gaps { date } => {
            let gaps = session_engine::get_sessions_with_gaps(&roster, date, &config);
            print_json(&gaps)?;
        }
        Commands::Slots {
            date,
            duration,
            work_start,
            work_end,
        } => {
            let window = window_or(&config.availability_window, work_start, work_end);
            let duration = duration.unwrap_or(config.default_duration_minutes);
            let slots = session_engine::get_available_slots(&roster, date, duration, &window, &config);
            print_json(&slots)?;
        }
        Commands::Suggest {
            date,
            duration,
            work_start,
            work_end,
            max,
        } => {
            let window = window_or(&config.curated_window, work_start, work_end);
            let duration = duration.unwrap_or(config.default_duration_minutes);
            let max = max.unwrap_or(config.max_curated_slots);
            let slots =
                session_engine::get_suggested_slots(&roster, date, duration, &window, max, &config);
            print_json(&slots)?;
        }
        Commands::Scan => {
            let flagged = session_engine::scan_all_conflicts(&roster, &config);
            info!(flagged = flagged.len(), "scan complete");
            print_json(&flagged)?;
        }
        Commands::Expand {
            owner,
            from,
            until,
            days,
        } => {
            let days = match days {
                Some(days) => days,
                None => roster
                    .find_owner(&owner)
                    .map(|o| o.schedule_days().to_vec())
                    .with_context(|| format!("Unknown owner: {}", owner))?,
            };
            let sessions = session_engine::expand_weekly_sessions(
                &owner,
                &days,
                from,
                until,
                &config.timezone,
            )
            .context("Failed to expand weekly schedule")?;
            print_json(&sessions)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("session_engine=info,sessions=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path))?;
            debug!(path, "config loaded");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_roster(path: Option<&str>) -> Result<Roster> {
    let json = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    Roster::from_json(&json).context("Failed to parse roster JSON")
}

/// Log each conflict's message in the chosen language.
fn report_conflicts(result: &ConflictResult, lang: Locale) {
    for detail in &result.conflicts {
        warn!(
            session = %detail.session.session_id,
            owner = detail.session.owner.id(),
            "{}",
            detail.message.get(lang)
        );
    }
}

/// Override either end of a default window.
fn window_or(default: &WorkingHours, start: Option<String>, end: Option<String>) -> WorkingHours {
    WorkingHours::new(
        start.unwrap_or_else(|| default.start.clone()),
        end.unwrap_or_else(|| default.end.clone()),
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
