//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Solve start/end and every new incumbent
//! - **DEBUG**: Strategy selection, construction and subtree split
//! - **TRACE**: Individual leaves and finished subtrees

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "shiftplan_solver=info,shiftplan=info";

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
     _     _  __ _         _
 ___| |__ (_)/ _| |_ _ __ | | __ _ _ __
/ __| '_ \| | |_| __| '_ \| |/ _` | '_ \
\__ \ | | | |  _| |_| |_) | | (_| | | | |
|___/_| |_|_|_|  \__| .__/|_|\__,_|_| |_|
                    |_|
"#;

    let version_line = format!("          v{} - Driver Shift Coverage Planner\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from solver modules
        if !target.starts_with("shiftplan_solver") && !target.starts_with("shiftplan::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    status: Option<String>,
    patterns: Option<u64>,
    timeslots: Option<u64>,
    peak_demand: Option<u64>,
    threads: Option<u64>,
    time_limit_ms: Option<u64>,
    objective: Option<u64>,
    drivers: Option<u64>,
    rank: Option<u64>,
    nodes: Option<u64>,
    pruned: Option<u64>,
    subtrees: Option<u64>,
    hours: Option<u64>,
    duration_ms: Option<u64>,
    search_space: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "strategy" => self.strategy = Some(s),
            "status" => self.status = Some(s),
            "search_space" => self.search_space = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "patterns" => self.patterns = Some(value),
            "timeslots" => self.timeslots = Some(value),
            "peak_demand" => self.peak_demand = Some(value),
            "threads" => self.threads = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "objective" => self.objective = Some(value),
            "drivers" => self.drivers = Some(value),
            "rank" => self.rank = Some(value),
            "nodes" => self.nodes = Some(value),
            "pruned" => self.pruned = Some(value),
            "subtrees" => self.subtrees = Some(value),
            "hours" => self.hours = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "incumbent" => format_incumbent(v),
        "strategy" => format_strategy(v),
        "frontier" => format_frontier(v),
        "leaf" => format_leaf(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let mut output = format!(
        "{} {} Solving │ {} timeslots │ {} patterns │ peak {} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(v.timeslots.unwrap_or(0)).bright_yellow(),
        format_count(v.patterns.unwrap_or(0)).bright_yellow(),
        format_count(v.peak_demand.unwrap_or(0)).bright_yellow(),
        v.strategy.as_deref().unwrap_or("auto").bright_magenta(),
    );

    if let Some(threads) = v.threads {
        output.push_str(&format!(" │ {} threads", format_count(threads).bright_yellow()));
    }

    if let Some(limit) = v.time_limit_ms {
        output.push_str(&format!(" │ {} limit", format_duration_ms(limit).bright_yellow()));
    }

    output
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "{} {} {} hours │ {} drivers │ subtree {}",
        format_elapsed(),
        "★".bright_yellow(),
        format_count(v.objective.unwrap_or(0)).bright_green().bold(),
        format_count(v.drivers.unwrap_or(0)).white(),
        format_rank(v.rank),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("Unknown");
    let optimal = status == "Optimal";
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if optimal {
        "OPTIMAL".bright_green().bold().to_string()
    } else {
        "TIMED OUT".bright_yellow().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} nodes │ {} pruned │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        format_count(v.nodes.unwrap_or(0)).white(),
        format_count(v.pruned.unwrap_or(0)).white(),
        status_colored,
    );

    // Summary box
    let inner_width: usize = 58;
    let rule = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", rule).bright_cyan().to_string());
    output.push('\n');

    let status_text = if optimal {
        "OPTIMAL SHIFT PLAN"
    } else {
        "BEST SHIFT PLAN BEFORE DEADLINE"
    };
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_text = if optimal {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_yellow().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_text,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╠{}╣", rule).bright_cyan().to_string());
    output.push('\n');

    for (label, value) in [
        ("Driver hours:", v.objective),
        ("Drivers:", v.drivers),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            format_count(value.unwrap_or(0)),
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&format!("╚{}╝", rule).bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_strategy(v: &EventVisitor) -> String {
    format!(
        "{} {} Strategy {} │ search space {}",
        format_elapsed(),
        "◆".bright_blue(),
        v.strategy.as_deref().unwrap_or("unknown").white().bold(),
        v.search_space.as_deref().unwrap_or("?").bright_magenta(),
    )
}

fn format_frontier(v: &EventVisitor) -> String {
    format!(
        "{} {} Split into {} subtrees │ {} threads",
        format_elapsed(),
        "◆".bright_blue(),
        format_count(v.subtrees.unwrap_or(0)).white().bold(),
        format_count(v.threads.unwrap_or(0)).white(),
    )
}

fn format_leaf(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} Leaf │ {} hours",
        format_elapsed(),
        "✓".bright_green(),
        format_count(v.hours.unwrap_or(0)).bright_black(),
    )
}

fn format_rank(rank: Option<u64>) -> String {
    match rank {
        Some(rank) if rank == u64::MAX => "construction".bright_black().to_string(),
        Some(rank) => format_count(rank),
        None => "-".to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_counts_use_separators() {
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_rank(Some(12)), "12");
        assert_eq!(format_rank(None), "-");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("terminated".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_leaf_only_at_trace() {
        let visitor = EventVisitor {
            event: Some("leaf".into()),
            hours: Some(35),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("35"));
    }

    #[test]
    fn test_solve_end_summary() {
        let visitor = EventVisitor {
            event: Some("solve_end".into()),
            status: Some("Optimal".into()),
            objective: Some(35),
            drivers: Some(5),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("OPTIMAL SHIFT PLAN"));
        assert!(output.contains("Driver hours:"));
    }
}
