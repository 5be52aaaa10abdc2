//! Colorful console output for solver runs.
//!
//! Provides a `tracing` layer that prints the solver's lifecycle events
//! (`solve_start`, `new_best`, `solve_end`) as single colored lines.
//! Everything else is left to the `RUST_LOG` filter and dropped.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static SOLVE_START: OnceLock<Instant> = OnceLock::new();

const DEFAULT_FILTER: &str = "cutforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG` and falls back to `cutforge_solver=info`. If another global
/// subscriber is already installed, it is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CutConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct CutConsoleLayer;

impl<S: Subscriber> Layer<S> for CutConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("cutforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    objective: Option<String>,
    node_count: Option<u64>,
    relationship_count: Option<u64>,
    k: Option<u64>,
    iterations: Option<u64>,
    seed: Option<u64>,
    trial: Option<u64>,
    trials: Option<u64>,
    duration_ms: Option<u64>,
    cost: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}").trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "objective" => self.objective = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "objective" => self.objective = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "node_count" => self.node_count = Some(value),
            "relationship_count" => self.relationship_count = Some(value),
            "k" => self.k = Some(value),
            "iterations" => self.iterations = Some(value),
            "seed" => self.seed = Some(value),
            "trial" => self.trial = Some(value),
            "trials" => self.trials = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "cost" {
            self.cost = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "new_best" => format_new_best(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    let secs = SOLVE_START
        .get()
        .map_or(0.0, |start| start.elapsed().as_secs_f64());
    format!("{secs:>7.3}s").bright_black().to_string()
}

fn format_count(value: Option<u64>) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(cost) => format!("{cost:.3}").bright_white().bold().to_string(),
        None => "N/A".bright_black().to_string(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    SOLVE_START.get_or_init(Instant::now);
    format!(
        "{} {} Solving │ {} nodes │ {} relationships │ k = {} │ {} trials │ {} │ seed {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(v.node_count),
        format_count(v.relationship_count),
        format_count(v.k),
        format_count(v.iterations),
        v.objective.as_deref().unwrap_or("maximize").bright_magenta(),
        v.seed.unwrap_or(0).bright_black(),
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "{} {} New best │ trial {} │ cut {}",
        format_elapsed(),
        "★".bright_yellow().bold(),
        format_count(v.trial),
        format_cost(v.cost),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Solving complete │ cut {} │ {} trials │ {} ms",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_cost(v.cost),
        format_count(v.trials),
        format_count(v.duration_ms),
    )
}
