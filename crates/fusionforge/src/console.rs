//! Colorful console output for scoring and team building.
//!
//! Provides a custom `tracing` layer that formats FusionForge events with
//! colors. Enabled by the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: [&str; 2] = ["fusionforge_solver=info", "fusionforge_scoring=info"];

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Prints the
/// banner and installs a global subscriber; `RUST_LOG` directives are
/// honored on top of the defaults.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        for directive in DEFAULT_DIRECTIVES {
            if let Ok(directive) = directive.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(FusionForgeConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _____          _             _____
|  ___|   _ ___(_) ___  _ __ |  ___|__  _ __ __ _  ___
| |_ | | | / __| |/ _ \| '_ \| |_ / _ \| '__/ _` |/ _ \
|  _|| |_| \__ \ | (_) | | | |  _| (_) | | | (_| |  __/
|_|   \__,_|___/_|\___/|_| |_|_|  \___/|_|  \__, |\___|
                                            |___/
"#;

    let version_line = format!(
        "                   v{} - Fusion Scoring and Team Optimizer\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats FusionForge events with colors.
pub struct FusionForgeConsoleLayer;

impl<S: Subscriber> Layer<S> for FusionForgeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("fusionforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    mode: Option<String>,
    strategy: Option<String>,
    status: Option<String>,
    roster_size: Option<u64>,
    pair_count: Option<u64>,
    pairs_done: Option<u64>,
    candidate_count: Option<u64>,
    pinned_count: Option<u64>,
    team_count: Option<u64>,
    team_index: Option<u64>,
    teams: Option<u64>,
    duration_ms: Option<u64>,
    best_score: Option<f64>,
    total: Option<f64>,
    delta: Option<f64>,
    cancelled: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "mode" => self.mode = Some(s),
            "strategy" => self.strategy = Some(s),
            "status" => self.status = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "mode" => self.mode = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "roster_size" => self.roster_size = Some(value),
            "pair_count" => self.pair_count = Some(value),
            "pairs_done" => self.pairs_done = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "pinned_count" => self.pinned_count = Some(value),
            "team_count" => self.team_count = Some(value),
            "team_index" => self.team_index = Some(value),
            "teams" => self.teams = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "best_score" => self.best_score = Some(value),
            "total" => self.total = Some(value),
            "delta" => self.delta = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "cancelled" {
            self.cancelled = Some(value);
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "score_start" => format_score_start(v),
        "score_end" => format_score_end(v),
        "build_start" => format_build_start(v),
        "team_built" => format_team_built(v),
        "build_end" => format_build_end(v),
        "team_infeasible" | "pinned_truncated" if level == Level::WARN => format_warning(v),
        _ => String::new(),
    }
}

fn prefix(level: &str, component: &str) -> String {
    let level = if level == "WARN" {
        level.bright_yellow().to_string()
    } else {
        level.bright_green().to_string()
    };
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        level,
        format!("[{}]", component).bright_cyan()
    )
}

fn format_score_start(v: &EventVisitor) -> String {
    format!(
        "{} Scoring started: roster ({}), pairs ({})",
        prefix("INFO", "Scoring"),
        v.roster_size.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.pair_count.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_score_end(v: &EventVisitor) -> String {
    let state = if v.cancelled.unwrap_or(false) {
        "cancelled".bright_red().to_string()
    } else {
        "ended".white().to_string()
    };
    format!(
        "{} Scoring {}: time spent ({}), pairs ({}/{}), candidates ({})",
        prefix("INFO", "Scoring"),
        state,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.pairs_done.unwrap_or(0).to_formatted_string(&Locale::en),
        v.pair_count.unwrap_or(0).to_formatted_string(&Locale::en),
        v.candidate_count.unwrap_or(0).to_formatted_string(&Locale::en).bright_magenta().bold(),
    )
}

fn format_build_start(v: &EventVisitor) -> String {
    format!(
        "{} Team building started: mode ({}), candidates ({}), pinned ({}), teams ({})",
        prefix("INFO", "Optimizer"),
        v.mode.as_deref().unwrap_or("Unknown").white().bold(),
        v.candidate_count.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.pinned_count.unwrap_or(0).to_string().bright_yellow(),
        v.team_count.unwrap_or(0).to_string().bright_yellow(),
    )
}

fn format_team_built(v: &EventVisitor) -> String {
    format!(
        "    {} Team {:>3} | total {} | delta {}",
        "->".bright_blue(),
        v.team_index.map_or(0, |i| i + 1),
        format_score(v.total),
        format_score(v.delta),
    )
}

fn format_build_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("Unknown");
    let best = v.best_score.filter(|s| s.is_finite());

    let mut output = format!(
        "{} Team building ended: time spent ({}), best score ({})",
        prefix("INFO", "Optimizer"),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(best),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = match status {
        "Completed" => "TEAMS BUILT",
        "Cancelled" => "CANCELLED (partial result)",
        "Infeasible" => "INFEASIBLE (pool cannot fill a team)",
        _ => "UNKNOWN",
    };
    let status_colored = if status == "Completed" {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_red().bold().to_string()
    };
    let status_padding = 56usize.saturating_sub(status_text.len() + 4);
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Teams:",
        v.teams.unwrap_or(0),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Score:",
        best.map_or_else(|| "N/A".to_string(), |s| format!("{s:.3}")),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_warning(v: &EventVisitor) -> String {
    let detail = match v.event.as_deref() {
        Some("pinned_truncated") => format!(
            "more than six pinned members ({}); keeping the first six",
            v.pinned_count.unwrap_or(0)
        ),
        _ => format!(
            "team {} could not be filled from the remaining pool",
            v.team_index.map_or(0, |i| i + 1)
        ),
    };
    format!("{} {}", prefix("WARN", "Optimizer"), detail)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
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

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s < 0.0 => format!("{s:.3}").bright_red().to_string(),
        Some(s) if s > 0.0 => format!("{s:.3}").bright_green().to_string(),
        Some(s) => format!("{s:.3}").white().to_string(),
        None => "N/A".white().to_string(),
    }
}
