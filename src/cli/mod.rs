//! CLI command implementations for the Nexus IQ terminal reports.
//!
//! Provides subcommand handlers for:
//! - `nexusiq overview`: headline numbers and the health scores
//! - `nexusiq scores`: the three derived scores with their breakdowns
//! - `nexusiq rewriter`: query rewriter effectiveness, latency, quality
//! - `nexusiq adoption`: active users, engagement, top users
//! - `nexusiq feedback`: filterable feedback list
//! - `nexusiq gaps`: zero-result queries with recommended actions
//! - `nexusiq check`: dataset and configuration status
//! - `nexusiq config show|init|set|reset`: configuration management
//!
//! Every report renders the same page view models the web dashboard serves.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::config;
use crate::config::schema::NexusConfig;
use crate::data::{DatasetReport, Datasets, LoadStatus};
use crate::metrics;
use crate::view::ViewState;
use crate::view::components::{
    KpiCard, Limited, RowKey, ScoreBar, StatRow, Variant, format_count, format_decimal,
};
use crate::view::pages::{adoption, content_health, feedback, overview, rewriter};

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// nexusiq overview
// ---------------------------------------------------------------------------

/// Show headline numbers from every dataset plus the health scores.
pub fn run_overview(datasets: &Datasets, cfg: &NexusConfig, format: OutputFormat) -> Result<()> {
    let page = overview::build(datasets, cfg);

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            println!("section,label,value");
            for card in &page.quick_stats {
                println!("overview,{},{}", csv_field(&card.title), csv_field(&card.value));
            }
            for section in &page.sections {
                for row in &section.rows {
                    println!(
                        "{},{},{}",
                        csv_field(section.title),
                        csv_field(&row.label),
                        csv_field(&row.value)
                    );
                }
            }
        }
        OutputFormat::Table => {
            heading(&page.header.title);
            print_kpis(&page.quick_stats);

            for section in &page.sections {
                println!("{}", section.title.bold().cyan());
                print_stat_rows(&section.rows);
                println!();
            }

            println!("{}", "System Health".bold().cyan());
            for score in &page.health.scores {
                print_bar(&score.bar, &format!("{}/100", score.value));
                println!("    {}", score.breakdown.dimmed());
            }
            println!(
                "  {} {} {}",
                "Overall:".bold(),
                page.health.overall,
                paint(page.health.status.label(), page.health.badge.variant)
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq scores
// ---------------------------------------------------------------------------

/// Show the three derived scores with their inputs.
pub fn run_scores(datasets: &Datasets, cfg: &NexusConfig, format: OutputFormat) -> Result<()> {
    let health = metrics::system_health(datasets, &cfg.scoring);

    match format {
        OutputFormat::Json => print_json(&health)?,
        OutputFormat::Csv => {
            println!("score,value,display,breakdown");
            for score in health.scores() {
                println!(
                    "{},{:.2},{},{}",
                    csv_field(score.name),
                    score.value,
                    score.display_value(),
                    csv_field(&score.breakdown())
                );
            }
            println!(
                "Overall Health,{:.2},{},{}",
                health.overall,
                health.overall_display(),
                csv_field(health.status.label())
            );
        }
        OutputFormat::Table => {
            heading("Nexus IQ Health Scores");
            for score in health.scores() {
                let bar = ScoreBar::new(score.name, score.value, 100.0);
                print_bar(&bar, &format!("{}/100", score.display_value()));
                for c in &score.components {
                    println!(
                        "    {:<22} {:>8} {} {:>6.1} {} {}",
                        c.label.dimmed(),
                        format_decimal(c.input),
                        "→".dimmed(),
                        c.normalized,
                        "×".dimmed(),
                        c.weight
                    );
                }
            }
            println!();
            println!(
                "  {} {} {}",
                "Overall:".bold(),
                health.overall_display(),
                paint(health.status.label(), health.status.status().into())
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq rewriter
// ---------------------------------------------------------------------------

/// Show query rewriter effectiveness and the rewritten-query table.
pub fn run_rewriter(
    datasets: &Datasets,
    cfg: &NexusConfig,
    format: OutputFormat,
    state: &ViewState,
) -> Result<()> {
    let page = rewriter::build(datasets, cfg, state);

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            println!("key,query,entities,expansions,rewrite_ms,results");
            for row in &page.queries.list.rows {
                println!(
                    "{},{},{},{},{},{}",
                    csv_field(row.key.as_str()),
                    csv_field(&row.query),
                    csv_field(&row.matched_entities.join(";")),
                    row.expansion_count,
                    row.rewrite_time_ms,
                    row.result_count
                );
            }
        }
        OutputFormat::Table => {
            heading(&page.header.title);
            print_kpis(&page.kpis);

            println!("{}", "Effectiveness".bold().cyan());
            for chart in [&page.zero_rate_chart, &page.avg_results_chart] {
                let values: Vec<String> = chart
                    .points
                    .iter()
                    .map(|p| format!("{} {}", p.label, format_decimal(p.values[0])))
                    .collect();
                println!("  {:<28} {}", chart.title, values.join("  ").dimmed());
            }
            if page.improvement_percent != 0.0 {
                println!(
                    "  {:<28} {}%",
                    "Result improvement",
                    format_decimal(page.improvement_percent)
                );
            }
            println!();

            let lat = &page.latency;
            println!("{}", "Latency".bold().cyan());
            println!(
                "  min {}ms  avg {}ms  p95 {}ms  max {}ms  (target {}ms)",
                format_decimal(lat.min_ms),
                format_decimal(lat.avg_ms),
                format_decimal(lat.p95_ms),
                format_decimal(lat.max_ms),
                format_decimal(lat.target_ms)
            );
            let budget = ScoreBar::new("Max vs target", lat.budget_fill_pct, 100.0);
            print_bar(&budget, &paint(&lat.badge.label, lat.badge.variant).to_string());
            println!();

            if let Some(quality) = &page.quality {
                println!("{}", "Answer Quality (rewritten vs pass-through)".bold().cyan());
                for ((r, p), d) in quality
                    .rewritten
                    .iter()
                    .zip(&quality.passthrough)
                    .zip(&quality.deltas)
                {
                    println!(
                        "  {:<14} {:>5.2} vs {:>5.2}  {}",
                        r.label,
                        r.value,
                        p.value,
                        paint(&d.label, d.variant)
                    );
                }
                println!("  {:<14} {}", "total delta", quality.total_delta.bold());
                println!();
            }

            if !page.entities.rows.is_empty() {
                println!("{}", "Top Matched Entities".bold().cyan());
                for e in &page.entities.rows {
                    println!(
                        "  {:<24} {:>6}  {:>5.1}%",
                        truncate(&e.entity, 24),
                        format_count(e.count),
                        e.share_pct
                    );
                }
                println!();
            }

            if let Some(hh) = &page.head_to_head {
                println!("{}", "Head to Head".bold().cyan());
                println!("  {}", hh.example.query.dimmed());
                println!(
                    "  rewritten {}  pass-through {}",
                    format_count(hh.example.treatment.result_count),
                    format_count(hh.example.control.result_count)
                );
                println!("  {}", hh.summary.green());
                println!();
            }

            println!("{}", "Rewritten Queries".bold().cyan());
            println!(
                "  {:<44} {:>6} {:>9} {:>8}",
                "Query", "Expand", "Time", "Results"
            );
            println!("  {}", "-".repeat(70));
            for (i, row) in page.queries.list.rows.iter().enumerate() {
                let line = format!(
                    "  {:<44} {:>6} {:>9} {:>8}",
                    truncate(&row.query, 44),
                    row.expansion_count,
                    format!("{}ms", format_decimal(row.rewrite_time_ms)),
                    row.result_count
                );
                if i % 2 == 0 {
                    println!("{line}");
                } else {
                    println!("{}", line.dimmed());
                }
                if !row.matched_entities.is_empty() {
                    println!("    {}", row.matched_entities.join(", ").purple());
                }
            }
            print_list_footer(&page.queries.list, "rewritten queries");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq adoption
// ---------------------------------------------------------------------------

/// Show adoption and engagement.
pub fn run_adoption(datasets: &Datasets, cfg: &NexusConfig, format: OutputFormat) -> Result<()> {
    let page = adoption::build(datasets, cfg);

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            println!("date,queries");
            for point in &page.trend_chart.points {
                println!("{},{}", csv_field(&point.label), point.values[0]);
            }
        }
        OutputFormat::Table => {
            heading(&page.header.title);
            println!("  {}", page.header.subtitle.dimmed());
            println!();
            print_kpis(&page.kpis);

            println!("{}", page.trend_chart.title.bold().cyan());
            let max = page
                .trend_chart
                .points
                .iter()
                .map(|p| p.values[0])
                .fold(0.0_f64, f64::max);
            for point in &page.trend_chart.points {
                let bar = ScoreBar::new(point.label.as_str(), point.values[0], max);
                print_bar(&bar, &format_decimal(point.values[0]));
            }
            println!("  {}", page.peak_hour.label.dimmed());
            if let Some(day) = &page.busiest_day {
                println!("  {} {}", format!("{}:", day.label).dimmed(), day.value);
            }
            println!();

            let rt = &page.response_time;
            println!("{}", "Average Response Time".bold().cyan());
            println!(
                "  {}s ({}ms)  {}",
                format_decimal(rt.seconds),
                format_decimal(rt.millis),
                paint(&rt.badge.label, rt.badge.variant)
            );
            println!();

            if !page.top_users.rows.is_empty() {
                println!("{}", "Top Users".bold().cyan());
                for u in &page.top_users.rows {
                    println!(
                        "  #{:<3} {:<28} {:>8}  {:>5.1}%",
                        u.rank,
                        truncate(&u.user, 28),
                        format_count(u.queries),
                        u.share_pct
                    );
                }
                println!();
            }

            println!("{}", "Usage Summary".bold().cyan());
            print_stat_rows(&page.usage_summary);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq feedback
// ---------------------------------------------------------------------------

/// Show feedback totals and the filtered feedback list.
pub fn run_feedback(
    datasets: &Datasets,
    cfg: &NexusConfig,
    format: OutputFormat,
    state: &ViewState,
) -> Result<()> {
    let page = feedback::build(datasets, cfg, state);

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            println!("key,date,type,category,user,comment");
            for row in &page.items.rows {
                println!(
                    "{},{},{},{},{},{}",
                    csv_field(row.key.as_str()),
                    csv_field(&row.date),
                    row.polarity,
                    csv_field(&row.category),
                    csv_field(&row.user_name),
                    csv_field(&row.comment)
                );
            }
        }
        OutputFormat::Table => {
            heading(&page.header.title);
            print_kpis(&page.kpis);

            if !page.category_chart.is_empty() {
                println!("{}", page.category_chart.title.bold().cyan());
                for point in &page.category_chart.points {
                    println!("  {:<28} {:>6}", truncate(&point.label, 28), point.values[0]);
                }
                println!();
            }

            let f = &page.filters;
            println!(
                "{} {}",
                "Feedback Details".bold().cyan(),
                format!(
                    "(search: {:?}, category: {}, type: {})",
                    f.search, f.category, f.polarity
                )
                .dimmed()
            );
            for row in &page.items.rows {
                println!(
                    "  {} {} {:<16} {}",
                    paint(&row.badge.label, row.badge.variant),
                    row.date.dimmed(),
                    truncate(&row.category, 16),
                    truncate(&row.comment, 60)
                );
            }
            print_list_footer(&page.items, "feedback items");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq gaps
// ---------------------------------------------------------------------------

/// Show zero-result queries with the recommended action for each.
pub fn run_gaps(
    datasets: &Datasets,
    cfg: &NexusConfig,
    format: OutputFormat,
    state: &ViewState,
) -> Result<()> {
    // The terminal report always shows row details.
    let mut state = state.clone();
    state.expanded = datasets
        .rewriter
        .zero_result_queries
        .iter()
        .enumerate()
        .map(|(i, q)| RowKey::for_record(&q.id, i))
        .collect();
    let page = content_health::build(datasets, cfg, &state);

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            println!("key,query,rewritten,entities,recommended_action");
            for row in &page.gaps.rows {
                let (entities, action) = row
                    .details
                    .as_ref()
                    .map(|d| (d.matched_entities.join(";"), d.recommended_action.as_str()))
                    .unwrap_or_default();
                println!(
                    "{},{},{},{},{}",
                    csv_field(row.key.as_str()),
                    csv_field(&row.query),
                    row.was_rewritten,
                    csv_field(&entities),
                    csv_field(action)
                );
            }
        }
        OutputFormat::Table => {
            heading(&page.header.title);
            print_kpis(&page.kpis);
            print_bar(&page.score, &format!("{}/100", page.score_display));
            println!();

            println!("{}", "Zero-Result Queries".bold().cyan());
            if let Some(message) = page.empty_message {
                println!("  {}", message.yellow());
            }
            for row in &page.gaps.rows {
                println!(
                    "  {} {}",
                    paint(&row.badge.label, row.badge.variant),
                    truncate(&row.query, 70).bold()
                );
                if let Some(details) = &row.details {
                    if !details.matched_entities.is_empty() {
                        println!("    {}", details.matched_entities.join(", ").purple());
                    }
                    if !details.root_cause.is_empty() {
                        println!("    {} {}", "cause:".dimmed(), details.root_cause);
                    }
                    println!("    {} {}", "action:".dimmed(), details.recommended_action);
                }
            }
            print_list_footer(&page.gaps, "zero-result queries");
            println!();

            println!("{}", "Content Improvement Recommendations".bold().cyan());
            for r in &page.recommendations {
                println!("  {} {}", paint(r.title, r.variant), r.text.dimmed());
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// nexusiq check
// ---------------------------------------------------------------------------

/// Report where configuration and datasets were loaded from.
pub fn run_check(datasets: &Datasets, cfg: &NexusConfig) -> Result<()> {
    println!("{}", "Nexus IQ Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_check_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.nexusiq/config.toml found"
        } else {
            "not found (run `nexusiq config init` to create)"
        },
    );
    print_check_item(
        "Project config",
        project_exists,
        if project_exists {
            ".nexusiq.toml found"
        } else {
            "none (optional)"
        },
    );
    print_check_item(
        "Data directory",
        cfg.data.resolved_dir().is_dir(),
        &cfg.data.resolved_dir().display().to_string(),
    );

    for report in &datasets.reports {
        let (ok, detail) = dataset_check(report);
        print_check_item(&format!("Dataset: {}", report.name), ok, &detail);
        for correction in &report.corrections {
            println!("      {} {}", "!".yellow(), correction.to_string().dimmed());
        }
    }

    println!();
    println!(
        "  {} {} rewritten queries, {} zero-result queries, {} feedback items, {} trend days",
        "Records:".dimmed(),
        datasets.rewriter.rewritten_queries.len(),
        datasets.rewriter.zero_result_queries.len(),
        datasets.feedback.feedback_items.len(),
        datasets.adoption.query_trend.len()
    );

    Ok(())
}

/// Pass/fail and the detail text for one dataset line of `check`.
fn dataset_check(report: &DatasetReport) -> (bool, String) {
    let path = report.path.display();
    match report.status {
        LoadStatus::Loaded => (
            true,
            format!("{path} ({} corrections)", report.corrections.len()),
        ),
        LoadStatus::Missing => (false, format!("{path} missing, rendering zeros")),
        LoadStatus::Invalid => (
            false,
            format!(
                "{path} invalid: {}",
                report.error.as_deref().unwrap_or("unknown error")
            ),
        ),
    }
}

fn print_check_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// nexusiq config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Nexus IQ Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.nexusiq/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.nexusiq/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".nexusiq.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".nexusiq.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "NEXUSIQ_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.nexusiq/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to point at your data directory.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    let path = config::set_config_value(key, value)?;
    println!(
        "{} Set {} = {} {}",
        "✓".green().bold(),
        key.bold(),
        value,
        format!("({})", path.display()).dimmed()
    );
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn heading(title: &str) {
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_kpis(cards: &[KpiCard]) {
    for card in cards {
        let subtitle = card.subtitle.as_deref().unwrap_or_default();
        let trend = card
            .trend
            .as_ref()
            .map(|t| format!(" ({})", t.label))
            .unwrap_or_default();
        println!(
            "  {:<22} {:>12}  {}{}",
            format!("{}:", card.title).bold(),
            paint(&card.value, card.variant),
            subtitle.dimmed(),
            trend.dimmed()
        );
    }
    println!();
}

fn print_stat_rows(rows: &[StatRow]) {
    for row in rows {
        let value = match &row.badge {
            Some(badge) => paint(&badge.label, badge.variant),
            None => row.value.normal(),
        };
        println!("  {:<18} {}", row.label.dimmed(), value);
    }
}

const BAR_WIDTH: usize = 24;

fn print_bar(bar: &ScoreBar, right: &str) {
    let filled = ((bar.fill_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    println!(
        "  {:<20} {}{} {}",
        truncate(&bar.label, 20),
        "█".repeat(filled).cyan(),
        "░".repeat(BAR_WIDTH - filled).dimmed(),
        right
    );
}

fn print_list_footer<T>(list: &Limited<T>, noun: &str) {
    if list.total == 0 {
        println!("  {}", format!("No {noun} match your filters.").yellow());
    } else if let Some(note) = &list.note {
        println!("  {}", note.dimmed());
    } else {
        println!("  {}", format!("{} {noun}", list.total).dimmed());
    }
}

/// Color a label by badge variant.
fn paint(label: &str, variant: Variant) -> colored::ColoredString {
    match variant {
        Variant::Success => label.green(),
        Variant::Warning => label.yellow(),
        Variant::Danger => label.red(),
        Variant::Info => label.cyan(),
        Variant::Default => label.normal(),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
        assert_eq!(truncate("café crème", 4), "caf…");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn reports_render_for_empty_datasets() {
        let datasets = Datasets::default();
        let cfg = NexusConfig::default();
        let state = ViewState::default();
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv] {
            run_overview(&datasets, &cfg, format).expect("overview");
            run_scores(&datasets, &cfg, format).expect("scores");
            run_rewriter(&datasets, &cfg, format, &state).expect("rewriter");
            run_adoption(&datasets, &cfg, format).expect("adoption");
            run_feedback(&datasets, &cfg, format, &state).expect("feedback");
            run_gaps(&datasets, &cfg, format, &state).expect("gaps");
        }
    }

    #[test]
    fn check_reports_malformed_dataset_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("adoption.json"), "{ \"wau\": ").unwrap();
        let mut cfg = NexusConfig::default();
        cfg.data.dir = dir.path().to_string_lossy().into_owned();

        let datasets = Datasets::inspect(&cfg.data);
        run_check(&datasets, &cfg).expect("check");

        let adoption = datasets
            .reports
            .iter()
            .find(|r| r.name == "adoption")
            .expect("adoption report");
        let (ok, detail) = dataset_check(adoption);
        assert!(!ok);
        assert!(detail.contains("invalid"), "{detail}");

        let (ok, detail) = dataset_check(&datasets.reports[0]);
        assert!(!ok);
        assert!(detail.contains("missing"), "{detail}");
    }
}
