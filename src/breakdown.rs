use crate::aggregate::aggregate;
use crate::cli::CommonArgs;
use crate::model::{Breakdown, BreakdownOutput, BreakdownRow, SCHEMA_VERSION};
use crate::nav::Navigation;
use crate::records::load_records;
use crate::util::resolve_range;
use crate::view::{entry_icon, heat_level, intensity_bar, rows, HeatLevel};
use anyhow::Context;
use chrono::Utc;
use console::{style, StyledObject};

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    top: Option<usize>,
    path: Option<String>,
) -> anyhow::Result<()> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let parsed = load_records(&common.data)
        .with_context(|| format!("Failed to load bug data from {}", common.data.display()))?;
    if parsed.skipped > 0 {
        log::warn!("{} malformed lines skipped", parsed.skipped);
    }

    let nav = Navigation::at(path.as_deref().unwrap_or(""));
    let breakdown = aggregate(&parsed.records, nav.base_path(), &range);

    let mut entries = rows(&breakdown);
    if let Some(n) = top {
        entries.truncate(n);
    }

    if json {
        let output = BreakdownOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: common.data.to_string_lossy().to_string(),
            base_path: nav.base_path().to_string(),
            since: common.since.clone(),
            until: common.until.clone(),
            total: breakdown.total(),
            skipped_lines: parsed.skipped,
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        output_ndjson(&entries)?;
    } else {
        output_table(&breakdown, &entries, &common)?;
    }

    Ok(())
}

fn output_ndjson(entries: &[BreakdownRow]) -> anyhow::Result<()> {
    for e in entries {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}

fn output_table(breakdown: &Breakdown, entries: &[BreakdownRow], common: &CommonArgs) -> anyhow::Result<()> {
    let location = if breakdown.base_path().is_empty() {
        "/"
    } else {
        breakdown.base_path()
    };
    println!("{} {}", style("Bug fixes in").bold(), style(location).cyan().bold());

    if let (Some(since), Some(until)) = (&common.since, &common.until) {
        println!("Filtering fixes from {} to {}", since, until);
    } else if let Some(since) = &common.since {
        println!("Filtering fixes since {}", since);
    } else if let Some(until) = &common.until {
        println!("Filtering fixes until {}", until);
    }

    if entries.is_empty() {
        println!("{}", style("No bug fixes found in this directory").italic().dim());
        return Ok(());
    }

    println!(
        "{:<50} {:>8} {:>7}  {}",
        style("Path").bold(),
        style("Bugs").bold(),
        style("Share").bold(),
        style("Heat").bold()
    );
    println!("{}", "─".repeat(78));

    let max = breakdown.max_count();
    for e in entries {
        let name = format!("{} {}", entry_icon(e.is_directory), e.name);
        let name = if e.is_directory { format!("{name}/") } else { name };
        let bar = intensity_bar(e.count, max, 10);
        println!(
            "{:<50} {:>8} {:>6.1}%  {}",
            name,
            e.count,
            e.share,
            heat_style(bar, heat_level(e.count, max))
        );
    }

    println!("\nTotal: {} bug fixes", style(breakdown.total()).cyan());
    Ok(())
}

fn heat_style(text: String, level: HeatLevel) -> StyledObject<String> {
    match level {
        HeatLevel::Critical => style(text).red().bold(),
        HeatLevel::High => style(text).yellow().bold(),
        HeatLevel::Medium => style(text).green(),
        HeatLevel::Low => style(text).cyan(),
        HeatLevel::Minimal => style(text).blue(),
    }
}
