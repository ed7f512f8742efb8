//! Rendering of service results.

use anyhow::Result;
use clouds_core::{FaithMeter, ProgressionRecord};
use clouds_runtime::{Applied, LevelOverview, UserId};
use console::style;
use serde_json::json;

pub fn print_applied(user: &UserId, applied: &Applied, json: bool) -> Result<()> {
    let award = applied.result.award();

    if json {
        let value = json!({
            "user": user,
            "version": applied.stored.version,
            "points_awarded": award.points_awarded,
            "newly_unlocked": award.newly_unlocked,
            "completed_level": applied.result.completed_level(),
            "completed_tutorial": applied.result.completed_tutorial(),
            "record": applied.record(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if award.points_awarded > 0 {
        println!(
            "{} +{} faith points ({} total)",
            style("✓").green(),
            award.points_awarded,
            applied.record().faith_points
        );
    } else {
        println!("{} no points awarded", style("·").dim());
    }
    for reward in &award.newly_unlocked {
        println!("{} unlocked {}", style("★").yellow(), style(reward).bold());
    }
    if let Some(level) = applied.result.completed_level() {
        println!("{} completed {}", style("✓").green(), style(level).bold());
    }
    if applied.result.completed_tutorial() {
        println!("{} tutorial complete", style("✓").green());
    }

    Ok(())
}

pub fn print_status(
    user: &UserId,
    version: u64,
    record: &ProgressionRecord,
    meter: &FaithMeter,
    json: bool,
) -> Result<()> {
    if json {
        let value = json!({
            "user": user,
            "version": version,
            "meter": meter,
            "record": record,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", style("Angel Sister:").bold().cyan(), user);
    println!(
        "{} {}/{} ({}%) {}",
        style("Faith Points:").bold().cyan(),
        meter.points,
        meter.max_points,
        meter.percentage,
        "♥".repeat(meter.hearts as usize)
    );
    println!(
        "{} {}",
        style("Tutorial:").bold().cyan(),
        if record.tutorial_completed { "done" } else { "pending" }
    );

    println!("{}", style("Filters:").bold().yellow());
    if record.unlocked_filters.is_empty() {
        println!("  (none yet)");
    }
    for filter in &record.unlocked_filters {
        println!("  • {}", filter);
    }

    println!("{}", style("Completed Levels:").bold().yellow());
    if record.completed_levels.is_empty() {
        println!("  (none yet)");
    }
    for level in &record.completed_levels {
        println!("  • {}", level);
    }

    Ok(())
}

pub fn print_levels(levels: &[LevelOverview], json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = levels
            .iter()
            .map(|row| {
                json!({
                    "level": row.level,
                    "unlock_threshold": row.unlock_threshold,
                    "status": row.status.as_ref(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in levels {
        let status = style(row.status);
        let status = match row.status {
            clouds_core::LevelStatus::Locked => status.red(),
            clouds_core::LevelStatus::Unlocked => status.cyan(),
            clouds_core::LevelStatus::Completed => status.green(),
        };
        println!(
            "{:<22} {:>4} pts  {}",
            row.level.as_str(),
            row.unlock_threshold,
            status
        );
    }

    Ok(())
}
