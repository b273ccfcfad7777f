use colored::*;

use crate::models::{Activity, HistoryEntry, User};
use super::utils::{format_relative_time, format_timestamp};

pub const EMPTY_HISTORY: &str = "No activity history yet. Try spinning the wheel or generating teams!";

pub fn activity_title(activity: &Activity) -> Option<String> {
    match activity {
        Activity::WheelSpin { result } => Some(format!("Wheel Spin Result: {}", result)),
        Activity::TeamsGenerated { .. } => Some("Teams Generated".to_string()),
        Activity::Unrecognized { .. } => None,
    }
}

pub fn activity_summary(activity: &Activity) -> Option<String> {
    match activity {
        Activity::WheelSpin { .. } => None,
        Activity::TeamsGenerated { num_teams, players_per_team } => {
            Some(format!("{} teams with {} players each", num_teams, players_per_team))
        }
        Activity::Unrecognized { .. } => None,
    }
}

/// Plain-text rendering of a single entry, or `None` for actions this client
/// does not display.
pub fn format_history_entry(entry: &HistoryEntry) -> Option<String> {
    let title = activity_title(&entry.activity)?;
    let mut lines = vec![title];
    if let Some(summary) = activity_summary(&entry.activity) {
        lines.push(summary);
    }
    lines.push(format_timestamp(&entry.timestamp));
    Some(lines.join("\n"))
}

pub fn print_profile_header(user: &User) {
    println!("{}", format!("{}'s Profile", user.username).bold());
    println!("{}", "View your activity history".dimmed());
    println!("{}", "─".repeat(60).dimmed());
}

pub fn print_history(entries: &[HistoryEntry], format: &str) {
    if format == "json" {
        match serde_json::to_string_pretty(entries) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize history: {}", e),
        }
        return;
    }

    let visible: Vec<&HistoryEntry> = entries
        .iter()
        .filter(|entry| activity_title(&entry.activity).is_some())
        .collect();

    if visible.is_empty() {
        println!("{}", EMPTY_HISTORY.dimmed());
        return;
    }

    for entry in visible {
        let (icon, title) = match &entry.activity {
            Activity::WheelSpin { result } => (
                "◎".bright_blue(),
                format!("Wheel Spin Result: {}", result.to_string().bright_blue().bold()),
            ),
            _ => (
                "◆".bright_green(),
                activity_title(&entry.activity).unwrap_or_default(),
            ),
        };

        println!("{} {}", icon, title);
        if let Some(summary) = activity_summary(&entry.activity) {
            println!("  {}", summary);
        }
        println!(
            "  {} {}",
            format_timestamp(&entry.timestamp).dimmed(),
            format!("({})", format_relative_time(&entry.timestamp)).dimmed()
        );
    }
}
