use colored::*;

use crate::models::TeamAssignment;

pub fn format_teams(assignment: &TeamAssignment) -> String {
    assignment
        .teams
        .iter()
        .enumerate()
        .map(|(index, team)| {
            let mut block = format!("Team {}", index + 1);
            for (position, player) in team.iter().enumerate() {
                block.push_str(&format!("\n  {}. {}", position + 1, player));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn print_teams(assignment: &TeamAssignment) {
    for (index, team) in assignment.teams.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", format!("Team {}", index + 1).bright_blue().bold());
        for (position, player) in team.iter().enumerate() {
            println!("  {} {}", format!("{}.", position + 1).dimmed(), player);
        }
    }
}
