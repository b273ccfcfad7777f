use std::fs;
use std::io::{self, Read};

use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::constants::DEFAULT_NUM_TEAMS;
use crate::error::{ErrorContext, SpinwheelResult};
use crate::formatting::print_teams;
use crate::models::{parse_players, TeamAssignment, TeamRequest};
use super::{friendly_error, record_activity};

const TEAMS_FAILED: &str = "Failed to generate teams. Please try again.";

/// Players from `--players` (repeatable, comma-separated) and `--file`
/// (one per line, `-` for stdin).
fn collect_players(matches: &ArgMatches) -> SpinwheelResult<Vec<String>> {
    let mut players = Vec::new();

    if let Some(values) = matches.get_many::<String>("players") {
        for value in values {
            players.extend(parse_players(value));
        }
    }

    if let Some(path) = matches.get_one::<String>("file") {
        let contents = if path == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            fs::read_to_string(path).with_context(|| format!("Failed to read players from {}", path))?
        };
        players.extend(parse_players(&contents));
    }

    Ok(players)
}

pub async fn handle_teams(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_teams_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_teams_impl(matches: &ArgMatches) -> SpinwheelResult<()> {
    let num_teams = matches.get_one::<usize>("num-teams").copied().unwrap_or(DEFAULT_NUM_TEAMS);
    let players = collect_players(matches)?;

    let mut context = CliContext::load()?;
    generate_teams(&mut context, players, num_teams).await?;
    Ok(())
}

/// Validates the players, generates teams, prints them, and saves a
/// `teams_generated` record for a logged-in user.
pub async fn generate_teams(
    context: &mut CliContext,
    players: Vec<String>,
    num_teams: usize,
) -> SpinwheelResult<TeamAssignment> {
    // Rejected here, before any request goes out
    let request = TeamRequest::new(players, num_teams)?;
    let activity = request.to_activity()?;

    let authenticated = context.check_auth().await;
    let client = context.client();

    println!("{}", "Generating teams...".bright_blue());
    let assignment = client
        .generate_teams(&request)
        .await
        .map_err(|e| friendly_error(e, TEAMS_FAILED))?;

    print_teams(&assignment);

    if authenticated {
        record_activity(&client, activity).await;
    }

    Ok(assignment)
}
