use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SpinwheelError, SpinwheelResult};
use super::history::Activity;

pub const NOT_ENOUGH_PLAYERS: &str =
    "Number of players must be greater than or equal to number of teams";

/// A validated team generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRequest {
    players: Vec<String>,
    num_teams: usize,
}

impl TeamRequest {
    pub fn new(players: Vec<String>, num_teams: usize) -> SpinwheelResult<Self> {
        let players: Vec<String> = players
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if num_teams == 0 {
            return Err(SpinwheelError::Validation("Number of teams must be at least 1".to_string()));
        }
        if players.len() < num_teams {
            return Err(SpinwheelError::Validation(NOT_ENOUGH_PLAYERS.to_string()));
        }

        Ok(Self { players, num_teams })
    }

    /// Builds a request from free text: one player per line, commas also separate.
    pub fn parse(input: &str, num_teams: usize) -> SpinwheelResult<Self> {
        Self::new(parse_players(input), num_teams)
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn players_per_team(&self) -> usize {
        self.players.len() / self.num_teams
    }

    /// The `teams_generated` history record for this request.
    pub fn to_activity(&self) -> SpinwheelResult<Activity> {
        Ok(Activity::TeamsGenerated {
            num_teams: history_count(self.num_teams)?,
            players_per_team: history_count(self.players_per_team())?,
        })
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .players
            .iter()
            .map(|p| ("players[]".to_string(), p.clone()))
            .collect();
        params.push(("num_teams".to_string(), self.num_teams.to_string()));
        params
    }
}

pub(crate) fn history_count(value: usize) -> SpinwheelResult<u32> {
    u32::try_from(value)
        .map_err(|_| SpinwheelError::Validation(format!("{} is too large to record in history", value)))
}

pub fn parse_players(input: &str) -> Vec<String> {
    input
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TeamAssignment {
    pub teams: Vec<Vec<String>>,
}

impl TeamAssignment {
    pub fn total_players(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }

    /// True when every requested player lands in exactly one team and the
    /// team count matches the request.
    pub fn is_partition_of(&self, request: &TeamRequest) -> bool {
        if self.teams.len() != request.num_teams() {
            return false;
        }

        let mut expected: HashMap<&str, usize> = HashMap::new();
        for player in request.players() {
            *expected.entry(player.as_str()).or_insert(0) += 1;
        }

        for player in self.teams.iter().flatten() {
            match expected.get_mut(player.as_str()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return false,
            }
        }

        expected.values().all(|count| *count == 0)
    }
}
