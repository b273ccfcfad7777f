use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const WHEEL_SPIN_ACTION: &str = "wheel_spin";
pub const TEAMS_GENERATED_ACTION: &str = "teams_generated";

/// A recorded user action. Serializes as `{"action": ..., "details": {...}}`,
/// which is also the body accepted by `POST /history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "details", rename_all = "snake_case")]
pub enum Activity {
    WheelSpin {
        result: i64,
    },
    TeamsGenerated {
        num_teams: u32,
        players_per_team: u32,
    },
    /// An action this client does not know how to display.
    #[serde(skip)]
    Unrecognized {
        action: String,
    },
}

impl Activity {
    pub fn action(&self) -> &str {
        match self {
            Activity::WheelSpin { .. } => WHEEL_SPIN_ACTION,
            Activity::TeamsGenerated { .. } => TEAMS_GENERATED_ACTION,
            Activity::Unrecognized { action } => action,
        }
    }

    fn from_parts(action: String, details: Value) -> Self {
        serde_json::from_value(json!({ "action": action, "details": details }))
            .unwrap_or(Activity::Unrecognized { action })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawHistoryEntry")]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: String,
    pub activity: Activity,
}

#[derive(Debug, Deserialize)]
struct RawHistoryEntry {
    id: i64,
    #[serde(default)]
    timestamp: String,
    action: String,
    #[serde(default)]
    details: Value,
}

impl From<RawHistoryEntry> for HistoryEntry {
    fn from(raw: RawHistoryEntry) -> Self {
        HistoryEntry {
            id: raw.id,
            timestamp: raw.timestamp,
            activity: Activity::from_parts(raw.action, raw.details),
        }
    }
}

impl Serialize for HistoryEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let details = match &self.activity {
            Activity::WheelSpin { result } => json!({ "result": result }),
            Activity::TeamsGenerated { num_teams, players_per_team } => json!({
                "num_teams": num_teams,
                "players_per_team": players_per_team,
            }),
            Activity::Unrecognized { .. } => Value::Null,
        };

        json!({
            "id": self.id,
            "timestamp": self.timestamp,
            "action": self.activity.action(),
            "details": details,
        })
        .serialize(serializer)
    }
}
