//! Per-game records written by the simulator.

use belot_engine::domain::{Declaration, RoundOutcome, Suit, Team, TeamScore};
use belot_engine::{RulesConfig, Seat};
use serde::Serialize;

use crate::simulator::{GameResult, RoundRecord};
use crate::types::MetricsLevel;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub rules: RulesConfig,
    pub result: GameResultMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub winner: Team,
    pub totals: [u32; 2],
    pub rounds_played: usize,
    pub belot_run: bool,
    pub rounds_fallen: [u32; 2],
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub dealer: Seat,
    pub caller: Seat,
    pub trump: Suit,
    pub forced: bool,
    pub outcome: RoundOutcome,
    pub teams: [TeamScore; 2],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<Declaration>,
}

impl From<&RoundRecord> for RoundMetrics {
    fn from(record: &RoundRecord) -> Self {
        RoundMetrics {
            round_no: record.round_no,
            dealer: record.dealer,
            caller: record.caller,
            trump: record.trump,
            forced: record.forced,
            outcome: record.report.outcome,
            teams: record.report.teams,
            declarations: record.declarations.clone(),
        }
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    rules: &RulesConfig,
    result: &GameResult,
    level: MetricsLevel,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let mut rounds_fallen = [0u32; 2];
    for record in &result.rounds {
        if record.report.outcome == RoundOutcome::Fell {
            rounds_fallen[Team::of(record.caller).index()] += 1;
        }
    }

    let rounds = match level {
        MetricsLevel::Basic => Vec::new(),
        MetricsLevel::Detailed => result.rounds.iter().map(RoundMetrics::from).collect(),
    };

    GameMetrics {
        game_id,
        seed,
        timestamp,
        rules: rules.clone(),
        result: GameResultMetrics {
            winner: result.winner,
            totals: result.totals,
            rounds_played: result.rounds_played(),
            belot_run: result.ended_by_belot_run(),
            rounds_fallen,
            duration_ms,
        },
        rounds,
    }
}

/// One line of the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: String,
    pub team_a_total: u32,
    pub team_b_total: u32,
    pub rounds_played: usize,
    pub belot_run: bool,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            winner: metrics.result.winner.to_string(),
            team_a_total: metrics.result.totals[0],
            team_b_total: metrics.result.totals[1],
            rounds_played: metrics.result.rounds_played,
            belot_run: metrics.result.belot_run,
            duration_ms: metrics.result.duration_ms,
        }
    }
}
