//! Match score across rounds, up to the agreed target.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::rules::DEFAULT_POINTS_TO_WIN;
use crate::domain::scoring::RoundScoreReport;
use crate::domain::state::Team;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    points_to_win: u16,
    /// Cumulative totals, indexed by `Team::index()`.
    totals: [u32; 2],
    rounds_played: u32,
    winner: Option<Team>,
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_TO_WIN)
    }
}

impl MatchScore {
    pub fn new(points_to_win: u16) -> Self {
        Self {
            points_to_win,
            totals: [0; 2],
            rounds_played: 0,
            winner: None,
        }
    }

    pub fn points_to_win(&self) -> u16 {
        self.points_to_win
    }

    pub fn total(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Add a round's totals; returns the match winner once there is one.
    ///
    /// An instant win ends the match for its team. Otherwise a team at or
    /// past the target wins; if both are, the higher total wins and an
    /// exact tie plays on.
    pub fn apply(&mut self, report: &RoundScoreReport) -> Result<Option<Team>, DomainError> {
        if let Some(team) = self.winner {
            return Err(DomainError::invariant(format!(
                "match already won by team {team}"
            )));
        }
        for team in Team::ALL {
            self.totals[team.index()] += u32::from(report.total(team));
        }
        self.rounds_played += 1;

        let winner = match report.instant_win {
            Some(team) => Some(team),
            None => self.leader_past_target(),
        };
        if let Some(team) = winner {
            info!(
                %team,
                team_a = self.totals[0],
                team_b = self.totals[1],
                rounds = self.rounds_played,
                "match won"
            );
        }
        self.winner = winner;
        Ok(winner)
    }

    fn leader_past_target(&self) -> Option<Team> {
        let target = u32::from(self.points_to_win);
        let [a, b] = self.totals;
        match (a >= target, b >= target) {
            (false, false) => None,
            (true, false) => Some(Team::A),
            (false, true) => Some(Team::B),
            (true, true) if a > b => Some(Team::A),
            (true, true) if b > a => Some(Team::B),
            (true, true) => None,
        }
    }
}
