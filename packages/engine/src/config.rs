//! Rule variants a table can agree on before play.

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::rules::{DEFAULT_POINTS_TO_WIN, HAND_SIZE};
use crate::errors::domain::DomainError;

/// Environment variable holding a JSON `RulesConfig`.
pub const RULES_ENV_VAR: &str = "BELOT_RULES";

/// What a player void in the lead suit must do when they hold trump but
/// cannot beat the trump already in the trick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderTrumpRule {
    /// Any trump, still forced.
    #[default]
    MustPlayTrump,
    /// Any card.
    MayDiscard,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub under_trump: UnderTrumpRule,
    /// A player who can beat the best trump in the trick must do so.
    pub must_overtrump: bool,
    /// Bela counts in the caller's pass/fail comparison.
    pub bela_counts_toward_pass: bool,
    /// Equal sequences compare by length, then top card, before seat order.
    pub sequence_high_card_tiebreak: bool,
    pub points_to_win: u16,
    /// Packet sizes dealt to each player per pass around the table.
    pub deal_pattern: Vec<usize>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            under_trump: UnderTrumpRule::MustPlayTrump,
            must_overtrump: true,
            bela_counts_toward_pass: true,
            sequence_high_card_tiebreak: false,
            points_to_win: DEFAULT_POINTS_TO_WIN,
            deal_pattern: vec![3, 3, 2],
        }
    }
}

impl RulesConfig {
    /// Build from an optional JSON object; missing fields take defaults.
    pub fn from_json(value: Option<&Value>) -> Result<Self, DomainError> {
        let config = match value {
            None | Some(Value::Null) => Self::default(),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|e| DomainError::config(format!("invalid rules config: {e}")))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read `BELOT_RULES` as JSON; defaults when unset.
    pub fn from_env() -> Result<Self, DomainError> {
        match env::var(RULES_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                let value: Value = serde_json::from_str(&raw).map_err(|e| {
                    DomainError::config(format!("{RULES_ENV_VAR} is not valid JSON: {e}"))
                })?;
                Self::from_json(Some(&value))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.points_to_win == 0 {
            return Err(DomainError::config("points_to_win must be positive"));
        }
        if self.deal_pattern.is_empty() || self.deal_pattern.contains(&0) {
            return Err(DomainError::config(format!(
                "deal_pattern must be non-empty packets, got {:?}",
                self.deal_pattern
            )));
        }
        let per_player: usize = self.deal_pattern.iter().sum();
        if per_player != HAND_SIZE {
            return Err(DomainError::config(format!(
                "deal_pattern must deal {HAND_SIZE} cards per player, got {per_player}"
            )));
        }
        Ok(())
    }
}
