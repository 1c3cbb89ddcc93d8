use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use validator::{Validate, ValidationError};

/// The moves the table screen offers. The server receives them as plain tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Move {
    Check,
    Call,
    Raise,
    Fold,
}

/// Tag of the move a player picked. Opaque to the client apart from `raise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerAction(String);

impl PlayerAction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn is_raise(&self) -> bool {
        self.0 == Move::Raise.as_ref()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Move> for PlayerAction {
    fn from(value: Move) -> Self {
        Self::new(value.as_ref())
    }
}

impl From<&str> for PlayerAction {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raise amounts travel as the text the player typed, or as `0` for any
/// other move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaiseAmount {
    Entered(String),
    Chips(u64),
}

impl Default for RaiseAmount {
    fn default() -> Self {
        Self::Chips(0)
    }
}

impl RaiseAmount {
    pub fn is_positive(&self) -> bool {
        match self {
            RaiseAmount::Entered(text) => parse_raise(text).is_some(),
            RaiseAmount::Chips(chips) => *chips > 0,
        }
    }
}

/// Parses raise input as a finite number greater than zero.
pub fn parse_raise(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

#[derive(Debug, Clone, PartialEq, Validate, Serialize, Deserialize)]
#[validate(schema(function = "validate_raise_amount"))]
pub struct PlayerActionRequest {
    pub action: PlayerAction,
    pub raise_amount: RaiseAmount,
}

impl PlayerActionRequest {
    pub fn raise(entered: impl Into<String>) -> Self {
        Self {
            action: Move::Raise.into(),
            raise_amount: RaiseAmount::Entered(entered.into()),
        }
    }

    pub fn without_raise(action: PlayerAction) -> Self {
        Self {
            action,
            raise_amount: RaiseAmount::default(),
        }
    }
}

fn validate_raise_amount(request: &PlayerActionRequest) -> Result<(), ValidationError> {
    if request.action.is_raise() && !request.raise_amount.is_positive() {
        return Err(ValidationError::new("raise_amount"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
