//! Compact action notation for replaying a hand.
//!
//! Tokens are `f` (fold), `x` (check), `c` (call) and `b<to>` / `r<to>`
//! (bet or raise to an absolute level), separated by whitespace, commas or
//! `/`. The slash is only a visual street marker; streets advance on their
//! own.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{EngineError, Result};
use crate::utilities::Chips;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:(f)|(x)|(c)|[br](\d+(?:\.\d+)?))$").unwrap());
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,/]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fold,
    Check,
    Call,
    To(Chips),
}

impl FromStr for Command {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let captures = TOKEN
            .captures(s)
            .ok_or_else(|| EngineError::Script(s.to_string()))?;
        if captures.get(1).is_some() {
            Ok(Command::Fold)
        } else if captures.get(2).is_some() {
            Ok(Command::Check)
        } else if captures.get(3).is_some() {
            Ok(Command::Call)
        } else {
            let amount = captures
                .get(4)
                .and_then(|m| Chips::from_str(m.as_str()).ok())
                .ok_or_else(|| EngineError::Script(s.to_string()))?;
            Ok(Command::To(amount))
        }
    }
}

pub fn parse(script: &str) -> Result<Vec<Command>> {
    SEPARATOR
        .split(script.trim())
        .filter(|token| !token.is_empty())
        .map(Command::from_str)
        .collect()
}
