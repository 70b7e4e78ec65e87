//! Segment position tokens and the string form the timeline engine reads.
//!
//! | token | meaning |
//! |---|---|
//! | `+=x` / `-=x` | `x` seconds after / before the current end of the timeline |
//! | `<` / `<x` | at / `x` seconds after the previous segment's start |
//! | `>` / `>x` | at / `x` seconds after the previous segment's end |
//! | `x` | absolute time in seconds |

use std::{fmt, str::FromStr};

use crate::error::{ChoreoError, ChoreoResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Position {
    FromEnd(f64),
    WithPrevious(f64),
    AfterPrevious(f64),
    At(f64),
}

impl Default for Position {
    /// Append at the current end of the timeline.
    fn default() -> Self {
        Self::FromEnd(0.0)
    }
}

impl Position {
    pub fn offset(self) -> f64 {
        match self {
            Self::FromEnd(x) | Self::WithPrevious(x) | Self::AfterPrevious(x) | Self::At(x) => x,
        }
    }

    /// Only finite tokens survive a round trip through their string form.
    pub fn is_finite(self) -> bool {
        self.offset().is_finite()
    }
}

/// Starts together with the previous segment, shifted by `offset_seconds`.
pub fn start_with_previous(offset_seconds: f64) -> Position {
    Position::WithPrevious(offset_seconds)
}

/// Starts `offset_seconds` after the previous segment ends.
pub fn start_after_previous(offset_seconds: f64) -> Position {
    Position::AfterPrevious(offset_seconds)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FromEnd(x) if x < 0.0 => write!(f, "-={}", -x),
            Self::FromEnd(x) => write!(f, "+={}", x.abs()),
            Self::WithPrevious(x) if x == 0.0 => f.write_str("<"),
            Self::WithPrevious(x) => write!(f, "<{x}"),
            Self::AfterPrevious(x) if x == 0.0 => f.write_str(">"),
            Self::AfterPrevious(x) => write!(f, ">{x}"),
            Self::At(x) => write!(f, "{x}"),
        }
    }
}

fn parse_seconds(token: &str, num: &str) -> ChoreoResult<f64> {
    let v: f64 = num
        .parse()
        .map_err(|_| ChoreoError::parse(format!("invalid position token '{token}'")))?;
    if !v.is_finite() {
        return Err(ChoreoError::parse(format!(
            "position token '{token}' is not finite"
        )));
    }
    Ok(v)
}

impl FromStr for Position {
    type Err = ChoreoError;

    fn from_str(s: &str) -> ChoreoResult<Self> {
        let t = s.trim();
        if let Some(n) = t.strip_prefix("+=") {
            return Ok(Self::FromEnd(parse_seconds(s, n)?));
        }
        if let Some(n) = t.strip_prefix("-=") {
            return Ok(Self::FromEnd(-parse_seconds(s, n)?));
        }
        if let Some(n) = t.strip_prefix('<') {
            return Ok(match n {
                "" => Self::WithPrevious(0.0),
                n => Self::WithPrevious(parse_seconds(s, n)?),
            });
        }
        if let Some(n) = t.strip_prefix('>') {
            return Ok(match n {
                "" => Self::AfterPrevious(0.0),
                n => Self::AfterPrevious(parse_seconds(s, n)?),
            });
        }
        Ok(Self::At(parse_seconds(s, t)?))
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Position {
    type Error = ChoreoError;

    fn try_from(s: String) -> ChoreoResult<Self> {
        s.parse()
    }
}
