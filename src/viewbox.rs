use std::{fmt, str::FromStr};

use crate::error::{ChoreoError, ChoreoResult};

/// SVG `viewBox`: min-x, min-y, width, height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

impl FromStr for ViewBox {
    type Err = ChoreoError;

    /// Accepts whitespace and/or comma separators, as the `viewBox` attribute does.
    fn from_str(s: &str) -> ChoreoResult<Self> {
        let nums = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<f64>()
                    .map_err(|_| ChoreoError::parse(format!("invalid viewBox number '{p}'")))
            })
            .collect::<ChoreoResult<Vec<_>>>()?;
        match nums.as_slice() {
            [x, y, w, h] => Ok(Self::new(*x, *y, *w, *h)),
            _ => Err(ChoreoError::parse(format!(
                "viewBox needs four numbers, got '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_space_separated() {
        assert_eq!(ViewBox::new(0.0, 10.0, 320.5, 200.0).to_string(), "0 10 320.5 200");
    }

    #[test]
    fn parses_commas_and_spaces() {
        let vb: ViewBox = "0,0 100, 50".parse().unwrap();
        assert_eq!(vb, ViewBox::new(0.0, 0.0, 100.0, 50.0));
        assert!("0 0 100".parse::<ViewBox>().is_err());
        assert!("a b c d".parse::<ViewBox>().is_err());
    }
}
