//! Named anchor points used by the choreography helpers instead of raw numbers.
//!
//! Two views of the same nine anchors: CSS-style percentage pairs for
//! `transformOrigin`, and normalized vectors (`0..1` on each axis) for
//! alignment origins.

use std::str::FromStr;

use kurbo::Vec2;

use crate::error::{ChoreoError, ChoreoResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// `(name, percentage pair)` for every anchor, in row-major order.
pub const TRANSFORM_ORIGINS: [(&str, &str); 9] = [
    ("topLeft", "0% 0%"),
    ("topCenter", "50% 0%"),
    ("topRight", "100% 0%"),
    ("centerLeft", "0% 50%"),
    ("center", "50% 50%"),
    ("centerRight", "100% 50%"),
    ("bottomLeft", "0% 100%"),
    ("bottomCenter", "50% 100%"),
    ("bottomRight", "100% 100%"),
];

/// `(name, [x, y])` normalized positions, same order as [`TRANSFORM_ORIGINS`].
pub const POSITION_REFERENCES: [(&str, [f64; 2]); 9] = [
    ("topLeft", [0.0, 0.0]),
    ("topCenter", [0.5, 0.0]),
    ("topRight", [1.0, 0.0]),
    ("centerLeft", [0.0, 0.5]),
    ("center", [0.5, 0.5]),
    ("centerRight", [1.0, 0.5]),
    ("bottomLeft", [0.0, 1.0]),
    ("bottomCenter", [0.5, 1.0]),
    ("bottomRight", [1.0, 1.0]),
];

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        TRANSFORM_ORIGINS[self.index()].0
    }

    /// Percentage pair, e.g. `"0% 50%"` for [`Anchor::CenterLeft`].
    pub fn transform_origin(self) -> &'static str {
        TRANSFORM_ORIGINS[self.index()].1
    }

    pub fn position(self) -> Vec2 {
        let [x, y] = POSITION_REFERENCES[self.index()].1;
        Vec2::new(x, y)
    }
}

impl FromStr for Anchor {
    type Err = ChoreoError;

    fn from_str(s: &str) -> ChoreoResult<Self> {
        Anchor::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ChoreoError::validation(format!("unknown anchor name '{s}'")))
    }
}

/// Percentage-pair lookup by name; `None` for unknown names.
pub fn transform_origin(name: &str) -> Option<&'static str> {
    TRANSFORM_ORIGINS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_agree_on_names_and_order() {
        for (i, anchor) in Anchor::ALL.into_iter().enumerate() {
            assert_eq!(TRANSFORM_ORIGINS[i].0, POSITION_REFERENCES[i].0);
            assert_eq!(anchor.name(), TRANSFORM_ORIGINS[i].0);
        }
    }

    #[test]
    fn percentages_match_vectors() {
        for anchor in Anchor::ALL {
            let v = anchor.position();
            let expected = format!("{}% {}%", v.x * 100.0, v.y * 100.0);
            assert_eq!(anchor.transform_origin(), expected);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(transform_origin("centerLeft"), Some("0% 50%"));
        assert_eq!(Anchor::BottomRight.position(), Vec2::new(1.0, 1.0));
        assert_eq!(transform_origin("middle"), None);
        assert_eq!("center".parse::<Anchor>().unwrap(), Anchor::Center);
        assert!("middle".parse::<Anchor>().is_err());
    }
}
