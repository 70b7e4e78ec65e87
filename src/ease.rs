/// Easing curve names understood by the timeline engine.
///
/// Only the name travels with a segment; the engine owns the curve itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[serde(rename = "none")]
    Linear,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power4.inOut")]
    Power4InOut,
}

impl Ease {
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::Power1InOut => "power1.inOut",
            Self::Power1Out => "power1.out",
            Self::Power2Out => "power2.out",
            Self::Power4InOut => "power4.inOut",
        }
    }
}

impl std::fmt::Display for Ease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
