use serde_json::{Map, Value};

use crate::{
    ease::Ease,
    error::{ChoreoError, ChoreoResult},
    position::Position,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Repeat {
    /// Extra iterations after the first; `Times(0)` plays once.
    Times(u32),
    #[default]
    Once,
    Forever,
}

impl Repeat {
    pub fn is_once(&self) -> bool {
        matches!(self, Self::Once | Self::Times(0))
    }

    fn iterations(self) -> f64 {
        match self {
            Self::Once | Self::Forever => 1.0,
            Self::Times(n) => f64::from(n) + 1.0,
        }
    }
}

impl From<Repeat> for i64 {
    fn from(r: Repeat) -> Self {
        match r {
            Repeat::Once => 0,
            Repeat::Times(n) => i64::from(n),
            Repeat::Forever => -1,
        }
    }
}

impl TryFrom<i64> for Repeat {
    type Error = ChoreoError;

    fn try_from(v: i64) -> ChoreoResult<Self> {
        match v {
            -1 => Ok(Self::Forever),
            0 => Ok(Self::Once),
            n => u32::try_from(n)
                .map(Self::Times)
                .map_err(|_| ChoreoError::validation(format!("invalid repeat count {n}"))),
        }
    }
}

/// One scheduled animation instruction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub targets: String,
    pub duration: f64, // seconds, passed through unvalidated
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Repeat::is_once")]
    pub repeat: Repeat,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub vars: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_complete: Option<String>,
}

impl Segment {
    pub fn to(targets: impl Into<String>, duration: f64) -> Self {
        Self {
            targets: targets.into(),
            duration,
            ease: Ease::default(),
            position: Position::default(),
            repeat: Repeat::Once,
            vars: Map::new(),
            on_complete: None,
        }
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn on_complete(mut self, notice: impl Into<String>) -> Self {
        self.on_complete = Some(notice.into());
        self
    }

    /// Time the segment occupies on the timeline. Endless repeats count one
    /// iteration.
    pub fn span(&self) -> f64 {
        self.duration.max(0.0) * self.repeat.iterations()
    }

    /// Emits the completion notice, if the segment carries one.
    pub fn complete(&self) -> bool {
        match &self.on_complete {
            Some(notice) => {
                tracing::info!(targets = %self.targets, "{notice}");
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Scheduled {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Ordered segments owned by the caller. Helpers only ever append.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `segment` and returns its index.
    pub fn add(&mut self, segment: Segment) -> usize {
        tracing::debug!(
            targets = %segment.targets,
            position = %segment.position,
            duration = segment.duration,
            "append segment"
        );
        self.segments.push(segment);
        self.segments.len() - 1
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves every position token to absolute start/end seconds.
    pub fn schedule(&self) -> Vec<Scheduled> {
        let mut out: Vec<Scheduled> = Vec::with_capacity(self.segments.len());
        let mut timeline_end = 0.0_f64;

        for (index, seg) in self.segments.iter().enumerate() {
            let (prev_start, prev_end) = out.last().map_or((0.0, 0.0), |p| (p.start, p.end));
            let start = match seg.position {
                Position::FromEnd(x) => timeline_end + x,
                Position::WithPrevious(x) => prev_start + x,
                Position::AfterPrevious(x) => prev_end + x,
                Position::At(x) => x,
            }
            .max(0.0);
            let end = start + seg.span();
            timeline_end = timeline_end.max(end);
            out.push(Scheduled { index, start, end });
        }
        out
    }

    /// Current insertion point: the latest end of any segment.
    pub fn end(&self) -> f64 {
        self.schedule().iter().fold(0.0, |acc, s| acc.max(s.end))
    }

    /// Emits the completion notice of the segment at `index`.
    pub fn complete(&self, index: usize) -> bool {
        self.segments.get(index).is_some_and(Segment::complete)
    }

    /// Engine-facing description of every segment, in insertion order.
    /// Fails on a non-finite position offset, which the token form cannot carry.
    pub fn to_json(&self) -> ChoreoResult<String> {
        if let Some(i) = self.segments.iter().position(|s| !s.position.is_finite()) {
            return Err(ChoreoError::validation(format!(
                "segment {i} has a non-finite position offset ({})",
                self.segments[i].position
            )));
        }
        Ok(serde_json::to_string_pretty(&self.segments)?)
    }
}
