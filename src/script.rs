use crate::{
    choreography,
    error::{ChoreoError, ChoreoResult},
    position::Position,
    timeline::Timeline,
};

/// A JSON list of helper invocations, replayed in order onto one timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    OpenDoorLeft {
        element: String,
    },
    SwitchLights {
        lights: Vec<String>,
        delay: f64,
    },
    SpinTheThings {
        duration: f64,
    },
    MoveAlong {
        element: String,
        path: String,
        duration: f64,
        #[serde(default)]
        position: Position,
    },
    ZoomTo {
        element: String,
        view_box: String,
    },
}

impl Script {
    pub fn from_json(s: &str) -> ChoreoResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Structural checks only; durations and view boxes pass through.
    pub fn validate(&self) -> ChoreoResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            let empty = match step {
                Step::OpenDoorLeft { element } | Step::ZoomTo { element, .. } => element.is_empty(),
                Step::MoveAlong { element, path, .. } => element.is_empty() || path.is_empty(),
                Step::SwitchLights { lights, .. } => lights.iter().any(String::is_empty),
                Step::SpinTheThings { .. } => false,
            };
            if empty {
                return Err(ChoreoError::validation(format!(
                    "step {i} references an empty element id"
                )));
            }
        }
        Ok(())
    }

    pub fn apply(&self, tl: &mut Timeline) {
        for step in &self.steps {
            match step {
                Step::OpenDoorLeft { element } => choreography::open_door_left(tl, element),
                Step::SwitchLights { lights, delay } => {
                    choreography::switch_lights(lights, tl, *delay);
                }
                Step::SpinTheThings { duration } => choreography::spin_the_things(tl, *duration),
                Step::MoveAlong {
                    element,
                    path,
                    duration,
                    position,
                } => choreography::move_along(tl, element, path, *duration, *position),
                Step::ZoomTo { element, view_box } => {
                    choreography::zoom_to(tl, element, view_box);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_are_rejected() {
        let s = r#"{"steps":[{"op":"open_door_left","element":""}]}"#;
        assert!(matches!(
            Script::from_json(s),
            Err(ChoreoError::Validation(_))
        ));
    }

    #[test]
    fn unknown_ops_fail_to_parse() {
        let s = r#"{"steps":[{"op":"explode"}]}"#;
        assert!(matches!(Script::from_json(s), Err(ChoreoError::Serde(_))));
    }

    #[test]
    fn move_along_defaults_to_append() {
        let s = r#"{"steps":[{"op":"move_along","element":"cart","path":"p","duration":2}]}"#;
        let script = Script::from_json(s).unwrap();
        let mut tl = Timeline::new();
        script.apply(&mut tl);
        assert_eq!(tl.segments()[0].position, Position::default());
    }
}
