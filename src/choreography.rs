//! Helpers that each append one kind of animation onto a caller-owned
//! [`Timeline`]. None of them keep a reference past the call.

use serde_json::json;

use crate::{
    dom::Document,
    ease::Ease,
    lookup,
    position::{Position, start_after_previous, start_with_previous},
    reference::Anchor,
    timeline::{Repeat, Segment, Timeline},
};

pub const DOOR_OPEN_DURATION: f64 = 1.0;
pub const LIGHT_ON_FILL: &str = "#ffd700";
pub const LIGHT_SWITCH_DURATION: f64 = 0.25;
pub const ZOOM_DURATION: f64 = 2.0;
pub const ZOOM_COMPLETE_NOTICE: &str = "zoom complete";
/// Elements carrying this class are picked up by [`spin_the_things`].
pub const SPINNABLE_SELECTOR: &str = ".spin";

/// Collapses the element horizontally toward its left edge.
pub fn open_door_left(tl: &mut Timeline, element_id: &str) {
    tl.add(
        Segment::to(lookup::id_selector(element_id), DOOR_OPEN_DURATION)
            .var("scaleX", 0)
            .var("transformOrigin", Anchor::CenterLeft.transform_origin())
            .ease(Ease::Power2Out),
    );
}

/// Re-parents the element as the last child of its parent so it paints
/// above its siblings. Returns `false` when the element cannot be found.
pub fn bring_to_front(doc: &mut Document, element_id: &str) -> bool {
    match lookup::element(doc, &lookup::id_selector(element_id)) {
        Some(node) => doc.move_to_end(node),
        None => false,
    }
}

/// Turns each light on in order, `delay * i` seconds after the timeline's
/// end at call time.
pub fn switch_lights<S: AsRef<str>>(lights: &[S], tl: &mut Timeline, delay: f64) {
    let base = tl.end();
    for (i, light) in lights.iter().enumerate() {
        tl.add(
            Segment::to(light.as_ref(), LIGHT_SWITCH_DURATION)
                .var("attr", json!({ "fill": LIGHT_ON_FILL }))
                .at(Position::At(base + delay * i as f64)),
        );
    }
}

/// Endless linear full turns on everything marked spinnable.
pub fn spin_the_things(tl: &mut Timeline, duration: f64) {
    tl.add(
        Segment::to(SPINNABLE_SELECTOR, duration)
            .var("rotation", 360)
            .var("transformOrigin", Anchor::Center.transform_origin())
            .ease(Ease::Linear)
            .repeat(Repeat::Forever),
    );
}

/// Moves the element along the path shape, centered on it.
pub fn move_along(
    tl: &mut Timeline,
    element_id: &str,
    path_id: &str,
    duration: f64,
    position: Position,
) {
    let path = lookup::id_selector(path_id);
    let origin = Anchor::Center.position();
    tl.add(
        Segment::to(lookup::id_selector(element_id), duration)
            .var(
                "motionPath",
                json!({
                    "path": path,
                    "align": path,
                    "alignOrigin": [origin.x, origin.y],
                }),
            )
            .ease(Ease::Power1InOut)
            .at(position),
    );
}

/// [`move_along`] with the start chosen by flag: with the previous segment
/// when `concurrent`, right after it otherwise.
pub fn move_on_path(
    tl: &mut Timeline,
    element_id: &str,
    path_id: &str,
    duration: f64,
    concurrent: bool,
) {
    let position = if concurrent {
        start_with_previous(0.0)
    } else {
        start_after_previous(0.0)
    };
    move_along(tl, element_id, path_id, duration, position);
}

/// Animates the element's `viewBox`. `view_box` is passed through as text,
/// so a malformed box reaches the engine untouched.
pub fn zoom_to(tl: &mut Timeline, element_id: &str, view_box: impl std::fmt::Display) {
    tl.add(
        Segment::to(lookup::id_selector(element_id), ZOOM_DURATION)
            .var("attr", json!({ "viewBox": view_box.to_string() }))
            .ease(Ease::Power4InOut)
            .on_complete(ZOOM_COMPLETE_NOTICE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewbox::ViewBox;

    #[test]
    fn door_pins_left_edge() {
        let mut tl = Timeline::new();
        open_door_left(&mut tl, "door1");
        let seg = &tl.segments()[0];
        assert_eq!(seg.targets, "#door1");
        assert_eq!(seg.vars["scaleX"], 0);
        assert_eq!(seg.vars["transformOrigin"], "0% 50%");
        assert_eq!(seg.ease, Ease::Power2Out);
        assert_eq!(seg.duration, DOOR_OPEN_DURATION);
    }

    #[test]
    fn lights_are_staggered_from_insertion_point() {
        let mut tl = Timeline::new();
        tl.add(Segment::to("#intro", 1.5));
        switch_lights(&["#a", "#b", "#c"], &mut tl, 1.0);

        assert_eq!(tl.len(), 4);
        let starts: Vec<f64> = tl.schedule()[1..].iter().map(|s| s.start - 1.5).collect();
        assert_eq!(starts, vec![0.0, 1.0, 2.0]);
        let targets: Vec<&str> = tl.segments()[1..].iter().map(|s| s.targets.as_str()).collect();
        assert_eq!(targets, vec!["#a", "#b", "#c"]);
        assert_eq!(tl.segments()[1].vars["attr"]["fill"], LIGHT_ON_FILL);
    }

    #[test]
    fn zero_delay_lights_start_together() {
        let mut tl = Timeline::new();
        switch_lights(&["#a", "#b"], &mut tl, 0.0);
        let s = tl.schedule();
        assert_eq!(s[0].start, s[1].start);
    }

    #[test]
    fn spin_repeats_forever_around_center() {
        let mut tl = Timeline::new();
        spin_the_things(&mut tl, 3.0);
        let seg = &tl.segments()[0];
        assert_eq!(seg.targets, SPINNABLE_SELECTOR);
        assert_eq!(seg.repeat, Repeat::Forever);
        assert_eq!(seg.ease, Ease::Linear);
        assert_eq!(seg.vars["transformOrigin"], "50% 50%");
    }

    #[test]
    fn move_on_path_flag_selects_position() {
        let mut tl = Timeline::new();
        move_on_path(&mut tl, "cart", "track", 2.0, true);
        move_on_path(&mut tl, "cart", "track", 2.0, false);
        assert_eq!(tl.segments()[0].position, start_with_previous(0.0));
        assert_eq!(tl.segments()[1].position, start_after_previous(0.0));
        assert_eq!(tl.segments()[0].vars["motionPath"]["align"], "#track");
        assert_eq!(
            tl.segments()[0].vars["motionPath"]["alignOrigin"],
            json!([0.5, 0.5])
        );
    }

    #[test]
    fn zoom_passes_view_box_through() {
        let mut tl = Timeline::new();
        zoom_to(&mut tl, "scene", ViewBox::new(0.0, 0.0, 400.0, 300.0));
        zoom_to(&mut tl, "scene", "not a box");
        assert_eq!(tl.segments()[0].vars["attr"]["viewBox"], "0 0 400 300");
        assert_eq!(tl.segments()[1].vars["attr"]["viewBox"], "not a box");
        assert!(tl.complete(0));
    }

    #[test]
    fn bring_to_front_missing_element_is_noop() {
        let mut doc = Document::new();
        assert!(!bring_to_front(&mut doc, "ghost"));
    }

    #[test]
    fn bring_to_front_multibyte_id_is_noop() {
        let mut doc = Document::new();
        let stage = doc.create_element(crate::dom::Element::new("div"));
        doc.append_child(doc.root(), stage).unwrap();
        doc.set_inner_markup(stage, r#"<g><rect id="door1"/><rect id="door2"/></g>"#)
            .unwrap();
        assert!(!bring_to_front(&mut doc, "door–1"));
        assert!(!bring_to_front(&mut doc, "§"));
    }
}
