#![forbid(unsafe_code)]

pub mod choreography;
pub mod dom;
pub mod ease;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod position;
pub mod reference;
pub mod script;
pub mod timeline;
pub mod viewbox;

pub use choreography::{
    bring_to_front, move_along, move_on_path, open_door_left, spin_the_things, switch_lights,
    zoom_to,
};
pub use dom::{Document, Element, NodeId};
pub use ease::Ease;
pub use error::{ChoreoError, ChoreoResult};
pub use loader::{
    Fetch, FetchSettings, FileFetcher, HttpFetcher, LoadHandle, LoadedSvg, SharedDocument,
    attach_svg, load_svg, spawn_load_svg,
};
pub use position::{Position, start_after_previous, start_with_previous};
pub use reference::Anchor;
pub use script::{Script, Step};
pub use timeline::{Repeat, Scheduled, Segment, Timeline};
pub use viewbox::ViewBox;
