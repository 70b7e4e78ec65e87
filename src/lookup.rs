//! Selector resolution over a [`Document`].
//!
//! Supports comma-separated groups of compound selectors made of an optional
//! tag (or `*`), an optional `#id` and any number of `.class` parts.
//! Anything else matches nothing.

use crate::{
    dom::{Document, Element, NodeId},
    error::{ChoreoError, ChoreoResult},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        self.tag.as_deref().is_none_or(|t| t == el.tag)
            && self.id.as_deref().is_none_or(|id| el.id() == Some(id))
            && self.classes.iter().all(|c| el.has_class(c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> ChoreoResult<Self> {
        let groups = input
            .split(',')
            .map(|g| parse_compound(g.trim()))
            .collect::<ChoreoResult<Vec<_>>>()?;
        Ok(Self { groups })
    }

    pub fn matches(&self, el: &Element) -> bool {
        self.groups.iter().any(|g| g.matches(el))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(s: &str) -> ChoreoResult<Compound> {
    if s.is_empty() {
        return Err(ChoreoError::validation("empty selector"));
    }
    let mut out = Compound::default();
    let mut rest = s;

    if let Some(r) = rest.strip_prefix('*') {
        rest = r;
    } else {
        let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if end > 0 {
            out.tag = Some(rest[..end].to_owned());
            rest = &rest[end..];
        }
    }

    while let Some(sigil) = rest.chars().next() {
        let body = &rest[sigil.len_utf8()..];
        let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
        if end == 0 {
            return Err(ChoreoError::validation(format!(
                "unsupported selector '{s}'"
            )));
        }
        let name = body[..end].to_owned();
        match sigil {
            '#' if out.id.is_none() => out.id = Some(name),
            '.' => out.classes.push(name),
            _ => {
                return Err(ChoreoError::validation(format!(
                    "unsupported selector '{s}'"
                )));
            }
        }
        rest = &body[end..];
    }
    Ok(out)
}

/// Turns a bare element id into an id selector; anything that already looks
/// like a selector is returned unchanged.
pub fn id_selector(id: &str) -> String {
    if id.starts_with(['#', '.', '*']) || id.contains(',') {
        id.to_owned()
    } else {
        format!("#{id}")
    }
}

/// First attached element matching `selector`, in document order.
pub fn element(doc: &Document, selector: &str) -> Option<NodeId> {
    elements(doc, selector).into_iter().next()
}

/// All attached elements matching `selector`, in document order. An invalid
/// selector matches nothing.
pub fn elements(doc: &Document, selector: &str) -> Vec<NodeId> {
    let sel = match Selector::parse(selector) {
        Ok(sel) => sel,
        Err(err) => {
            tracing::debug!(selector, %err, "selector matches nothing");
            return Vec::new();
        }
    };
    doc.descendants(doc.root())
        .into_iter()
        .filter(|n| doc.element(*n).is_some_and(|el| sel.matches(el)))
        .collect()
}
