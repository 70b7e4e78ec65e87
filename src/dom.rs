//! Minimal element tree standing in for a browser DOM.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Replacing a
//! container's content detaches the old children; detached nodes stay in the
//! arena but are unreachable from the root and invisible to lookups.

use std::collections::BTreeMap;

use crate::error::{ChoreoError, ChoreoResult};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub namespace: Option<String>,
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a single `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(Element::new("body")),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.0).map(|n| &n.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.kind(node)? {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Element children only, skipping text.
    pub fn child_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Creates a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push_node(NodeKind::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> ChoreoResult<()> {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return Err(ChoreoError::validation("node id out of range"));
        }
        if self.element(parent).is_none() {
            return Err(ChoreoError::validation("cannot append to a text node"));
        }
        if self.ancestors_inclusive(parent).any(|a| a == child) {
            return Err(ChoreoError::validation(
                "cannot append a node into its own subtree",
            ));
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn ancestors_inclusive(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), |n| self.parent(*n))
    }

    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        self.nodes[parent.0].children.retain(|c| *c != node);
        self.nodes[node.0].parent = None;
    }

    /// Pre-order walk over `node` and its subtree.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.element(*n).and_then(Element::id) == Some(id))
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> ChoreoResult<()> {
        let el = self
            .element_mut(node)
            .ok_or_else(|| ChoreoError::validation("attributes require an element node"))?;
        el.attrs.insert(name.into(), value.into());
        Ok(())
    }

    /// Moves `node` to the end of its parent's child list. Returns `false` if
    /// the node has no parent.
    pub fn move_to_end(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        let children = &mut self.nodes[parent.0].children;
        if children.last() != Some(&node) {
            children.retain(|c| *c != node);
            children.push(node);
        }
        true
    }

    /// Replaces every child of `container` with the parsed `markup`.
    ///
    /// Returns the root element of the inserted fragment.
    pub fn set_inner_markup(&mut self, container: NodeId, markup: &str) -> ChoreoResult<NodeId> {
        if self.element(container).is_none() {
            return Err(ChoreoError::validation("container must be an element"));
        }
        let parsed = roxmltree::Document::parse(markup)
            .map_err(|e| ChoreoError::parse(format!("markup: {e}")))?;

        let old: Vec<NodeId> = self.children(container).to_vec();
        for child in old {
            self.detach(child);
        }

        let inserted = self.import(parsed.root_element());
        self.append_child(container, inserted)?;
        Ok(inserted)
    }

    fn import(&mut self, src: roxmltree::Node<'_, '_>) -> NodeId {
        let mut el = Element::new(src.tag_name().name());
        el.namespace = src.tag_name().namespace().map(str::to_owned);
        for a in src.attributes() {
            let name = match a.namespace() {
                Some(XLINK_NS) => format!("xlink:{}", a.name()),
                _ => a.name().to_owned(),
            };
            el.attrs.insert(name, a.value().to_owned());
        }
        let id = self.create_element(el);

        for child in src.children() {
            let node = if child.is_element() {
                self.import(child)
            } else if child.is_text() {
                match child.text() {
                    Some(t) if !t.trim().is_empty() => self.create_text(t),
                    _ => continue,
                }
            } else {
                continue;
            };
            self.nodes[node.0].parent = Some(id);
            self.nodes[id.0].children.push(node);
        }
        id
    }

    pub fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        let ns = self.element(node).and_then(|e| e.namespace.as_deref());
        for child in self.children(node) {
            self.write_node(*child, ns, &mut out);
        }
        out
    }

    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        let parent_ns = self
            .parent(node)
            .and_then(|p| self.element(p))
            .and_then(|e| e.namespace.as_deref());
        self.write_node(node, parent_ns, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, parent_ns: Option<&str>, out: &mut String) {
        let Some(kind) = self.kind(node) else {
            return;
        };
        let el = match kind {
            NodeKind::Text(t) => {
                out.push_str(&escape(t, false));
                return;
            }
            NodeKind::Element(el) => el,
        };

        out.push('<');
        out.push_str(&el.tag);
        if let Some(ns) = el.namespace.as_deref()
            && parent_ns != Some(ns)
        {
            out.push_str(&format!(" xmlns=\"{}\"", escape(ns, true)));
        }
        if el.attrs.keys().any(|k| k.starts_with("xlink:")) {
            out.push_str(&format!(" xmlns:xlink=\"{XLINK_NS}\""));
        }
        for (k, v) in &el.attrs {
            out.push_str(&format!(" {k}=\"{}\"", escape(v, true)));
        }

        let children = self.children(node);
        if children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in children {
            self.write_node(*child, el.namespace.as_deref(), out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_container(id: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let mut el = Element::new("div");
        el.attrs.insert("id".to_string(), id.to_string());
        let container = doc.create_element(el);
        doc.append_child(doc.root(), container).unwrap();
        (doc, container)
    }

    #[test]
    fn set_inner_markup_replaces_previous_content() {
        let (mut doc, stage) = doc_with_container("stage");
        doc.set_inner_markup(stage, r#"<svg id="a"/>"#).unwrap();
        let b = doc.set_inner_markup(stage, r#"<svg id="b"/>"#).unwrap();

        assert_eq!(doc.children(stage), &[b]);
        assert!(doc.get_element_by_id("a").is_none());
        assert_eq!(doc.get_element_by_id("b"), Some(b));
    }

    #[test]
    fn bad_markup_leaves_container_untouched() {
        let (mut doc, stage) = doc_with_container("stage");
        doc.set_inner_markup(stage, r#"<svg id="keep"/>"#).unwrap();
        assert!(doc.set_inner_markup(stage, "<svg").is_err());
        assert!(doc.get_element_by_id("keep").is_some());
    }

    #[test]
    fn markup_round_trips_namespaces_and_text() {
        let (mut doc, stage) = doc_with_container("stage");
        let src = r#"<svg xmlns="http://www.w3.org/2000/svg" id="s"><text x="1">a &amp; b</text><use xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="&#35;p"/></svg>"#;
        let svg = doc.set_inner_markup(stage, src).unwrap();

        let out = doc.outer_markup(svg);
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" id="s">"#));
        assert!(out.contains(r#"<text x="1">a &amp; b</text>"#));
        assert!(out.contains(r##"xlink:href="#p""##));
        assert_eq!(doc.inner_markup(stage), out);
    }

    #[test]
    fn move_to_end_reorders_and_is_idempotent() {
        let (mut doc, stage) = doc_with_container("stage");
        let svg = doc
            .set_inner_markup(stage, r#"<g><rect id="r1"/><rect id="r2"/><rect id="r3"/></g>"#)
            .unwrap();
        let r1 = doc.get_element_by_id("r1").unwrap();

        assert!(doc.move_to_end(r1));
        let after_first = doc.children(svg).to_vec();
        assert_eq!(after_first.last(), Some(&r1));

        assert!(doc.move_to_end(r1));
        assert_eq!(doc.children(svg), after_first.as_slice());
        assert!(!doc.move_to_end(doc.root()));
    }

    #[test]
    fn append_rejects_cycles() {
        let (mut doc, stage) = doc_with_container("stage");
        let inner = doc.create_element(Element::new("g"));
        doc.append_child(stage, inner).unwrap();
        assert!(doc.append_child(inner, stage).is_err());
        assert_eq!(doc.parent(inner), Some(stage));
        assert_eq!(doc.parent(stage), Some(doc.root()));
    }
}
