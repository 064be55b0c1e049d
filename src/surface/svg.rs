//! In-memory SVG node tree
//!
//! Nodes live in an arena indexed by [`NodeId`]. Ids are never reused, so a
//! handle to a removed node stays invalid forever and misuse (detaching the
//! same label twice, say) surfaces as [`SurfaceError::UnknownNode`] instead of
//! silently hitting some newer node.

use std::fmt::Write as _;

use crate::defaults;
use crate::errors::SurfaceError;
use crate::layout::metrics::{MonospaceMetrics, ProportionalMetrics, TextMetrics};
use crate::types::Px;

use super::{ElementKind, NodeId, RenderSurface, fmt_num};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone)]
struct Node {
    kind: ElementKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Attributes in insertion order
    attributes: Vec<(String, String)>,
    text: Option<String>,
}

impl Node {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            text: None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A retained SVG document backed by an arena
pub struct SvgSurface {
    nodes: Vec<Option<Node>>,
    width: f64,
    height: f64,
    metrics: Box<dyn TextMetrics>,
}

impl SvgSurface {
    /// An empty document of `width` x `height` pixels using proportional metrics
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: vec![Some(Node::new(ElementKind::Root))],
            width,
            height,
            metrics: Box::new(ProportionalMetrics::default()),
        }
    }

    /// Replace the metrics used for proportional text
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Number of nodes currently held, root included
    pub fn live_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_ok()
    }

    pub fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.get(node).ok().map(|n| n.kind)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).ok().and_then(|n| n.attribute(name))
    }

    pub fn text_content(&self, node: NodeId) -> Option<&str> {
        self.get(node).ok().and_then(|n| n.text.as_deref())
    }

    /// Attached descendants of the root with the given kind, in document order
    pub fn find_all(&self, kind: ElementKind) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect(self.root(), kind, &mut found);
        found
    }

    fn collect(&self, node: NodeId, kind: ElementKind, found: &mut Vec<NodeId>) {
        for &child in self.children(node) {
            if self.kind(child) == Some(kind) {
                found.push(child);
            }
            self.collect(child, kind, found);
        }
    }

    fn get(&self, node: NodeId) -> Result<&Node, SurfaceError> {
        self.nodes
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or(SurfaceError::UnknownNode(node))
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Node, SurfaceError> {
        self.nodes
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(SurfaceError::UnknownNode(node))
    }

    /// Validate that `child` may be placed under `parent`, then unlink it
    /// from wherever it currently hangs.
    fn prepare_insert(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        if child == self.root() {
            return Err(SurfaceError::Root);
        }
        let parent_kind = self.get(parent)?.kind;
        self.get(child)?;
        if !parent_kind.is_container() {
            return Err(SurfaceError::NotAContainer { kind: parent_kind });
        }

        // Walk up from the parent; meeting the child means a cycle
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SurfaceError::Cycle { parent, child });
            }
            cursor = self.get(id)?.parent;
        }

        self.unlink(child)
    }

    fn unlink(&mut self, child: NodeId) -> Result<(), SurfaceError> {
        if let Some(old_parent) = self.get_mut(child)?.parent.take() {
            self.get_mut(old_parent)?.children.retain(|&c| c != child);
        }
        Ok(())
    }

    fn release(&mut self, node: NodeId) {
        let released = self.nodes.get_mut(node.0).and_then(Option::take);
        if let Some(released) = released {
            for child in released.children {
                self.release(child);
            }
        }
    }

    /// Serialize the attached tree as a standalone SVG document
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            SVG_NS,
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.width),
            fmt_num(self.height),
        );
        for &child in self.children(self.root()) {
            self.write_node(child, &mut out);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.get(id) else {
            return;
        };
        out.push('<');
        out.push_str(node.kind.tag());
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
        }
        if node.children.is_empty() && node.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape_text(text));
        }
        for &child in &node.children {
            self.write_node(child, out);
        }
        let _ = write!(out, "</{}>", node.kind.tag());
    }
}

impl RenderSurface for SvgSurface {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn create_element(&mut self, kind: ElementKind) -> NodeId {
        self.nodes.push(Some(Node::new(kind)));
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        self.prepare_insert(parent, child)?;
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), SurfaceError> {
        if !self.get(parent)?.children.contains(&reference) {
            return Err(SurfaceError::NotAChild {
                parent,
                child: reference,
            });
        }
        self.prepare_insert(parent, child)?;
        let siblings = &mut self.get_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        if child == self.root() {
            return Err(SurfaceError::Root);
        }
        if self.get(child)?.parent != Some(parent) {
            return Err(SurfaceError::NotAChild { parent, child });
        }
        self.unlink(child)?;
        self.release(child);
        Ok(())
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).ok().and_then(|n| n.parent)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), SurfaceError> {
        let node = self.get_mut(node)?;
        match node.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), SurfaceError> {
        self.get_mut(node)?.text = Some(text.to_string());
        Ok(())
    }

    fn measure_rendered_width(&self, node: NodeId, text: &str) -> Px {
        let Ok(node) = self.get(node) else {
            return Px::ZERO;
        };
        let font_size = node
            .attribute("font-size")
            .and_then(parse_px)
            .unwrap_or(defaults::FONT_SIZE);
        let bold = node.attribute("font-weight") == Some("bold");
        let mono = node.attribute("font-family") == Some("monospace");

        let width = if mono {
            MonospaceMetrics::default().width(text, font_size)
        } else {
            self.metrics.width(text, font_size)
        };
        if bold { width * defaults::BOLD_FACTOR } else { width }
    }
}

/// Parse `"12"` or `"12px"`
fn parse_px(value: &str) -> Option<Px> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.parse::<f64>().ok().filter(|v| v.is_finite()).map(Px)
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            // SVG collapses plain spaces; keep the gaps between words visible
            ' ' => out.push_str("&#160;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
