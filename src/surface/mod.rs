//! The rendering surface labels and shapes draw into.
//!
//! The surface is injected: labels only ever see `&mut dyn RenderSurface`,
//! so the lifecycle logic runs the same against [`SvgSurface`] or any other
//! retained-mode node tree.

pub mod svg;

pub use svg::SvgSurface;

use std::fmt;

use crate::errors::SurfaceError;
use crate::types::Px;

/// Handle to a node created by a surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The element types this crate creates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Document root
    Root,
    /// A text block (one per label)
    Text,
    /// One visual row inside a text block
    Line,
    Rect,
    Circle,
}

impl ElementKind {
    /// SVG tag name
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Root => "svg",
            ElementKind::Text => "text",
            ElementKind::Line => "tspan",
            ElementKind::Rect => "rect",
            ElementKind::Circle => "circle",
        }
    }

    /// Whether nodes of this kind may hold child nodes
    pub fn is_container(self) -> bool {
        matches!(self, ElementKind::Root | ElementKind::Text)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Node creation, tree mutation and text measurement
pub trait RenderSurface {
    /// The container every top-level node is attached to
    fn root(&self) -> NodeId;

    /// Create a detached element
    fn create_element(&mut self, kind: ElementKind) -> NodeId;

    fn create_text_element(&mut self) -> NodeId {
        self.create_element(ElementKind::Text)
    }

    fn create_line_element(&mut self) -> NodeId {
        self.create_element(ElementKind::Line)
    }

    fn create_rect_element(&mut self) -> NodeId {
        self.create_element(ElementKind::Rect)
    }

    fn create_circle_element(&mut self) -> NodeId {
        self.create_element(ElementKind::Circle)
    }

    /// Attach `child` as the last child of `parent`. A child that is already
    /// attached somewhere is moved.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError>;

    /// Attach `child` under `parent` immediately before `reference`
    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), SurfaceError>;

    /// Detach `child` from `parent` and release it together with its subtree
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError>;

    /// Parent of an attached node
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str)
    -> Result<(), SurfaceError>;

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), SurfaceError>;

    /// Rendered width of `text` styled as `node` currently is
    fn measure_rendered_width(&self, node: NodeId, text: &str) -> Px;
}

/// Format a number with up to six significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    // Below this the rounding scale overflows to infinity
    if value.abs() < 1e-300 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
