//! Error types with diagnostic codes using miette
//!
//! Label operations themselves never fail. These errors come from the
//! collaborators underneath them and are logged where a label swallows them.

use miette::Diagnostic;
use thiserror::Error;

use crate::surface::{ElementKind, NodeId};
use crate::types::NumericError;

// ============================================================================
// Surface Errors
// ============================================================================

/// Errors raised by a [`RenderSurface`](crate::surface::RenderSurface)
/// structural operation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("unknown node: {0}")]
    #[diagnostic(
        code(textbox::surface::unknown_node),
        help("the node was never created on this surface, or it has already been removed")
    )]
    UnknownNode(NodeId),

    #[error("node {child} is not a child of {parent}")]
    #[diagnostic(code(textbox::surface::not_a_child))]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("{kind} elements cannot contain child nodes")]
    #[diagnostic(code(textbox::surface::not_a_container))]
    NotAContainer { kind: ElementKind },

    #[error("appending {child} under {parent} would create a cycle")]
    #[diagnostic(code(textbox::surface::cycle))]
    Cycle { parent: NodeId, child: NodeId },

    #[error("the root node cannot be moved or removed")]
    #[diagnostic(code(textbox::surface::root))]
    Root,
}

// ============================================================================
// View Errors
// ============================================================================

/// Errors from constructing or moving a [`MapView`](crate::view::MapView)
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("invalid {field}: {source}")]
    #[diagnostic(code(textbox::view::invalid_number))]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("viewport size must be positive, got {width}x{height}")]
    #[diagnostic(code(textbox::view::invalid_size))]
    InvalidSize { width: f64, height: f64 },
}

impl ViewError {
    pub(crate) fn field(field: &'static str) -> impl FnOnce(NumericError) -> ViewError {
        move |source| ViewError::InvalidNumber { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_error_messages() {
        let err = SurfaceError::NotAChild {
            parent: NodeId(0),
            child: NodeId(7),
        };
        assert_eq!(err.to_string(), "node #7 is not a child of #0");
        assert_eq!(
            SurfaceError::NotAContainer {
                kind: ElementKind::Rect
            }
            .to_string(),
            "rect elements cannot contain child nodes"
        );
    }

    #[test]
    fn view_error_carries_field() {
        let err = ViewError::field("zoom")(NumericError::NaN);
        assert_eq!(err.to_string(), "invalid zoom: value is NaN");
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("textbox::view::invalid_number")
        );
    }
}
