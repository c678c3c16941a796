//! Error types with diagnostics using miette
//!
//! Configuration errors are programmer or data-integrity faults and are
//! always returned as `Err`. Degenerate geometry is advisory: it travels
//! alongside a best-effort result so callers can warn the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::diagram::DiagramId;
use crate::types::{Axis, Cm, NumericError};

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors caused by inconsistent page, viewport or diagram data
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("unknown diagram: {id}")]
    #[diagnostic(
        code(planlayout::config::unknown_diagram),
        help("register the diagram with the mapper before mapping its coordinates")
    )]
    UnknownDiagram { id: DiagramId },

    #[error("diagram {id} is registered twice")]
    #[diagnostic(
        code(planlayout::config::duplicate_diagram),
        help("every diagram on a page needs its own id")
    )]
    DuplicateDiagram { id: DiagramId },

    #[error("invalid diagram scale: {value}")]
    #[diagnostic(
        code(planlayout::config::invalid_scale),
        help("a diagram needs a non-empty ground bounding box or a positive zoom scale")
    )]
    InvalidScale { value: f64 },

    #[error("malformed page template: {reason}")]
    #[diagnostic(code(planlayout::config::malformed_page))]
    MalformedPage { reason: String },

    #[error("invalid viewport: {width} x {height} px")]
    #[diagnostic(code(planlayout::config::invalid_viewport))]
    InvalidViewport { width: f64, height: f64 },

    #[error("degenerate diagram boundary: {reason}")]
    #[diagnostic(
        code(planlayout::config::degenerate_boundary),
        help("a boundary needs at least one point and a non-zero extent")
    )]
    DegenerateBoundary { reason: String },

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(planlayout::config::invalid_numeric))]
    InvalidNumeric {
        what: &'static str,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// Advisory Geometry Conditions
// ============================================================================

/// A label that cannot fit on the page along one axis, so no correction
/// is possible. Returned next to the unchanged label, never as `Err`.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("label is larger than the page along the {axis} axis ({label_extent} > {page_extent})")]
#[diagnostic(
    code(planlayout::geometry::label_exceeds_page),
    severity(Warning),
    help("shorten the text, split it over more lines or reduce the font size")
)]
pub struct DegenerateGeometry {
    pub axis: Axis,
    pub label_extent: Cm,
    pub page_extent: Cm,
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_diagram_message() {
        let err = ConfigurationError::UnknownDiagram { id: DiagramId(7) };
        assert_eq!(err.to_string(), "unknown diagram: D7");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("planlayout::config::unknown_diagram"));
    }

    #[test]
    fn degenerate_geometry_is_a_warning() {
        let warning = DegenerateGeometry {
            axis: Axis::Horizontal,
            label_extent: Cm(45.0),
            page_extent: Cm(39.0),
        };
        assert_eq!(warning.severity(), Some(miette::Severity::Warning));
        assert_eq!(
            warning.to_string(),
            "label is larger than the page along the horizontal axis (45cm > 39cm)"
        );
    }

    #[test]
    fn numeric_error_is_the_source() {
        use std::error::Error as _;
        let err = ConfigurationError::InvalidNumeric {
            what: "zoom scale",
            source: NumericError::Zero,
        };
        assert_eq!(err.to_string(), "invalid zoom scale: value is zero");
        assert!(err.source().is_some());
    }
}
