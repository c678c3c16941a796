//! The fixed physical page template shared by all diagrams placed on a sheet.

use crate::defaults;
use crate::errors::{ConfigurationError, Result};
use crate::types::{Cm, PlanBox, PlanPosition};

/// Diagram-limit rectangle of the printable page, in plan centimetres.
///
/// Plan space is y-up: `origin` is the top-left corner and `bottom_right`
/// lies below and to the right of it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTemplate {
    origin: PlanPosition,
    bottom_right: PlanPosition,
}

impl PageTemplate {
    /// Create a template, rejecting non-finite corners and empty rectangles.
    pub fn new(origin: PlanPosition, bottom_right: PlanPosition) -> Result<Self> {
        if !origin.is_finite() || !bottom_right.is_finite() {
            return Err(ConfigurationError::MalformedPage {
                reason: "corner coordinates must be finite".to_string(),
            });
        }
        if bottom_right.x <= origin.x {
            return Err(ConfigurationError::MalformedPage {
                reason: format!(
                    "right limit {} is not right of origin {}",
                    bottom_right.x, origin.x
                ),
            });
        }
        if bottom_right.y >= origin.y {
            return Err(ConfigurationError::MalformedPage {
                reason: format!("bottom limit {} is not below origin {}", bottom_right.y, origin.y),
            });
        }
        Ok(PageTemplate { origin, bottom_right })
    }

    /// Page with the given usable width and height, origin at (0, 0).
    pub fn with_size(width: Cm, height: Cm) -> Result<Self> {
        Self::new(PlanPosition::new(Cm::ZERO, Cm::ZERO), PlanPosition::new(width, -height))
    }

    pub fn origin(&self) -> PlanPosition {
        self.origin
    }

    pub fn bottom_right(&self) -> PlanPosition {
        self.bottom_right
    }

    pub fn left(&self) -> Cm {
        self.origin.x
    }

    pub fn right(&self) -> Cm {
        self.bottom_right.x
    }

    pub fn top(&self) -> Cm {
        self.origin.y
    }

    pub fn bottom(&self) -> Cm {
        self.bottom_right.y
    }

    pub fn width(&self) -> Cm {
        self.right() - self.left()
    }

    pub fn height(&self) -> Cm {
        self.top() - self.bottom()
    }

    /// True if `bounds` lies inside the limits, allowing `tolerance` of overhang.
    pub fn contains(&self, bounds: &PlanBox, tolerance: Cm) -> bool {
        bounds.min.x >= self.left() - tolerance
            && bounds.max.x <= self.right() + tolerance
            && bounds.min.y >= self.bottom() - tolerance
            && bounds.max.y <= self.top() + tolerance
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        PageTemplate {
            origin: defaults::PAGE_ORIGIN,
            bottom_right: defaults::PAGE_BOTTOM_RIGHT,
        }
    }
}
