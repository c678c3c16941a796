//! Diagrams and the ground-to-plan frame they share.
//!
//! A diagram owns a ground bounding box. Its scale is derived once from that
//! box against the page template (or taken from a persisted zoom scale) so
//! that its longer axis exactly spans the page.

use std::fmt;

use crate::defaults;
use crate::errors::{ConfigurationError, Result};
use crate::geometry::round_persisted;
use crate::log::debug;
use crate::page::PageTemplate;
use crate::types::{Cm, Delta, GroundPosition, Metres, PlanPosition, check_positive};

/// Identifier of a diagram on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct DiagramId(pub u32);

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// Plan scale as a 1:N ratio (ground length over paper length).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct PlanScale(f64);

impl PlanScale {
    /// Create a scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(ratio: f64) -> Result<Self> {
        check_positive(ratio)
            .map(PlanScale)
            .map_err(|source| ConfigurationError::InvalidNumeric { what: "plan scale", source })
    }

    /// Scale from ground metres per plan centimetre.
    pub fn from_metres_per_cm(value: f64) -> Result<Self> {
        Self::try_new(value * defaults::CM_PER_METRE)
            .map_err(|_| ConfigurationError::InvalidScale { value })
    }

    /// The N of 1:N
    pub fn ratio(self) -> f64 {
        self.0
    }

    /// Ground metres covered by one plan centimetre
    pub fn metres_per_cm(self) -> f64 {
        self.0 / defaults::CM_PER_METRE
    }
}

impl fmt::Display for PlanScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.0)
    }
}

/// A diagram placed on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagram {
    pub id: DiagramId,
    /// Top-left (north-west) corner of the ground bounding box
    pub origin_offset: GroundPosition,
    /// Bottom-right (south-east) corner of the ground bounding box
    pub bottom_right: GroundPosition,
    /// Persisted zoom scale, if the diagram was created with one
    pub zoom_scale: Option<PlanScale>,
}

impl Diagram {
    pub fn new(id: DiagramId, origin_offset: GroundPosition, bottom_right: GroundPosition) -> Self {
        Diagram { id, origin_offset, bottom_right, zoom_scale: None }
    }

    pub fn with_zoom_scale(mut self, scale: PlanScale) -> Self {
        self.zoom_scale = Some(scale);
        self
    }

    pub fn ground_width(&self) -> Metres {
        (self.bottom_right.x - self.origin_offset.x).abs()
    }

    pub fn ground_height(&self) -> Metres {
        (self.origin_offset.y - self.bottom_right.y).abs()
    }

    /// Scale at which the longer axis of the bounding box exactly spans the page.
    pub fn fitted_scale(&self, page: &PageTemplate) -> Result<PlanScale> {
        let across = self.ground_width().raw() / page.width().raw();
        let down = self.ground_height().raw() / page.height().raw();
        let metres_per_cm = across.max(down);
        if !metres_per_cm.is_finite() || metres_per_cm <= 0.0 {
            return Err(ConfigurationError::InvalidScale { value: metres_per_cm });
        }
        PlanScale::from_metres_per_cm(metres_per_cm)
    }

    /// The persisted zoom scale, or the page-fitted scale when none is stored.
    pub fn plan_scale(&self, page: &PageTemplate) -> Result<PlanScale> {
        match self.zoom_scale {
            Some(scale) => Ok(scale),
            None => self.fitted_scale(page),
        }
    }
}

/// Ground-to-plan mapping of one diagram on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramFrame {
    id: DiagramId,
    origin_offset: GroundPosition,
    page_origin: PlanPosition,
    scale: PlanScale,
}

impl DiagramFrame {
    pub fn new(page: &PageTemplate, diagram: &Diagram) -> Result<Self> {
        let scale = diagram.plan_scale(page)?;
        debug!(diagram = %diagram.id, %scale, "diagram frame");
        Ok(DiagramFrame {
            id: diagram.id,
            origin_offset: diagram.origin_offset,
            page_origin: page.origin(),
            scale,
        })
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn scale(&self) -> PlanScale {
        self.scale
    }

    pub fn metres_to_cm(&self, distance: Metres) -> Cm {
        Cm(distance.raw() / self.scale.metres_per_cm())
    }

    pub fn cm_to_metres(&self, distance: Cm) -> Metres {
        Metres(distance.raw() * self.scale.metres_per_cm())
    }

    /// Ground position to page-relative plan position.
    pub fn ground_to_plan(&self, ground: GroundPosition) -> PlanPosition {
        let offset = ground - self.origin_offset;
        self.page_origin + Delta::new(self.metres_to_cm(offset.dx), self.metres_to_cm(offset.dy))
    }

    /// Plan position back to ground, rounded to persisted precision.
    pub fn plan_to_ground(&self, plan: PlanPosition) -> GroundPosition {
        let offset = plan - self.page_origin;
        let ground = self.origin_offset
            + Delta::new(self.cm_to_metres(offset.dx), self.cm_to_metres(offset.dy));
        GroundPosition::new(
            Metres(round_persisted(ground.x.raw())),
            Metres(round_persisted(ground.y.raw())),
        )
    }
}
