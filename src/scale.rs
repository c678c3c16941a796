//! Zoom scale for a newly drawn diagram.
//!
//! Two independent policies:
//! - [`match_sibling_scale`]: diagrams on the same page are drawn at the same
//!   scale so they can be compared visually, whatever the new diagram's size.
//! - [`fit_to_page`]: with no siblings, the smallest ratio that keeps the
//!   boundary's extent inside the page, plus a fixed margin.

use crate::defaults;
use crate::diagram::{Diagram, PlanScale};
use crate::errors::{ConfigurationError, Result};
use crate::log::{debug, warn};
use crate::page::PageTemplate;
use crate::types::{Metres, Size};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLong { latitude, longitude }
    }
}

/// Scale for a new diagram with `boundary` on a page already holding `existing`.
///
/// The boundary is validated even when siblings decide the scale.
pub fn compute_diagram_scale(
    page: &PageTemplate,
    existing: &[Diagram],
    boundary: &[LatLong],
) -> Result<PlanScale> {
    let extent = boundary_extent(boundary)?;
    if let Some(scale) = match_sibling_scale(page, existing)? {
        debug!(%scale, siblings = existing.len(), "matched sibling scale");
        return Ok(scale);
    }
    let scale = fit_extent(page, extent)?;
    debug!(%scale, "fitted new diagram to page");
    Ok(scale)
}

/// Scale shared by the diagrams already on the page, if there are any.
///
/// Siblings normally agree. When they don't, the coarsest scale wins so
/// every existing footprint still fits at the returned ratio.
pub fn match_sibling_scale(page: &PageTemplate, existing: &[Diagram]) -> Result<Option<PlanScale>> {
    let mut shared: Option<PlanScale> = None;
    for diagram in existing {
        let scale = diagram.plan_scale(page)?;
        shared = match shared {
            None => Some(scale),
            Some(current) => {
                if (current.ratio() - scale.ratio()).abs() > f64::EPSILON * current.ratio() {
                    warn!(
                        diagram = %diagram.id,
                        %current,
                        %scale,
                        "sibling diagrams disagree on scale"
                    );
                }
                Some(if scale > current { scale } else { current })
            }
        };
    }
    Ok(shared)
}

/// Smallest 1:N ratio that keeps the boundary's extent within the page.
pub fn fit_to_page(page: &PageTemplate, boundary: &[LatLong]) -> Result<PlanScale> {
    fit_extent(page, boundary_extent(boundary)?)
}

fn fit_extent(page: &PageTemplate, extent: Size<Metres>) -> Result<PlanScale> {
    let page_width_m = page.width().raw() / defaults::CM_PER_METRE;
    let page_height_m = page.height().raw() / defaults::CM_PER_METRE;

    let required = (extent.w.raw() / page_width_m).max(extent.h.raw() / page_height_m);
    PlanScale::try_new(required * defaults::FIT_MARGIN)
}

/// Ground extent of a lat/long polygon in metres.
///
/// Uses an equirectangular approximation: longitude spans shrink with the
/// cosine of the boundary's mid latitude.
pub fn boundary_extent(boundary: &[LatLong]) -> Result<Size<Metres>> {
    let first = boundary.first().ok_or_else(|| ConfigurationError::DegenerateBoundary {
        reason: "boundary has no points".to_string(),
    })?;
    if boundary.iter().any(|p| !p.latitude.is_finite() || !p.longitude.is_finite()) {
        return Err(ConfigurationError::DegenerateBoundary {
            reason: "boundary contains non-finite coordinates".to_string(),
        });
    }

    let (mut min, mut max) = (*first, *first);
    for p in boundary {
        min.latitude = min.latitude.min(p.latitude);
        min.longitude = min.longitude.min(p.longitude);
        max.latitude = max.latitude.max(p.latitude);
        max.longitude = max.longitude.max(p.longitude);
    }

    let mid_latitude = (min.latitude + max.latitude) / 2.0;
    let width = (max.longitude - min.longitude)
        * defaults::METRES_PER_DEGREE
        * mid_latitude.to_radians().cos();
    let height = (max.latitude - min.latitude) * defaults::METRES_PER_DEGREE;

    if width <= 0.0 && height <= 0.0 {
        return Err(ConfigurationError::DegenerateBoundary {
            reason: "boundary has zero extent".to_string(),
        });
    }
    Ok(Size::new(Metres(width.max(0.0)), Metres(height)))
}
