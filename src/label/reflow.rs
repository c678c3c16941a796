//! Off-page correction of label placement.
//!
//! When a label's box crosses the diagram-limit rectangle, the signed
//! overflow is folded into the existing polar offset and the sum is stored
//! back as (point offset, anchor angle). The stored pair is rounded, so the
//! box is pulled in just far enough that rounding cannot push it back out.
//! Only the offset and angle change; the anchor is never replaced by an
//! absolute position. A label already on the page (within tolerance) is
//! returned untouched, so the correction is idempotent.

use super::bbox::{LabelBox, LabelGeometry, label_bounding_box};
use super::measure::MeasureText;
use super::{Label, LabelAnchor};
use crate::defaults;
use crate::diagram::DiagramFrame;
use crate::errors::{DegenerateGeometry, Result};
use crate::geometry::{angle_of_delta, round_persisted};
use crate::log::{debug, warn};
use crate::page::PageTemplate;
use crate::types::{Axis, BearingAngle, Cm, Delta, PlanDelta, Points, Size};

/// How a label's box relates to the page
#[derive(Debug, Clone, PartialEq)]
pub enum Overflow {
    Inside,
    /// Translation that brings the box back inside the page
    Outside(PlanDelta),
    /// The box is larger than the page on one axis
    Oversized(DegenerateGeometry),
}

/// What relocation did to a label
#[derive(Debug, Clone, PartialEq)]
pub enum RelocationOutcome {
    Unchanged,
    Moved { correction: PlanDelta },
    Oversized(DegenerateGeometry),
}

/// A label after off-page correction, with its final box.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocation {
    pub label: Label,
    pub bounds: LabelBox,
    pub outcome: RelocationOutcome,
}

impl Relocation {
    pub fn is_moved(&self) -> bool {
        matches!(self.outcome, RelocationOutcome::Moved { .. })
    }

    /// Advisory warning for labels that could not be corrected.
    pub fn warning(&self) -> Option<&DegenerateGeometry> {
        match &self.outcome {
            RelocationOutcome::Oversized(warning) => Some(warning),
            _ => None,
        }
    }
}

/// Compare a label box against the page's diagram-limit rectangle.
pub fn page_overflow(page: &PageTemplate, bounds: &LabelBox) -> Overflow {
    let tolerance = defaults::PAGE_TOLERANCE;

    if bounds.width() > page.width() + tolerance {
        return Overflow::Oversized(DegenerateGeometry {
            axis: Axis::Horizontal,
            label_extent: bounds.width(),
            page_extent: page.width(),
        });
    }
    if bounds.height() > page.height() + tolerance {
        return Overflow::Oversized(DegenerateGeometry {
            axis: Axis::Vertical,
            label_extent: bounds.height(),
            page_extent: page.height(),
        });
    }

    let dx = axis_correction(bounds.x_left - page.left(), page.right() - bounds.x_right, tolerance);
    let dy = axis_correction(bounds.y_bottom - page.bottom(), page.top() - bounds.y_top, tolerance);
    if dx == Cm::ZERO && dy == Cm::ZERO {
        Overflow::Inside
    } else {
        Overflow::Outside(Delta::new(dx, dy))
    }
}

/// Signed move along one axis given the margins on its low and high sides.
fn axis_correction(low_margin: Cm, high_margin: Cm, tolerance: Cm) -> Cm {
    if low_margin < -tolerance {
        -low_margin
    } else if high_margin < -tolerance {
        high_margin
    } else {
        Cm::ZERO
    }
}

/// Correction that still leaves the box on the page once the new offset and
/// angle are rounded to persisted precision.
///
/// Each axis keeps at least the rounding clearance of margin where the page
/// has room for it; an axis without that room is centred.
fn settling_correction(page: &PageTemplate, bounds: &LabelBox, overflow: PlanDelta) -> PlanDelta {
    let length = (bounds.applied_shift + overflow).length();
    // The settled shift is longer than this one by at most sqrt(2) clearances.
    let clearance = rounding_clearance(length + rounding_clearance(length) * 2.0);
    let dx = clear_axis(bounds.x_left - page.left(), page.right() - bounds.x_right, clearance);
    let dy = clear_axis(bounds.y_bottom - page.bottom(), page.top() - bounds.y_top, clearance);
    Delta::new(dx, dy)
}

/// Largest displacement caused by rounding a polar shift of `length` to
/// persisted precision, in both its angle and its point offset.
fn rounding_clearance(length: Cm) -> Cm {
    let half_step = 0.5 * 10f64.powi(-defaults::PERSISTED_DECIMALS);
    length * half_step.to_radians() + Points(half_step).to_cm()
}

fn clear_axis(low_margin: Cm, high_margin: Cm, clearance: Cm) -> Cm {
    if low_margin + high_margin < clearance * 2.0 {
        (high_margin - low_margin) / 2.0
    } else if low_margin < clearance {
        clearance - low_margin
    } else if high_margin < clearance {
        high_margin - clearance
    } else {
        Cm::ZERO
    }
}

/// Keep a label's box on the page by adjusting its polar offset.
///
/// `frame` must be the frame of the label's diagram; page labels pass `None`.
/// Returns the label unchanged when it already fits, and flags it without
/// changes when it is larger than the page.
pub fn relocate_if_off_page<M>(
    page: &PageTemplate,
    frame: Option<&DiagramFrame>,
    label: &Label,
    measure: &M,
) -> Result<Relocation>
where
    M: MeasureText + ?Sized,
{
    let anchor = label.anchor_on_page(frame)?;
    let lines = label.lines();
    let size = if lines.iter().all(|line| line.is_empty()) {
        Size::zero()
    } else {
        measure.measure(&lines, &label.font)
    };
    let bounds = label_bounding_box(&LabelGeometry::of(label, anchor, size));

    match page_overflow(page, &bounds) {
        Overflow::Inside => Ok(Relocation {
            label: label.clone(),
            bounds,
            outcome: RelocationOutcome::Unchanged,
        }),
        Overflow::Oversized(warning) => {
            warn!(text = label.text.as_str(), %warning, "label cannot be placed on the page");
            Ok(Relocation {
                label: label.clone(),
                bounds,
                outcome: RelocationOutcome::Oversized(warning),
            })
        }
        Overflow::Outside(overflow) => {
            let correction = settling_correction(page, &bounds, overflow);
            let shift = bounds.applied_shift + correction;
            let mut corrected = label.clone();
            let offset = Points::from_cm(shift.length()).raw();
            let angle = angle_of_delta(shift).as_degrees();
            corrected.point_offset = Some(Points(round_persisted(offset)));
            corrected.anchor_angle = Some(BearingAngle::degrees(round_persisted(angle)));
            debug!(
                text = label.text.as_str(),
                dx = correction.dx.raw(),
                dy = correction.dy.raw(),
                offset = ?corrected.point_offset,
                angle = ?corrected.anchor_angle,
                "moved label back onto the page"
            );
            let bounds = label_bounding_box(&LabelGeometry::of(&corrected, anchor, size));
            Ok(Relocation {
                label: corrected,
                bounds,
                outcome: RelocationOutcome::Moved { correction },
            })
        }
    }
}

/// Relocate every label on a page, looking up each diagram label's frame.
pub fn relocate_all<M>(
    page: &PageTemplate,
    frames: &[DiagramFrame],
    labels: &[Label],
    measure: &M,
) -> Result<Vec<Relocation>>
where
    M: MeasureText + ?Sized,
{
    labels
        .iter()
        .map(|label| {
            let frame = match &label.anchor {
                LabelAnchor::Diagram { id, .. } => frames.iter().find(|frame| frame.id() == *id),
                LabelAnchor::Page(_) => None,
            };
            relocate_if_off_page(page, frame, label, measure)
        })
        .collect()
}
