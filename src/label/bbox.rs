//! Bounding box of a placed label.
//!
//! The unrotated box is first shifted so its reference point matches the
//! alignment, then moved by the polar offset. A rotated label is turned
//! about its anchor using the *unshifted* box and only then translated by
//! the polar offset; downstream placement depends on this order.

use super::{Horizontal, Label, TextAlignment, Vertical};
use crate::geometry::{polar_delta, rotate_about_pivot};
use crate::types::{
    BearingAngle, Cm, Delta, MathAngle, PlanBox, PlanDelta, PlanPosition, Points, Size,
};

/// Everything needed to place a label's box, already resolved to plan cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub anchor: PlanPosition,
    pub size: Size<Cm>,
    pub alignment: TextAlignment,
    pub point_offset: Option<Points>,
    pub anchor_angle: Option<BearingAngle>,
    pub rotation: Option<BearingAngle>,
}

impl LabelGeometry {
    pub fn of(label: &Label, anchor: PlanPosition, size: Size<Cm>) -> Self {
        LabelGeometry {
            anchor,
            size,
            alignment: label.alignment,
            point_offset: label.point_offset,
            anchor_angle: label.anchor_angle,
            rotation: label.rotation,
        }
    }

    /// Polar offset in plan cm. Missing, negative or non-finite offsets count as zero.
    pub fn polar_shift(&self) -> PlanDelta {
        let radius = self
            .point_offset
            .filter(|p| p.raw().is_finite() && p.raw() > 0.0)
            .map(Points::to_cm);
        polar_delta(self.anchor_angle, radius)
    }
}

/// Envelope of a label's rendered box in plan cm (y up: top > bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub x_left: Cm,
    pub x_right: Cm,
    pub y_top: Cm,
    pub y_bottom: Cm,
    /// The polar offset that was applied to reach this box
    pub applied_shift: PlanDelta,
}

impl LabelBox {
    pub fn bounds(&self) -> PlanBox {
        PlanBox {
            min: PlanPosition::new(self.x_left, self.y_bottom),
            max: PlanPosition::new(self.x_right, self.y_top),
        }
    }

    pub fn width(&self) -> Cm {
        self.x_right - self.x_left
    }

    pub fn height(&self) -> Cm {
        self.y_top - self.y_bottom
    }

    fn from_bounds(bounds: PlanBox, applied_shift: PlanDelta) -> Self {
        LabelBox {
            x_left: bounds.min.x,
            x_right: bounds.max.x,
            y_top: bounds.max.y,
            y_bottom: bounds.min.y,
            applied_shift,
        }
    }
}

/// Offset from the anchor to the box center implied by the alignment.
pub fn alignment_offset(alignment: &TextAlignment, size: Size<Cm>) -> PlanDelta {
    let dx = match alignment.horizontal {
        Horizontal::Left => -size.w / 2.0,
        Horizontal::Center => Cm::ZERO,
        Horizontal::Right => size.w / 2.0,
    };
    let dy = match alignment.vertical {
        Vertical::Top => size.h / 2.0,
        Vertical::Center => Cm::ZERO,
        Vertical::Bottom => -size.h / 2.0,
    };
    Delta::new(dx, dy)
}

/// Rendered bounding box of a label.
pub fn label_bounding_box(geometry: &LabelGeometry) -> LabelBox {
    let shift = geometry.polar_shift();
    let unshifted_center = geometry.anchor + alignment_offset(&geometry.alignment, geometry.size);

    let rotation = geometry.rotation.filter(|r| !r.is_zero());
    let bounds = match rotation {
        None => PlanBox::around(unshifted_center + shift, geometry.size),
        Some(rotation) => {
            let turn = MathAngle::from(rotation);
            let unrotated = PlanBox::around(unshifted_center, geometry.size);
            corners(&unrotated)
                .into_iter()
                .map(|corner| rotate_about_pivot(corner, geometry.anchor, turn) + shift)
                .collect()
        }
    };
    LabelBox::from_bounds(bounds, shift)
}

fn corners(bounds: &PlanBox) -> [PlanPosition; 4] {
    [
        bounds.min,
        PlanPosition::new(bounds.max.x, bounds.min.y),
        bounds.max,
        PlanPosition::new(bounds.min.x, bounds.max.y),
    ]
}
