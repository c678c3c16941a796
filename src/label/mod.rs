//! Labels: anchored text placed by a polar offset, and the engine that keeps
//! their rendered boxes on the page.
//!
//! This module is organized into submodules:
//! - `alignment`: parser for legacy alignment strings, memoized per raw string
//! - `measure`: the text measurement capability the engine consumes
//! - `bbox`: rotated bounding box of a placed label
//! - `reflow`: off-page correction of offset and anchor angle

mod alignment;
mod bbox;
mod measure;
mod reflow;

pub use alignment::{AlignmentCache, parse_alignment};
pub use bbox::{LabelBox, LabelGeometry, alignment_offset, label_bounding_box};
pub use measure::{MeasureText, ProportionalMeasure, text_length};
pub use reflow::{
    Overflow, Relocation, RelocationOutcome, page_overflow, relocate_all, relocate_if_off_page,
};

use crate::diagram::{DiagramFrame, DiagramId};
use crate::errors::{ConfigurationError, Result};
use crate::types::{BearingAngle, GroundPosition, PlanPosition, Points};

/// Horizontal placement of the text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Horizontal {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Vertical {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Where the text box sits relative to the anchor, and how lines are justified.
///
/// `horizontal: Right` means the box extends to the right of the anchor;
/// `vertical: Bottom` means it hangs below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextAlignment {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
    pub justify: Horizontal,
}

/// Font family and size
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub family: String,
    pub size: Points,
}

impl Font {
    pub fn new(family: impl Into<String>, size: Points) -> Self {
        Font { family: family.into(), size }
    }
}

/// What a label hangs off
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelAnchor {
    /// A ground position inside a diagram, mapped through the diagram's frame
    Diagram { id: DiagramId, position: GroundPosition },
    /// A position directly on the page, already in plan centimetres
    Page(PlanPosition),
}

/// A text label placed by a polar offset from its anchor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    pub anchor: LabelAnchor,
    pub text: String,
    pub font: Font,
    pub alignment: TextAlignment,
    /// Distance from the anchor, in points
    pub point_offset: Option<Points>,
    /// Direction of the offset, clockwise from horizontal
    pub anchor_angle: Option<BearingAngle>,
    /// Text rotation, clockwise from horizontal
    pub rotation: Option<BearingAngle>,
}

impl Label {
    pub fn new(anchor: LabelAnchor, text: impl Into<String>, font: Font) -> Self {
        Label {
            anchor,
            text: text.into(),
            font,
            alignment: TextAlignment::default(),
            point_offset: None,
            anchor_angle: None,
            rotation: None,
        }
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_offset(mut self, point_offset: Points, anchor_angle: BearingAngle) -> Self {
        self.point_offset = Some(point_offset);
        self.anchor_angle = Some(anchor_angle);
        self
    }

    pub fn with_rotation(mut self, rotation: BearingAngle) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    /// Anchor position in plan centimetres.
    ///
    /// Diagram labels need the frame of their own diagram; page labels
    /// ignore `frame`.
    pub fn anchor_on_page(&self, frame: Option<&DiagramFrame>) -> Result<PlanPosition> {
        match (&self.anchor, frame) {
            (LabelAnchor::Page(position), _) => Ok(*position),
            (LabelAnchor::Diagram { id, position }, Some(frame)) if frame.id() == *id => {
                Ok(frame.ground_to_plan(*position))
            }
            (LabelAnchor::Diagram { id, .. }, _) => {
                Err(ConfigurationError::UnknownDiagram { id: *id })
            }
        }
    }
}

/// A label as persisted, with its alignment still in legacy string form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelRecord {
    pub anchor: LabelAnchor,
    pub text: String,
    pub font: Font,
    pub alignment: String,
    pub point_offset: Option<f64>,
    pub anchor_angle: Option<f64>,
    pub rotation: Option<f64>,
}

impl LabelRecord {
    pub fn into_label(self, cache: &mut AlignmentCache) -> Label {
        let alignment = cache.parse(&self.alignment);
        Label {
            anchor: self.anchor,
            text: self.text,
            font: self.font,
            alignment,
            point_offset: self.point_offset.map(Points),
            anchor_angle: self.anchor_angle.map(BearingAngle::degrees),
            rotation: self.rotation.map(BearingAngle::degrees),
        }
    }
}
