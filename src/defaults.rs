//! Fixed constants: page template, precision and tolerances.

use crate::types::{Cm, PlanPosition, Position};

/// Top-left corner of the diagram-limit rectangle on the standard plan sheet.
pub const PAGE_ORIGIN: PlanPosition = Position::new(Cm(1.5), Cm(-1.5));
/// Bottom-right corner of the diagram-limit rectangle (39 cm x 26.7 cm usable).
pub const PAGE_BOTTOM_RIGHT: PlanPosition = Position::new(Cm(40.5), Cm(-28.2));

/// Decimal places kept for persisted coordinates, offsets and angles.
pub const PERSISTED_DECIMALS: i32 = 3;

/// Slack allowed when deciding whether a label box is inside the page.
pub const PAGE_TOLERANCE: Cm = Cm(1e-3);

/// Multiplier applied to a page-fitted scale so the footprint never touches the edge.
pub const FIT_MARGIN: f64 = 1.05;

/// One typographic point (1/72 inch) in centimetres.
pub const CM_PER_POINT: f64 = 2.54 / 72.0;

/// Length of one degree of latitude on the WGS84 equatorial radius.
pub const METRES_PER_DEGREE: f64 = 111_319.490_793;

/// Centimetres per metre of paper, for converting plan extents to scale ratios.
pub const CM_PER_METRE: f64 = 100.0;

/// Line advance as a multiple of the font size.
pub const LINE_SPACING: f64 = 1.2;

/// Average advance of a character in the proportional table, in ems per 100 units.
pub const CHAR_WIDTH_EM: f64 = 0.55;
