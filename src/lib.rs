//! Coordinate mapping and label placement for printable survey plans.
//!
//! Three coordinate spaces are involved:
//! - ground: real-world metres, x east and y north
//! - plan: centimetres on the fixed page template, y up
//! - pixel: on-screen canvas, y down
//!
//! [`CoordinateMapper`] converts between them for every diagram on a page,
//! [`compute_diagram_scale`] picks the zoom scale of a new diagram, and
//! [`relocate_if_off_page`] keeps label boxes inside the page by adjusting
//! their polar offset.
//!
//! Everything here is synchronous and side-effect free; text measurement is
//! supplied by the caller through [`MeasureText`].

pub mod defaults;
pub mod diagram;
pub mod errors;
pub mod geometry;
pub mod label;
pub mod log;
pub mod mapper;
pub mod page;
pub mod scale;
pub mod types;

pub use diagram::{Diagram, DiagramFrame, DiagramId, PlanScale};
pub use errors::{ConfigurationError, DegenerateGeometry};
pub use label::{
    AlignmentCache, Font, Horizontal, Label, LabelAnchor, LabelBox, LabelGeometry, LabelRecord,
    MeasureText, ProportionalMeasure, Relocation, RelocationOutcome, TextAlignment, Vertical,
    label_bounding_box, relocate_all, relocate_if_off_page,
};
pub use mapper::{CoordinateMapper, Viewport};
pub use page::PageTemplate;
pub use scale::{LatLong, compute_diagram_scale};
pub use types::{
    BearingAngle, Cm, Delta, GroundPosition, MathAngle, Metres, PixelPosition, PlanPosition, Points,
    Position, Px, Size,
};
