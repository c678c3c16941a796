//! Page coordinate mapper: ground metres ↔ plan centimetres ↔ screen pixels.
//!
//! The page is fitted into the viewport with a single pixels-per-cm factor
//! (aspect preserved) and centred along the axis that has slack. Plan space
//! is y-up and pixel space is y-down, so the vertical axis is inverted.

use std::collections::HashMap;

use crate::diagram::{Diagram, DiagramFrame, DiagramId};
use crate::errors::{ConfigurationError, Result};
use crate::log::debug;
use crate::page::PageTemplate;
use crate::types::{Cm, Delta, GroundPosition, PixelPosition, PlanPosition, Px, check_positive};

/// Size of the on-screen canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: Px,
    height: Px,
}

impl Viewport {
    pub fn new(width: Px, height: Px) -> Result<Self> {
        match (check_positive(width.raw()), check_positive(height.raw())) {
            (Ok(_), Ok(_)) => Ok(Viewport { width, height }),
            _ => Err(ConfigurationError::InvalidViewport {
                width: width.raw(),
                height: height.raw(),
            }),
        }
    }

    pub fn width(&self) -> Px {
        self.width
    }

    pub fn height(&self) -> Px {
        self.height
    }
}

/// Maps between the three coordinate spaces for every diagram on one page.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    page: PageTemplate,
    viewport: Viewport,
    pixels_per_cm: f64,
    centre_offset: Delta<Px>,
    frames: HashMap<DiagramId, DiagramFrame>,
}

impl CoordinateMapper {
    /// Fit `page` into `viewport` and derive the frame of every diagram once.
    ///
    /// Fails if a diagram has no usable scale or two diagrams share an id.
    pub fn new(page: PageTemplate, viewport: Viewport, diagrams: &[Diagram]) -> Result<Self> {
        let across = viewport.width().raw() / page.width().raw();
        let down = viewport.height().raw() / page.height().raw();
        let pixels_per_cm = across.min(down);

        let slack_x = viewport.width().raw() - page.width().raw() * pixels_per_cm;
        let slack_y = viewport.height().raw() - page.height().raw() * pixels_per_cm;
        let centre_offset = Delta::new(Px(slack_x / 2.0), Px(slack_y / 2.0));

        debug!(pixels_per_cm, dx = slack_x / 2.0, dy = slack_y / 2.0, "fitted page into viewport");

        let mut frames = HashMap::with_capacity(diagrams.len());
        for diagram in diagrams {
            let frame = DiagramFrame::new(&page, diagram)?;
            if frames.insert(diagram.id, frame).is_some() {
                return Err(ConfigurationError::DuplicateDiagram { id: diagram.id });
            }
        }

        Ok(CoordinateMapper {
            page,
            viewport,
            pixels_per_cm,
            centre_offset,
            frames,
        })
    }

    pub fn page(&self) -> &PageTemplate {
        &self.page
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pixels_per_cm(&self) -> f64 {
        self.pixels_per_cm
    }

    /// Signed per-axis scale from plan cm to pixels. Only the sign differs.
    pub fn axis_scales(&self) -> (f64, f64) {
        (self.pixels_per_cm, -self.pixels_per_cm)
    }

    /// Pixel offset that centres the page along the axis with slack.
    pub fn centre_offset(&self) -> Delta<Px> {
        self.centre_offset
    }

    /// Ground-to-plan frame of a registered diagram.
    pub fn frame(&self, id: DiagramId) -> Result<DiagramFrame> {
        self.frames.get(&id).copied().ok_or(ConfigurationError::UnknownDiagram { id })
    }

    pub fn cm_to_pixel(&self, plan: PlanPosition) -> PixelPosition {
        let (sx, sy) = self.axis_scales();
        let from_origin = plan - self.page.origin();
        PixelPosition::new(
            Px(from_origin.dx.raw() * sx) + self.centre_offset.dx,
            Px(from_origin.dy.raw() * sy) + self.centre_offset.dy,
        )
    }

    pub fn pixel_to_cm(&self, pixel: PixelPosition) -> PlanPosition {
        let (sx, sy) = self.axis_scales();
        let from_corner = pixel - self.centre_offset;
        self.page.origin() + Delta::new(Cm(from_corner.x.raw() / sx), Cm(from_corner.y.raw() / sy))
    }

    pub fn ground_to_pixel(&self, id: DiagramId, ground: GroundPosition) -> Result<PixelPosition> {
        let frame = self.frame(id)?;
        Ok(self.cm_to_pixel(frame.ground_to_plan(ground)))
    }

    /// Inverse of [`Self::ground_to_pixel`], rounded to persisted precision.
    pub fn pixel_to_ground(&self, id: DiagramId, pixel: PixelPosition) -> Result<GroundPosition> {
        let frame = self.frame(id)?;
        Ok(frame.plan_to_ground(self.pixel_to_cm(pixel)))
    }

    pub fn cm_distance_to_pixels(&self, distance: Cm) -> Px {
        Px(distance.raw() * self.pixels_per_cm)
    }

    pub fn pixels_to_cm_distance(&self, distance: Px) -> Cm {
        Cm(distance.raw() / self.pixels_per_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metres;

    fn mapper() -> CoordinateMapper {
        let page = PageTemplate::with_size(Cm(39.0), Cm(26.7)).unwrap();
        let viewport = Viewport::new(Px(500.0), Px(300.0)).unwrap();
        let diagram = Diagram::new(
            DiagramId(3),
            GroundPosition::from_raw(0.0, 100.0),
            GroundPosition::from_raw(390.0, 0.0),
        );
        CoordinateMapper::new(page, viewport, &[diagram]).unwrap()
    }

    #[test]
    fn viewport_rejects_empty() {
        assert!(Viewport::new(Px(0.0), Px(10.0)).is_err());
        assert!(Viewport::new(Px(10.0), Px(f64::NAN)).is_err());
    }

    #[test]
    fn fits_height_and_centres_horizontally() {
        let m = mapper();
        assert!((m.pixels_per_cm() - 300.0 / 26.7).abs() < 1e-12);
        assert!(m.centre_offset().dy.raw().abs() < 1e-9);
        let expected = (500.0 - 39.0 * 300.0 / 26.7) / 2.0;
        assert!((m.centre_offset().dx.raw() - expected).abs() < 1e-9);
    }

    #[test]
    fn page_corners_map_to_fitted_rectangle() {
        let m = mapper();
        let top_left = m.cm_to_pixel(m.page().origin());
        assert_eq!(top_left.x, m.centre_offset().dx);
        assert!(top_left.y.raw().abs() < 1e-9);

        let bottom_right = m.cm_to_pixel(m.page().bottom_right());
        assert!((bottom_right.y.raw() - 300.0).abs() < 1e-9);
        assert!((bottom_right.x.raw() - (500.0 - m.centre_offset().dx.raw())).abs() < 1e-9);
    }

    #[test]
    fn north_is_up_on_screen() {
        let m = mapper();
        let north = m.ground_to_pixel(DiagramId(3), GroundPosition::from_raw(10.0, 90.0)).unwrap();
        let south = m.ground_to_pixel(DiagramId(3), GroundPosition::from_raw(10.0, 10.0)).unwrap();
        assert!(north.y < south.y);
    }

    #[test]
    fn ground_pixel_round_trip() {
        let m = mapper();
        let ground = GroundPosition::new(Metres(123.456), Metres(42.1));
        let px = m.ground_to_pixel(DiagramId(3), ground).unwrap();
        let back = m.pixel_to_ground(DiagramId(3), px).unwrap();
        assert!((back.x - ground.x).raw().abs() <= 1e-3);
        assert!((back.y - ground.y).raw().abs() <= 1e-3);
    }

    #[test]
    fn unknown_diagram_fails_loudly() {
        let m = mapper();
        let err = m.ground_to_pixel(DiagramId(99), GroundPosition::default()).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownDiagram { id: DiagramId(99) });
        assert!(m.pixel_to_ground(DiagramId(99), PixelPosition::default()).is_err());
    }

    #[test]
    fn duplicate_diagram_ids_are_rejected() {
        let page = PageTemplate::default();
        let viewport = Viewport::new(Px(500.0), Px(300.0)).unwrap();
        let origin = GroundPosition::from_raw(0.0, 0.0);
        let first = Diagram::new(DiagramId(1), origin, GroundPosition::from_raw(390.0, -267.0));
        let second = Diagram::new(DiagramId(1), origin, GroundPosition::from_raw(10.0, -10.0));
        let err = CoordinateMapper::new(page, viewport, &[first, second]).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateDiagram { id: DiagramId(1) });
    }

    #[test]
    fn unusable_scale_fails_at_construction() {
        let page = PageTemplate::default();
        let viewport = Viewport::new(Px(500.0), Px(300.0)).unwrap();
        let point = GroundPosition::from_raw(5.0, 5.0);
        let flat = Diagram::new(DiagramId(2), point, point);
        assert!(matches!(
            CoordinateMapper::new(page, viewport, &[flat]),
            Err(ConfigurationError::InvalidScale { .. })
        ));
    }

    #[test]
    fn frames_are_derived_once() {
        let m = mapper();
        let frame = m.frame(DiagramId(3)).unwrap();
        assert_eq!(m.frame(DiagramId(3)), Ok(frame));
        assert!((frame.scale().metres_per_cm() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn distances_scale_both_ways() {
        let m = mapper();
        let px = m.cm_distance_to_pixels(Cm(2.0));
        assert!((px.raw() - 2.0 * m.pixels_per_cm()).abs() < 1e-12);
        assert!((m.pixels_to_cm_distance(px).raw() - 2.0).abs() < 1e-12);
    }
}
