//! End-to-end checks for the ground/plan/pixel conversions and scale selection.

use planlayout::{
    Cm, ConfigurationError, CoordinateMapper, Diagram, DiagramId, GroundPosition, LatLong, Metres,
    PageTemplate, PixelPosition, PlanPosition, PlanScale, Px, Viewport, compute_diagram_scale,
};

/// Allowed drift after a pixel round trip, in metres
const GROUND_TOLERANCE: f64 = 1e-3;

// =============================================================================
// Fixtures
// =============================================================================

fn parcel() -> Diagram {
    Diagram::new(
        DiagramId(1),
        GroundPosition::from_raw(1_000.0, 5_000.0),
        GroundPosition::from_raw(1_780.0, 4_733.0),
    )
}

fn mapper(width: f64, height: f64) -> CoordinateMapper {
    let viewport = Viewport::new(Px(width), Px(height)).unwrap();
    CoordinateMapper::new(PageTemplate::default(), viewport, &[parcel()]).unwrap()
}

/// Axis-aligned lat/long rectangle of `width_m` x `height_m` around (lat, lon).
fn rectangle(lat: f64, lon: f64, width_m: f64, height_m: f64) -> Vec<LatLong> {
    let per_degree = planlayout::defaults::METRES_PER_DEGREE;
    let half_lat = height_m / 2.0 / per_degree;
    let half_lon = width_m / 2.0 / (per_degree * lat.to_radians().cos());
    vec![
        LatLong::new(lat + half_lat, lon - half_lon),
        LatLong::new(lat + half_lat, lon + half_lon),
        LatLong::new(lat - half_lat, lon + half_lon),
        LatLong::new(lat - half_lat, lon - half_lon),
    ]
}

// =============================================================================
// Coordinate mapper
// =============================================================================

#[test]
fn page_keeps_its_aspect_in_a_wide_viewport() {
    let m = mapper(500.0, 300.0);
    let (sx, sy) = m.axis_scales();
    assert_eq!(sx, -sy);

    // Height governs: 300 px over 26.7 cm.
    assert!((m.pixels_per_cm() - 300.0 / 26.7).abs() < 1e-9);
    let drawn_width = 39.0 * m.pixels_per_cm();
    assert!((m.centre_offset().dx.raw() - (500.0 - drawn_width) / 2.0).abs() < 1e-9);
    assert!(m.centre_offset().dy.raw().abs() < 1e-9);

    let top_left = m.cm_to_pixel(m.page().origin());
    let bottom_right = m.cm_to_pixel(m.page().bottom_right());
    assert!((top_left.y.raw()).abs() < 1e-9);
    assert!((bottom_right.y.raw() - 300.0).abs() < 1e-9);
    assert!((bottom_right.x.raw() - top_left.x.raw() - drawn_width).abs() < 1e-9);
}

#[test]
fn ground_survives_a_pixel_round_trip() {
    let m = mapper(1_280.0, 720.0);
    let samples = [
        GroundPosition::from_raw(1_000.0, 5_000.0),
        GroundPosition::from_raw(1_390.125, 4_866.5),
        GroundPosition::from_raw(1_779.999, 4_733.001),
        GroundPosition::from_raw(1_012.345, 4_990.678),
    ];
    for ground in samples {
        let pixel = m.ground_to_pixel(DiagramId(1), ground).unwrap();
        let back = m.pixel_to_ground(DiagramId(1), pixel).unwrap();
        let drift = back - ground;
        assert!(drift.dx.raw().abs() <= GROUND_TOLERANCE, "{ground:?} came back as {back:?}");
        assert!(drift.dy.raw().abs() <= GROUND_TOLERANCE, "{ground:?} came back as {back:?}");
    }
}

#[test]
fn pixel_y_grows_downwards() {
    let m = mapper(800.0, 600.0);
    let north = m
        .ground_to_pixel(DiagramId(1), GroundPosition::from_raw(1_200.0, 4_950.0))
        .unwrap();
    let south = m
        .ground_to_pixel(DiagramId(1), GroundPosition::from_raw(1_200.0, 4_800.0))
        .unwrap();
    assert!(south.y > north.y);
    assert_eq!(north.x, south.x);
}

#[test]
fn distances_scale_without_offset() {
    let m = mapper(800.0, 600.0);
    let px = m.cm_distance_to_pixels(Cm(2.0));
    assert!((px.raw() - 2.0 * m.pixels_per_cm()).abs() < 1e-9);
    assert!((m.pixels_to_cm_distance(px).raw() - 2.0).abs() < 1e-9);

    let back = m.pixel_to_cm(m.cm_to_pixel(PlanPosition::from_raw(10.0, -10.0)));
    assert!((back.x.raw() - 10.0).abs() < 1e-9);
    assert!((back.y.raw() + 10.0).abs() < 1e-9);
}

#[test]
fn unknown_diagram_is_a_configuration_error() {
    let m = mapper(800.0, 600.0);
    let err = m.ground_to_pixel(DiagramId(42), GroundPosition::default()).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownDiagram { id: DiagramId(42) });
    assert!(m.pixel_to_ground(DiagramId(42), PixelPosition::default()).is_err());
}

#[test]
fn every_diagram_needs_its_own_id() {
    let viewport = Viewport::new(Px(800.0), Px(600.0)).unwrap();
    let zoomed = parcel().with_zoom_scale(PlanScale::try_new(1_000.0).unwrap());
    let result = CoordinateMapper::new(PageTemplate::default(), viewport, &[zoomed, parcel()]);
    assert_eq!(result.unwrap_err(), ConfigurationError::DuplicateDiagram { id: DiagramId(1) });
}

#[test]
fn empty_viewport_is_rejected() {
    assert!(matches!(
        Viewport::new(Px(0.0), Px(300.0)),
        Err(ConfigurationError::InvalidViewport { .. })
    ));
}

// =============================================================================
// Scale selection
// =============================================================================

#[test]
fn doubling_the_boundary_doubles_the_ratio() {
    let page = PageTemplate::default();
    let fits = rectangle(-36.85, 174.76, 390.0, 267.0);
    let fits = compute_diagram_scale(&page, &[], &fits).unwrap();
    let twice = rectangle(-36.85, 174.76, 780.0, 534.0);
    let twice = compute_diagram_scale(&page, &[], &twice).unwrap();
    assert!((twice.ratio() / fits.ratio() - 2.0).abs() < 1e-6);
    insta::assert_snapshot!(
        format!("1:{:.0} 1:{:.0}", fits.ratio(), twice.ratio()),
        @"1:1050 1:2100"
    );
}

#[test]
fn siblings_override_the_boundary() {
    let page = PageTemplate::default();
    let sibling = parcel().with_zoom_scale(PlanScale::try_new(500.0).unwrap());
    let boundary = rectangle(0.0, 0.0, 5_000.0, 5_000.0);
    let scale = compute_diagram_scale(&page, &[sibling], &boundary).unwrap();
    assert_eq!(scale.ratio(), 500.0);
}

#[test]
fn point_boundary_is_degenerate() {
    let page = PageTemplate::default();
    let point = [LatLong::new(-41.0, 174.0), LatLong::new(-41.0, 174.0)];
    assert!(matches!(
        compute_diagram_scale(&page, &[], &point),
        Err(ConfigurationError::DegenerateBoundary { .. })
    ));
}

#[test]
fn diagram_extent_is_measured_in_metres() {
    let d = parcel();
    assert_eq!(d.ground_width(), Metres(780.0));
    assert_eq!(d.ground_height(), Metres(267.0));
}
