//! Map ground points of a diagram into a canvas and back.
//!
//! Usage: cargo run --example viewport -- [width_px] [height_px]

use planlayout::{CoordinateMapper, Diagram, DiagramId, GroundPosition, PageTemplate, Px, Viewport};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).map(|a| a.parse::<f64>());
    let width = args.next().and_then(Result::ok).unwrap_or(1_280.0);
    let height = args.next().and_then(Result::ok).unwrap_or(720.0);

    let diagram = Diagram::new(
        DiagramId(1),
        GroundPosition::from_raw(0.0, 0.0),
        GroundPosition::from_raw(520.0, -356.0),
    );

    let mapper = match Viewport::new(Px(width), Px(height))
        .and_then(|viewport| CoordinateMapper::new(PageTemplate::default(), viewport, &[diagram]))
    {
        Ok(mapper) => mapper,
        Err(e) => {
            eprintln!("Error: {:?}", miette::Report::new(e));
            return;
        }
    };

    println!("pixels per cm: {:.4}", mapper.pixels_per_cm());
    println!("centre offset: ({}, {})", mapper.centre_offset().dx, mapper.centre_offset().dy);

    for ground in [
        GroundPosition::from_raw(0.0, 0.0),
        GroundPosition::from_raw(260.0, -178.0),
        GroundPosition::from_raw(520.0, -356.0),
    ] {
        let result = mapper
            .ground_to_pixel(DiagramId(1), ground)
            .and_then(|pixel| Ok((pixel, mapper.pixel_to_ground(DiagramId(1), pixel)?)));
        match result {
            Ok((pixel, back)) => println!(
                "({}, {}) -> ({}, {}) -> ({}, {})",
                ground.x, ground.y, pixel.x, pixel.y, back.x, back.y
            ),
            Err(e) => eprintln!("Error: {:?}", miette::Report::new(e)),
        }
    }
}
