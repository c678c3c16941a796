//! Pull a handful of labels back onto the default page.
//!
//! Run with: RUST_LOG=planlayout=debug cargo run --example relocate --features tracing

use planlayout::{
    AlignmentCache, Diagram, DiagramFrame, DiagramId, Font, GroundPosition, LabelAnchor,
    LabelRecord, PageTemplate, PlanPosition, Points, ProportionalMeasure, RelocationOutcome,
    relocate_all,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let page = PageTemplate::default();
    let diagram = Diagram::new(
        DiagramId(1),
        GroundPosition::from_raw(2_000.0, 6_000.0),
        GroundPosition::from_raw(2_390.0, 5_733.0),
    );
    let frame = match DiagramFrame::new(&page, &diagram) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Error: {:?}", miette::Report::new(e));
            return;
        }
    };

    let font = Font::new("Arial", Points(9.0));
    let record = |anchor, text: &str, alignment: &str, offset: Option<(f64, f64)>| LabelRecord {
        anchor,
        text: text.to_string(),
        font: font.clone(),
        alignment: alignment.to_string(),
        point_offset: offset.map(|(r, _)| r),
        anchor_angle: offset.map(|(_, a)| a),
        rotation: None,
    };
    let records = [
        record(
            LabelAnchor::Diagram {
                id: DiagramId(1),
                position: GroundPosition::from_raw(2_390.0, 5_900.0),
            },
            "Pt 14",
            "middleLeft",
            None,
        ),
        record(
            LabelAnchor::Diagram {
                id: DiagramId(1),
                position: GroundPosition::from_raw(2_200.0, 5_733.0),
            },
            "Lot 3\nDP 12345",
            "topCenter",
            Some((18.0, 90.0)),
        ),
        record(
            LabelAnchor::Page(PlanPosition::from_raw(20.0, -15.0)),
            "Easement A",
            "middleCenter",
            None,
        ),
    ];

    let mut cache = AlignmentCache::new();
    let labels: Vec<_> = records.into_iter().map(|r| r.into_label(&mut cache)).collect();

    match relocate_all(&page, &[frame], &labels, &ProportionalMeasure::default()) {
        Ok(results) => {
            for r in results {
                let status = match &r.outcome {
                    RelocationOutcome::Unchanged => "unchanged".to_string(),
                    RelocationOutcome::Moved { correction } => {
                        format!("moved by ({}, {})", correction.dx, correction.dy)
                    }
                    RelocationOutcome::Oversized(warning) => format!("oversized: {warning}"),
                };
                println!(
                    "{:<12} {:<28} offset={:?} angle={:?}",
                    r.label.text.replace('\n', " / "),
                    status,
                    r.label.point_offset,
                    r.label.anchor_angle
                );
            }
        }
        Err(e) => eprintln!("Error: {:?}", miette::Report::new(e)),
    }
}
