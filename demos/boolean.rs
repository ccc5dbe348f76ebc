//! Runs every boolean operation on two overlapping rectangles.
//!
//! `RUST_LOG=pathlis=debug cargo run --example boolean` shows the pipeline.

use pathlis::math::Point2;
use pathlis::operations::winding::calculate_winding;
use pathlis::{boolean_operation, find_path_intersections, BooleanOp, Path};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
    Path::from_points(
        &[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ],
        true,
    )
}

fn main() {
    // Default: WARN for everything, INFO for pathlis.
    // Override with RUST_LOG env var (e.g. RUST_LOG=pathlis=debug).
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("pathlis=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let a = rect(0.0, 0.0, 100.0, 100.0);
    let b = rect(50.0, 50.0, 150.0, 150.0);

    for hit in find_path_intersections(&a, &b) {
        info!(x = hit.point.x, y = hit.point.y, entry = hit.entry, "intersection");
    }

    for op in [
        BooleanOp::Union,
        BooleanOp::Intersection,
        BooleanOp::Difference,
        BooleanOp::Xor,
    ] {
        let result = boolean_operation(&a, &b, op);
        let centre = calculate_winding(&Point2::new(75.0, 75.0), &result);
        info!(
            ?op,
            subpaths = result.subpaths().len(),
            anchors = result.anchors().len(),
            overlap_filled = centre.inside,
            "boolean result"
        );
        for (i, subpath) in result.subpaths().iter().enumerate() {
            let points: Vec<(f64, f64)> = subpath
                .curves
                .iter()
                .map(|c| (c.start().x, c.start().y))
                .collect();
            println!("{op:?}[{i}]: {points:?}");
        }
    }
}
