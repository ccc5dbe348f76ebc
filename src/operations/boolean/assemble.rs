use crate::geometry::{CurveSegment, Path};
use crate::math::compare::points_almost_equal;
use crate::math::Point2;

use super::select::KeepDecision;
use super::split::Fragment;

/// Stitches kept fragments into closed subpaths of a new path.
///
/// Each chain starts at the first unused fragment and repeatedly appends the
/// fragment starting where the chain ends. When none does, a fragment ending
/// there is appended reversed. A chain is closed once it returns to its
/// start, or when no fragment continues it.
#[must_use]
pub fn assemble_result(fragments: &[(Fragment, KeepDecision)], join_tolerance: f64) -> Path {
    let mut remaining: Vec<Vec<CurveSegment>> = fragments
        .iter()
        .filter_map(|(frag, decision)| match decision {
            KeepDecision::Keep => Some(frag.curves.clone()),
            KeepDecision::KeepReversed => Some(frag.reversed().curves),
            KeepDecision::Discard => None,
        })
        .filter(|curves| !curves.is_empty())
        .collect();
    remaining.reverse();

    let mut path = Path::new();
    while let Some(mut chain) = remaining.pop() {
        let Some(start) = chain.first().map(CurveSegment::start) else {
            continue;
        };
        while let Some(end) = chain.last().map(CurveSegment::end) {
            if points_almost_equal(&end, &start, join_tolerance) {
                break;
            }
            let next = take_continuation(&mut remaining, &end, join_tolerance);
            match next {
                Some(curves) => chain.extend(curves),
                None => break,
            }
        }

        path.move_to(start);
        for curve in &chain {
            path.append_curve(curve);
        }
        path.close_path();
    }
    path
}

/// Removes and returns the earliest fragment continuing a chain at `end`.
fn take_continuation(
    remaining: &mut Vec<Vec<CurveSegment>>,
    end: &Point2,
    tolerance: f64,
) -> Option<Vec<CurveSegment>> {
    let starts_here = |c: &Vec<CurveSegment>| {
        c.first()
            .is_some_and(|f| points_almost_equal(&f.start(), end, tolerance))
    };
    if let Some(i) = remaining.iter().rposition(starts_here) {
        return Some(remaining.remove(i));
    }

    let ends_here = |c: &Vec<CurveSegment>| {
        c.last()
            .is_some_and(|l| points_almost_equal(&l.end(), end, tolerance))
    };
    let i = remaining.iter().rposition(ends_here)?;
    Some(
        remaining
            .remove(i)
            .iter()
            .rev()
            .map(CurveSegment::reversed)
            .collect(),
    )
}
