use crate::geometry::CurveSegment;
use crate::math::Point2;

use super::select::PathSource;

/// Cuts closer than this in parameter space (or to a curve end) collapse.
const PARAM_SNAP: f64 = 1e-9;

/// A cut position on a closed subpath: local curve index, parameter, and the
/// exact point both operands agree on.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cut {
    pub index: usize,
    pub t: f64,
    pub point: Point2,
}

/// A run of a path's boundary between two consecutive cuts.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub curves: Vec<CurveSegment>,
    pub source: PathSource,
}

impl Fragment {
    /// Returns `None` for a fragment without curves.
    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        self.curves.first().map(CurveSegment::start)
    }

    #[must_use]
    pub fn end(&self) -> Option<Point2> {
        self.curves.last().map(CurveSegment::end)
    }

    /// A point in the interior of the fragment, used to classify it.
    #[must_use]
    pub fn midpoint(&self) -> Option<Point2> {
        self.curves
            .get(self.curves.len() / 2)
            .map(|c| c.evaluate(0.5))
    }

    /// The fragment traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            curves: self.curves.iter().rev().map(CurveSegment::reversed).collect(),
            source: self.source,
        }
    }
}

/// Splits a closed subpath into fragments at `cuts`.
///
/// Parameters at a curve end are moved to the start of the following curve,
/// wrapping around the subpath. Pieces meeting at a cut are snapped to the
/// cut point. The run after the last cut continues into the run before the
/// first, so every fragment starts and ends at a cut. Without cuts the whole
/// subpath is a single fragment.
pub(super) fn split_subpath(
    curves: &[CurveSegment],
    cuts: &[Cut],
    source: PathSource,
) -> Vec<Fragment> {
    let cuts = normalize_cuts(cuts, curves.len());
    if cuts.is_empty() {
        return vec![Fragment {
            curves: curves.to_vec(),
            source,
        }];
    }

    let mut runs: Vec<Vec<CurveSegment>> = vec![Vec::new()];
    let mut pending_start: Option<Point2> = None;
    let mut cut_iter = cuts.iter().peekable();

    for (k, curve) in curves.iter().enumerate() {
        let mut prev = 0.0;
        while let Some(cut) = cut_iter.next_if(|c| c.index == k) {
            if cut.t > prev + PARAM_SNAP {
                let piece = curve.subsegment(prev, cut.t);
                push_piece(&mut runs, &mut pending_start, piece);
            }
            if let Some(last) = runs.last_mut().and_then(|run| run.last_mut()) {
                *last = last.with_end(cut.point);
            }
            runs.push(Vec::new());
            pending_start = Some(cut.point);
            prev = cut.t;
        }
        let piece = if prev > 0.0 {
            curve.subsegment(prev, 1.0)
        } else {
            *curve
        };
        push_piece(&mut runs, &mut pending_start, piece);
    }

    // The tail run closes back into the head run.
    if runs.len() > 1 {
        if let Some(mut tail) = runs.pop() {
            tail.append(&mut runs[0]);
            runs[0] = tail;
        }
    }

    runs.into_iter()
        .filter(|run| !run.is_empty())
        .map(|curves| Fragment { curves, source })
        .collect()
}

fn push_piece(
    runs: &mut [Vec<CurveSegment>],
    pending_start: &mut Option<Point2>,
    piece: CurveSegment,
) {
    let piece = match pending_start.take() {
        Some(p) => piece.with_start(p),
        None => piece,
    };
    if let Some(run) = runs.last_mut() {
        run.push(piece);
    }
}

fn normalize_cuts(cuts: &[Cut], n: usize) -> Vec<Cut> {
    if n == 0 {
        return Vec::new();
    }
    let mut out: Vec<Cut> = cuts
        .iter()
        .filter(|c| c.index < n)
        .map(|c| {
            if c.t >= 1.0 - PARAM_SNAP {
                Cut {
                    index: (c.index + 1) % n,
                    t: 0.0,
                    point: c.point,
                }
            } else if c.t <= PARAM_SNAP {
                Cut { t: 0.0, ..*c }
            } else {
                *c
            }
        })
        .collect();
    out.sort_by(|a, b| {
        a.index
            .cmp(&b.index)
            .then(a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal))
    });
    out.dedup_by(|b, a| a.index == b.index && (b.t - a.t).abs() < PARAM_SNAP);
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<CurveSegment> {
        let corners = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
        (0..4)
            .map(|i| CurveSegment::Line {
                start: corners[i],
                end: corners[(i + 1) % 4],
            })
            .collect()
    }

    #[test]
    fn no_cuts_yield_whole_subpath() {
        let frags = split_subpath(&square(), &[], PathSource::A);
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].curves.len(), 4);
    }

    #[test]
    fn two_cuts_yield_two_fragments_meeting_at_cuts() {
        let cuts = [
            Cut {
                index: 1,
                t: 0.5,
                point: pt(10.0, 5.0),
            },
            Cut {
                index: 3,
                t: 0.5,
                point: pt(0.0, 5.0),
            },
        ];
        let frags = split_subpath(&square(), &cuts, PathSource::B);
        assert_eq!(frags.len(), 2);

        // First fragment wraps around through the first corner.
        assert_eq!(frags[0].start(), Some(pt(0.0, 5.0)));
        assert_eq!(frags[0].end(), Some(pt(10.0, 5.0)));
        assert_eq!(frags[0].curves.len(), 3);

        assert_eq!(frags[1].start(), Some(pt(10.0, 5.0)));
        assert_eq!(frags[1].end(), Some(pt(0.0, 5.0)));
        assert!(frags.iter().all(|f| f.source == PathSource::B));
    }

    #[test]
    fn cut_at_curve_end_moves_to_next_vertex() {
        let cuts = [
            Cut {
                index: 0,
                t: 1.0,
                point: pt(10.0, 0.0),
            },
            Cut {
                index: 2,
                t: 1.0,
                point: pt(0.0, 10.0),
            },
        ];
        let frags = split_subpath(&square(), &cuts, PathSource::A);
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].start(), Some(pt(0.0, 10.0)));
        assert_eq!(frags[0].end(), Some(pt(10.0, 0.0)));
        assert_eq!(frags[0].curves.len(), 2);
        assert_eq!(frags[1].start(), Some(pt(10.0, 0.0)));
        assert_eq!(frags[1].curves.len(), 2);
    }

    #[test]
    fn duplicate_cuts_collapse() {
        let cut = Cut {
            index: 0,
            t: 0.25,
            point: pt(2.5, 0.0),
        };
        let frags = split_subpath(&square(), &[cut, cut], PathSource::A);
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].curves.len(), 5);
        assert_eq!(frags[0].start(), frags[0].end());
    }

    #[test]
    fn fragment_reversal_and_midpoint() {
        let frag = Fragment {
            curves: square(),
            source: PathSource::A,
        };
        let rev = frag.reversed();
        assert_eq!(rev.start(), frag.end());
        assert_eq!(rev.curves[0].end(), pt(0.0, 10.0));
        let mid = frag.midpoint().unwrap_or(pt(0.0, 0.0));
        assert_abs_diff_eq!(mid, pt(5.0, 10.0), epsilon = 1e-12);
    }
}
