use std::collections::HashMap;

use tracing::debug;

use crate::geometry::{FillRule, Path, Segment};

use super::engine::boolean_execute;
use super::select::BooleanOp;
use super::BooleanParams;

/// Structural identity of a path: segment tags, quantized coordinates,
/// fill rule and transform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Fingerprint(Vec<i64>);

impl Fingerprint {
    fn of(path: &Path, quantum: f64) -> Self {
        let q = |v: f64| quantize(v, quantum);
        let mut words = Vec::with_capacity(path.len() * 7 + 8);
        for seg in path.segments() {
            match seg {
                Segment::Move(p) => words.extend([0, q(p.x), q(p.y)]),
                Segment::Line(p) => words.extend([1, q(p.x), q(p.y)]),
                Segment::Quadratic { point, control } => {
                    words.extend([2, q(control.x), q(control.y), q(point.x), q(point.y)]);
                }
                Segment::Cubic {
                    point,
                    control1,
                    control2,
                } => words.extend([
                    3,
                    q(control1.x),
                    q(control1.y),
                    q(control2.x),
                    q(control2.y),
                    q(point.x),
                    q(point.y),
                ]),
                Segment::Close => words.push(4),
            }
        }
        words.push(match path.fill_rule() {
            FillRule::NonZero => 0,
            FillRule::EvenOdd => 1,
        });
        words.extend(path.transform().matrix().iter().map(|v| q(*v)));
        Self(words)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64, quantum: f64) -> i64 {
    (value / quantum).round() as i64
}

type CacheKey = (Fingerprint, Fingerprint, BooleanOp);

/// Memoizes boolean results keyed by the structure of both operands.
///
/// Paths are compared by quantized coordinates, so operands equal up to the
/// quantum share an entry. The cache never observes path mutation: evict a
/// path before changing it, or `clear` the cache.
#[derive(Debug)]
pub struct BooleanCache {
    entries: HashMap<CacheKey, Path>,
    quantum: f64,
    params: BooleanParams,
}

impl Default for BooleanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanCache {
    /// Creates an empty cache with a quantum of `1e-9` and default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            quantum: 1e-9,
            params: BooleanParams::default(),
        }
    }

    /// Sets the coordinate quantum. Non-positive values are ignored.
    #[must_use]
    pub fn with_quantum(mut self, quantum: f64) -> Self {
        if quantum > 0.0 {
            self.quantum = quantum;
            self.entries.clear();
        }
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: BooleanParams) -> Self {
        self.params = params;
        self.entries.clear();
        self
    }

    /// Returns the cached result of `a op b`, computing it on a miss.
    pub fn get_or_compute(&mut self, a: &Path, b: &Path, op: BooleanOp) -> Path {
        let key = (
            Fingerprint::of(a, self.quantum),
            Fingerprint::of(b, self.quantum),
            op,
        );
        if let Some(hit) = self.entries.get(&key) {
            debug!(?op, entries = self.entries.len(), "boolean cache hit");
            return hit.clone();
        }
        debug!(?op, entries = self.entries.len(), "boolean cache miss");
        let result = boolean_execute(a, b, op, &self.params);
        self.entries.insert(key, result.clone());
        result
    }

    /// Drops every entry that has `path` as an operand. Returns how many
    /// entries were removed.
    pub fn evict(&mut self, path: &Path) -> usize {
        let print = Fingerprint::of(path, self.quantum);
        let before = self.entries.len();
        self.entries
            .retain(|(a, b, _), _| *a != print && *b != print);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn square(x: f64, y: f64, size: f64) -> Path {
        Path::from_points(
            &[
                Point2::new(x, y),
                Point2::new(x + size, y),
                Point2::new(x + size, y + size),
                Point2::new(x, y + size),
            ],
            true,
        )
    }

    #[test]
    fn repeated_queries_hit() {
        let a = square(0.0, 0.0, 100.0);
        let b = square(50.0, 50.0, 100.0);
        let mut cache = BooleanCache::new();

        let first = cache.get_or_compute(&a, &b, BooleanOp::Union);
        assert_eq!(cache.len(), 1);
        let second = cache.get_or_compute(&a, &b, BooleanOp::Union);
        assert_eq!(cache.len(), 1);
        assert_eq!(first.segments(), second.segments());

        cache.get_or_compute(&a, &b, BooleanOp::Intersection);
        cache.get_or_compute(&b, &a, BooleanOp::Union);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn nearly_equal_operands_share_an_entry() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let mut cache = BooleanCache::new().with_quantum(1e-3);
        cache.get_or_compute(&a, &b, BooleanOp::Difference);
        cache.get_or_compute(&square(1e-5, 0.0, 10.0), &b, BooleanOp::Difference);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn style_is_part_of_the_key() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let even_odd = a.clone().with_fill_rule(FillRule::EvenOdd);
        let mut cache = BooleanCache::new();
        cache.get_or_compute(&a, &b, BooleanOp::Union);
        cache.get_or_compute(&even_odd, &b, BooleanOp::Union);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evict_and_clear() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let c = square(20.0, 20.0, 10.0);
        let mut cache = BooleanCache::new();
        cache.get_or_compute(&a, &b, BooleanOp::Union);
        cache.get_or_compute(&b, &c, BooleanOp::Union);
        cache.get_or_compute(&a, &c, BooleanOp::Xor);

        assert_eq!(cache.evict(&c), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.evict(&c), 0);

        cache.clear();
        assert!(cache.is_empty());
    }
}
