use crate::operations::winding::PointClassification;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Intersection,
    /// First operand minus the second.
    Difference,
    /// Symmetric difference, evaluated as `(A - B) ∪ (B - A)`.
    Xor,
}

/// Which operand a fragment was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    A,
    B,
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepReversed,
    Discard,
}

/// Determines whether a fragment should be kept based on its classification
/// relative to the other path and the boolean operation.
///
/// | Fragment | vs other path | Union   | Difference (A-B) | Intersection |
/// |----------|---------------|---------|------------------|--------------|
/// | from A   | OUTSIDE B     | keep    | keep             | discard      |
/// | from A   | INSIDE B      | discard | discard          | keep         |
/// | from B   | OUTSIDE A     | keep    | discard          | discard      |
/// | from B   | INSIDE A      | discard | keep (reversed)  | keep         |
///
/// Xor is run as two differences with the operands swapped, so it follows
/// the difference column.
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_fragment(
    source: PathSource,
    classification: PointClassification,
    op: BooleanOp,
) -> KeepDecision {
    use BooleanOp::{Difference, Intersection, Union, Xor};
    use PointClassification::{Inside, OnBoundary, Outside};

    match (source, classification, op) {
        // Fragment from A, classified vs B
        (PathSource::A, Outside, Union | Difference | Xor) => KeepDecision::Keep,
        (PathSource::A, Outside, Intersection) => KeepDecision::Discard,

        (PathSource::A, Inside, Union | Difference | Xor) => KeepDecision::Discard,
        (PathSource::A, Inside, Intersection) => KeepDecision::Keep,

        // Fragment from B, classified vs A
        (PathSource::B, Outside, Union) => KeepDecision::Keep,
        (PathSource::B, Outside, Difference | Xor) => KeepDecision::Discard,
        (PathSource::B, Outside, Intersection) => KeepDecision::Discard,

        (PathSource::B, Inside, Union) => KeepDecision::Discard,
        (PathSource::B, Inside, Difference | Xor) => KeepDecision::KeepReversed,
        (PathSource::B, Inside, Intersection) => KeepDecision::Keep,

        // Shared edges are emitted once, from A. The engine refines A's
        // choice with `should_keep_shared_edge` when it can tell the sides.
        (PathSource::A, OnBoundary, _) => KeepDecision::Keep,
        (PathSource::B, OnBoundary, _) => KeepDecision::Discard,
    }
}

/// Decision for a fragment of A that runs along B's boundary.
///
/// `same_side` tells whether B fills the same side of the shared edge as A.
///
/// | B fills        | Union   | Intersection | Difference / Xor |
/// |----------------|---------|--------------|------------------|
/// | A's side       | keep    | keep         | discard          |
/// | the other side | discard | discard      | keep             |
///
/// B's copy of the edge is always discarded, so the edge appears once.
#[must_use]
pub fn should_keep_shared_edge(same_side: bool, op: BooleanOp) -> KeepDecision {
    match (same_side, op) {
        (true, BooleanOp::Union | BooleanOp::Intersection)
        | (false, BooleanOp::Difference | BooleanOp::Xor) => KeepDecision::Keep,
        _ => KeepDecision::Discard,
    }
}
