use std::f64::consts::TAU;

use super::compare::{is_almost_equal, is_almost_zero};
use super::TOLERANCE;

/// Real roots of `a·x² + b·x + c = 0`.
///
/// Degenerates to the linear case when `a ≈ 0`. Uses the
/// `q = -(b + sign(b)·√disc) / 2` form so neither root suffers from
/// cancellation. A double root (or two roots within [`TOLERANCE`]) is
/// reported once.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if is_almost_zero(a, TOLERANCE) {
        if is_almost_zero(b, TOLERANCE) {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let disc = b * b - 4.0 * a * c;
    if is_almost_zero(disc, TOLERANCE) {
        return vec![-b / (2.0 * a)];
    }
    if disc < 0.0 {
        return Vec::new();
    }

    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let r1 = q / a;
    let r2 = c / q;
    if is_almost_equal(r1, r2, TOLERANCE) {
        vec![r1]
    } else {
        vec![r1, r2]
    }
}

/// Real roots of `a·x³ + b·x² + c·x + d = 0`.
///
/// Coefficients are first scaled down by the largest magnitude when it
/// exceeds 1. The monic cubic is reduced to the depressed form
/// `y³ + p·y + q = 0`, whose discriminant `q²/4 + p³/27` selects between
/// Cardano's single root, a double root, or three roots via the
/// trigonometric method.
///
/// Roots are not filtered to `[0, 1]`; range checks belong to the caller.
#[must_use]
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    let (a, b, c, d) = if scale > 1.0 {
        (a / scale, b / scale, c / scale, d / scale)
    } else {
        (a, b, c, d)
    };

    if is_almost_zero(a, TOLERANCE) {
        return solve_quadratic(b, c, d);
    }

    let (b, c, d) = (b / a, c / a, d / a);
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let offset = -b / 3.0;

    if is_almost_zero(p, TOLERANCE) {
        return vec![(-q).cbrt() + offset];
    }

    if is_almost_zero(q, TOLERANCE) {
        // y·(y² + p) = 0
        if p < 0.0 {
            let r = (-p).sqrt();
            return vec![offset - r, offset, offset + r];
        }
        return vec![offset];
    }

    let disc = q * q / 4.0 + p * p * p / 27.0;

    if is_almost_zero(disc, TOLERANCE) {
        let u = (-q / 2.0).cbrt();
        return vec![2.0 * u + offset, -u + offset];
    }

    if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        let u = (-q / 2.0 + sqrt_disc).cbrt();
        let v = (-q / 2.0 - sqrt_disc).cbrt();
        return vec![u + v + offset];
    }

    // Three distinct real roots; p < 0 here.
    let r = 2.0 * (-p / 3.0).sqrt();
    let cos_arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
    let phi = cos_arg.acos() / 3.0;
    (0..3_i32)
        .map(|k| r * (phi - TAU * f64::from(k) / 3.0).cos() + offset)
        .collect()
}
