//! Rotation and vector algebra.
//!
//! All quaternions are in (w, x, y, z) order and multiply with the Hamilton
//! convention. Every function here is pure and allocation-free.

use std::ops::{Add, Mul, Neg, Sub};

use crate::types::{Quaternion, Vector3};

/// Threshold below which a divisor is treated as zero.
pub const NEARLY_ZERO: f64 = f64::EPSILON;

pub fn is_nearly_zero(x: f64) -> bool {
    x.abs() <= NEARLY_ZERO
}

// ===== Vector =====

pub fn add(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

pub fn subtract(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

pub fn scale(v: Vector3, s: f64) -> Vector3 {
    Vector3::new(v.x * s, v.y * s, v.z * s)
}

pub fn dot(a: Vector3, b: Vector3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn length_squared(v: Vector3) -> f64 {
    dot(v, v)
}

pub fn length(v: Vector3) -> f64 {
    length_squared(v).sqrt()
}

/// Scale `v` to unit length.
///
/// The caller guarantees a non-zero vector; a zero input yields NaN components.
pub fn normalize(v: Vector3) -> Vector3 {
    let r = length(v);
    Vector3::new(v.x / r, v.y / r, v.z / r)
}

pub fn divide_by_scalar_with_default(v: Vector3, divisor: f64, default: Vector3) -> Vector3 {
    if is_nearly_zero(divisor) {
        default
    } else {
        Vector3::new(v.x / divisor, v.y / divisor, v.z / divisor)
    }
}

/// Normalize, falling back to `default` for a zero-length vector.
/// Returns the normalized vector together with the original length.
pub fn normalize_with_default(v: Vector3, default: Vector3) -> (Vector3, f64) {
    let len = length(v);
    (divide_by_scalar_with_default(v, len, default), len)
}

pub fn min_component(v: Vector3) -> f64 {
    v.x.min(v.y).min(v.z)
}

pub fn max_component(v: Vector3) -> f64 {
    v.x.max(v.y).max(v.z)
}

pub fn min_vector(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

pub fn max_vector(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Angle between two vectors in radians, 0 if either has zero length.
pub fn radians_between(a: Vector3, b: Vector3) -> f64 {
    let divisor = length(a) * length(b);
    if is_nearly_zero(divisor) {
        return 0.0;
    }
    // Clamp so rounding on parallel vectors does not push acos out of domain
    (dot(a, b) / divisor).clamp(-1.0, 1.0).acos()
}

// ===== Quaternion =====

/// Hamilton product `a * b`. Not commutative.
pub fn multiply_quaternions(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
        a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
    )
}

pub fn conjugate(q: Quaternion) -> Quaternion {
    Quaternion::new(q.w, -q.x, -q.y, -q.z)
}

/// Rotate `v` by `q`: vector part of `q * (0, v) * conjugate(q)`.
pub fn rotate_vector(v: Vector3, q: Quaternion) -> Vector3 {
    let rotated = multiply_quaternions(
        multiply_quaternions(q, Quaternion::from_vector(v)),
        conjugate(q),
    );
    rotated.vector_part()
}

/// Rotate `v` by the inverse of a unit quaternion: `conjugate(q) * (0, v) * q`.
pub fn clockwise_rotate(q: Quaternion, v: Vector3) -> Vector3 {
    rotate_vector(v, conjugate(q))
}

pub fn magnitude(q: Quaternion) -> f64 {
    (q.w * q.w + q.x * q.x + q.y * q.y + q.z * q.z).sqrt()
}

pub fn normalize_quaternion_with_default(
    q: Quaternion,
    default: Quaternion,
) -> (Quaternion, f64) {
    let m = magnitude(q);
    if is_nearly_zero(m) {
        (default, m)
    } else {
        (Quaternion::new(q.w / m, q.x / m, q.y / m, q.z / m), m)
    }
}

/// Linear blend of two quaternions, renormalized. Identity if the blend collapses.
pub fn normalized_lerp(a: Quaternion, b: Quaternion, u: f64) -> Quaternion {
    let s = 1.0 - u;
    let blended = Quaternion::new(
        a.w * s + b.w * u,
        a.x * s + b.x * u,
        a.y * s + b.y * u,
        a.z * s + b.z * u,
    );
    normalize_quaternion_with_default(blended, Quaternion::IDENTITY).0
}

pub fn is_valid(q: Quaternion) -> bool {
    q.w.is_finite() && q.x.is_finite() && q.y.is_finite() && q.z.is_finite()
}

/// Unit quaternion for a rotation of `radians` about `axis` (need not be unit length).
pub fn from_axis_angle(axis: Vector3, radians: f64) -> Quaternion {
    let (unit, _) = normalize_with_default(axis, Vector3::ZERO);
    let (sin_half, cos_half) = (radians * 0.5).sin_cos();
    Quaternion::new(cos_half, unit.x * sin_half, unit.y * sin_half, unit.z * sin_half)
}

// ===== Operators =====

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        subtract(self, rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        scale(self, -1.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        scale(self, rhs)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        multiply_quaternions(self, rhs)
    }
}
