//! Vector, matrix and quaternion helpers on top of `cgmath`.
//!
//! Matrices are addressed row-major through [`element`], with the
//! translation held in column 3. Normalisation of zero-length values is
//! refused instead of producing NaNs.

use cgmath::{Deg, InnerSpace, Matrix4, Quaternion, Rad, Vector3, Vector4};

pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat4 = Matrix4<f64>;
pub type Quat = Quaternion<f64>;

pub const ZERO: Vec3 = Vec3 {
    x: 0.,
    y: 0.,
    z: 0.,
};

pub fn to_degrees(rad: f64) -> f64 {
    Deg::from(Rad(rad)).0
}

pub fn to_radians(deg: f64) -> f64 {
    Rad::from(Deg(deg)).0
}

pub fn vec_to_degrees(v: Vec3) -> Vec3 {
    v.map(to_degrees)
}

pub fn vec_to_radians(v: Vec3) -> Vec3 {
    v.map(to_radians)
}

/// Unit vector in the direction of `v`, or `None` for a zero vector.
pub fn try_normalize(v: Vec3) -> Option<Vec3> {
    let len = v.magnitude();
    if len == 0. || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// Row-major element access. Panics on an index past 3.
pub fn element(m: &Mat4, row: usize, col: usize) -> f64 {
    assert!(
        row < 4 && col < 4,
        "matrix subscript ({}, {}) out of bounds",
        row,
        col
    );
    m[col][row]
}

/// Multiplies a point by `m`, picking up the translation column.
pub fn transform(m: &Mat4, v: Vec3) -> Vec3 {
    (*m * v.extend(1.)).truncate()
}

pub fn normalized(q: Quat) -> Option<Quat> {
    let mag = q.magnitude();
    if mag == 0. || !mag.is_finite() {
        None
    } else {
        Some(q / mag)
    }
}

/// Hamilton product, normalised afterwards.
pub fn hamilton(a: Quat, b: Quat) -> Option<Quat> {
    normalized(a * b)
}

/// `p * q * p^-1`
pub fn rotate(q: Quat, p: Quat) -> Option<Quat> {
    let norm2 = p.magnitude2();
    if norm2 == 0. || !norm2.is_finite() {
        return None;
    }
    let inverse = p.conjugate() / norm2;
    Some(p * q * inverse)
}

/// Rotates a vector by a unit quaternion.
pub fn rotate_vector(p: Quat, v: Vec3) -> Option<Vec3> {
    rotate(Quat::from_sv(0., v), p).map(|q| q.v)
}

pub fn to_matrix(q: Quat) -> Mat4 {
    Mat4::from(q)
}

/// Euler angles (radians) composed as `qx * qy * qz`.
pub fn from_euler_xyz(angles: Vec3) -> Quat {
    let (sx, cx) = (angles.x * 0.5).sin_cos();
    let (sy, cy) = (angles.y * 0.5).sin_cos();
    let (sz, cz) = (angles.z * 0.5).sin_cos();
    Quat::new(
        cx * cy * cz - sx * sy * sz,
        sx * cy * cz + cx * sy * sz,
        cx * sy * cz - sx * cy * sz,
        cx * cy * sz + sx * sy * cz,
    )
}

/// Inverse of [`from_euler_xyz`], radians.
pub fn to_euler_xyz(q: Quat) -> Vec3 {
    let (n, Vec3 { x, y, z }) = (q.s, q.v);
    Vec3::new(
        -(2. * y * z - 2. * n * x).atan2(1. - 2. * x * x - 2. * y * y),
        clamp_unit(2. * n * y + 2. * x * z).asin(),
        -(2. * x * y - 2. * n * z).atan2(1. - 2. * y * y - 2. * z * z),
    )
}

/// Angles (radians) of a rotation composed as `qz * qx * qy`.
pub fn to_euler_zxy(q: Quat) -> Vec3 {
    let (n, Vec3 { x, y, z }) = (q.s, q.v);
    Vec3::new(
        clamp_unit(2. * n * x + 2. * y * z).asin(),
        -(2. * x * z - 2. * n * y).atan2(1. - 2. * x * x - 2. * y * y),
        -(2. * x * y - 2. * n * z).atan2(1. - 2. * x * x - 2. * z * z),
    )
}

// rounding can push |sin| a hair past 1
fn clamp_unit(v: f64) -> f64 {
    v.max(-1.).min(1.)
}
