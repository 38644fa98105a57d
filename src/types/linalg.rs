//! Interop with the linear algebra crates used by rendering and fusion code.
//!
//! Conversions are lossless: both `nalgebra` and `glam` types are f64 here.

use super::{Quaternion, Vector3};

pub type NaVector3 = nalgebra::Vector3<f64>;
pub type NaQuaternion = nalgebra::Quaternion<f64>;
pub type NaUnitQuaternion = nalgebra::UnitQuaternion<f64>;

// ===== nalgebra =====

impl From<Vector3> for NaVector3 {
    fn from(v: Vector3) -> Self {
        NaVector3::new(v.x, v.y, v.z)
    }
}

impl From<NaVector3> for Vector3 {
    fn from(v: NaVector3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Quaternion> for NaQuaternion {
    fn from(q: Quaternion) -> Self {
        NaQuaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<NaQuaternion> for Quaternion {
    fn from(q: NaQuaternion) -> Self {
        let imag = q.imag();
        Quaternion::new(q.scalar(), imag.x, imag.y, imag.z)
    }
}

impl From<NaUnitQuaternion> for Quaternion {
    fn from(q: NaUnitQuaternion) -> Self {
        q.into_inner().into()
    }
}

// ===== glam =====

impl From<Vector3> for glam::DVec3 {
    fn from(v: Vector3) -> Self {
        glam::DVec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::DVec3> for Vector3 {
    fn from(v: glam::DVec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Quaternion> for glam::DQuat {
    fn from(q: Quaternion) -> Self {
        glam::DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<glam::DQuat> for Quaternion {
    fn from(q: glam::DQuat) -> Self {
        let [x, y, z, w] = q.to_array();
        Quaternion::new(w, x, y, z)
    }
}
