use glam::Vec3;

use super::surface::ParametricSurface;

/// Above this |n·Y| the Y reference axis is considered too close to the normal.
const AXIS_SWITCH: f32 = 0.99;

/// Builds two unit tangents orthogonal to `normal` and to each other.
///
/// Gram-Schmidt against a reference axis: `Y` unless the normal is nearly
/// parallel to it, in which case `X`. The second tangent is `n × t1`, so
/// `(t1, t2, n)` is right-handed.
pub fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let n = normal.normalize();
    let reference = if n.dot(Vec3::Y).abs() > AXIS_SWITCH {
        Vec3::X
    } else {
        Vec3::Y
    };
    let t1 = (reference - n * n.dot(reference)).normalize();
    let t2 = n.cross(t1);
    (t1, t2)
}

/// Point, normal and tangent directions of a surface at one parameter pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFrame {
    pub point: Vec3,
    pub normal: Vec3,
    pub tangent_u: Vec3,
    pub tangent_v: Vec3,
}

impl SurfaceFrame {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        let (tangent_u, tangent_v) = tangent_frame(normal);
        Self {
            point,
            normal,
            tangent_u,
            tangent_v,
        }
    }

    pub fn on<S: ParametricSurface + ?Sized>(surface: &S, u: f32, v: f32) -> Self {
        Self::new(surface.position(u, v), surface.normal(u, v))
    }

    /// Unit tangent at angle `theta` from `tangent_u` towards `tangent_v`.
    pub fn direction(&self, theta: f32) -> Vec3 {
        let (s, c) = theta.sin_cos();
        self.tangent_u * c + self.tangent_v * s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Sphere, Torus};
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{PI, TAU};

    fn assert_orthonormal(n: Vec3) {
        let (t1, t2) = tangent_frame(n);
        let n = n.normalize();
        assert_abs_diff_eq!(t1.length(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t2.length(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t1.dot(n), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t2.dot(n), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t1.dot(t2), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn frame_is_orthonormal_over_the_sphere() {
        let sphere = Sphere;
        for i in 0..=24 {
            for j in 0..32 {
                let u = PI * i as f32 / 24.0;
                let v = TAU * j as f32 / 32.0;
                assert_orthonormal(sphere.normal(u, v));
            }
        }
    }

    #[test]
    fn frame_handles_reference_axis_alignment() {
        assert_orthonormal(Vec3::Y);
        assert_orthonormal(-Vec3::Y);
        assert_orthonormal(Vec3::new(0.01, 1.0, 0.0));
        assert_orthonormal(Vec3::X);
        assert_orthonormal(Vec3::Z);
    }

    #[test]
    fn frame_accepts_unnormalized_normals() {
        let frame = SurfaceFrame::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_abs_diff_eq!(frame.normal.length(), 1.0, epsilon = 1e-6);
        assert!((frame.tangent_u.cross(frame.tangent_v) - frame.normal).length() < 1e-5);
    }

    #[test]
    fn direction_sweeps_the_tangent_plane() {
        let frame = SurfaceFrame::on(&Torus::default(), 0.4, 1.3);
        for k in 0..16 {
            let d = frame.direction(TAU * k as f32 / 16.0);
            assert_abs_diff_eq!(d.length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(d.dot(frame.normal), 0.0, epsilon = 1e-5);
        }
    }
}
