//! Geodesics and normal sections on the surfaces with closed forms.

use std::f32::consts::TAU;

use glam::Vec3;

use super::surface::{Cylinder, ParametricSurface, PrincipalCurvatures, Sphere};

/// Cylinder sections rising faster than this (`r·|tan θ| / h`) are sampled by height.
const STEEP_SLOPE: f32 = 2.0;

/// Point at arc length `s` on the great circle through `point` with unit tangent `direction`.
pub fn great_circle_point(point: Vec3, direction: Vec3, s: f32) -> Vec3 {
    let (sin, cos) = s.sin_cos();
    point * cos + direction * sin
}

/// Closed great circle sampled at `samples` points, starting at `point`.
pub fn great_circle(point: Vec3, direction: Vec3, samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| great_circle_point(point, direction, TAU * i as f32 / samples as f32))
        .collect()
}

/// Circle of constant polar angle on the unit sphere.
pub fn latitude_circle(polar: f32, samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| Sphere.position(polar, TAU * i as f32 / samples as f32))
        .collect()
}

/// Geodesic curvature of a latitude circle; zero only on the equator.
pub fn latitude_geodesic_curvature(polar: f32) -> f32 {
    polar.cos() / polar.sin()
}

/// Curvature of the circle through three points (Menger curvature).
pub fn curvature_through(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let ab = b - a;
    let bc = c - b;
    let ca = a - c;
    let denom = ab.length() * bc.length() * ca.length();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    2.0 * ab.cross(-ca).length() / denom
}

/// Signed geodesic curvature at `b` of a curve sampled at equal arc steps `a, b, c`
/// on a surface with unit normal `normal` at `b`.
///
/// The second difference is the curvature vector; its part along `normal × T` is κ_g.
pub fn geodesic_curvature_through(a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> f32 {
    let chord = c - a;
    let step = 0.5 * chord.length();
    if step <= f32::EPSILON {
        return 0.0;
    }
    let tangent = chord / (2.0 * step);
    let curvature = (a - 2.0 * b + c) / (step * step);
    curvature.dot(normal.cross(tangent))
}

/// Intersection of a surface with the plane spanned by the normal at `(u, v)`
/// and the tangent `cos θ · e₁ + sin θ · e₂`.
///
/// Samples that leave the finite surface are `None`, so the result may have gaps.
pub trait NormalSection: PrincipalCurvatures {
    fn normal_section(&self, u: f32, v: f32, theta: f32, samples: usize) -> Vec<Option<Vec3>>;
}

impl NormalSection for Sphere {
    fn normal_section(&self, u: f32, v: f32, theta: f32, samples: usize) -> Vec<Option<Vec3>> {
        let (e1, e2) = self.principal_directions(u, v);
        let (s, c) = theta.sin_cos();
        great_circle(self.position(u, v), e1 * c + e2 * s, samples)
            .into_iter()
            .map(Some)
            .collect()
    }
}

impl NormalSection for Cylinder {
    fn normal_section(&self, u: f32, v: f32, theta: f32, samples: usize) -> Vec<Option<Vec3>> {
        let n = self.normal(u, v);
        let (e1, e2) = self.principal_directions(u, v);
        let (sin_t, cos_t) = theta.sin_cos();
        let r = self.radius;

        if r * sin_t.abs() > STEEP_SLOPE * self.half_height * cos_t.abs() {
            return self.steep_section(u, v, theta, samples);
        }

        let axis = Vec3::new(0.0, 0.0, v);
        let rise = sin_t / cos_t;
        (0..samples)
            .map(|i| {
                let (sa, ca) = (TAU * i as f32 / samples as f32).sin_cos();
                let q = axis + n * (r * ca) + e1 * (r * sa) + e2 * (r * sa * rise);
                (q.z.abs() <= self.half_height).then_some(q)
            })
            .collect()
    }
}

impl Cylinder {
    /// Steep sections split into a near and a far arc, each sampled uniformly in
    /// height so the visible part keeps its resolution up to the axial rulings.
    fn steep_section(&self, u: f32, v: f32, theta: f32, samples: usize) -> Vec<Option<Vec3>> {
        let n = self.normal(u, v);
        let (e1, _) = self.principal_directions(u, v);
        let (sin_t, cos_t) = theta.sin_cos();
        let r = self.radius;
        let h = self.half_height;

        // z = v + r·tan θ·sin α, so sin α = (z - v)·cos θ / (r·sin θ)
        let reach = r * sin_t.abs() / cos_t.abs().max(f32::EPSILON);
        let lo = (v - reach).max(-h);
        let hi = (v + reach).min(h);
        let top_joined = v + reach <= h;
        let bottom_joined = v - reach >= -h;

        let per_arc = (samples / 2).max(2);
        let last = (per_arc - 1) as f32;
        let at = |z: f32, side: f32| {
            let s = ((z - v) * cos_t / (r * sin_t)).clamp(-1.0, 1.0);
            let c = side * (1.0 - s * s).sqrt();
            n * (r * c) + e1 * (r * s) + Vec3::Z * z
        };
        let height = |i: usize| {
            let t = i as f32 / last;
            lo * (1.0 - t) + hi * t
        };

        let mut points = Vec::with_capacity(2 * per_arc + 2);
        points.extend((0..per_arc).map(|i| Some(at(height(i), 1.0))));
        if !top_joined {
            points.push(None);
        }
        points.extend((0..per_arc).rev().map(|i| Some(at(height(i), -1.0))));
        if !bottom_joined {
            points.push(None);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};
    use crate::geometry::mesh::polyline_segments;

    #[test]
    fn great_circle_stays_on_sphere() {
        let p = Sphere.position(1.1, 0.4);
        let (e1, e2) = Sphere.principal_directions(1.1, 0.4);
        let d = (e1 + e2).normalize();
        for q in great_circle(p, d, 64) {
            assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-5);
        }
        // tangent at s = 0 is orthogonal to the normal
        let h = 1e-3;
        let tangent = great_circle_point(p, d, h) - great_circle_point(p, d, -h);
        assert_abs_diff_eq!(tangent.normalize().dot(Sphere.normal(1.1, 0.4)), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn latitude_curvature_vanishes_on_equator() {
        assert_abs_diff_eq!(latitude_geodesic_curvature(FRAC_PI_2), 0.0, epsilon = 1e-6);
        assert_relative_eq!(latitude_geodesic_curvature(FRAC_PI_3), 1.0 / 3f32.sqrt(), epsilon = 1e-5);
        for q in latitude_circle(FRAC_PI_3, 32) {
            assert_abs_diff_eq!(q.z, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn menger_curvature_of_a_circle() {
        let r = 2.0;
        let pts: Vec<Vec3> = (0..3)
            .map(|i| {
                let a = 0.3 * i as f32;
                Vec3::new(r * a.cos(), r * a.sin(), 0.0)
            })
            .collect();
        assert_relative_eq!(curvature_through(pts[0], pts[1], pts[2]), 0.5, epsilon = 1e-4);
        assert_eq!(curvature_through(Vec3::ZERO, Vec3::X, Vec3::X * 2.0), 0.0);
    }

    #[test]
    fn sampled_geodesic_curvature_matches_closed_form() {
        let h = 0.05;
        let polar = FRAC_PI_3;
        let at = |azimuth: f32| Sphere.position(polar, azimuth);
        let normal = Sphere.normal(polar, 1.0);
        let kg = geodesic_curvature_through(at(1.0 - h), at(1.0), at(1.0 + h), normal);
        assert_relative_eq!(kg.abs(), latitude_geodesic_curvature(polar), max_relative = 1e-2);

        let p = Sphere.position(0.4, 2.0);
        let (e1, _) = Sphere.principal_directions(0.4, 2.0);
        let on_circle = |s: f32| great_circle_point(p, e1, s);
        let kg = geodesic_curvature_through(on_circle(-h), p, on_circle(h), p);
        assert_abs_diff_eq!(kg, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn cylinder_section_follows_euler_formula() {
        let cylinder = Cylinder::default();
        let samples = 360;
        for theta in [0.0f32, 0.3, 0.6, 0.9] {
            let section = cylinder.normal_section(0.7, 0.0, theta, samples);
            let (Some(prev), Some(here), Some(next)) =
                (section[samples - 1], section[0], section[1])
            else {
                panic!("section around the base point must be inside the cylinder");
            };
            assert!((here - cylinder.position(0.7, 0.0)).length() < 1e-5);
            let expected = cylinder.normal_curvature(0.7, 0.0, theta);
            assert_relative_eq!(curvature_through(prev, here, next), expected, max_relative = 1e-2);
        }
    }

    #[test]
    fn cylinder_sections_stay_on_the_surface() {
        let cylinder = Cylinder::default();
        let section = cylinder.normal_section(2.0, 0.3, 1.2, 200);
        assert!(section.iter().any(Option::is_none), "steep sections leave the finite cylinder");
        for q in section.into_iter().flatten() {
            assert_abs_diff_eq!(q.truncate().length(), cylinder.radius, epsilon = 1e-5);
            assert!(q.z.abs() <= cylinder.half_height);
        }
    }

    #[test]
    fn axial_section_is_a_pair_of_rulings() {
        let cylinder = Cylinder::default();
        let section = cylinder.normal_section(1.0, 0.0, FRAC_PI_2, 22);
        let base = cylinder.position(1.0, 0.0).truncate();
        assert!(section.iter().flatten().any(|q| (q.truncate() - base).length() < 1e-5));
        for q in section.into_iter().flatten() {
            let near = (q.truncate() - base).length();
            let far = (q.truncate() + base).length();
            assert!(near.min(far) < 1e-5);
        }
        assert!(cylinder.normal_curvature(1.0, 0.0, FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn near_axial_sections_keep_their_length() {
        let cylinder = Cylinder::default();
        let full = 4.0 * cylinder.half_height;
        for offset in [0.2f32, 0.05, 0.01, 0.001, 0.0] {
            let section = cylinder.normal_section(FRAC_PI_4, 0.0, FRAC_PI_2 - offset, 160);
            let segments = polyline_segments(&section, false);
            assert!(!segments.is_empty(), "no section drawn at offset {offset}");
            let length: f32 = segments.iter().map(|[a, b]| a.distance(*b)).sum();
            assert!(length >= full * 0.99, "offset {offset}: length {length}");
            for q in section.into_iter().flatten() {
                assert_abs_diff_eq!(q.truncate().length(), cylinder.radius, epsilon = 1e-5);
                assert!(q.z.abs() <= cylinder.half_height);
            }
        }
    }

    #[test]
    fn sphere_sections_are_unit_circles() {
        let section = Sphere.normal_section(0.8, 2.0, 0.5, 90);
        assert_eq!(section.len(), 90);
        for q in section.into_iter().flatten() {
            assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-5);
        }
    }
}
