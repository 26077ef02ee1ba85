use std::f32::consts::{PI, TAU};

use glam::Vec3;

const FD_STEP: f32 = 1e-3;

/// Rectangular parameter domain `[u.0, u.1] x [v.0, v.1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDomain {
    pub u: (f32, f32),
    pub v: (f32, f32),
}

impl ParamDomain {
    pub const fn new(u: (f32, f32), v: (f32, f32)) -> Self {
        Self { u, v }
    }

    /// Maps normalized coordinates `s, t` in `[0, 1]` onto the domain.
    pub fn at(&self, s: f32, t: f32) -> (f32, f32) {
        (
            self.u.0 + (self.u.1 - self.u.0) * s,
            self.v.0 + (self.v.1 - self.v.0) * t,
        )
    }
}

/// A closed-form map from two parameters to a point in R³.
///
/// Implementors with a known normal should override [`ParametricSurface::normal`];
/// the default uses central differences of `position`.
pub trait ParametricSurface: Send + Sync {
    fn position(&self, u: f32, v: f32) -> Vec3;

    fn domain(&self) -> ParamDomain;

    fn normal(&self, u: f32, v: f32) -> Vec3 {
        let du = (self.position(u + FD_STEP, v) - self.position(u - FD_STEP, v)) / (2.0 * FD_STEP);
        let dv = (self.position(u, v + FD_STEP) - self.position(u, v - FD_STEP)) / (2.0 * FD_STEP);
        du.cross(dv).normalize_or_zero()
    }
}

/// Surfaces with a known shape operator.
///
/// Curvatures are measured against the inward side, so the unit sphere has `(1, 1)`.
pub trait PrincipalCurvatures {
    /// `(κ₁, κ₂)` along the directions returned by `principal_directions`.
    fn principal_curvatures(&self, u: f32, v: f32) -> (f32, f32);

    /// Unit tangents `(e₁, e₂)` with `e₁ × e₂` equal to the surface normal.
    fn principal_directions(&self, u: f32, v: f32) -> (Vec3, Vec3);

    fn gaussian_curvature(&self, u: f32, v: f32) -> f32 {
        let (k1, k2) = self.principal_curvatures(u, v);
        k1 * k2
    }

    fn mean_curvature(&self, u: f32, v: f32) -> f32 {
        let (k1, k2) = self.principal_curvatures(u, v);
        0.5 * (k1 + k2)
    }

    /// Euler's formula: `κ_n(θ) = κ₁ cos²θ + κ₂ sin²θ`, with θ measured from e₁.
    fn normal_curvature(&self, u: f32, v: f32, theta: f32) -> f32 {
        let (k1, k2) = self.principal_curvatures(u, v);
        let (s, c) = theta.sin_cos();
        k1 * c * c + k2 * s * s
    }
}

/// Unit sphere centered at the origin. `u` is the polar angle, `v` the azimuth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sphere;

impl ParametricSurface for Sphere {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        Vec3::new(su * cv, su * sv, cu)
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::new((0.0, PI), (0.0, TAU))
    }

    fn normal(&self, u: f32, v: f32) -> Vec3 {
        self.position(u, v).normalize()
    }
}

impl PrincipalCurvatures for Sphere {
    fn principal_curvatures(&self, _u: f32, _v: f32) -> (f32, f32) {
        (1.0, 1.0)
    }

    fn principal_directions(&self, u: f32, v: f32) -> (Vec3, Vec3) {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        (Vec3::new(cu * cv, cu * sv, -su), Vec3::new(-sv, cv, 0.0))
    }
}

/// Ring torus around the z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Torus {
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Default for Torus {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.4,
        }
    }
}

impl ParametricSurface for Torus {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        let ring = self.major_radius + self.minor_radius * cv;
        Vec3::new(ring * cu, ring * su, self.minor_radius * sv)
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::new((0.0, TAU), (0.0, TAU))
    }

    // Depends on the angles only, not on the radii.
    fn normal(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        Vec3::new(cv * cu, cv * su, sv)
    }
}

impl PrincipalCurvatures for Torus {
    fn principal_curvatures(&self, _u: f32, v: f32) -> (f32, f32) {
        let cv = v.cos();
        (
            cv / (self.major_radius + self.minor_radius * cv),
            1.0 / self.minor_radius,
        )
    }

    fn principal_directions(&self, u: f32, v: f32) -> (Vec3, Vec3) {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        (Vec3::new(-su, cu, 0.0), Vec3::new(-sv * cu, -sv * su, cv))
    }
}

/// Finite circular cylinder around the z axis. `v` is the height in `[-h, h]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            radius: 0.8,
            half_height: 1.0,
        }
    }
}

impl ParametricSurface for Cylinder {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        Vec3::new(self.radius * cu, self.radius * su, v)
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::new((0.0, TAU), (-self.half_height, self.half_height))
    }

    fn normal(&self, u: f32, _v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        Vec3::new(cu, su, 0.0)
    }
}

impl PrincipalCurvatures for Cylinder {
    fn principal_curvatures(&self, _u: f32, _v: f32) -> (f32, f32) {
        (1.0 / self.radius, 0.0)
    }

    fn principal_directions(&self, u: f32, _v: f32) -> (Vec3, Vec3) {
        let (su, cu) = u.sin_cos();
        (Vec3::new(-su, cu, 0.0), Vec3::Z)
    }
}

/// Möbius strip of unit center radius; `v` runs across the band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobiusStrip {
    pub half_width: f32,
}

impl Default for MobiusStrip {
    fn default() -> Self {
        Self { half_width: 1.0 }
    }
}

impl ParametricSurface for MobiusStrip {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let (sh, ch) = (0.5 * u).sin_cos();
        let ring = 1.0 + 0.5 * v * ch;
        Vec3::new(ring * cu, ring * su, 0.5 * v * sh)
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::new((0.0, TAU), (-self.half_width, self.half_width))
    }
}

/// Figure-eight immersion of the Klein bottle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KleinBottle {
    pub offset: f32,
}

impl Default for KleinBottle {
    fn default() -> Self {
        Self { offset: 2.5 }
    }
}

impl ParametricSurface for KleinBottle {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let (sh, ch) = (0.5 * u).sin_cos();
        let sv = v.sin();
        let s2v = (2.0 * v).sin();
        let ring = self.offset + ch * sv - sh * s2v;
        Vec3::new(ring * cu, ring * su, sh * sv + ch * s2v)
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::new((0.0, TAU), (0.0, TAU))
    }
}

/// The shapes the tour knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Sphere,
    Torus,
    Cylinder,
    MobiusStrip,
    KleinBottle,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 5] = [
        SurfaceKind::Sphere,
        SurfaceKind::Torus,
        SurfaceKind::Cylinder,
        SurfaceKind::MobiusStrip,
        SurfaceKind::KleinBottle,
    ];

    pub fn shape(self) -> Shape {
        match self {
            SurfaceKind::Sphere => Shape::Sphere(Sphere),
            SurfaceKind::Torus => Shape::Torus(Torus::default()),
            SurfaceKind::Cylinder => Shape::Cylinder(Cylinder::default()),
            SurfaceKind::MobiusStrip => Shape::MobiusStrip(MobiusStrip::default()),
            SurfaceKind::KleinBottle => Shape::KleinBottle(KleinBottle::default()),
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            SurfaceKind::Sphere => "shape.sphere",
            SurfaceKind::Torus => "shape.torus",
            SurfaceKind::Cylinder => "shape.cylinder",
            SurfaceKind::MobiusStrip => "shape.mobius",
            SurfaceKind::KleinBottle => "shape.klein",
        }
    }
}

/// Enum dispatch over the concrete surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Torus(Torus),
    Cylinder(Cylinder),
    MobiusStrip(MobiusStrip),
    KleinBottle(KleinBottle),
}

impl Shape {
    fn surface(&self) -> &dyn ParametricSurface {
        match self {
            Shape::Sphere(s) => s,
            Shape::Torus(s) => s,
            Shape::Cylinder(s) => s,
            Shape::MobiusStrip(s) => s,
            Shape::KleinBottle(s) => s,
        }
    }

    pub fn curvatures(&self) -> Option<&dyn PrincipalCurvatures> {
        match self {
            Shape::Sphere(s) => Some(s),
            Shape::Torus(s) => Some(s),
            Shape::Cylinder(s) => Some(s),
            Shape::MobiusStrip(_) | Shape::KleinBottle(_) => None,
        }
    }
}

impl ParametricSurface for Shape {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        self.surface().position(u, v)
    }

    fn domain(&self) -> ParamDomain {
        self.surface().domain()
    }

    fn normal(&self, u: f32, v: f32) -> Vec3 {
        self.surface().normal(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn samples() -> impl Iterator<Item = (f32, f32)> {
        (0..=12).flat_map(|i| (0..=16).map(move |j| (i as f32 / 12.0, j as f32 / 16.0)))
    }

    /// Central-difference normal, bypassing any closed-form override.
    fn numeric_normal<S: ParametricSurface>(s: &S, u: f32, v: f32) -> Vec3 {
        let h = 1e-3;
        let du = s.position(u + h, v) - s.position(u - h, v);
        let dv = s.position(u, v + h) - s.position(u, v - h);
        du.cross(dv).normalize()
    }

    #[test]
    fn sphere_points_are_on_unit_sphere() {
        let sphere = Sphere;
        for (s, t) in samples() {
            let (u, v) = sphere.domain().at(s, t);
            assert_abs_diff_eq!(sphere.position(u, v).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_normal_is_normalized_position() {
        let sphere = Sphere;
        for (s, t) in samples() {
            let (u, v) = sphere.domain().at(s, t);
            let p = sphere.position(u, v);
            let n = sphere.normal(u, v);
            assert!((n - p.normalize()).length() < 1e-5);
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn torus_normal_ignores_radii() {
        let thin = Torus {
            major_radius: 3.0,
            minor_radius: 0.1,
        };
        let fat = Torus::default();
        for (s, t) in samples() {
            let (u, v) = fat.domain().at(s, t);
            assert!((thin.normal(u, v) - fat.normal(u, v)).length() < 1e-6);
        }
    }

    #[test]
    fn closed_form_normals_match_finite_differences() {
        let torus = Torus::default();
        let cylinder = Cylinder::default();
        let sphere = Sphere;
        for (s, t) in samples() {
            let (u, v) = torus.domain().at(s, t);
            assert!((torus.normal(u, v) - numeric_normal(&torus, u, v)).length() < 1e-2);

            let (u, v) = cylinder.domain().at(s, t);
            assert!((cylinder.normal(u, v) - numeric_normal(&cylinder, u, v)).length() < 1e-2);

            // stay off the poles where the sphere chart degenerates
            let (u, v) = sphere.domain().at(0.1 + 0.8 * s, t);
            assert!((sphere.normal(u, v) - numeric_normal(&sphere, u, v)).length() < 1e-2);
        }
    }

    #[test]
    fn cylinder_normal_has_no_height_component() {
        let cylinder = Cylinder::default();
        for (s, t) in samples() {
            let (u, v) = cylinder.domain().at(s, t);
            assert_eq!(cylinder.normal(u, v).z, 0.0);
        }
    }

    #[test]
    fn mobius_normal_flips_after_one_loop() {
        let strip = MobiusStrip::default();
        for i in 0..8 {
            let u = i as f32 * 0.7;
            let n0 = strip.normal(u, 0.0);
            let n1 = strip.normal(u + TAU, 0.0);
            assert_abs_diff_eq!(n0.length(), 1.0, epsilon = 1e-3);
            assert!((n0 + n1).length() < 1e-2, "u = {u}: {n0} vs {n1}");
        }
    }

    #[test]
    fn klein_bottle_is_an_immersion() {
        let klein = KleinBottle::default();
        for (s, t) in samples() {
            let (u, v) = klein.domain().at(s, t);
            let n = klein.normal(u, v);
            assert!(n.is_finite());
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn principal_directions_are_orthonormal_and_match_normal() {
        let surfaces: [&dyn Fn(f32, f32) -> (Vec3, Vec3, Vec3); 3] = [
            &|u, v| {
                let (e1, e2) = Sphere.principal_directions(u, v);
                (e1, e2, Sphere.normal(u, v))
            },
            &|u, v| {
                let t = Torus::default();
                let (e1, e2) = t.principal_directions(u, v);
                (e1, e2, t.normal(u, v))
            },
            &|u, v| {
                let c = Cylinder::default();
                let (e1, e2) = c.principal_directions(u, v);
                (e1, e2, c.normal(u, v))
            },
        ];
        for frame in surfaces {
            for (s, t) in samples() {
                let (e1, e2, n) = frame(0.2 + 2.5 * s, TAU * t);
                assert_abs_diff_eq!(e1.dot(e2), 0.0, epsilon = 1e-5);
                assert!((e1.cross(e2) - n).length() < 1e-5);
            }
        }
    }

    #[test]
    fn euler_formula_interpolates_principal_curvatures() {
        let torus = Torus::default();
        let (k1, k2) = torus.principal_curvatures(0.3, 0.0);
        assert_abs_diff_eq!(k1, 1.0 / 1.4, epsilon = 1e-6);
        assert_abs_diff_eq!(k2, 2.5, epsilon = 1e-6);
        assert_abs_diff_eq!(torus.normal_curvature(0.3, 0.0, 0.0), k1, epsilon = 1e-6);
        assert_abs_diff_eq!(torus.normal_curvature(0.3, 0.0, PI / 2.0), k2, epsilon = 1e-5);

        // inner equator is saddle-shaped
        assert!(torus.gaussian_curvature(0.0, PI) < 0.0);
        assert_abs_diff_eq!(Sphere.mean_curvature(1.0, 2.0), 1.0);
        assert_abs_diff_eq!(Cylinder::default().gaussian_curvature(1.0, 0.2), 0.0);
    }
}
