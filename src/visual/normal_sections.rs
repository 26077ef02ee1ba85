use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, TAU};

use glam::Vec3;

use super::{Readout, ViewState, VisualOutput};
use crate::geometry::curves::NormalSection;
use crate::geometry::surface::{Cylinder, Sphere};
use crate::geometry::{CurveMesh, ParametricSurface, SurfaceKind};
use crate::scene::graph::{Color, FAINT, GOLD, GREEN, RED};
use crate::scene::{MeshLibrary, Scene, SceneNode};

const SURFACE_COLOR: Color = [0.36, 0.50, 0.62, 1.0];
const SECTION_SAMPLES: usize = 160;
const ARROW_LENGTH: f32 = 0.6;
const PLANE_HALF: f32 = 0.9;

pub fn build(time: f32, library: &MeshLibrary, view: &ViewState) -> VisualOutput {
    let theta = (0.5 * time).rem_euclid(TAU);
    match view.section_shape {
        SurfaceKind::Sphere => section(
            &Sphere,
            SurfaceKind::Sphere,
            (FRAC_PI_3, FRAC_PI_4),
            theta,
            library,
        ),
        _ => section(
            &Cylinder::default(),
            SurfaceKind::Cylinder,
            (FRAC_PI_4, 0.0),
            theta,
            library,
        ),
    }
}

fn section<S: NormalSection + ParametricSurface>(
    surface: &S,
    kind: SurfaceKind,
    (u, v): (f32, f32),
    theta: f32,
    library: &MeshLibrary,
) -> VisualOutput {
    let point = surface.position(u, v);
    let normal = surface.normal(u, v);
    let (e1, e2) = surface.principal_directions(u, v);
    let (s, c) = theta.sin_cos();
    let direction = e1 * c + e2 * s;

    let mut scene = Scene::default();
    if let Some(mesh) = library.get(kind) {
        scene.push(SceneNode::surface(mesh, SURFACE_COLOR));
    }

    let samples = surface.normal_section(u, v, theta, SECTION_SAMPLES);
    // sections leaving the finite cylinder end in a gap; the rest close up
    let closed = matches!(
        (samples.first(), samples.last()),
        (Some(Some(a)), Some(Some(b))) if a.distance(*b) < 0.5
    );
    scene.push(SceneNode::curve(CurveMesh::from_polyline(&samples, closed), GOLD));
    scene.push(SceneNode::lines(plane_outline(point, direction, normal), FAINT));
    scene.push(SceneNode::marker(point, 0.05, GOLD));
    scene.push(SceneNode::arrow(point, normal * ARROW_LENGTH, RED));
    scene.push(SceneNode::arrow(point, direction * ARROW_LENGTH, GREEN));

    let (k1, k2) = surface.principal_curvatures(u, v);
    VisualOutput {
        scene,
        readouts: vec![
            Readout::new("readout.theta", theta),
            Readout::new("readout.kn", surface.normal_curvature(u, v, theta)),
            Readout::new("readout.k1", k1),
            Readout::new("readout.k2", k2),
        ],
    }
}

/// Rectangle in the cutting plane, centered on the base point.
fn plane_outline(center: Vec3, direction: Vec3, normal: Vec3) -> Vec<[Vec3; 2]> {
    let a = direction * PLANE_HALF;
    let b = normal * PLANE_HALF;
    let corners = [center - a - b, center + a - b, center + a + b, center - a + b];
    (0..4).map(|i| [corners[i], corners[(i + 1) % 4]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn readout(out: &VisualOutput, key: &str) -> f32 {
        out.readouts.iter().find(|r| r.key == key).unwrap().value
    }

    #[test]
    fn sphere_sections_all_have_unit_curvature() {
        let library = MeshLibrary::default();
        let view = ViewState {
            section_shape: SurfaceKind::Sphere,
            ..ViewState::default()
        };
        for t in [0.0, 1.0, 2.5, 7.0] {
            let out = build(t, &library, &view);
            assert_abs_diff_eq!(readout(&out, "readout.kn"), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn cylinder_curvature_follows_the_direction() {
        let library = MeshLibrary::default();
        let view = ViewState::default();
        let r = Cylinder::default().radius;

        // theta = 0.5 t
        let along_circle = build(0.0, &library, &view);
        assert_abs_diff_eq!(readout(&along_circle, "readout.kn"), 1.0 / r, epsilon = 1e-5);

        let along_ruling = build(std::f32::consts::PI, &library, &view);
        assert_abs_diff_eq!(readout(&along_ruling, "readout.kn"), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(readout(&along_ruling, "readout.k2"), 0.0);
    }

    #[test]
    fn outline_lies_in_the_cutting_plane() {
        let center = Vec3::new(0.2, 0.1, 0.5);
        let (d, n) = (Vec3::X, Vec3::Z);
        let outline = plane_outline(center, d, n);
        assert_eq!(outline.len(), 4);
        for [a, _] in outline {
            assert_abs_diff_eq!((a - center).dot(Vec3::Y), 0.0, epsilon = 1e-6);
        }
    }
}
