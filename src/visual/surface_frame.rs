use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

use super::{Readout, ViewState, VisualOutput};
use crate::geometry::{SurfaceFrame, SurfaceKind};
use crate::scene::graph::{BLUE, Color, FAINT, GOLD, GREEN, RED};
use crate::scene::{MeshLibrary, Scene, SceneNode};

const SURFACE_COLOR: Color = [0.42, 0.45, 0.78, 1.0];
const ARROW_LENGTH: f32 = 0.6;
const PLANE_HALF: f32 = 0.45;
const PLANE_LINES: usize = 5;

/// Parameter path the moving point follows on each shape.
pub(super) fn wander(kind: SurfaceKind, t: f32) -> (f32, f32) {
    match kind {
        SurfaceKind::Sphere => (FRAC_PI_2 + 0.9 * (0.4 * t).sin(), 0.5 * t),
        SurfaceKind::Torus => (0.35 * t, 0.8 * t),
        SurfaceKind::Cylinder => (0.5 * t, 0.8 * (0.3 * t).sin()),
        SurfaceKind::MobiusStrip => (0.6 * t, 0.0),
        SurfaceKind::KleinBottle => (0.3 * t, 0.7 * t),
    }
}

/// Square grid of strokes spanned by the two tangents around `center`.
pub(super) fn plane_patch(center: Vec3, a: Vec3, b: Vec3, half: f32) -> Vec<[Vec3; 2]> {
    let mut segments = Vec::with_capacity(2 * PLANE_LINES);
    for k in 0..PLANE_LINES {
        let s = -half + 2.0 * half * k as f32 / (PLANE_LINES - 1) as f32;
        segments.push([center + a * s - b * half, center + a * s + b * half]);
        segments.push([center + b * s - a * half, center + b * s + a * half]);
    }
    segments
}

pub fn build(time: f32, library: &MeshLibrary, view: &ViewState) -> VisualOutput {
    let kind = view.frame_shape;
    let shape = kind.shape();
    let spin = Mat4::from_rotation_z(0.15 * time);

    let mut scene = Scene::default();
    if let Some(mesh) = library.get(kind) {
        scene.push(SceneNode::surface(mesh, SURFACE_COLOR).with_transform(spin));
    }

    let (u, v) = wander(kind, time);
    let frame = SurfaceFrame::on(&shape, u, v);

    let mut nodes = vec![
        SceneNode::marker(frame.point, 0.05, GOLD),
        SceneNode::arrow(frame.point, frame.normal * ARROW_LENGTH, RED),
        SceneNode::arrow(frame.point, frame.tangent_u * ARROW_LENGTH, GREEN),
        SceneNode::arrow(frame.point, frame.tangent_v * ARROW_LENGTH, BLUE),
    ];
    if view.show_tangent_plane {
        nodes.push(SceneNode::lines(
            plane_patch(frame.point, frame.tangent_u, frame.tangent_v, PLANE_HALF),
            FAINT,
        ));
    }
    scene.extend(nodes.into_iter().map(|n| n.with_transform(spin)));

    let mut readouts = vec![
        Readout::new("readout.u", u.rem_euclid(2.0 * PI)),
        Readout::new("readout.v", v),
    ];
    if let Some(curv) = shape.curvatures() {
        let (k1, k2) = curv.principal_curvatures(u, v);
        readouts.extend([
            Readout::new("readout.k1", k1),
            Readout::new("readout.k2", k2),
            Readout::new("readout.gauss", curv.gaussian_curvature(u, v)),
            Readout::new("readout.mean", curv.mean_curvature(u, v)),
        ]);
    }
    readouts.push(Readout::new(
        "readout.frame_error",
        frame
            .normal
            .dot(frame.tangent_u)
            .abs()
            .max(frame.normal.dot(frame.tangent_v).abs())
            .max(frame.tangent_u.dot(frame.tangent_v).abs()),
    ));

    VisualOutput { scene, readouts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ParametricSurface;
    use crate::scene::graph::Primitive;

    #[test]
    fn moving_point_stays_on_the_selected_shape() {
        let library = MeshLibrary::default();
        for kind in [SurfaceKind::Sphere, SurfaceKind::Torus, SurfaceKind::Cylinder] {
            let view = ViewState {
                frame_shape: kind,
                ..ViewState::default()
            };
            for t in [0.0, 2.5, 9.0] {
                let out = build(t, &library, &view);
                let marker = out.scene.nodes.iter().find_map(|n| match n.primitive {
                    Primitive::Marker { position, .. } => Some(position),
                    _ => None,
                });
                let (u, v) = wander(kind, t);
                assert_eq!(marker, Some(kind.shape().position(u, v)));

                let error = out.readouts.last().unwrap();
                assert_eq!(error.key, "readout.frame_error");
                assert!(error.value < 1e-5);
            }
        }
    }

    #[test]
    fn tangent_plane_toggle() {
        let library = MeshLibrary::default();
        let mut view = ViewState::default();
        let with = build(1.0, &library, &view).scene.nodes.len();
        view.show_tangent_plane = false;
        let without = build(1.0, &library, &view).scene.nodes.len();
        assert_eq!(with, without + 1);
    }

    #[test]
    fn plane_patch_lies_in_the_plane() {
        let n = Vec3::Z;
        for [a, b] in plane_patch(Vec3::Z, Vec3::X, Vec3::Y, 0.5) {
            assert!(((a - Vec3::Z).dot(n)).abs() < 1e-6);
            assert!(((b - Vec3::Z).dot(n)).abs() < 1e-6);
        }
    }
}
