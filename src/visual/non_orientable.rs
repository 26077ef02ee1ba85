use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use super::surface_frame::wander;
use super::{Readout, ViewState, VisualOutput};
use crate::geometry::{ParametricSurface, SurfaceKind};
use crate::scene::graph::{Color, FAINT, GOLD, RED};
use crate::scene::{MeshLibrary, Scene, SceneNode};

const STRIP_COLOR: Color = [0.30, 0.62, 0.58, 1.0];
const KLEIN_COLOR: Color = [0.62, 0.40, 0.72, 1.0];
const KLEIN_SCALE: f32 = 0.32;
const NORMAL_LENGTH: f32 = 0.5;
const TRAIL_STEP: f32 = 0.25;

pub fn build(time: f32, library: &MeshLibrary, view: &ViewState) -> VisualOutput {
    match view.strip_shape {
        SurfaceKind::KleinBottle => klein(time, library),
        _ => mobius(time, library),
    }
}

fn mobius(time: f32, library: &MeshLibrary) -> VisualOutput {
    let kind = SurfaceKind::MobiusStrip;
    let shape = kind.shape();
    let spin = Mat4::from_rotation_z(0.2 * time);

    // two laps bring the normal back to where it started
    let u = wander(kind, time).0.rem_euclid(2.0 * TAU);
    let point = shape.position(u, 0.0);
    let normal = shape.normal(u, 0.0);

    let mut scene = Scene::default();
    if let Some(mesh) = library.get(kind) {
        scene.push(SceneNode::surface(mesh, STRIP_COLOR).with_transform(spin));
    }

    let trail: Vec<[Vec3; 2]> = (0..)
        .map(|k| k as f32 * TRAIL_STEP)
        .take_while(|&s| s < u)
        .map(|s| {
            let p = shape.position(s, 0.0);
            [p, p + shape.normal(s, 0.0) * (0.5 * NORMAL_LENGTH)]
        })
        .collect();

    scene.extend(
        [
            SceneNode::lines(trail, FAINT),
            SceneNode::marker(point, 0.05, GOLD),
            SceneNode::arrow(point, normal * NORMAL_LENGTH, RED),
        ]
        .into_iter()
        .map(|n| n.with_transform(spin)),
    );

    let lap = (u / TAU).floor() + 1.0;
    let start_normal = shape.normal(u.rem_euclid(TAU), 0.0);
    VisualOutput {
        scene,
        readouts: vec![
            Readout::new("readout.lap", lap),
            Readout::new("readout.orientation", normal.dot(start_normal).signum()),
            Readout::new("readout.euler", 0.0),
        ],
    }
}

fn klein(time: f32, library: &MeshLibrary) -> VisualOutput {
    let kind = SurfaceKind::KleinBottle;
    let shape = kind.shape();
    let transform = Mat4::from_rotation_z(0.2 * time)
        * Mat4::from_rotation_x(0.3 * (0.2 * time).sin())
        * Mat4::from_scale(Vec3::splat(KLEIN_SCALE));

    let (u, v) = wander(kind, time);
    let point = shape.position(u, v);
    let normal = shape.normal(u, v);

    let mut scene = Scene::default();
    if let Some(mesh) = library.get(kind) {
        scene.push(SceneNode::surface(mesh, KLEIN_COLOR).with_transform(transform));
    }
    scene.extend(
        [
            SceneNode::marker(point, 0.05 / KLEIN_SCALE, GOLD),
            SceneNode::arrow(point, normal * (NORMAL_LENGTH / KLEIN_SCALE), RED),
        ]
        .into_iter()
        .map(|n| n.with_transform(transform)),
    );

    VisualOutput {
        scene,
        readouts: vec![Readout::new("readout.euler", 0.0)],
    }
}
