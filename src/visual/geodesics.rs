use std::f32::consts::{FRAC_PI_3, PI, TAU};

use glam::Vec3;

use super::{Readout, ViewState, VisualOutput};
use crate::geometry::curves::{
    curvature_through, geodesic_curvature_through, great_circle, great_circle_point,
    latitude_circle, latitude_geodesic_curvature,
};
use crate::geometry::{CurveMesh, SurfaceKind};
use crate::scene::graph::{BLUE, Color, GOLD, GREEN, RED};
use crate::scene::{MeshLibrary, Scene, SceneNode};

const SPHERE_COLOR: Color = [0.24, 0.30, 0.46, 1.0];
const CIRCLE_SAMPLES: usize = 96;
// keeps the strokes from z-fighting with the sphere
const LIFT: f32 = 1.01;
const LATITUDE: f32 = FRAC_PI_3;

fn meridian_direction(k: u32, count: u32, time: f32) -> Vec3 {
    let phi = PI * k as f32 / count as f32 + 0.1 * time;
    Vec3::new(phi.cos(), phi.sin(), 0.0)
}

pub fn build(time: f32, library: &MeshLibrary, view: &ViewState) -> VisualOutput {
    let mut scene = Scene::default();
    if let Some(mesh) = library.get(SurfaceKind::Sphere) {
        scene.push(SceneNode::surface(mesh, SPHERE_COLOR));
    }

    let count = view.geodesic_count.max(1);
    let north = Vec3::Z;
    for k in 0..count {
        let circle = great_circle(north, meridian_direction(k, count, time), CIRCLE_SAMPLES);
        let color = if k == 0 { GREEN } else { BLUE };
        scene.push(SceneNode::curve(
            CurveMesh::from_points(&circle, true).scaled(LIFT),
            color,
        ));
    }

    let direction = meridian_direction(0, count, time);
    let s = 0.7 * time;
    let point = great_circle_point(north, direction, s);
    let velocity = great_circle_point(direction, -north, s);
    scene.push(SceneNode::marker(point * LIFT, 0.05, GOLD));
    scene.push(SceneNode::arrow(point * LIFT, velocity * 0.5, GOLD));

    let h = 1e-2;
    let before = great_circle_point(north, direction, s - h);
    let after = great_circle_point(north, direction, s + h);
    // on the unit sphere the normal is the position
    let mut readouts = vec![
        Readout::new("readout.arc_length", s.rem_euclid(TAU)),
        Readout::new("readout.curvature", curvature_through(before, point, after)),
        Readout::new(
            "readout.geodesic_curvature",
            geodesic_curvature_through(before, point, after, point).abs(),
        ),
    ];

    if view.show_latitude {
        let circle = latitude_circle(LATITUDE, CIRCLE_SAMPLES);
        scene.push(SceneNode::curve(
            CurveMesh::from_points(&circle, true).scaled(LIFT),
            RED,
        ));
        readouts.push(Readout::new(
            "readout.latitude_curvature",
            latitude_geodesic_curvature(LATITUDE),
        ));
    }

    VisualOutput { scene, readouts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::Primitive;
    use approx::assert_abs_diff_eq;

    fn curve_count(out: &VisualOutput) -> usize {
        out.scene
            .nodes
            .iter()
            .filter(|n| matches!(n.primitive, Primitive::Lines(_)))
            .count()
    }

    #[test]
    fn draws_one_circle_per_geodesic() {
        let library = MeshLibrary::default();
        let mut view = ViewState::default();
        assert_eq!(curve_count(&build(0.0, &library, &view)), 6);

        view.geodesic_count = 0;
        assert_eq!(curve_count(&build(0.0, &library, &view)), 1);

        view.geodesic_count = 3;
        view.show_latitude = true;
        let out = build(0.0, &library, &view);
        assert_eq!(curve_count(&out), 4);
        let last = out.readouts.last().unwrap();
        assert_eq!(last.key, "readout.latitude_curvature");
        assert_abs_diff_eq!(last.value, 1.0 / 3f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn moving_point_follows_a_geodesic() {
        let library = MeshLibrary::default();
        let view = ViewState::default();
        for t in [0.3, 4.0, 11.0] {
            let out = build(t, &library, &view);
            let curvature = out
                .readouts
                .iter()
                .find(|r| r.key == "readout.curvature")
                .unwrap();
            assert_abs_diff_eq!(curvature.value, 1.0, epsilon = 1e-2);
            let geodesic = out
                .readouts
                .iter()
                .find(|r| r.key == "readout.geodesic_curvature")
                .unwrap();
            assert_abs_diff_eq!(geodesic.value, 0.0, epsilon = 2e-2);

            let (position, velocity) = out
                .scene
                .nodes
                .iter()
                .find_map(|n| match n.primitive {
                    Primitive::Arrow { origin, vector } => Some((origin, vector)),
                    _ => None,
                })
                .unwrap();
            assert_abs_diff_eq!(position.length(), LIFT, epsilon = 1e-5);
            assert_abs_diff_eq!(position.dot(velocity), 0.0, epsilon = 1e-5);
        }
    }
}
