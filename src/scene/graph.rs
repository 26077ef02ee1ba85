use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::geometry::{CurveMesh, TriangleMesh};

pub type Color = [f32; 4];

pub const RED: Color = [0.89, 0.26, 0.24, 1.0];
pub const GREEN: Color = [0.30, 0.78, 0.35, 1.0];
pub const BLUE: Color = [0.33, 0.52, 0.95, 1.0];
pub const GOLD: Color = [0.95, 0.76, 0.25, 1.0];
pub const FAINT: Color = [0.55, 0.55, 0.65, 0.55];

/// What a scene node draws.
#[derive(Clone, Debug)]
pub enum Primitive {
    Surface(Arc<TriangleMesh>),
    Lines(Vec<[Vec3; 2]>),
    Arrow { origin: Vec3, vector: Vec3 },
    Marker { position: Vec3, size: f32 },
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub primitive: Primitive,
    pub transform: Mat4,
    pub color: Color,
}

impl SceneNode {
    fn new(primitive: Primitive, color: Color) -> Self {
        Self {
            primitive,
            transform: Mat4::IDENTITY,
            color,
        }
    }

    pub fn surface(mesh: Arc<TriangleMesh>, color: Color) -> Self {
        Self::new(Primitive::Surface(mesh), color)
    }

    pub fn lines(segments: Vec<[Vec3; 2]>, color: Color) -> Self {
        Self::new(Primitive::Lines(segments), color)
    }

    pub fn curve(curve: CurveMesh, color: Color) -> Self {
        Self::lines(curve.segments, color)
    }

    pub fn arrow(origin: Vec3, vector: Vec3, color: Color) -> Self {
        Self::new(Primitive::Arrow { origin, vector }, color)
    }

    pub fn marker(position: Vec3, size: f32, color: Color) -> Self {
        Self::new(Primitive::Marker { position, size }, color)
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

/// Declarative description of one frame of a visualization.
///
/// Geometry is authored z-up; `root` turns it into the renderer's y-up world.
#[derive(Clone, Debug)]
pub struct Scene {
    pub root: Mat4,
    pub nodes: Vec<SceneNode>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            root: Mat4::from_rotation_x(-FRAC_PI_2),
            nodes: Vec::new(),
        }
    }
}

impl Scene {
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = SceneNode>) {
        self.nodes.extend(nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_math_z_to_world_y() {
        let scene = Scene::default();
        let up = scene.root.transform_vector3(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn builders_keep_transform_and_color() {
        let m = Mat4::from_translation(Vec3::X);
        let node = SceneNode::marker(Vec3::ZERO, 0.1, GOLD).with_transform(m);
        assert_eq!(node.transform, m);
        assert_eq!(node.color, GOLD);

        let mut scene = Scene::default();
        assert!(scene.is_empty());
        scene.push(node);
        scene.extend([SceneNode::arrow(Vec3::ZERO, Vec3::Z, RED)]);
        assert_eq!(scene.nodes.len(), 2);
    }
}
