use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use super::graph::{Color, Primitive, Scene};
use crate::geometry::tangent_frame;

const ARROW_HEAD_RATIO: f32 = 0.2;
const ARROW_HEAD_MAX: f32 = 0.12;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// World-space buffers for one frame, flattened from a [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct FrameBatch {
    pub surface_vertices: Vec<SurfaceVertex>,
    pub surface_indices: Vec<u32>,
    pub line_vertices: Vec<LineVertex>,
}

impl FrameBatch {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut batch = Self::default();

        for node in &scene.nodes {
            let model = scene.root * node.transform;

            match &node.primitive {
                Primitive::Surface(mesh) => {
                    let normal_matrix = Mat3::from_mat4(model).inverse().transpose();
                    let base = batch.surface_vertices.len() as u32;
                    batch.surface_vertices.extend(
                        mesh.vertices
                            .chunks_exact(3)
                            .zip(mesh.normals.chunks_exact(3))
                            .map(|(p, n)| SurfaceVertex {
                                position: model.transform_point3(Vec3::from_slice(p)).to_array(),
                                normal: (normal_matrix * Vec3::from_slice(n))
                                    .normalize_or_zero()
                                    .to_array(),
                                color: node.color,
                            }),
                    );
                    batch
                        .surface_indices
                        .extend(mesh.indices.iter().map(|i| i + base));
                }
                Primitive::Lines(segments) => {
                    for [a, b] in segments {
                        batch.push_segment(&model, *a, *b, node.color);
                    }
                }
                Primitive::Arrow { origin, vector } => {
                    batch.push_arrow(&model, *origin, *vector, node.color);
                }
                Primitive::Marker { position, size } => {
                    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                        batch.push_segment(
                            &model,
                            *position - axis * *size,
                            *position + axis * *size,
                            node.color,
                        );
                    }
                }
            }
        }

        batch
    }

    fn push_segment(&mut self, model: &Mat4, a: Vec3, b: Vec3, color: Color) {
        self.line_vertices
            .push(LineVertex::new(model.transform_point3(a), color));
        self.line_vertices
            .push(LineVertex::new(model.transform_point3(b), color));
    }

    // shaft plus four head strokes
    fn push_arrow(&mut self, model: &Mat4, origin: Vec3, vector: Vec3, color: Color) {
        let tip = origin + vector;
        self.push_segment(model, origin, tip, color);

        let length = vector.length();
        if length <= f32::EPSILON {
            return;
        }
        let dir = vector / length;
        let head = (length * ARROW_HEAD_RATIO).min(ARROW_HEAD_MAX);
        let (side_a, side_b) = tangent_frame(dir);
        let back = tip - dir * head;
        for side in [side_a, -side_a, side_b, -side_b] {
            self.push_segment(model, tip, back + side * (head * 0.5), color);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.surface_indices.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.line_vertices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{SurfaceKind, tessellate};
    use crate::scene::graph::{GREEN, RED, SceneNode};
    use std::sync::Arc;

    #[test]
    fn flattens_surfaces_with_offset_indices() {
        let mesh = Arc::new(tessellate(&SurfaceKind::Torus.shape(), 8, 4).unwrap());
        let mut scene = Scene::default();
        scene.push(SceneNode::surface(Arc::clone(&mesh), GREEN));
        scene.push(SceneNode::surface(Arc::clone(&mesh), RED));

        let batch = FrameBatch::from_scene(&scene);
        assert_eq!(batch.surface_vertices.len(), 2 * mesh.vertex_count());
        assert_eq!(batch.triangle_count(), 2 * mesh.triangle_count());

        let second = &batch.surface_indices[mesh.indices.len()..];
        assert!(second.iter().all(|&i| i as usize >= mesh.vertex_count()));
        assert_eq!(batch.surface_vertices.last().map(|v| v.color), Some(RED));
    }

    #[test]
    fn applies_root_and_node_transforms() {
        let mut scene = Scene::default();
        scene.push(
            SceneNode::lines(vec![[Vec3::ZERO, Vec3::Z]], GREEN)
                .with_transform(Mat4::from_translation(Vec3::X)),
        );
        let batch = FrameBatch::from_scene(&scene);
        assert_eq!(batch.line_count(), 1);
        let end = Vec3::from(batch.line_vertices[1].position);
        assert!((end - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn arrows_and_markers_expand_to_strokes() {
        let mut scene = Scene::default();
        scene.push(SceneNode::arrow(Vec3::ZERO, Vec3::Z, RED));
        scene.push(SceneNode::arrow(Vec3::ZERO, Vec3::ZERO, RED));
        scene.push(SceneNode::marker(Vec3::ZERO, 0.05, GREEN));
        let batch = FrameBatch::from_scene(&scene);
        assert_eq!(batch.line_count(), 5 + 1 + 3);
    }

    #[test]
    fn surface_normals_stay_unit_under_scaling() {
        let mesh = Arc::new(tessellate(&SurfaceKind::Sphere.shape(), 6, 8).unwrap());
        let mut scene = Scene::default();
        scene.push(
            SceneNode::surface(mesh, GREEN)
                .with_transform(Mat4::from_scale(Vec3::new(2.0, 0.5, 1.0))),
        );
        for v in FrameBatch::from_scene(&scene).surface_vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
