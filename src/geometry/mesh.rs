use glam::Vec3;

use super::surface::ParametricSurface;
use crate::error::MeshError;

const MIN_SEGMENTS: usize = 3;
const DEGENERATE_AREA: f32 = 1e-8;

/// Flat vertex/normal/index buffers, ready to hand to the GPU.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: u32) -> Vec3 {
        Vec3::from_slice(&self.vertices[index as usize * 3..])
    }

    pub fn normal(&self, index: u32) -> Vec3 {
        Vec3::from_slice(&self.normals[index as usize * 3..])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized face normal; its length is twice the triangle area.
    pub fn face_normal(&self, [a, b, c]: [u32; 3]) -> Vec3 {
        let pa = self.position(a);
        (self.position(b) - pa).cross(self.position(c) - pa)
    }

    pub fn degenerate_triangles(&self) -> usize {
        self.triangles()
            .filter(|&t| 0.5 * self.face_normal(t).length() <= DEGENERATE_AREA)
            .count()
    }

    /// Distance of the farthest vertex from the origin.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .chunks_exact(3)
            .map(|p| Vec3::from_slice(p).length())
            .fold(0.0, f32::max)
    }
}

/// Samples `surface` on a `(u_segments + 1) x (v_segments + 1)` grid and
/// triangulates every quad as `(tl, bl, tr)`, `(tr, bl, br)`.
///
/// Triangles that collapse to a point or a line (sphere poles) are dropped.
pub fn tessellate<S: ParametricSurface + ?Sized>(
    surface: &S,
    u_segments: usize,
    v_segments: usize,
) -> Result<TriangleMesh, MeshError> {
    if u_segments < MIN_SEGMENTS {
        return Err(MeshError::TooFewSegments {
            axis: "u",
            got: u_segments,
            min: MIN_SEGMENTS,
        });
    }
    if v_segments < MIN_SEGMENTS {
        return Err(MeshError::TooFewSegments {
            axis: "v",
            got: v_segments,
            min: MIN_SEGMENTS,
        });
    }

    let domain = surface.domain();
    let u_count = u_segments + 1;
    let v_count = v_segments + 1;

    let mut vertices = Vec::with_capacity(u_count * v_count * 3);
    let mut normals = Vec::with_capacity(u_count * v_count * 3);

    for i in 0..u_count {
        for j in 0..v_count {
            let (u, v) = domain.at(
                i as f32 / u_segments as f32,
                j as f32 / v_segments as f32,
            );
            vertices.extend_from_slice(&surface.position(u, v).to_array());
            normals.extend_from_slice(&surface.normal(u, v).to_array());
        }
    }

    let mut mesh = TriangleMesh {
        vertices,
        normals,
        indices: Vec::with_capacity(u_segments * v_segments * 6),
    };

    for i in 0..u_segments {
        for j in 0..v_segments {
            let tl = (i * v_count + j) as u32;
            let tr = (i * v_count + j + 1) as u32;
            let bl = ((i + 1) * v_count + j) as u32;
            let br = ((i + 1) * v_count + j + 1) as u32;

            for tri in [[tl, bl, tr], [tr, bl, br]] {
                if 0.5 * mesh.face_normal(tri).length() > DEGENERATE_AREA {
                    mesh.indices.extend_from_slice(&tri);
                }
            }
        }
    }

    Ok(mesh)
}

/// Turns a gapped polyline into line-list segments. `None` samples break the line.
pub fn polyline_segments(points: &[Option<Vec3>], closed: bool) -> Vec<[Vec3; 2]> {
    let mut segments: Vec<[Vec3; 2]> = points
        .windows(2)
        .filter_map(|w| Some([w[0]?, w[1]?]))
        .collect();
    if closed && points.len() > 2 {
        if let (Some(Some(last)), Some(Some(first))) = (points.last(), points.first()) {
            segments.push([*last, *first]);
        }
    }
    segments
}

/// Line segments for curves, stored as point pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveMesh {
    pub segments: Vec<[Vec3; 2]>,
}

impl CurveMesh {
    pub fn from_polyline(points: &[Option<Vec3>], closed: bool) -> Self {
        Self {
            segments: polyline_segments(points, closed),
        }
    }

    pub fn from_points(points: &[Vec3], closed: bool) -> Self {
        let gapless: Vec<Option<Vec3>> = points.iter().copied().map(Some).collect();
        Self::from_polyline(&gapless, closed)
    }

    /// Scales every point about the origin, e.g. to lift curves off a surface.
    pub fn scaled(mut self, factor: f32) -> Self {
        for [a, b] in &mut self.segments {
            *a *= factor;
            *b *= factor;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
