use std::borrow::Cow;

use crate::scene::{FrameBatch, LineVertex, SurfaceVertex};

const MAX_SURFACE_VERTICES: usize = 200_000;
const MAX_SURFACE_INDICES: usize = 600_000;
const MAX_LINE_VERTICES: usize = 100_000;
const MAX_GRID_VERTICES: usize = 2_000;

/// Fixed-capacity vertex and index buffers, rewritten every frame.
pub struct SceneBuffers {
    pub surface_vertex_buffer: wgpu::Buffer,
    pub surface_index_buffer: wgpu::Buffer,
    pub surface_index_count: u32,

    pub line_vertex_buffer: wgpu::Buffer,
    pub line_vertex_count: u32,

    pub grid_vertex_buffer: wgpu::Buffer,
    pub grid_vertex_count: u32,

    overflow_reported: bool,
}

impl SceneBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = |label: &str, bytes: usize| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: bytes as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        Self {
            surface_vertex_buffer: vertex_buffer(
                "Surface Vertex Buffer",
                MAX_SURFACE_VERTICES * size_of::<SurfaceVertex>(),
            ),
            surface_index_buffer: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Surface Index Buffer"),
                size: (MAX_SURFACE_INDICES * size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            surface_index_count: 0,
            line_vertex_buffer: vertex_buffer(
                "Line Vertex Buffer",
                MAX_LINE_VERTICES * size_of::<LineVertex>(),
            ),
            line_vertex_count: 0,
            grid_vertex_buffer: vertex_buffer(
                "Grid Vertex Buffer",
                MAX_GRID_VERTICES * size_of::<LineVertex>(),
            ),
            grid_vertex_count: 0,
            overflow_reported: false,
        }
    }

    pub fn upload(&mut self, queue: &wgpu::Queue, batch: &FrameBatch) {
        let vertex_count = batch.surface_vertices.len().min(MAX_SURFACE_VERTICES);
        let indices = clip_triangles(
            &batch.surface_indices,
            vertex_count as u32,
            MAX_SURFACE_INDICES,
        );
        let line_count = fit_lines(batch.line_vertices.len(), MAX_LINE_VERTICES);

        let overflow = vertex_count < batch.surface_vertices.len()
            || indices.len() < batch.surface_indices.len()
            || line_count < batch.line_vertices.len();
        if overflow && !self.overflow_reported {
            tracing::warn!(
                surface_vertices = batch.surface_vertices.len(),
                surface_indices = batch.surface_indices.len(),
                line_vertices = batch.line_vertices.len(),
                "frame exceeds scene buffer capacity, geometry clipped"
            );
        }
        self.overflow_reported = overflow;

        if vertex_count > 0 {
            queue.write_buffer(
                &self.surface_vertex_buffer,
                0,
                bytemuck::cast_slice(&batch.surface_vertices[..vertex_count]),
            );
        }
        if !indices.is_empty() {
            queue.write_buffer(&self.surface_index_buffer, 0, bytemuck::cast_slice(&indices));
        }
        self.surface_index_count = indices.len() as u32;

        if line_count > 0 {
            queue.write_buffer(
                &self.line_vertex_buffer,
                0,
                bytemuck::cast_slice(&batch.line_vertices[..line_count]),
            );
        }
        self.line_vertex_count = line_count as u32;
    }

    pub fn upload_grid(&mut self, queue: &wgpu::Queue, vertices: &[LineVertex]) {
        let count = fit_lines(vertices.len(), MAX_GRID_VERTICES);
        if count > 0 {
            queue.write_buffer(
                &self.grid_vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..count]),
            );
        }
        self.grid_vertex_count = count as u32;
    }
}

/// Keeps whole triangles that fit both limits. Borrows when nothing is cut.
fn clip_triangles(indices: &[u32], vertex_limit: u32, index_limit: usize) -> Cow<'_, [u32]> {
    let fits = indices.len() <= index_limit && indices.iter().all(|&i| i < vertex_limit);
    if fits {
        return Cow::Borrowed(indices);
    }
    let mut kept = Vec::with_capacity(indices.len().min(index_limit));
    for tri in indices.chunks_exact(3) {
        if kept.len() + 3 > index_limit {
            break;
        }
        if tri.iter().all(|&i| i < vertex_limit) {
            kept.extend_from_slice(tri);
        }
    }
    Cow::Owned(kept)
}

/// Largest even vertex count not above `limit`, so no segment is cut in half.
fn fit_lines(len: usize, limit: usize) -> usize {
    len.min(limit) & !1
}

pub fn surface_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<SurfaceVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

pub fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_layouts() {
        assert_eq!(size_of::<SurfaceVertex>(), 40);
        assert_eq!(size_of::<LineVertex>(), 28);
    }

    #[test]
    fn clipping_keeps_whole_triangles() {
        let indices = [0, 1, 2, 2, 1, 3, 3, 4, 5];
        assert!(matches!(clip_triangles(&indices, 6, 100), Cow::Borrowed(_)));
        assert_eq!(clip_triangles(&indices, 4, 100).as_ref(), &[0, 1, 2, 2, 1, 3]);
        assert_eq!(clip_triangles(&indices, 6, 7).as_ref(), &[0, 1, 2, 2, 1, 3]);
        assert!(clip_triangles(&indices, 6, 2).is_empty());
    }

    #[test]
    fn lines_are_never_split() {
        assert_eq!(fit_lines(10, 100), 10);
        assert_eq!(fit_lines(10, 7), 6);
        assert_eq!(fit_lines(0, 7), 0);
    }
}
