//! Geometry templates for instanced drawing.
//!
//! A template is the per-instance vertex set every instance shares; the
//! instance attributes move and color it. Lines are drawn from a
//! two-vertex line-strip template.

use bytemuck::{Pod, Zeroable};

/// How template vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Connected line segments through consecutive vertices.
    LineStrip,
    /// Triangles sharing edges with their predecessor.
    TriangleStrip,
}

/// Template vertex geometry: a draw mode plus flat `x, y, z` positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Primitive assembly of `positions`.
    pub draw_mode: DrawMode,
    /// Three floats per vertex.
    pub positions: Vec<f32>,
}

/// Template vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    /// Template position.
    pub position: [f32; 3],
    /// -1 or +1 for the two edges of a widened line; 0 for fill geometry.
    pub side: f32,
}

impl RibbonVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32    // side
    ];

    /// Vertex buffer layout at slot 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<RibbonVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl Geometry {
    /// The segment template: one vertex at each end, `[0,0,0]` then
    /// `[1,1,1]`.
    pub fn line_segment() -> Self {
        Self {
            draw_mode: DrawMode::LineStrip,
            positions: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        }
    }

    /// Number of template vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Vertices ready for a triangle-strip pipeline.
    ///
    /// wgpu rasterizes line primitives at one pixel, so a line strip is
    /// widened in the vertex shader instead: each template vertex is
    /// emitted twice, once per edge. Triangle strips pass through.
    pub fn ribbon_vertices(&self) -> Vec<RibbonVertex> {
        let points = self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]);
        match self.draw_mode {
            DrawMode::LineStrip => points
                .flat_map(|position| {
                    [
                        RibbonVertex {
                            position,
                            side: -1.0,
                        },
                        RibbonVertex {
                            position,
                            side: 1.0,
                        },
                    ]
                })
                .collect(),
            DrawMode::TriangleStrip => points
                .map(|position| RibbonVertex {
                    position,
                    side: 0.0,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_template_has_two_vertices() {
        let geometry = Geometry::line_segment();
        assert_eq!(geometry.draw_mode, DrawMode::LineStrip);
        assert_eq!(geometry.vertex_count(), 2);
    }

    #[test]
    fn line_strip_expands_to_edge_pairs() {
        let ribbon = Geometry::line_segment().ribbon_vertices();
        let sides: Vec<f32> = ribbon.iter().map(|v| v.side).collect();
        assert_eq!(sides, [-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(ribbon[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(ribbon[1].position, [0.0, 0.0, 0.0]);
        assert_eq!(ribbon[2].position, [1.0, 1.0, 1.0]);
        assert_eq!(ribbon[3].position, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn triangle_strip_passes_through() {
        let geometry = Geometry {
            draw_mode: DrawMode::TriangleStrip,
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        };
        let ribbon = geometry.ribbon_vertices();
        assert_eq!(ribbon.len(), 3);
        assert!(ribbon.iter().all(|v| v.side == 0.0));
    }

    #[test]
    fn vertex_stride_matches_layout() {
        assert_eq!(RibbonVertex::layout().array_stride, 16);
    }
}
