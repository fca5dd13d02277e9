//! Radial beam mesh: the visual half of the sketch.
//!
//! Each orbit point radiates 144 equally-spaced beams, each beam made of
//! three concentric triangle segments. The mesh is rebuilt on the CPU every
//! frame and uploaded wholesale, colors baked into the vertices.

use bytemuck::{Pod, Zeroable};
use glam::{Mat2, Vec2};

use std::f32::consts::TAU;
use std::ops::Range;

use crate::orbit::POINT_COUNT;
use crate::params::BeamParams;

/// Vertex data for the beam mesh (2D position + RGBA color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BeamVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// RGBA colors for the four points, driven by the aggregate modulation
/// amount. 8-bit channel values clamped to [0, 255], then normalized.
pub fn beam_colors(amt: f32) -> [[f32; 4]; POINT_COUNT] {
    let channel = |value: f32| value.clamp(0.0, 255.0) / 255.0;
    [
        [channel(72.0 * amt), 0.0, 0.0, 1.0],
        [channel(16.0 * amt), channel(24.0 * amt), 0.0, 1.0],
        [0.0, 0.0, channel(48.0 + 16.0 * amt), 1.0],
        [0.0, channel(16.0 + 16.0 * amt), 0.0, 1.0],
    ]
}

/// CPU-side beam mesh, one contiguous vertex run per orbit point
pub struct BeamMesh {
    pub vertices: Vec<BeamVertex>,
    params: BeamParams,
}

impl BeamMesh {
    pub fn new(params: BeamParams) -> Self {
        let vertices = Vec::with_capacity(POINT_COUNT * params.beam_count * 9);
        Self { vertices, params }
    }

    /// Vertices per orbit point: beams x 3 segments x 3 corners
    pub fn vertices_per_point(&self) -> usize {
        self.params.beam_count * 9
    }

    /// Total vertex capacity of the mesh
    pub fn vertex_count(&self) -> usize {
        POINT_COUNT * self.vertices_per_point()
    }

    /// Vertex range covering one orbit point's beams (for ranged draws)
    pub fn point_range(&self, point: usize) -> Range<u32> {
        let per_point = self.vertices_per_point() as u32;
        let start = point as u32 * per_point;
        start..start + per_point
    }

    /// Rebuild all vertices for this frame's point positions and colors
    pub fn rebuild(&mut self, points: &[Vec2; POINT_COUNT], colors: &[[f32; 4]; POINT_COUNT]) {
        self.vertices.clear();
        let p = &self.params;
        let step = TAU / p.beam_count as f32;

        for (point, color) in points.iter().zip(colors) {
            for beam in 0..p.beam_count {
                // Beams start one step past zero and walk the full circle
                let rotation = Mat2::from_angle((beam + 1) as f32 * step);

                for (inner, half_width) in p.inner_radii_px.iter().zip(&p.half_widths_px) {
                    let corners = [
                        Vec2::new(*inner, 0.0),
                        Vec2::new(p.outer_radius_px, -half_width),
                        Vec2::new(p.outer_radius_px, *half_width),
                    ];
                    for corner in corners {
                        let position = *point + rotation * corner;
                        self.vertices.push(BeamVertex {
                            position: position.to_array(),
                            color: *color,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_points() -> [Vec2; POINT_COUNT] {
        [
            Vec2::new(600.0, 300.0),
            Vec2::new(700.0, 400.0),
            Vec2::new(640.0, 360.0),
            Vec2::new(580.0, 420.0),
        ]
    }

    #[test]
    fn test_vertex_count() {
        let mut mesh = BeamMesh::new(BeamParams::default());
        mesh.rebuild(&test_points(), &beam_colors(1.0));

        // 4 points x 144 beams x 3 segments x 3 corners
        assert_eq!(mesh.vertices.len(), 4 * 144 * 9);
        assert_eq!(mesh.vertices.len(), mesh.vertex_count());
    }

    #[test]
    fn test_point_ranges_partition_mesh() {
        let mesh = BeamMesh::new(BeamParams::default());
        let mut expected_start = 0;
        for point in 0..POINT_COUNT {
            let range = mesh.point_range(point);
            assert_eq!(range.start, expected_start);
            expected_start = range.end;
        }
        assert_eq!(expected_start as usize, mesh.vertex_count());
    }

    #[test]
    fn test_beams_radiate_from_their_point() {
        let params = BeamParams::default();
        let mut mesh = BeamMesh::new(params.clone());
        let points = test_points();
        mesh.rebuild(&points, &beam_colors(1.0));

        for (index, point) in points.iter().enumerate() {
            let range = mesh.point_range(index);
            for vertex in &mesh.vertices[range.start as usize..range.end as usize] {
                let distance = Vec2::from_array(vertex.position).distance(*point);
                // Every corner lies between the innermost radius and the
                // outer radius (plus the half-width at the far edge)
                assert!(distance >= params.inner_radii_px[0] - 1e-3);
                let max = (params.outer_radius_px.powi(2)
                    + params.half_widths_px[2].powi(2))
                .sqrt();
                assert!(distance <= max + 1e-3);
            }
        }
    }

    #[test]
    fn test_beams_equally_spaced() {
        let params = BeamParams {
            beam_count: 4,
            ..BeamParams::default()
        };
        let mut mesh = BeamMesh::new(params);
        let points = [Vec2::ZERO; POINT_COUNT];
        mesh.rebuild(&points, &beam_colors(0.0));

        // First corner of each beam for point 0: inner radius rotated by
        // successive quarter turns starting at 90 degrees
        let inner = 25.0;
        let first: Vec<Vec2> = (0..4)
            .map(|beam| Vec2::from_array(mesh.vertices[beam * 9].position))
            .collect();
        assert!(first[0].distance(Vec2::new(0.0, inner)) < 1e-3);
        assert!(first[1].distance(Vec2::new(-inner, 0.0)) < 1e-3);
        assert!(first[2].distance(Vec2::new(0.0, -inner)) < 1e-3);
        assert!(first[3].distance(Vec2::new(inner, 0.0)) < 1e-3);
    }

    #[test]
    fn test_colors_clamp() {
        // Huge aggregate saturates channels at 1.0, never beyond
        let hot = beam_colors(1000.0);
        for color in hot {
            for channel in color {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
        assert_eq!(hot[0][0], 1.0);

        // Zero aggregate keeps the fixed floors: blue 48/255, green 16/255
        let cold = beam_colors(0.0);
        assert_eq!(cold[0][0], 0.0);
        assert!((cold[2][2] - 48.0 / 255.0).abs() < 1e-6);
        assert!((cold[3][1] - 16.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_rebuild_reuses_allocation() {
        let mut mesh = BeamMesh::new(BeamParams::default());
        mesh.rebuild(&test_points(), &beam_colors(1.0));
        let capacity = mesh.vertices.capacity();
        for _ in 0..10 {
            mesh.rebuild(&test_points(), &beam_colors(2.0));
        }
        assert_eq!(mesh.vertices.capacity(), capacity);
    }
}
