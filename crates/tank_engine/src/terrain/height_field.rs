//! Terrain height field sampling
//!
//! A `HeightField` is the physics-side view of a terrain mesh: a rectangular
//! grid of vertex positions and normals, centered on the world origin, that
//! bodies query once per tick to pin their height and orient to the local
//! slope. The grid is immutable after construction.
//!
//! Sampling is bilinear over the cell containing the query point, which
//! makes it exact at grid vertices and continuous across cell boundaries.
//! Out-of-range queries clamp to the edge of the grid rather than failing;
//! a real-time caller is better served by the nearest valid answer than by
//! an error it cannot act on mid-frame.

use crate::foundation::math::utils::{lerp, normalize_or, world_up};
use crate::foundation::math::Vec3;
use thiserror::Error;

/// Construction failures for [`HeightField`].
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Width or depth was zero or negative
    #[error("terrain extent must be positive, got {width}x{depth}")]
    InvalidExtent {
        /// Requested world width
        width: f32,
        /// Requested world depth
        depth: f32,
    },
    /// Subdivision count was zero on either axis
    #[error("terrain needs at least one cell per axis, got {x_subdivisions}x{z_subdivisions}")]
    DegenerateGrid {
        /// Requested cell count along X
        x_subdivisions: usize,
        /// Requested cell count along Z
        z_subdivisions: usize,
    },
    /// Supplied sample array does not match the grid dimensions
    #[error("expected {expected} samples for a {columns}x{rows} vertex grid, got {actual}")]
    SampleCountMismatch {
        /// Required sample count, `(Nx+1)*(Nz+1)`
        expected: usize,
        /// Sample count actually supplied
        actual: usize,
        /// Vertex columns, `Nx+1`
        columns: usize,
        /// Vertex rows, `Nz+1`
        rows: usize,
    },
}

/// One grid vertex: where it sits and which way the surface faces there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainVertex {
    /// World-space vertex position
    pub position: Vec3,
    /// Unit surface normal at the vertex
    pub normal: Vec3,
}

/// Height/normal sampling surface over a rectangular grid.
///
/// Vertex `(x, z)` for `0 <= x <= Nx`, `0 <= z <= Nz` lives at index
/// `(Nx+1)*z + x`; the world extent spans `[-width/2, width/2]` by
/// `[-depth/2, depth/2]`.
#[derive(Debug, Clone)]
pub struct HeightField {
    width: f32,
    depth: f32,
    x_subdivisions: usize,
    z_subdivisions: usize,
    vertices: Vec<TerrainVertex>,
}

impl HeightField {
    /// Build from explicit vertex data, the path a terrain mesh builder
    /// uses.
    ///
    /// `vertices` is row-major with `(x_subdivisions+1)*(z_subdivisions+1)`
    /// entries. Normals are renormalized defensively on sampling, not here.
    pub fn from_vertices(
        width: f32,
        depth: f32,
        x_subdivisions: usize,
        z_subdivisions: usize,
        vertices: Vec<TerrainVertex>,
    ) -> Result<Self, TerrainError> {
        Self::check_dimensions(width, depth, x_subdivisions, z_subdivisions)?;
        let expected = (x_subdivisions + 1) * (z_subdivisions + 1);
        if vertices.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: vertices.len(),
                columns: x_subdivisions + 1,
                rows: z_subdivisions + 1,
            });
        }
        Ok(Self {
            width,
            depth,
            x_subdivisions,
            z_subdivisions,
            vertices,
        })
    }

    /// Build from a row-major height array, deriving vertex positions on
    /// the centered grid and normals by central differences.
    pub fn from_heights(
        width: f32,
        depth: f32,
        x_subdivisions: usize,
        z_subdivisions: usize,
        heights: &[f32],
    ) -> Result<Self, TerrainError> {
        Self::check_dimensions(width, depth, x_subdivisions, z_subdivisions)?;
        let columns = x_subdivisions + 1;
        let rows = z_subdivisions + 1;
        let expected = columns * rows;
        if heights.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: heights.len(),
                columns,
                rows,
            });
        }

        let cell_width = width / x_subdivisions as f32;
        let cell_depth = depth / z_subdivisions as f32;
        let height_at = |x: usize, z: usize| heights[columns * z + x];

        let mut vertices = Vec::with_capacity(expected);
        for z in 0..rows {
            for x in 0..columns {
                let world_x = x as f32 * cell_width - width * 0.5;
                let world_z = z as f32 * cell_depth - depth * 0.5;

                // Central differences, one-sided at the grid border
                let x_lo = x.saturating_sub(1);
                let x_hi = (x + 1).min(columns - 1);
                let z_lo = z.saturating_sub(1);
                let z_hi = (z + 1).min(rows - 1);
                let dx = (height_at(x_hi, z) - height_at(x_lo, z))
                    / ((x_hi - x_lo) as f32 * cell_width);
                let dz = (height_at(x, z_hi) - height_at(x, z_lo))
                    / ((z_hi - z_lo) as f32 * cell_depth);
                let normal = normalize_or(Vec3::new(-dx, 1.0, -dz), world_up());

                vertices.push(TerrainVertex {
                    position: Vec3::new(world_x, height_at(x, z), world_z),
                    normal,
                });
            }
        }

        Ok(Self {
            width,
            depth,
            x_subdivisions,
            z_subdivisions,
            vertices,
        })
    }

    /// Build by evaluating `height` at every vertex of the grid.
    ///
    /// Convenience for procedural surfaces in demos and tests; `height`
    /// receives world-space (x, z).
    pub fn from_fn<F>(
        width: f32,
        depth: f32,
        x_subdivisions: usize,
        z_subdivisions: usize,
        height: F,
    ) -> Result<Self, TerrainError>
    where
        F: Fn(f32, f32) -> f32,
    {
        Self::check_dimensions(width, depth, x_subdivisions, z_subdivisions)?;
        let columns = x_subdivisions + 1;
        let rows = z_subdivisions + 1;
        let cell_width = width / x_subdivisions as f32;
        let cell_depth = depth / z_subdivisions as f32;

        let mut heights = Vec::with_capacity(columns * rows);
        for z in 0..rows {
            for x in 0..columns {
                let world_x = x as f32 * cell_width - width * 0.5;
                let world_z = z as f32 * cell_depth - depth * 0.5;
                heights.push(height(world_x, world_z));
            }
        }
        Self::from_heights(width, depth, x_subdivisions, z_subdivisions, &heights)
    }

    fn check_dimensions(
        width: f32,
        depth: f32,
        x_subdivisions: usize,
        z_subdivisions: usize,
    ) -> Result<(), TerrainError> {
        if width <= 0.0 || depth <= 0.0 {
            return Err(TerrainError::InvalidExtent { width, depth });
        }
        if x_subdivisions == 0 || z_subdivisions == 0 {
            return Err(TerrainError::DegenerateGrid {
                x_subdivisions,
                z_subdivisions,
            });
        }
        Ok(())
    }

    /// World extent along X
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World extent along Z
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Cell count along X
    pub fn x_subdivisions(&self) -> usize {
        self.x_subdivisions
    }

    /// Cell count along Z
    pub fn z_subdivisions(&self) -> usize {
        self.z_subdivisions
    }

    /// World width of one grid cell
    pub fn cell_width(&self) -> f32 {
        self.width / self.x_subdivisions as f32
    }

    /// World depth of one grid cell
    pub fn cell_depth(&self) -> f32 {
        self.depth / self.z_subdivisions as f32
    }

    /// Grid vertex at column `x`, row `z`, clamped to the grid.
    pub fn vertex(&self, x: usize, z: usize) -> &TerrainVertex {
        let x = x.min(self.x_subdivisions);
        let z = z.min(self.z_subdivisions);
        &self.vertices[(self.x_subdivisions + 1) * z + x]
    }

    /// Grid cell containing the world-space point, clamped to
    /// `[0, Nx-1] x [0, Nz-1]`.
    pub fn cell_index(&self, x: f32, z: f32) -> (usize, usize) {
        let (gx, gz, _, _) = self.cell_fraction(x, z);
        (gx, gz)
    }

    // World point to (cell, fraction-in-cell), clamped with a trace when the
    // query leaves the grid.
    fn cell_fraction(&self, x: f32, z: f32) -> (usize, usize, f32, f32) {
        let fx = (x + self.width * 0.5) / self.cell_width();
        let fz = (z + self.depth * 0.5) / self.cell_depth();

        let max_fx = self.x_subdivisions as f32;
        let max_fz = self.z_subdivisions as f32;
        if fx < 0.0 || fx > max_fx || fz < 0.0 || fz > max_fz {
            log::trace!("terrain query ({x}, {z}) outside the grid, clamping");
        }
        let fx = fx.clamp(0.0, max_fx);
        let fz = fz.clamp(0.0, max_fz);

        let gx = (fx.floor() as usize).min(self.x_subdivisions - 1);
        let gz = (fz.floor() as usize).min(self.z_subdivisions - 1);
        let tx = (fx - gx as f32).clamp(0.0, 1.0);
        let tz = (fz - gz as f32).clamp(0.0, 1.0);
        (gx, gz, tx, tz)
    }

    /// Surface height under the world-space point (x, z).
    ///
    /// Bilinear over the containing cell: across X on the near and far rows
    /// first, then across Z between the two. Evaluating exactly at a grid
    /// vertex returns that vertex's stored height.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let (gx, gz, tx, tz) = self.cell_fraction(x, z);
        let v0 = self.vertex(gx, gz).position.y;
        let v1 = self.vertex(gx + 1, gz).position.y;
        let v2 = self.vertex(gx, gz + 1).position.y;
        let v3 = self.vertex(gx + 1, gz + 1).position.y;

        let x0 = lerp(v0, v1, tx);
        let x1 = lerp(v2, v3, tx);
        lerp(x0, x1, tz)
    }

    /// Surface normal under the world-space point (x, z).
    ///
    /// Same quad lookup as [`Self::sample_height`], interpolating the four
    /// vertex normals and renormalizing (interpolated unit vectors are not
    /// unit length). Falls back to +Y if the blend degenerates.
    pub fn sample_normal(&self, x: f32, z: f32) -> Vec3 {
        let (gx, gz, tx, tz) = self.cell_fraction(x, z);
        let v0 = self.vertex(gx, gz).normal;
        let v1 = self.vertex(gx + 1, gz).normal;
        let v2 = self.vertex(gx, gz + 1).normal;
        let v3 = self.vertex(gx + 1, gz + 1).normal;

        let x0 = v0.lerp(&v1, tx);
        let x1 = v2.lerp(&v3, tx);
        normalize_or(x0.lerp(&x1, tz), world_up())
    }

    /// Clamp a position into the playable interior, inset one cell from
    /// every edge.
    pub fn constrain(&self, position: Vec3) -> Vec3 {
        let half_width = self.width * 0.5 - self.cell_width();
        let half_depth = self.depth * 0.5 - self.cell_depth();
        Vec3::new(
            position.x.clamp(-half_width, half_width),
            position.y,
            position.z.clamp(-half_depth, half_depth),
        )
    }

    /// Whether (x, z) lies inside the playable interior used by
    /// [`Self::constrain`].
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half_width = self.width * 0.5 - self.cell_width();
        let half_depth = self.depth * 0.5 - self.cell_depth();
        x >= -half_width && x <= half_width && z >= -half_depth && z <= half_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn ramp_field() -> HeightField {
        // Unit quad with the far row raised to 10
        HeightField::from_heights(1.0, 1.0, 1, 1, &[0.0, 0.0, 10.0, 10.0]).expect("valid grid")
    }

    #[test]
    fn test_midpoint_of_ramp_quad() {
        let field = ramp_field();
        assert_relative_eq!(field.sample_height(0.0, 0.0), 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sample_exact_at_vertices() {
        let field = ramp_field();
        assert_relative_eq!(field.sample_height(-0.5, -0.5), 0.0, epsilon = EPSILON);
        assert_relative_eq!(field.sample_height(0.5, -0.5), 0.0, epsilon = EPSILON);
        assert_relative_eq!(field.sample_height(-0.5, 0.5), 10.0, epsilon = EPSILON);
        assert_relative_eq!(field.sample_height(0.5, 0.5), 10.0, epsilon = EPSILON);
    }

    #[test]
    fn test_interpolation_is_linear_along_z() {
        let field = ramp_field();
        assert_relative_eq!(field.sample_height(0.2, -0.25), 2.5, epsilon = EPSILON);
        assert_relative_eq!(field.sample_height(-0.3, 0.25), 7.5, epsilon = EPSILON);
    }

    #[test]
    fn test_row_major_vertex_layout() {
        let field = HeightField::from_heights(
            4.0,
            2.0,
            2,
            1,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .expect("valid grid");
        // Column 1, row 1 is the fifth entry of the row-major array
        let v = field.vertex(1, 1);
        assert_relative_eq!(v.position.y, 5.0);
        assert_relative_eq!(v.position.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.position.z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_flat_field_has_up_normals() {
        let field =
            HeightField::from_fn(20.0, 20.0, 8, 8, |_, _| 3.0).expect("valid grid");
        assert_relative_eq!(field.sample_height(4.3, -7.1), 3.0, epsilon = EPSILON);
        let normal = field.sample_normal(4.3, -7.1);
        assert_relative_eq!(normal.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_slope_normals_lean_uphill() {
        // Height rises with +X, so normals lean toward -X
        let field = HeightField::from_fn(10.0, 10.0, 10, 10, |x, _| x).expect("valid grid");
        let normal = field.sample_normal(0.0, 0.0);
        assert!(normal.x < 0.0);
        assert!(normal.y > 0.0);
        assert_relative_eq!(normal.magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(normal.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sampled_normal_is_unit_length() {
        let field = HeightField::from_fn(40.0, 40.0, 16, 16, |x, z| (x * 0.3).sin() * 2.0 + (z * 0.2).cos())
            .expect("valid grid");
        let normal = field.sample_normal(3.7, -5.2);
        assert_relative_eq!(normal.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_out_of_range_queries_clamp_to_edge() {
        let field = ramp_field();
        assert_relative_eq!(field.sample_height(-100.0, -100.0), 0.0, epsilon = EPSILON);
        assert_relative_eq!(field.sample_height(100.0, 100.0), 10.0, epsilon = EPSILON);
        assert_eq!(field.cell_index(-100.0, 100.0), (0, 0));
    }

    #[test]
    fn test_cell_index_matches_grid() {
        let field =
            HeightField::from_fn(40.0, 40.0, 4, 4, |_, _| 0.0).expect("valid grid");
        // Cells are 10 wide; the origin sits in cell (2, 2)
        assert_eq!(field.cell_index(0.0, 0.0), (2, 2));
        assert_eq!(field.cell_index(-19.9, -19.9), (0, 0));
        assert_eq!(field.cell_index(19.9, 19.9), (3, 3));
    }

    #[test]
    fn test_constrain_insets_one_cell() {
        let field =
            HeightField::from_fn(40.0, 40.0, 4, 4, |_, _| 0.0).expect("valid grid");
        let clamped = field.constrain(Vec3::new(25.0, 1.0, -25.0));
        assert_relative_eq!(clamped.x, 10.0, epsilon = EPSILON);
        assert_relative_eq!(clamped.z, -10.0, epsilon = EPSILON);
        assert_relative_eq!(clamped.y, 1.0);

        assert!(field.contains(0.0, 0.0));
        assert!(!field.contains(10.1, 0.0));
        assert!(!field.contains(0.0, -10.1));
    }

    #[test]
    fn test_from_vertices_validates_count() {
        let vertices = vec![
            TerrainVertex {
                position: Vec3::zeros(),
                normal: Vec3::y(),
            };
            5
        ];
        let result = HeightField::from_vertices(10.0, 10.0, 1, 1, vertices);
        assert!(matches!(
            result,
            Err(TerrainError::SampleCountMismatch { expected: 4, actual: 5, .. })
        ));
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        assert!(matches!(
            HeightField::from_heights(0.0, 10.0, 1, 1, &[0.0; 4]),
            Err(TerrainError::InvalidExtent { .. })
        ));
        assert!(matches!(
            HeightField::from_heights(10.0, 10.0, 0, 1, &[0.0; 2]),
            Err(TerrainError::DegenerateGrid { .. })
        ));
    }
}
