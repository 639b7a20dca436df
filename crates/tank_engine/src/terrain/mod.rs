//! Terrain module - the surface bodies drive on
//!
//! Exposes the height field the physics core samples for ground height and
//! surface normals. Mesh generation and rendering of the terrain live with
//! the application; only the sampling surface is the engine's concern.

pub mod height_field;

pub use height_field::{HeightField, TerrainError, TerrainVertex};
