mod aabb;
mod cell_data;
mod poly_mesh;

pub use aabb::Aabb;
pub use cell_data::{CellArray, CellData};
pub use poly_mesh::PolyMesh;

use crate::error::MeshError;

/// The operations a model element needs from the mesh engine backing its
/// whole surface and face fragments.
///
/// `Clone` must produce a deep copy: the clone shares no storage with the
/// source. Cell indices are positions in the current cell list and shift
/// when deleted cells are removed.
pub trait SurfaceMesh: Clone {
    /// Number of points.
    fn point_count(&self) -> usize;

    /// Number of cells, including cells marked for deletion but not yet removed.
    fn cell_count(&self) -> usize;

    /// Axis-aligned bounds recomputed from the current points, or `None`
    /// when the mesh has no points.
    fn bounds(&self) -> Option<Aabb>;

    /// The named per-cell integer array, if attached.
    fn cell_tags(&self, name: &str) -> Option<&[i32]>;

    /// Builds point-to-cell links. Required before cells can be marked.
    fn build_links(&mut self);

    /// Marks a cell for deletion. The cell stays in place until
    /// [`SurfaceMesh::remove_deleted_cells`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if links have not been built or the cell index is
    /// out of range.
    fn mark_cell_deleted(&mut self, cell: usize) -> Result<(), MeshError>;

    /// Physically removes all marked cells together with their values in
    /// every cell array. Returns the number of cells removed.
    fn remove_deleted_cells(&mut self) -> usize;

    /// Point indices of a cell, or `None` if the cell does not exist.
    fn cell_points(&self, cell: usize) -> Option<&[u32]>;

    /// Drops those `candidates` no cell references any more, leaving every
    /// other point in place. Returns the number of points removed.
    fn remove_orphaned_points(&mut self, candidates: &[u32]) -> usize;

    /// Builds a standalone mesh from the cells whose value in array `name`
    /// equals `tag`. Returns `None` if the array is not attached.
    fn extract_tagged(&self, name: &str, tag: i32) -> Option<Self>;
}
