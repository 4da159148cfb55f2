use crate::error::MeshError;
use crate::math::Point3;

use super::{Aabb, CellArray, CellData, SurfaceMesh};

/// A polygonal surface mesh: shared points, polygon cells indexing into
/// them, and named per-cell integer arrays.
///
/// Cell deletion is two-phase. [`SurfaceMesh::build_links`] prepares the
/// point-to-cell links and the deletion marks, cells are then marked one by
/// one, and [`SurfaceMesh::remove_deleted_cells`] compacts the cell list and
/// every cell array in a single pass. Compaction invalidates the links.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    points: Vec<Point3>,
    cells: Vec<Vec<u32>>,
    cell_data: CellData,
    /// For each point, the cells that use it. `None` until built.
    links: Option<Vec<Vec<usize>>>,
    /// Deletion marks, one per cell. Empty until links are built.
    deleted: Vec<bool>,
}

impl PolyMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from points and polygon cells.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell has fewer than three points or references
    /// a point that does not exist.
    pub fn from_parts(points: Vec<Point3>, cells: Vec<Vec<u32>>) -> Result<Self, MeshError> {
        for (i, cell) in cells.iter().enumerate() {
            if cell.len() < 3 {
                return Err(MeshError::InvalidCell(format!(
                    "cell {i} has {} points, need at least 3",
                    cell.len()
                )));
            }
            if let Some(&bad) = cell.iter().find(|&&p| p as usize >= points.len()) {
                return Err(MeshError::InvalidCell(format!(
                    "cell {i} references point {bad}, mesh has {} points",
                    points.len()
                )));
            }
        }
        Ok(Self {
            points,
            cells,
            ..Self::default()
        })
    }

    /// Attaches a per-cell integer array, replacing any array with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not hold exactly one value per cell.
    pub fn set_cell_array(
        &mut self,
        name: impl Into<String>,
        values: Vec<i32>,
    ) -> Result<(), MeshError> {
        let name = name.into();
        if values.len() != self.cells.len() {
            return Err(MeshError::ArrayLengthMismatch {
                name,
                expected: self.cells.len(),
                actual: values.len(),
            });
        }
        self.cell_data.insert(CellArray { name, values });
        Ok(())
    }

    /// The mesh points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Mutable access to the point positions. The point count is fixed.
    pub fn points_mut(&mut self) -> &mut [Point3] {
        &mut self.points
    }

    /// The polygon cells, each a list of point indices.
    #[must_use]
    pub fn cells(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// The attached per-cell arrays.
    #[must_use]
    pub fn cell_data(&self) -> &CellData {
        &self.cell_data
    }

    /// Cells using the given point, once links are built.
    #[must_use]
    pub fn point_cells(&self, point: usize) -> Option<&[usize]> {
        self.links.as_ref()?.get(point).map(Vec::as_slice)
    }

    /// Returns `true` if the cell is marked for deletion.
    #[must_use]
    pub fn is_cell_deleted(&self, cell: usize) -> bool {
        self.deleted.get(cell).copied().unwrap_or(false)
    }

    /// Drops every point no cell references. Returns the number of points
    /// removed.
    pub fn remove_unused_points(&mut self) -> usize {
        let keep = self.referenced_points();
        self.retain_points(&keep)
    }

    /// One flag per point, set if some cell uses it.
    fn referenced_points(&self) -> Vec<bool> {
        let mut used = vec![false; self.points.len()];
        for cell in &self.cells {
            for &p in cell {
                used[p as usize] = true;
            }
        }
        used
    }

    /// Keeps the flagged points and renumbers the cells. Every point a cell
    /// uses must be flagged.
    fn retain_points(&mut self, keep: &[bool]) -> usize {
        let mut remap: Vec<Option<u32>> = vec![None; self.points.len()];
        let mut next = 0u32;
        for (slot, _) in remap.iter_mut().zip(keep).filter(|(_, k)| **k) {
            *slot = Some(next);
            next += 1;
        }

        let removed = self.points.len() - next as usize;
        if removed == 0 {
            return 0;
        }

        let mut flags = keep.iter();
        self.points
            .retain(|_| flags.next().copied().unwrap_or(false));
        for cell in &mut self.cells {
            for p in cell.iter_mut() {
                if let Some(new) = remap[*p as usize] {
                    *p = new;
                }
            }
        }
        // Point indices moved; links refer to the old numbering.
        self.links = None;
        self.deleted.clear();
        removed
    }
}

impl SurfaceMesh for PolyMesh {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.points)
    }

    fn cell_tags(&self, name: &str) -> Option<&[i32]> {
        self.cell_data.array(name).map(|a| a.values.as_slice())
    }

    fn build_links(&mut self) {
        let mut links = vec![Vec::new(); self.points.len()];
        for (c, cell) in self.cells.iter().enumerate() {
            for &p in cell {
                let cells = &mut links[p as usize];
                if cells.last() != Some(&c) {
                    cells.push(c);
                }
            }
        }
        self.links = Some(links);
        self.deleted = vec![false; self.cells.len()];
    }

    fn mark_cell_deleted(&mut self, cell: usize) -> Result<(), MeshError> {
        if self.links.is_none() {
            return Err(MeshError::LinksNotBuilt);
        }
        let count = self.cells.len();
        let mark = self
            .deleted
            .get_mut(cell)
            .ok_or(MeshError::CellOutOfRange { cell, count })?;
        *mark = true;
        Ok(())
    }

    fn remove_deleted_cells(&mut self) -> usize {
        let removed = self.deleted.iter().filter(|&&d| d).count();
        if removed > 0 {
            let keep: Vec<bool> = self.deleted.iter().map(|&d| !d).collect();
            let mut flags = keep.iter();
            self.cells
                .retain(|_| flags.next().copied().unwrap_or(false));
            self.cell_data.retain_cells(&keep);
            self.links = None;
        }
        if self.links.is_none() {
            self.deleted.clear();
        } else {
            self.deleted.fill(false);
        }
        removed
    }

    fn cell_points(&self, cell: usize) -> Option<&[u32]> {
        self.cells.get(cell).map(Vec::as_slice)
    }

    fn remove_orphaned_points(&mut self, candidates: &[u32]) -> usize {
        let mut keep = self.referenced_points();
        let mut is_candidate = vec![false; self.points.len()];
        for &p in candidates {
            if let Some(flag) = is_candidate.get_mut(p as usize) {
                *flag = true;
            }
        }
        for (k, &c) in keep.iter_mut().zip(&is_candidate) {
            *k = *k || !c;
        }
        self.retain_points(&keep)
    }

    fn extract_tagged(&self, name: &str, tag: i32) -> Option<Self> {
        let tags = self.cell_tags(name)?;
        let selected: Vec<usize> = tags
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == tag)
            .map(|(c, _)| c)
            .collect();

        let mut sub = Self {
            points: self.points.clone(),
            cells: selected.iter().map(|&c| self.cells[c].clone()).collect(),
            cell_data: self.cell_data.select(&selected),
            links: None,
            deleted: Vec::new(),
        };
        sub.remove_unused_points();
        Some(sub)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Two unit quads side by side in the XY plane, tagged 1 and 2.
    fn two_quads() -> PolyMesh {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 1.0, 0.0),
        ];
        let cells = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
        let mut mesh = PolyMesh::from_parts(points, cells).unwrap();
        mesh.set_cell_array("ModelFaceID", vec![1, 2]).unwrap();
        mesh
    }

    #[test]
    fn from_parts_rejects_bad_index() {
        let result = PolyMesh::from_parts(vec![p(0.0, 0.0, 0.0)], vec![vec![0, 1, 2]]);
        assert!(matches!(result, Err(MeshError::InvalidCell(_))));
    }

    #[test]
    fn from_parts_rejects_degenerate_cell() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let result = PolyMesh::from_parts(pts, vec![vec![0, 1]]);
        assert!(matches!(result, Err(MeshError::InvalidCell(_))));
    }

    #[test]
    fn cell_array_length_must_match() {
        let mut mesh = two_quads();
        let result = mesh.set_cell_array("other", vec![1]);
        assert!(matches!(
            result,
            Err(MeshError::ArrayLengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn links_list_cells_per_point() {
        let mut mesh = two_quads();
        assert!(mesh.point_cells(1).is_none());
        mesh.build_links();
        assert_eq!(mesh.point_cells(1).unwrap(), &[0, 1]);
        assert_eq!(mesh.point_cells(0).unwrap(), &[0]);
        assert_eq!(mesh.point_cells(5).unwrap(), &[1]);
    }

    #[test]
    fn marking_without_links_fails() {
        let mut mesh = two_quads();
        assert!(matches!(
            mesh.mark_cell_deleted(0),
            Err(MeshError::LinksNotBuilt)
        ));
    }

    #[test]
    fn marking_out_of_range_fails() {
        let mut mesh = two_quads();
        mesh.build_links();
        assert!(matches!(
            mesh.mark_cell_deleted(7),
            Err(MeshError::CellOutOfRange { cell: 7, count: 2 })
        ));
    }

    #[test]
    fn remove_deleted_cells_compacts_tags() {
        let mut mesh = two_quads();
        mesh.build_links();
        mesh.mark_cell_deleted(0).unwrap();
        assert!(mesh.is_cell_deleted(0));
        assert_eq!(mesh.cell_count(), 2);

        assert_eq!(mesh.remove_deleted_cells(), 1);
        assert_eq!(mesh.cell_count(), 1);
        assert_eq!(mesh.cell_tags("ModelFaceID").unwrap(), &[2]);
        assert!(mesh.point_cells(0).is_none());
    }

    #[test]
    fn remove_without_marks_keeps_links() {
        let mut mesh = two_quads();
        mesh.build_links();
        assert_eq!(mesh.remove_deleted_cells(), 0);
        assert!(mesh.point_cells(0).is_some());
        assert_eq!(mesh.cell_count(), 2);
    }

    #[test]
    fn unused_points_are_dropped_and_reindexed() {
        let mut mesh = two_quads();
        mesh.build_links();
        mesh.mark_cell_deleted(0).unwrap();
        mesh.remove_deleted_cells();

        assert_eq!(mesh.remove_unused_points(), 2);
        assert_eq!(mesh.point_count(), 4);
        assert_eq!(mesh.cells()[0], vec![0, 2, 3, 1]);
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.min.x - 1.0).abs() < 1e-12);
        assert!((bounds.max.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn orphaned_points_only_drop_candidates() {
        let mut mesh = two_quads();
        let points = mesh.points().to_vec();
        let mut cells = mesh.cells().to_vec();
        cells.push(vec![0, 1, 3]);
        let mut mesh_with_spare = PolyMesh::from_parts(
            points.into_iter().chain([p(9.0, 9.0, 9.0)]).collect(),
            cells,
        )
        .unwrap();
        assert_eq!(mesh_with_spare.point_count(), 7);

        // Points 0 and 3 are still used by the third cell, point 6 is spare
        // but not a candidate.
        assert_eq!(mesh_with_spare.remove_orphaned_points(&[0, 3]), 0);

        mesh.build_links();
        mesh.mark_cell_deleted(0).unwrap();
        let freed = mesh.cell_points(0).unwrap().to_vec();
        mesh.remove_deleted_cells();
        assert_eq!(mesh.remove_orphaned_points(&freed), 2);
        assert_eq!(mesh.point_count(), 4);

        mesh_with_spare.build_links();
        mesh_with_spare.mark_cell_deleted(2).unwrap();
        let freed = mesh_with_spare.cell_points(2).unwrap().to_vec();
        mesh_with_spare.remove_deleted_cells();
        assert_eq!(mesh_with_spare.remove_orphaned_points(&freed), 0);
        assert_eq!(mesh_with_spare.point_count(), 7);
    }

    #[test]
    fn extract_tagged_builds_standalone_fragment() {
        let mesh = two_quads();
        let fragment = mesh.extract_tagged("ModelFaceID", 2).unwrap();
        assert_eq!(fragment.cell_count(), 1);
        assert_eq!(fragment.point_count(), 4);
        assert_eq!(fragment.cell_tags("ModelFaceID").unwrap(), &[2]);
        // Source is untouched.
        assert_eq!(mesh.cell_count(), 2);
    }

    #[test]
    fn extract_tagged_without_array_is_none() {
        let mesh = PolyMesh::new();
        assert!(mesh.extract_tagged("ModelFaceID", 1).is_none());
    }

    #[test]
    fn clone_is_deep() {
        let mut mesh = two_quads();
        let copy = mesh.clone();
        mesh.points_mut()[0] = p(-5.0, 0.0, 0.0);
        assert!((copy.points()[0].x - 0.0).abs() < 1e-12);
    }
}
