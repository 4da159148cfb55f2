use tracing::{debug, trace, warn};

use crate::error::{MeshError, ModelError, Result};
use crate::mesh::{PolyMesh, SurfaceMesh};

use super::{BlendParamRadius, Face, FaceId, PruneParams};

/// A surface model: an ordered list of faces, the whole-surface mesh whose
/// cells are tagged with face ids, blend radii between face pairs, and the
/// names of the segmentations the model was built from.
///
/// Lookups scan the face list in order and return the first match. Face ids
/// are expected to be unique but this is not enforced.
///
/// Cloning produces a fully independent copy, including every face
/// fragment and the whole mesh.
#[derive(Debug, Clone)]
pub struct ModelElement<M = PolyMesh> {
    kind: String,
    seg_names: Vec<String>,
    faces: Vec<Face<M>>,
    whole_mesh: Option<M>,
    blend_radii: Vec<BlendParamRadius>,
}

impl<M> Default for ModelElement<M> {
    fn default() -> Self {
        Self {
            kind: String::new(),
            seg_names: Vec::new(),
            faces: Vec::new(),
            whole_mesh: None,
            blend_radii: Vec::new(),
        }
    }
}

impl<M> ModelElement<M> {
    /// Data type name under which model elements are registered with the host.
    pub const DATA_TYPE: &'static str = "Model";

    /// Creates an empty element of the given kind (e.g. `parasolid`, `polydata`).
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Returns the model kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Sets the model kind.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    // --- Segmentations ---

    /// Returns the contributing segmentation names, in order.
    #[must_use]
    pub fn seg_names(&self) -> &[String] {
        &self.seg_names
    }

    /// Replaces the segmentation names.
    pub fn set_seg_names(&mut self, seg_names: Vec<String>) {
        self.seg_names = seg_names;
    }

    /// Returns `true` if the named segmentation contributed to this model.
    #[must_use]
    pub fn has_seg(&self, name: &str) -> bool {
        self.seg_names.iter().any(|s| s == name)
    }

    // --- Faces ---

    /// Returns the faces in list order.
    #[must_use]
    pub fn faces(&self) -> &[Face<M>] {
        &self.faces
    }

    /// Replaces the face list. Callers keep face ids unique.
    pub fn set_faces(&mut self, faces: Vec<Face<M>>) {
        self.faces = faces;
    }

    /// Face ids in list order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().map(|f| f.id)
    }

    /// Position of the face with this id in the face list.
    #[must_use]
    pub fn face_index(&self, id: FaceId) -> Option<usize> {
        self.faces.iter().position(|f| f.id == id)
    }

    /// Returns a reference to the first face with this id.
    #[must_use]
    pub fn face(&self, id: FaceId) -> Option<&Face<M>> {
        self.face_index(id).map(|i| &self.faces[i])
    }

    /// Returns a mutable reference to the first face with this id.
    pub fn face_mut(&mut self, id: FaceId) -> Option<&mut Face<M>> {
        self.face_index(id).map(|i| &mut self.faces[i])
    }

    /// Id of the first face with this name.
    #[must_use]
    pub fn face_id(&self, name: &str) -> Option<FaceId> {
        self.faces.iter().find(|f| f.name == name).map(|f| f.id)
    }

    /// First face with this name.
    #[must_use]
    pub fn face_by_name(&self, name: &str) -> Option<&Face<M>> {
        self.face(self.face_id(name)?)
    }

    /// Returns the name of the face with this id.
    #[must_use]
    pub fn face_name(&self, id: FaceId) -> Option<&str> {
        self.face(id).map(|f| f.name.as_str())
    }

    /// Renames a face. Does nothing if no face has this id.
    pub fn set_face_name(&mut self, name: impl Into<String>, id: FaceId) {
        if let Some(face) = self.face_mut(id) {
            face.name = name.into();
        }
    }

    /// Removes a face from the face list and hands it back.
    ///
    /// The whole mesh and blend radii are left alone; see
    /// [`ModelElement::delete_faces`] for the full removal.
    pub fn remove_face(&mut self, id: FaceId) -> Option<Face<M>> {
        let index = self.face_index(id)?;
        Some(self.faces.remove(index))
    }

    // --- Selection ---

    /// Marks a face selected. Other faces keep their selection state.
    pub fn set_selected_face(&mut self, id: FaceId) {
        if let Some(face) = self.face_mut(id) {
            face.selected = true;
        }
    }

    /// Marks the first face with this name selected. Unknown names are ignored.
    pub fn set_selected_face_by_name(&mut self, name: &str) {
        if let Some(id) = self.face_id(name) {
            self.set_selected_face(id);
        }
    }

    /// Marks the face at `index` in the face list selected. Out of range is ignored.
    pub fn set_selected_face_index(&mut self, index: usize) {
        if let Some(face) = self.faces.get_mut(index) {
            face.selected = true;
        }
    }

    /// Clears the selection flag on every face.
    pub fn clear_face_selection(&mut self) {
        for face in &mut self.faces {
            face.selected = false;
        }
    }

    /// Returns `false` for unknown ids.
    #[must_use]
    pub fn is_face_selected(&self, id: FaceId) -> bool {
        self.face(id).is_some_and(|f| f.selected)
    }

    /// Returns `false` for unknown names.
    #[must_use]
    pub fn is_face_selected_by_name(&self, name: &str) -> bool {
        self.face_by_name(name).is_some_and(|f| f.selected)
    }

    /// Ids of the selected faces, in list order.
    pub fn selected_face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().filter(|f| f.selected).map(|f| f.id)
    }

    // --- Whole mesh ---

    /// Returns a reference to the whole-surface mesh.
    #[must_use]
    pub fn whole_mesh(&self) -> Option<&M> {
        self.whole_mesh.as_ref()
    }

    /// Returns a mutable reference to the whole-surface mesh.
    pub fn whole_mesh_mut(&mut self) -> Option<&mut M> {
        self.whole_mesh.as_mut()
    }

    /// Replaces the whole-surface mesh.
    pub fn set_whole_mesh(&mut self, mesh: Option<M>) {
        self.whole_mesh = mesh;
    }

    /// Moves the whole-surface mesh out, leaving the element without one.
    pub fn take_whole_mesh(&mut self) -> Option<M> {
        self.whole_mesh.take()
    }

    // --- Blend radii ---

    /// Returns the blend radii in insertion order.
    #[must_use]
    pub fn blend_radii(&self) -> &[BlendParamRadius] {
        &self.blend_radii
    }

    /// Replaces the blend radii.
    pub fn set_blend_radii(&mut self, blend_radii: Vec<BlendParamRadius>) {
        self.blend_radii = blend_radii;
    }

    /// Entry for the ordered pair `(id1, id2)`. `(id2, id1)` is not matched.
    #[must_use]
    pub fn blend_param_radius(&self, id1: FaceId, id2: FaceId) -> Option<&BlendParamRadius> {
        self.blend_radii.iter().find(|b| b.matches(id1, id2))
    }

    /// Mutable entry for the ordered pair `(id1, id2)`.
    pub fn blend_param_radius_mut(
        &mut self,
        id1: FaceId,
        id2: FaceId,
    ) -> Option<&mut BlendParamRadius> {
        self.blend_radii.iter_mut().find(|b| b.matches(id1, id2))
    }

    /// Merges entries into the blend radii.
    ///
    /// An entry whose ordered pair already exists overwrites that entry's
    /// radius and is dropped; any other entry is appended.
    pub fn add_blend_radii<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = BlendParamRadius>,
    {
        for entry in entries {
            match self.blend_param_radius_mut(entry.face_id1, entry.face_id2) {
                Some(existing) => existing.radius = entry.radius,
                None => self.blend_radii.push(entry),
            }
        }
    }

    /// Drops every blend radius with `face` as either endpoint.
    pub fn remove_face_from_blend_param_radii(&mut self, face: FaceId) {
        self.blend_radii.retain(|b| !b.references(face));
    }
}

impl<M: SurfaceMesh> ModelElement<M> {
    /// Bounds of the whole mesh as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    ///
    /// All zeros when there is no mesh or the mesh has no points.
    #[must_use]
    pub fn calculate_bounding_box(&self) -> [f64; 6] {
        self.whole_mesh
            .as_ref()
            .filter(|m| m.point_count() > 0)
            .and_then(M::bounds)
            .map_or([0.0; 6], |aabb| aabb.to_bounds())
    }

    /// Deletes faces using the default [`PruneParams`].
    ///
    /// # Errors
    ///
    /// See [`ModelElement::delete_faces_with`].
    pub fn delete_faces(&mut self, face_ids: &[FaceId]) -> Result<()> {
        self.delete_faces_with(face_ids, &PruneParams::default())
    }

    /// Deletes faces from the model.
    ///
    /// For each id, in order: every whole-mesh cell tagged with it is
    /// removed, then the face itself, then every blend radius referencing
    /// it. Ids with no face are tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error, before anything is modified, if the element has no
    /// whole mesh or the mesh lacks the tag array.
    pub fn delete_faces_with(&mut self, face_ids: &[FaceId], params: &PruneParams) -> Result<()> {
        let Some(mesh) = self.whole_mesh.as_ref() else {
            warn!("face deletion rejected: model has no whole-surface mesh");
            return Err(ModelError::MissingMesh.into());
        };
        if mesh.cell_tags(&params.tag_array).is_none() {
            warn!(array = %params.tag_array, "face deletion rejected: tag array missing");
            return Err(ModelError::MissingTagArray(params.tag_array.clone()).into());
        }

        for &face_id in face_ids {
            let mesh = self.whole_mesh.as_mut().ok_or(ModelError::MissingMesh)?;
            let freed_points = prune_tagged_cells(mesh, &params.tag_array, face_id)?;
            let removed_cells = freed_points.len();
            if params.remove_orphan_points && removed_cells > 0 {
                let candidates: Vec<u32> = freed_points.into_iter().flatten().collect();
                mesh.remove_orphaned_points(&candidates);
            }

            let removed_face = self.remove_face(face_id);
            self.remove_face_from_blend_param_radii(face_id);

            if removed_face.is_none() && removed_cells == 0 {
                trace!(face_id, "no face or cells with this id");
            } else {
                debug!(face_id, removed_cells, "deleted face");
            }
        }

        Ok(())
    }

    /// Rebuilds every face's mesh fragment from the whole mesh.
    ///
    /// Faces without tagged cells end up with no fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the element has no whole mesh or the mesh lacks
    /// the tag array.
    pub fn rebuild_face_meshes(&mut self, params: &PruneParams) -> Result<()> {
        let mesh = self.whole_mesh.as_ref().ok_or(ModelError::MissingMesh)?;
        if mesh.cell_tags(&params.tag_array).is_none() {
            return Err(ModelError::MissingTagArray(params.tag_array.clone()).into());
        }

        for face in &mut self.faces {
            face.mesh = mesh
                .extract_tagged(&params.tag_array, face.id)
                .filter(|m| m.cell_count() > 0);
        }
        Ok(())
    }
}

/// Marks and removes every cell whose tag equals `face_id`. Returns the
/// point indices of each removed cell.
fn prune_tagged_cells<M: SurfaceMesh>(
    mesh: &mut M,
    tag_array: &str,
    face_id: FaceId,
) -> std::result::Result<Vec<Vec<u32>>, MeshError> {
    mesh.build_links();

    let doomed: Vec<usize> = mesh
        .cell_tags(tag_array)
        .map(|tags| {
            tags.iter()
                .enumerate()
                .filter(|&(_, &tag)| tag == face_id)
                .map(|(cell, _)| cell)
                .collect()
        })
        .unwrap_or_default();

    let mut freed = Vec::with_capacity(doomed.len());
    for cell in doomed {
        freed.push(mesh.cell_points(cell).unwrap_or_default().to_vec());
        mesh.mark_cell_deleted(cell)?;
    }
    mesh.remove_deleted_cells();
    Ok(freed)
}
