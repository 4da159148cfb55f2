use crate::mesh::PolyMesh;

/// Identifier of a face within a model element.
///
/// Matches the value stored for the face's cells in the whole mesh's
/// face id array.
pub type FaceId = i32;

/// A named, selectable region of a model's surface.
#[derive(Debug, Clone)]
pub struct Face<M = PolyMesh> {
    /// Identifier, unique within the owning element.
    pub id: FaceId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Classification tag, e.g. `wall` or `cap`.
    pub kind: String,
    /// Whether the face is part of the current selection.
    pub selected: bool,
    /// Whether the face is shown.
    pub visible: bool,
    /// Opacity, conventionally in `[0, 1]`.
    pub opacity: f64,
    /// RGB color.
    pub color: [f64; 3],
    /// The face's own mesh fragment, if one has been built.
    pub mesh: Option<M>,
}

impl<M> Face<M> {
    /// Creates a visible, unselected, opaque white face with no mesh fragment.
    #[must_use]
    pub fn new(id: FaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: String::new(),
            selected: false,
            visible: true,
            opacity: 1.0,
            color: [1.0, 1.0, 1.0],
            mesh: None,
        }
    }

    /// Sets the classification tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Attaches a mesh fragment.
    #[must_use]
    pub fn with_mesh(mut self, mesh: M) -> Self {
        self.mesh = Some(mesh);
        self
    }
}
