mod blend;
mod element;
mod face;

pub use blend::BlendParamRadius;
pub use element::ModelElement;
pub use face::{Face, FaceId};

/// Name of the per-cell array tagging each whole-mesh cell with its face id.
pub const MODEL_FACE_ID_ARRAY: &str = "ModelFaceID";

/// Parameters controlling face deletion.
#[derive(Debug, Clone)]
pub struct PruneParams {
    /// Per-cell array holding the face id of each cell.
    pub tag_array: String,
    /// Drop points left without cells after each face is removed.
    pub remove_orphan_points: bool,
}

impl Default for PruneParams {
    fn default() -> Self {
        Self {
            tag_array: MODEL_FACE_ID_ARRAY.to_string(),
            remove_orphan_points: true,
        }
    }
}
