use super::FaceId;

/// A blend (fillet) radius applied between two faces.
///
/// The pair is stored and matched in the order given: `(1, 2)` and `(2, 1)`
/// are different entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendParamRadius {
    /// First face of the pair.
    pub face_id1: FaceId,
    /// Second face of the pair.
    pub face_id2: FaceId,
    /// Blend radius.
    pub radius: f64,
}

impl BlendParamRadius {
    /// Creates a new blend radius entry.
    #[must_use]
    pub fn new(face_id1: FaceId, face_id2: FaceId, radius: f64) -> Self {
        Self {
            face_id1,
            face_id2,
            radius,
        }
    }

    /// Returns `true` if the entry applies to the ordered pair `(id1, id2)`.
    #[must_use]
    pub fn matches(&self, id1: FaceId, id2: FaceId) -> bool {
        self.face_id1 == id1 && self.face_id2 == id2
    }

    /// Returns `true` if either endpoint is `face`.
    #[must_use]
    pub fn references(&self, face: FaceId) -> bool {
        self.face_id1 == face || self.face_id2 == face
    }
}
