//! Data-node descriptors: how the host application shows each kind of
//! project data node.
//!
//! A descriptor pairs a display class name and icon with a type predicate,
//! an exact match on the node's data type name. The project set is
//! installed once at start-up with [`register_project_descriptors`] and
//! torn down with [`DescriptorRegistry::clear`].

use slotmap::SlotMap;
use tracing::debug;

use crate::error::RegistryError;
use crate::model::ModelElement;

slotmap::new_key_type! {
    /// Unique identifier for a descriptor in the registry.
    pub struct DescriptorId;
}

/// How the host presents one data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    /// Class name shown to the user.
    pub class_name: String,
    /// Icon resource path.
    pub icon: String,
    /// Data type the descriptor applies to.
    pub data_type: String,
}

impl NodeDescriptor {
    /// Creates a descriptor whose class name is the data type itself.
    #[must_use]
    pub fn new(data_type: impl Into<String>, icon: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            class_name: data_type.clone(),
            icon: icon.into(),
            data_type,
        }
    }

    /// The type predicate.
    #[must_use]
    pub fn applies_to(&self, data_type: &str) -> bool {
        self.data_type == data_type
    }
}

/// Arena of node descriptors, at most one per data type.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: SlotMap<DescriptorId, NodeDescriptor>,
}

impl DescriptorRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor for the same data type is already
    /// registered.
    pub fn register(&mut self, descriptor: NodeDescriptor) -> Result<DescriptorId, RegistryError> {
        if self.descriptor_for(&descriptor.data_type).is_some() {
            return Err(RegistryError::DuplicateDataType(descriptor.data_type));
        }
        debug!(data_type = %descriptor.data_type, icon = %descriptor.icon, "registered node descriptor");
        Ok(self.descriptors.insert(descriptor))
    }

    /// Removes a descriptor, returning it if it was registered.
    pub fn unregister(&mut self, id: DescriptorId) -> Option<NodeDescriptor> {
        let removed = self.descriptors.remove(id)?;
        debug!(data_type = %removed.data_type, "unregistered node descriptor");
        Some(removed)
    }

    /// Returns a reference to the descriptor, if registered.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&NodeDescriptor> {
        self.descriptors.get(id)
    }

    /// The descriptor whose predicate accepts `data_type`.
    #[must_use]
    pub fn descriptor_for(&self, data_type: &str) -> Option<&NodeDescriptor> {
        self.descriptors.values().find(|d| d.applies_to(data_type))
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no descriptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Removes every descriptor.
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }
}

/// Data types of the project tree and their icon resources.
const PROJECT_DESCRIPTORS: &[(&str, &str)] = &[
    ("ProjectFolder", ":projectfolder.png"),
    ("ImageFolder", ":imagefolder.png"),
    ("PathFolder", ":pathfolder.png"),
    ("Path", ":path.png"),
    ("SegmentationFolder", ":segfolder.png"),
    ("ContourGroup", ":contourgroup.png"),
    ("ModelFolder", ":modelfolder.png"),
    ("MeshFolder", ":meshfolder.png"),
    ("Mesh", ":mesh.png"),
    ("SimulationFolder", ":simfolder.png"),
    ("SimJob", ":simjob.png"),
];

/// Installs the descriptors for every project data type, including
/// [`ModelElement`].
///
/// # Errors
///
/// Returns an error if any of the data types is already registered. The
/// descriptors installed before the clash stay registered.
pub fn register_project_descriptors(
    registry: &mut DescriptorRegistry,
) -> Result<Vec<DescriptorId>, RegistryError> {
    let model = (<ModelElement>::DATA_TYPE, ":model.png");
    PROJECT_DESCRIPTORS
        .iter()
        .chain(std::iter::once(&model))
        .map(|&(data_type, icon)| registry.register(NodeDescriptor::new(data_type, icon)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn project_set_covers_every_type_once() {
        let mut registry = DescriptorRegistry::new();
        let ids = register_project_descriptors(&mut registry).unwrap();
        assert_eq!(ids.len(), 12);
        assert_eq!(registry.len(), 12);

        let model = registry.descriptor_for("Model").unwrap();
        assert_eq!(model.icon, ":model.png");
        assert_eq!(registry.descriptor_for("SimJob").unwrap().class_name, "SimJob");
    }

    #[test]
    fn predicate_is_exact_match() {
        let mut registry = DescriptorRegistry::new();
        register_project_descriptors(&mut registry).unwrap();
        assert!(registry.descriptor_for("model").is_none());
        assert!(registry.descriptor_for("Unknown").is_none());
    }

    #[test]
    fn duplicate_data_type_is_rejected() {
        let mut registry = DescriptorRegistry::new();
        registry
            .register(NodeDescriptor::new("Path", ":path.png"))
            .unwrap();
        let result = registry.register(NodeDescriptor::new("Path", ":other.png"));
        assert!(matches!(result, Err(RegistryError::DuplicateDataType(t)) if t == "Path"));
        assert_eq!(registry.descriptor_for("Path").unwrap().icon, ":path.png");
    }

    #[test]
    fn registering_project_set_twice_fails() {
        let mut registry = DescriptorRegistry::new();
        register_project_descriptors(&mut registry).unwrap();
        assert!(register_project_descriptors(&mut registry).is_err());
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn unregister_and_clear() {
        let mut registry = DescriptorRegistry::new();
        let ids = register_project_descriptors(&mut registry).unwrap();

        let removed = registry.unregister(ids[0]).unwrap();
        assert_eq!(removed.data_type, "ProjectFolder");
        assert!(registry.get(ids[0]).is_none());
        assert!(registry.unregister(ids[0]).is_none());

        registry.clear();
        assert!(registry.is_empty());
    }
}
