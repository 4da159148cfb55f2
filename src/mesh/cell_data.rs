/// A named integer attribute with one value per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellArray {
    /// Array name, unique within a [`CellData`].
    pub name: String,
    /// One value per cell, in cell order.
    pub values: Vec<i32>,
}

/// The per-cell attribute arrays attached to a mesh.
///
/// Arrays are kept in attachment order. Every array holds exactly one value
/// per cell; the owning mesh enforces that on attach and keeps it true
/// across cell removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellData {
    arrays: Vec<CellArray>,
}

impl CellData {
    /// Returns `true` if an array with this name is attached.
    #[must_use]
    pub fn has_array(&self, name: &str) -> bool {
        self.array(name).is_some()
    }

    /// Looks up an array by name.
    #[must_use]
    pub fn array(&self, name: &str) -> Option<&CellArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    /// Names of all attached arrays.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name.as_str())
    }

    /// Number of attached arrays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Returns `true` if no arrays are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Attaches an array, replacing any existing array with the same name.
    pub(crate) fn insert(&mut self, array: CellArray) {
        match self.arrays.iter_mut().find(|a| a.name == array.name) {
            Some(existing) => *existing = array,
            None => self.arrays.push(array),
        }
    }

    /// Keeps only the values whose cell is retained, in every array.
    pub(crate) fn retain_cells(&mut self, keep: &[bool]) {
        for array in &mut self.arrays {
            let mut flags = keep.iter();
            array.values.retain(|_| flags.next().copied().unwrap_or(false));
        }
    }

    /// Builds the cell data for a subset of cells, given by index.
    pub(crate) fn select(&self, cells: &[usize]) -> Self {
        let arrays = self
            .arrays
            .iter()
            .map(|a| CellArray {
                name: a.name.clone(),
                values: cells.iter().map(|&c| a.values[c]).collect(),
            })
            .collect();
        Self { arrays }
    }
}
