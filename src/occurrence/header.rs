use std::collections::HashMap;

/// Column positions of a delimited file, keyed by header name. Built once per parse.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// If a name appears more than once, its first column is used.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(cells.len());
        for (index, cell) in cells.iter().enumerate() {
            positions
                .entry(cell.as_ref().to_string())
                .or_insert(index);
        }
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
