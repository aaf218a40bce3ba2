/// Marker-embedded fragment split into hoisted declarations and body statements.
///
/// Both sequences borrow from the embedded fragment and keep the relative order
/// in which their chunks appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub declarations: Vec<&'a str>,
    pub statements: Vec<&'a str>,
}

impl<'a> Partition<'a> {
    /// Total number of bytes across both sequences.
    pub fn len(&self) -> usize {
        self.declarations
            .iter()
            .chain(self.statements.iter())
            .map(|chunk| chunk.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.statements.is_empty()
    }
}
