//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a qubit, equal to the wire row it occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The wire row as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The qubits of a contiguous register starting at `start`.
    pub fn range(start: usize, len: usize) -> Vec<QubitId> {
        (start..start + len).map(QubitId::from).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}
