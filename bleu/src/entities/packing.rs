use crate::entities::{Coord, Instance};
use crate::util::assertions::packing_is_valid;

/// A complete placement of all items of an [`Instance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packing {
    /// Bottom-left corner of every item, indexed by item id
    pub positions: Vec<Coord>,
    /// `(width, height)` of every item as used by the search, indexed by item id.
    /// Preprocessing may have enlarged an item, never shrunk it.
    pub dims: Vec<(usize, usize)>,
}

impl Packing {
    pub fn position(&self, id: usize) -> Coord {
        self.positions[id]
    }

    /// Height of the strip occupied by the packing
    pub fn height(&self) -> usize {
        self.positions
            .iter()
            .zip(self.dims.iter())
            .map(|(c, (_, h))| c.y + h)
            .max()
            .unwrap_or(0)
    }

    /// Checks whether every item lies within `strip_width x height` and no two items overlap.
    /// Both the original and the enlarged item dimensions are verified.
    pub fn is_valid(&self, instance: &Instance, height: usize) -> bool {
        let original = instance
            .items()
            .iter()
            .map(|i| (i.width, i.height))
            .collect::<Vec<_>>();
        self.positions.len() == instance.n_items()
            && self.dims.len() == instance.n_items()
            && self
                .dims
                .iter()
                .zip(original.iter())
                .all(|((w, h), (ow, oh))| w >= ow && h >= oh)
            && packing_is_valid(&self.positions, &original, instance.strip_width(), height)
            && packing_is_valid(&self.positions, &self.dims, instance.strip_width(), height)
    }

    /// The packing mirrored along the diagonal
    pub fn transposed(&self) -> Self {
        Self {
            positions: self.positions.iter().map(|c| c.transposed()).collect(),
            dims: self.dims.iter().map(|&(w, h)| (h, w)).collect(),
        }
    }
}
