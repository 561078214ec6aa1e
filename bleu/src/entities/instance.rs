use std::fmt::Display;

use itertools::Itertools;

use crate::entities::Item;

/// A Strip Packing instance: a set of items and the fixed width of the strip.
/// Can only be constructed through [`Instance::new`], which rejects malformed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    strip_width: usize,
    items: Vec<Item>,
}

impl Instance {
    pub fn new(strip_width: usize, items: Vec<Item>) -> Result<Self, InvalidInstance> {
        if items.is_empty() {
            return Err(InvalidInstance::NoItems);
        }
        if strip_width == 0 {
            return Err(InvalidInstance::ZeroStripWidth);
        }
        if let Some((pos, item)) = items.iter().enumerate().find(|(i, item)| item.id != *i) {
            return Err(InvalidInstance::NonConsecutiveIds {
                position: pos,
                id: item.id,
            });
        }
        if let Some(item) = items.iter().find(|i| i.width == 0 || i.height == 0) {
            return Err(InvalidInstance::DegenerateItem { id: item.id });
        }
        if let Some(item) = items.iter().find(|i| i.width > strip_width) {
            return Err(InvalidInstance::ItemTooWide {
                id: item.id,
                width: item.width,
                strip_width,
            });
        }
        Ok(Self { strip_width, items })
    }

    /// Creates an instance from `(width, height)` pairs, ids are assigned in order
    pub fn from_dims(
        strip_width: usize,
        dims: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, InvalidInstance> {
        let items = dims
            .into_iter()
            .enumerate()
            .map(|(id, (w, h))| Item::new(id, w, h))
            .collect_vec();
        Self::new(strip_width, items)
    }

    /// The instance mirrored along the diagonal: every item has its width and height swapped
    /// and `strip_width` becomes the new width of the strip.
    pub fn transposed(&self, strip_width: usize) -> Result<Self, InvalidInstance> {
        let items = self
            .items
            .iter()
            .map(|i| Item::new(i.id, i.height, i.width))
            .collect_vec();
        Self::new(strip_width, items)
    }

    pub fn strip_width(&self) -> usize {
        self.strip_width
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_area(&self) -> usize {
        self.items.iter().map(Item::area).sum()
    }

    /// Height of the strip when all items are stacked on top of each other
    pub fn total_height(&self) -> usize {
        self.items.iter().map(|i| i.height).sum()
    }

    pub fn max_height(&self) -> usize {
        self.items.iter().map(|i| i.height).max().unwrap_or(0)
    }
}

/// Reasons why an [`Instance`] cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInstance {
    /// The instance does not contain a single item.
    NoItems,
    /// The strip has no width.
    ZeroStripWidth,
    /// An item has zero width or zero height.
    DegenerateItem { id: usize },
    /// An item does not fit within the width of the strip.
    ItemTooWide {
        id: usize,
        width: usize,
        strip_width: usize,
    },
    /// The item ids do not match their positions.
    NonConsecutiveIds { position: usize, id: usize },
}

impl Display for InvalidInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoItems => write!(f, "instance contains no items"),
            Self::ZeroStripWidth => write!(f, "strip width must be positive"),
            Self::DegenerateItem { id } => {
                write!(f, "item {id} must have a positive width and height")
            }
            Self::ItemTooWide {
                id,
                width,
                strip_width,
            } => write!(
                f,
                "item {id} has width {width}, which exceeds the strip width {strip_width}"
            ),
            Self::NonConsecutiveIds { position, id } => write!(
                f,
                "item at position {position} has id {id}, ids should be consecutive starting from 0"
            ),
        }
    }
}

impl std::error::Error for InvalidInstance {}
