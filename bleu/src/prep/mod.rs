mod height;
mod width;

use log::debug;

use crate::entities::Instance;

#[doc(inline)]
pub use height::HeightReduction;
#[doc(inline)]
pub use height::reduce_for_height;
#[doc(inline)]
pub use width::fix_items;
#[doc(inline)]
pub use width::order_items;
#[doc(inline)]
pub use width::reduce_width;
#[doc(inline)]
pub use width::widen_items;

/// Item as seen by the preprocessing and the searches.
/// Its dimensions can only grow with respect to the [`Item`](crate::entities::Item) it was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkItem {
    /// Rank in the canonical order, used for all symmetry breaking
    pub idx: usize,
    /// Id of the corresponding item in the instance
    pub id: usize,
    pub width: usize,
    pub height: usize,
}

impl WorkItem {
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn same_shape(&self, other: &WorkItem) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Result of the width-based reductions, independent of any trial height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preprocessed {
    /// Items left for the column search, ascending by `idx`
    pub items: Vec<WorkItem>,
    /// Largest combined width of items that can appear side by side
    pub effective_width: usize,
    /// Combined height of the fixed items
    pub fixed_height: usize,
    /// Items which cannot share a column with any other item, stacked at `x = 0` in this order
    pub fixed: Vec<WorkItem>,
}

impl Preprocessed {
    pub fn items_area(&self) -> usize {
        self.items.iter().map(WorkItem::area).sum()
    }
}

/// Orders the items canonically and applies the three width reductions:
/// fixing items which cannot share a column, reducing the strip width to the largest
/// attainable combination of widths and widening items where slack can never be used.
pub fn preprocess(instance: &Instance) -> Preprocessed {
    let ordered = order_items(instance.items());
    let (fixed, mut items) = fix_items(ordered, instance.strip_width());
    let fixed_height = fixed.iter().map(|i| i.height).sum();

    let effective_width = match items.is_empty() {
        true => instance.strip_width(),
        false => reduce_width(&items, instance.strip_width()),
    };
    let n_widened = widen_items(&mut items, effective_width);

    debug!(
        "[PREP] {} fixed items (height {}), effective width {} (of {}), {} items widened",
        fixed.len(),
        fixed_height,
        effective_width,
        instance.strip_width(),
        n_widened
    );

    Preprocessed {
        items,
        effective_width,
        fixed_height,
        fixed,
    }
}
