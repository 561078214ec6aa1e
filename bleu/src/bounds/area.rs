use crate::prep::WorkItem;

/// Total item area divided by the strip width, rounded up
pub fn area_bound(items: &[WorkItem], width: usize) -> usize {
    let area: usize = items.iter().map(WorkItem::area).sum();
    area.div_ceil(width)
}
