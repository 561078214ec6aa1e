use crate::prep::WorkItem;

/// Greedy L-shaped reduction, starting from an already known bound `start`.
///
/// For growing heights `start + k`, a `W x (start + k)` rectangle is consumed item by item. The item
/// leaving the least residual gap is taken, the band it spans is cut off the rectangle, and the
/// remaining items that fit entirely next to it are discounted by its size. The first height at
/// which every item gets consumed is returned.
pub fn l_shape_bound(items: &[WorkItem], width: usize, start: usize) -> usize {
    let total_height: usize = items.iter().map(|i| i.height).sum();
    (start..total_height.max(start))
        .find(|&height| consumes_all(items, width, height))
        .unwrap_or(total_height.max(start))
}

fn consumes_all(items: &[WorkItem], width: usize, height: usize) -> bool {
    let (mut rw, mut rh) = (width as i64, height as i64);
    let mut remaining = items
        .iter()
        .map(|i| (i.width as i64, i.height as i64))
        .collect::<Vec<_>>();

    //ties go to the first item in canonical order
    while let Some(sel_pos) = remaining
        .iter()
        .enumerate()
        .min_by_key(|(_, (w, h))| (rw - w).min(rh - h))
        .map(|(pos, _)| pos)
    {
        let (w, h) = remaining.remove(sel_pos);
        if w > rw && h > rh {
            return false;
        }
        if rw - w <= rh - h {
            //cut off a horizontal band
            rh -= h;
            remaining
                .iter_mut()
                .filter(|(ow, _)| *ow <= rw - w)
                .for_each(|(_, oh)| *oh = (*oh - h).max(0));
        } else {
            //cut off a vertical band
            rw -= w;
            remaining
                .iter_mut()
                .filter(|(_, oh)| *oh <= rh - h)
                .for_each(|(ow, _)| *ow = (*ow - w).max(0));
        }
        remaining.retain(|&(w, h)| w > 0 && h > 0);
    }
    true
}
