use itertools::Itertools;
use log::error;

use crate::entities::Coord;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks and tests

/// Every rectangle lies within `width x height` and no two rectangles overlap
pub fn packing_is_valid(
    positions: &[Coord],
    dims: &[(usize, usize)],
    width: usize,
    height: usize,
) -> bool {
    if positions.len() != dims.len() {
        error!("{} positions for {} rectangles", positions.len(), dims.len());
        return false;
    }
    for (i, (c, (w, h))) in positions.iter().zip(dims.iter()).enumerate() {
        if c.x + w > width || c.y + h > height {
            error!("rectangle {i} ({w}x{h} at {c}) exceeds the {width}x{height} bin");
            return false;
        }
    }
    let overlapping = (0..positions.len())
        .tuple_combinations()
        .find(|&(i, j)| rectangles_overlap(positions[i], dims[i], positions[j], dims[j]));

    match overlapping {
        Some((i, j)) => {
            error!("rectangles {i} and {j} overlap");
            false
        }
        None => true,
    }
}

pub fn rectangles_overlap(a: Coord, (aw, ah): (usize, usize), b: Coord, (bw, bh): (usize, usize)) -> bool {
    a.x < b.x + bw && b.x < a.x + aw && a.y < b.y + bh && b.y < a.y + ah
}

/// Column loads never exceed the bin height
pub fn columns_within_height(occupied: &[usize], height: usize) -> bool {
    occupied.iter().all(|&o| o <= height)
}
