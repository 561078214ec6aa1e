//! Bounds derived from dual feasible functions.
//!
//! A dual feasible function `f` maps widths in `[0, W]` to `[0, W]` such that any set of widths
//! fitting side by side still fits after the mapping. Replacing every item width by `f(w)` therefore
//! keeps every packing valid and `sum f(w_i) h_i / W` is a lower bound on the height.
//! All three families are evaluated in exact integer arithmetic.

use rayon::prelude::*;

use crate::prep::WorkItem;

/// Best bound over all three families and all their parameters
pub fn dff_bound(items: &[WorkItem], width: usize) -> usize {
    let f1 = (1..=width)
        .into_par_iter()
        .map(|alpha| scaling_bound(items, width, alpha))
        .max()
        .unwrap_or(0);
    let f2_f3 = (1..=width / 2)
        .into_par_iter()
        .map(|alpha| {
            usize::max(
                clipping_bound(items, width, alpha),
                doubling_bound(items, width, alpha),
            )
        })
        .max()
        .unwrap_or(0);
    f1.max(f2_f3)
}

/// `f(w) = w` when `(alpha + 1) w` is a multiple of `W`, else `floor((alpha + 1) w / W) W / alpha`
pub fn scaling_bound(items: &[WorkItem], width: usize, alpha: usize) -> usize {
    let (w_cap, alpha_u) = (width as u128, alpha as u128);
    //all terms are expressed over the common denominator W * alpha
    let numerator: u128 = items
        .iter()
        .map(|i| {
            let (w, h) = (i.width as u128, i.height as u128);
            let scaled = (alpha_u + 1) * w;
            match scaled % w_cap == 0 {
                true => w * h * alpha_u,
                false => (scaled / w_cap) * h * w_cap,
            }
        })
        .sum();
    numerator.div_ceil(w_cap * alpha_u) as usize
}

/// `f(w) = W` for large items, `w` for medium items and `0` for small items, with `alpha` as threshold
pub fn clipping_bound(items: &[WorkItem], width: usize, alpha: usize) -> usize {
    let numerator: u128 = items
        .iter()
        .map(|i| {
            let f = if i.width > width - alpha {
                width
            } else if i.width >= alpha {
                i.width
            } else {
                0
            };
            f as u128 * i.height as u128
        })
        .sum();
    numerator.div_ceil(width as u128) as usize
}

/// Floor based rule, normalized by `2 floor(W / alpha)`
pub fn doubling_bound(items: &[WorkItem], width: usize, alpha: usize) -> usize {
    let units = width / alpha;
    let numerator: u128 = items
        .iter()
        .map(|i| {
            let f = match (2 * i.width).cmp(&width) {
                std::cmp::Ordering::Greater => 2 * (units - (width - i.width) / alpha),
                std::cmp::Ordering::Equal => units,
                std::cmp::Ordering::Less => 2 * (i.width / alpha),
            };
            f as u128 * i.height as u128
        })
        .sum();
    numerator.div_ceil(2 * units as u128) as usize
}
