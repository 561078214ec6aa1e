#![allow(dead_code)]

use bleu::entities::{Coord, Instance};
use bleu::util::knapsack::reachable_sums;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Random instance with small dimensions, suitable for exhaustive verification
pub fn random_instance(rng: &mut SmallRng, max_items: usize, max_width: usize) -> Instance {
    let strip_width = rng.random_range(2..=max_width);
    let n_items = rng.random_range(1..=max_items);
    let dims = (0..n_items)
        .map(|_| {
            (
                rng.random_range(1..=strip_width),
                rng.random_range(1..=strip_width + 1),
            )
        })
        .collect::<Vec<_>>();
    Instance::from_dims(strip_width, dims).unwrap()
}

pub fn random_instances(seed: u64, n: usize, max_items: usize, max_width: usize) -> Vec<Instance> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| random_instance(&mut rng, max_items, max_width))
        .collect()
}

/// Exhaustive search over the normal pattern positions.
/// Some packing exists iff one exists with every item at a normal position.
pub fn brute_force_feasible(instance: &Instance, height: usize) -> bool {
    if instance.items().iter().any(|i| i.height > height) {
        return false;
    }
    let xs = reachable_sums(instance.items().iter().map(|i| i.width), instance.strip_width());
    let ys = reachable_sums(instance.items().iter().map(|i| i.height), height);
    let mut order = instance.items().to_vec();
    order.sort_by_key(|i| std::cmp::Reverse(i.area()));

    fn place(
        k: usize,
        order: &[bleu::entities::Item],
        xs: &[usize],
        ys: &[usize],
        width: usize,
        height: usize,
        placed: &mut Vec<(Coord, (usize, usize))>,
    ) -> bool {
        let Some(item) = order.get(k) else {
            return true;
        };
        for &x in xs.iter().filter(|&&x| x + item.width <= width) {
            for &y in ys.iter().filter(|&&y| y + item.height <= height) {
                let c = Coord::new(x, y);
                let free = placed.iter().all(|&(pc, (pw, ph))| {
                    x + item.width <= pc.x || pc.x + pw <= x || y + item.height <= pc.y || pc.y + ph <= y
                });
                if free {
                    placed.push((c, (item.width, item.height)));
                    if place(k + 1, order, xs, ys, width, height, placed) {
                        return true;
                    }
                    placed.pop();
                }
            }
        }
        false
    }

    place(0, &order, &xs, &ys, instance.strip_width(), height, &mut vec![])
}

/// Smallest height for which a packing exists
pub fn brute_force_optimum(instance: &Instance) -> usize {
    (instance.max_height()..=instance.total_height())
        .find(|&h| brute_force_feasible(instance, h))
        .unwrap()
}
