use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::entities::{Instance, Item};
use crate::io::ext_repr::ExtInstance;

/// Imports an instance into the library
pub fn import(ext_instance: &ExtInstance) -> Result<Instance> {
    let items = ext_instance
        .items
        .iter()
        .map(|ext_item| Item::new(ext_item.id as usize, ext_item.width as usize, ext_item.height as usize))
        .sorted_by_key(|item| item.id)
        .collect_vec();

    ensure!(
        items.iter().enumerate().all(|(i, item)| item.id == i),
        "All items should have consecutive IDs starting from 0. IDs: {:?}",
        items.iter().map(|item| item.id).collect_vec()
    );

    let instance = Instance::new(ext_instance.strip_width as usize, items)?;
    Ok(instance)
}
