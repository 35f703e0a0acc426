//! Ansible dynamic inventory built from Xen Orchestra VMs.
//!
//! VMs are fetched from Xen Orchestra, filtered by tag and name, given a
//! management address from the permitted networks, and grouped by their
//! `ansible_group` tag.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod xo;

use config::{Config, Filters};
use error::Result;
use models::VM_TYPE;
use output::Inventory;
use processing::{group_for, host_is_excluded, host_vars_from_tags, select_management_address};
use xo::{ObjectFetcher, ObjectSource};

/// Build the inventory from every VM the fetcher returns.
pub async fn build_inventory<S: ObjectSource>(
    fetcher: &mut ObjectFetcher<S>,
    filters: &Filters,
) -> Result<Inventory> {
    let vms = fetcher.objects_by_type(VM_TYPE, false).await?;
    log::info!("#Start build_inventory() vm_count={}", vms.len());

    let mut inventory = Inventory::new();
    let mut excluded = 0;
    for vm in vms.values() {
        if host_is_excluded(vm, &filters.deny_tags, &filters.deny_patterns) {
            excluded += 1;
            continue;
        }
        let address =
            select_management_address(&vm.address_list(), &filters.management_networks);
        if address.is_none() {
            log::debug!("No management address for {}", vm.name_label);
        }
        let host_vars = host_vars_from_tags(&vm.tags);
        let group = group_for(&host_vars).to_string();
        inventory.add_host(&group, &vm.name_label, address.as_deref(), host_vars);
    }

    log::info!(
        "Inventory has {} hosts in {} groups ({excluded} excluded)",
        inventory.hostvars().len(),
        inventory.groups().len()
    );
    Ok(inventory)
}

/// Build the inventory from `source` using the filters and cache age in `config`.
pub async fn inventory_from_source<S: ObjectSource>(source: S, config: &Config) -> Result<Inventory> {
    let mut fetcher = ObjectFetcher::with_cache_seconds(source, config.cache_seconds);
    build_inventory(&mut fetcher, &config.filters).await
}
