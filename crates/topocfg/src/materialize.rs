//! blueprint -> cluster
use crate::properties::PropertyMap;
use crate::registry::PropertyRegistry;
use crate::topology::{HostGroup, Topology};
use crate::Error;

/// Replaces host group tokens with the hosts of `topology`
///
/// Every registered property present in `properties` is passed through its updater. Properties
/// without a registry entry are left as they are.
///
/// All values are computed before any is written back: on error `properties` is unchanged.
#[tracing::instrument(level = "trace", skip_all)]
pub fn materialize_for_cluster<'p, G: HostGroup>(
    registry: &PropertyRegistry,
    properties: &'p mut PropertyMap,
    topology: &Topology<G>,
) -> Result<&'p mut PropertyMap, Error> {
    let mut updates = vec![];

    for entry in registry.entries() {
        let Some(current) = properties
            .get(entry.config_type)
            .and_then(|type_properties| type_properties.get(entry.name))
        else {
            continue;
        };

        let updated = entry.updater.apply(topology, current, properties)?;
        tracing::debug!(
            config_type = entry.config_type,
            property = entry.name,
            category = %entry.category,
            %current,
            %updated,
            "materialized"
        );

        updates.push((entry.config_type, entry.name, updated));
    }

    for (config_type, name, updated) in updates {
        if let Some(value) = properties
            .get_mut(config_type)
            .and_then(|type_properties| type_properties.get_mut(name))
        {
            *value = updated;
        }
    }

    Ok(properties)
}
