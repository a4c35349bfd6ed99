//! Single entry point bundling a registry with both directions
use crate::export::export_for_blueprint;
use crate::materialize::materialize_for_cluster;
use crate::properties::PropertyMap;
use crate::registry::PropertyRegistry;
use crate::topology::{HostGroup, Topology};
use crate::Error;

#[derive(Debug, Clone, derive_new::new)]
pub struct ConfigurationProcessor {
    registry: PropertyRegistry,
}

impl Default for ConfigurationProcessor {
    fn default() -> Self {
        Self::new(PropertyRegistry::stack_defaults())
    }
}

impl ConfigurationProcessor {
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// see [materialize_for_cluster]
    pub fn materialize<'p, G: HostGroup>(
        &self,
        properties: &'p mut PropertyMap,
        topology: &Topology<G>,
    ) -> Result<&'p mut PropertyMap, Error> {
        materialize_for_cluster(&self.registry, properties, topology)
    }

    /// see [export_for_blueprint]
    pub fn export<'p, G: HostGroup>(
        &self,
        properties: &'p mut PropertyMap,
        topology: &Topology<G>,
    ) -> &'p mut PropertyMap {
        export_for_blueprint(&self.registry, properties, topology)
    }
}
