//! host groups of the cluster being provisioned or exported
use indexmap::{IndexMap, IndexSet};

/// Read-only view of a host group
///
/// Host groups are provided by the caller; `topocfg` never creates or changes them.
pub trait HostGroup {
    fn name(&self) -> &str;

    /// Member hosts (host names or addresses)
    fn hosts(&self) -> &IndexSet<String>;

    /// Names of the components assigned to this group
    fn components(&self) -> &IndexSet<String>;
}

/// Plain [HostGroup] as read from topology files
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HostGroupInfo {
    pub name: String,
    #[serde(default)]
    pub hosts: IndexSet<String>,
    #[serde(default)]
    pub components: IndexSet<String>,
}

impl HostGroupInfo {
    pub fn new<H, C>(
        name: impl Into<String>,
        hosts: impl IntoIterator<Item = H>,
        components: impl IntoIterator<Item = C>,
    ) -> Self
    where
        H: Into<String>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            hosts: hosts.into_iter().map(Into::into).collect(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

impl HostGroup for HostGroupInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn hosts(&self) -> &IndexSet<String> {
        &self.hosts
    }

    fn components(&self) -> &IndexSet<String> {
        &self.components
    }
}

/// Host groups indexed by name
#[derive(Debug, Clone)]
pub struct Topology<G> {
    groups: IndexMap<String, G>,
}

impl<G> Default for Topology<G> {
    fn default() -> Self {
        Self {
            groups: Default::default(),
        }
    }
}

impl<G: HostGroup> Topology<G> {
    pub fn from_groups(groups: impl IntoIterator<Item = G>) -> Self {
        groups.into_iter().collect()
    }

    /// Adds a group, returning the group previously registered under the same name
    pub fn insert(&mut self, group: G) -> Option<G> {
        self.groups.insert(group.name().to_owned(), group)
    }

    pub fn get(&self, name: &str) -> Option<&G> {
        self.groups.get(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &G> {
        self.groups.values()
    }

    /// All groups that run `component`
    pub fn groups_for_component(&self, component: &str) -> Vec<&G> {
        self.groups()
            .filter(|group| group.components().contains(component))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<G: HostGroup> FromIterator<G> for Topology<G> {
    fn from_iter<T: IntoIterator<Item = G>>(iter: T) -> Self {
        let mut topology = Self::default();
        for group in iter {
            topology.insert(group);
        }
        topology
    }
}
