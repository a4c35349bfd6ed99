//! Registry of topology dependent properties
//!
//! Maps `(config type, property name)` to the [PropertyUpdater] responsible for it. A pair is
//! registered at most once, so every property belongs to exactly one [Category].
//!
//! The registry is immutable once built and can be shared freely between callers.
use crate::updater::PropertyUpdater;
use indexmap::IndexMap;

/// Substitution kind of a registered property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SingleHost,
    MultiHost,
    ConditionalResource,
    UnitSuffix,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::SingleHost => f.write_str("single-host"),
            Category::MultiHost => f.write_str("multi-host"),
            Category::ConditionalResource => f.write_str("conditional-resource"),
            Category::UnitSuffix => f.write_str("unit-suffix"),
        }
    }
}

/// A registered property
#[derive(Debug, Clone, Copy)]
pub struct Entry<'r> {
    pub config_type: &'r str,
    pub name: &'r str,
    pub updater: &'r PropertyUpdater,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    /// config type -> property name -> updater
    updaters: IndexMap<String, IndexMap<String, PropertyUpdater>>,
}

impl PropertyRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, config_type: &str, name: &str) -> Option<&PropertyUpdater> {
        self.updaters
            .get(config_type)
            .and_then(|properties| properties.get(name))
    }

    /// All registered properties
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.updaters.iter().flat_map(|(config_type, properties)| {
            properties.iter().map(move |(name, updater)| Entry {
                config_type,
                name,
                updater,
                category: updater.category(),
            })
        })
    }

    /// Registered properties of one category
    pub fn entries_in(&self, category: Category) -> impl Iterator<Item = Entry<'_>> {
        self.entries().filter(move |entry| entry.category == category)
    }

    pub fn len(&self) -> usize {
        self.updaters.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Properties of the default HDP service stack
    pub fn stack_defaults() -> Self {
        use PropertyUpdater as U;

        Self::builder()
            // NAMENODE
            .single_host("hdfs-site", "dfs.http.address", "NAMENODE")
            .single_host("hdfs-site", "dfs.https.address", "NAMENODE")
            .single_host("core-site", "fs.default.name", "NAMENODE")
            .single_host("hdfs-site", "dfs.namenode.http-address", "NAMENODE")
            .single_host("hdfs-site", "dfs.namenode.https-address", "NAMENODE")
            .single_host("core-site", "fs.defaultFS", "NAMENODE")
            .single_host("hbase-site", "hbase.rootdir", "NAMENODE")
            // SECONDARY_NAMENODE
            .single_host("hdfs-site", "dfs.secondary.http.address", "SECONDARY_NAMENODE")
            .single_host(
                "hdfs-site",
                "dfs.namenode.secondary.http-address",
                "SECONDARY_NAMENODE",
            )
            // JOBTRACKER
            .single_host("mapred-site", "mapred.job.tracker", "JOBTRACKER")
            .single_host("mapred-site", "mapred.job.tracker.http.address", "JOBTRACKER")
            .single_host(
                "mapred-site",
                "mapreduce.history.server.http.address",
                "JOBTRACKER",
            )
            // HISTORYSERVER
            .single_host("yarn-site", "yarn.log.server.url", "HISTORYSERVER")
            .single_host(
                "mapred-site",
                "mapreduce.jobhistory.webapp.address",
                "HISTORYSERVER",
            )
            .single_host("mapred-site", "mapreduce.jobhistory.address", "HISTORYSERVER")
            // RESOURCEMANAGER
            .single_host("yarn-site", "yarn.resourcemanager.hostname", "RESOURCEMANAGER")
            .single_host(
                "yarn-site",
                "yarn.resourcemanager.resource-tracker.address",
                "RESOURCEMANAGER",
            )
            .single_host(
                "yarn-site",
                "yarn.resourcemanager.webapp.address",
                "RESOURCEMANAGER",
            )
            .single_host(
                "yarn-site",
                "yarn.resourcemanager.scheduler.address",
                "RESOURCEMANAGER",
            )
            .single_host("yarn-site", "yarn.resourcemanager.address", "RESOURCEMANAGER")
            .single_host(
                "yarn-site",
                "yarn.resourcemanager.admin.address",
                "RESOURCEMANAGER",
            )
            // HIVE_SERVER
            .single_host("hive-site", "hive.metastore.uris", "HIVE_SERVER")
            .conditional_resource(
                "hive-site",
                "javax.jdo.option.ConnectionURL",
                "MYSQL_SERVER",
                "hive-env",
                "hive_database",
            )
            // OOZIE_SERVER
            .single_host("oozie-site", "oozie.base.url", "OOZIE_SERVER")
            // ZOOKEEPER_SERVER
            .multi_host("hbase-site", "hbase.zookeeper.quorum", "ZOOKEEPER_SERVER")
            .multi_host("webhcat-site", "templeton.zookeeper.hosts", "ZOOKEEPER_SERVER")
            // STORM
            .single_host("storm-site", "nimbus.host", "NIMBUS")
            .single_host("storm-site", "worker.childopts", "GANGLIA_SERVER")
            .single_host("storm-site", "supervisor.childopts", "GANGLIA_SERVER")
            .single_host("storm-site", "nimbus.childopts", "GANGLIA_SERVER")
            .register(
                "storm-site",
                "storm.zookeeper.servers",
                U::list_format(U::multi_host("ZOOKEEPER_SERVER")),
            )
            // FALCON
            .single_host("falcon-startup.properties", "*.broker.url", "FALCON_SERVER")
            // legacy heap sizes without unit
            .unit_suffix("hadoop-env", "namenode_heapsize")
            .unit_suffix("hadoop-env", "namenode_opt_newsize")
            .unit_suffix("hadoop-env", "namenode_opt_maxnewsize")
            .unit_suffix("hadoop-env", "dtnode_heapsize")
            .unit_suffix("mapred-env", "jtnode_opt_newsize")
            .unit_suffix("mapred-env", "jtnode_opt_maxnewsize")
            .unit_suffix("mapred-env", "jtnode_heapsize")
            .unit_suffix("hbase-env", "hbase_master_heapsize")
            .unit_suffix("hbase-env", "hbase_regionserver_heapsize")
            .build()
    }
}

/// Builds a [PropertyRegistry]
///
/// Registering the same `(config type, property name)` twice keeps the last updater.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    updaters: IndexMap<String, IndexMap<String, PropertyUpdater>>,
}

impl RegistryBuilder {
    pub fn register(
        mut self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        updater: PropertyUpdater,
    ) -> Self {
        let config_type = config_type.into();
        let name = name.into();

        let properties = self.updaters.entry(config_type.clone()).or_default();
        if let Some(previous) = properties.insert(name.clone(), updater) {
            tracing::warn!(%config_type, property = %name, %previous, "property registered twice, replacing");
        }

        self
    }

    pub fn single_host(
        self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        self.register(config_type, name, PropertyUpdater::single_host(component))
    }

    pub fn multi_host(
        self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        self.register(config_type, name, PropertyUpdater::multi_host(component))
    }

    pub fn conditional_resource(
        self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
        condition_config_type: impl Into<String>,
        condition_property: impl Into<String>,
    ) -> Self {
        self.register(
            config_type,
            name,
            PropertyUpdater::conditional_resource(
                component,
                condition_config_type,
                condition_property,
            ),
        )
    }

    pub fn unit_suffix(self, config_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.register(config_type, name, PropertyUpdater::unit_suffix())
    }

    pub fn build(self) -> PropertyRegistry {
        PropertyRegistry {
            updaters: self.updaters,
        }
    }
}
