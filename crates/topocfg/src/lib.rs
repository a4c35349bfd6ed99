//! # topocfg - topology-aware configuration resolution
//!
//! ## Introduction for developers
//!
//! Read this to understand how `topocfg` works internally.
//!
//! ### Terms
//!
//! - a **blueprint** describes a cluster as a set of logical *host groups*
//! - a **host group** is bound to one or more concrete hosts when the cluster is created
//!   (see [topology::HostGroup])
//! - **properties** are flat `key = value` entries, grouped by config type (`hdfs-site`,
//!   `core-site`, ...), see [properties::PropertyMap]
//! - a **token** is the placeholder `%HOSTGROUP::<name>%`, optionally followed by `:<port>`
//!
//! ```yaml
//! hdfs-site:
//!   dfs.namenode.http-address: "%HOSTGROUP::master%:50070"
//! hbase-site:
//!   hbase.zookeeper.quorum: "%HOSTGROUP::master%:2181,%HOSTGROUP::workers%:2181"
//! ```
//!
//! ### Registry
//!
//! see [registry::PropertyRegistry]
//!
//! Only properties listed in the registry are touched. Each `(config type, property name)` pair maps
//! to exactly one [updater::PropertyUpdater] and therefore to exactly one [registry::Category].
//! The registry is built once and passed by reference into both directions.
//!
//! ### Materialization (blueprint -> cluster)
//!
//! see [materialize::materialize_for_cluster]
//!
//! Every registered property present in the input is run through its updater. Updaters only ever
//! read the *input* map, so the order in which properties are processed does not matter. New values
//! are written back once all of them were computed; a failing updater leaves the map untouched.
//!
//! | **updater**            | **input**                                   | **output**               |
//! |------------------------|---------------------------------------------|--------------------------|
//! | single host            | `%HOSTGROUP::master%:50070`                 | `m1:50070`               |
//! | single host (fallback) | `localhost:50070`                           | `m1:50070`               |
//! | multi host             | `%HOSTGROUP::master%:2181,%HOSTGROUP::w%:2181` | `m1:2181,w1:2181`     |
//! | conditional resource   | `jdbc:mysql://%HOSTGROUP::master%/hive`     | `jdbc:mysql://m1/hive`   |
//! | unit suffix            | `1024`                                      | `1024m`                  |
//! | list format            | `h1,h2`                                     | `['h1','h2']`            |
//!
//! ### Export (cluster -> blueprint)
//!
//! see [export::export_for_blueprint]
//!
//! The reverse direction replaces concrete hosts with tokens. Single host properties that do not
//! contain any host of the cluster are dropped. Multi host properties are collapsed so that each
//! token appears once.
//!
//! Hosts only match on host boundaries: `h1` does not match inside `h10` or `h1.example.com`.
//!
pub mod documents;
pub mod error;
pub mod export;
pub mod materialize;
pub mod processor;
pub mod properties;
pub mod registry;
pub mod token;
pub mod topology;
pub mod updater;

pub use error::Error;
pub use processor::ConfigurationProcessor;
pub use properties::PropertyMap;
pub use registry::{Category, PropertyRegistry, RegistryBuilder};
pub use topology::{HostGroup, HostGroupInfo, Topology};
pub use updater::PropertyUpdater;
