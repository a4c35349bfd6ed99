//! cluster -> blueprint
//!
//! Hosts are matched on host boundaries only. A match must not be preceded or followed by a
//! character that can be part of a host name (ASCII alphanumerics, `.`, `-`, `_`), and must not lie
//! inside an existing token. `h1` therefore does not match `h10`, `h1.example.com` or
//! `%HOSTGROUP::h1%`.
use crate::properties::PropertyMap;
use crate::registry::{Category, PropertyRegistry};
use crate::token;
use crate::topology::{HostGroup, Topology};
use indexmap::IndexSet;

/// Replaces concrete hosts with host group tokens
///
/// - single host and conditional resource properties: the first group with a host contained in
///   the value wins. Values without any known host are removed.
/// - multi host properties: every host is replaced, then duplicate entries are collapsed.
#[tracing::instrument(level = "trace", skip_all)]
pub fn export_for_blueprint<'p, G: HostGroup>(
    registry: &PropertyRegistry,
    properties: &'p mut PropertyMap,
    topology: &Topology<G>,
) -> &'p mut PropertyMap {
    let single_host = registry
        .entries_in(Category::SingleHost)
        .chain(registry.entries_in(Category::ConditionalResource));

    for entry in single_host {
        export_single_host(properties, entry.config_type, entry.name, topology);
    }

    for entry in registry.entries_in(Category::MultiHost) {
        export_multi_host(properties, entry.config_type, entry.name, topology);
    }

    properties
}

fn export_single_host<G: HostGroup>(
    properties: &mut PropertyMap,
    config_type: &str,
    name: &str,
    topology: &Topology<G>,
) {
    let Some(type_properties) = properties.get_mut(config_type) else {
        return;
    };
    let Some(value) = type_properties.get(name) else {
        return;
    };

    let exported = topology.groups().find_map(|group| {
        group
            .hosts()
            .iter()
            .find(|host| host_occurrences(value, host).next().is_some())
            .map(|host| replace_host(value, host, &token::host_group_token(group.name())))
    });

    match exported {
        Some(exported) => {
            tracing::debug!(config_type, property = name, %exported, "exported");
            type_properties.insert(name.to_owned(), exported);
        }
        None => {
            tracing::debug!(config_type, property = name, %value, "no cluster host found, removing");
            type_properties.shift_remove(name);
        }
    }
}

fn export_multi_host<G: HostGroup>(
    properties: &mut PropertyMap,
    config_type: &str,
    name: &str,
    topology: &Topology<G>,
) {
    let Some(value) = properties
        .get_mut(config_type)
        .and_then(|type_properties| type_properties.get_mut(name))
    else {
        return;
    };

    let mut replaced = value.clone();
    for group in topology.groups() {
        let group_token = token::host_group_token(group.name());
        for host in group.hosts() {
            replaced = replace_host(&replaced, host, &group_token);
        }
    }

    let in_brackets = replaced.starts_with('[');
    let elements: IndexSet<String> = replaced
        .split(',')
        .map(|element| element.replace(|c: char| c == '[' || c == ']', ""))
        .collect();
    let joined = elements.into_iter().collect::<Vec<_>>().join(",");

    let exported = if in_brackets {
        format!("[{joined}]")
    } else {
        joined
    };

    tracing::debug!(config_type, property = name, %exported, "exported");
    *value = exported;
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// Start offsets of `host` in `value`, on host boundaries and outside of tokens
fn host_occurrences<'v>(value: &'v str, host: &'v str) -> impl Iterator<Item = usize> + 'v {
    let tokens = token::token_spans(value);

    value
        .match_indices(host)
        .map(|(start, _)| start)
        .filter(move |_| !host.is_empty())
        .filter(move |&start| {
            let end = start + host.len();
            let before = value[..start].chars().next_back();
            let after = value[end..].chars().next();

            !before.is_some_and(is_host_char)
                && !after.is_some_and(is_host_char)
                && !tokens
                    .iter()
                    .any(|span| start < span.end && span.start < end)
        })
}

fn replace_host(value: &str, host: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut last = 0;

    for start in host_occurrences(value, host).collect::<Vec<_>>() {
        result.push_str(&value[last..start]);
        result.push_str(replacement);
        last = start + host.len();
    }

    result.push_str(&value[last..]);
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::materialize::materialize_for_cluster;
    use crate::topology::test::two_group_topology;
    use crate::{property_map, HostGroupInfo, PropertyUpdater};
    use pretty_assertions::assert_eq;

    fn registry() -> PropertyRegistry {
        PropertyRegistry::builder()
            .single_host("core-site", "fs.defaultFS", "NAMENODE")
            .single_host("yarn-site", "yarn.log.server.url", "HISTORYSERVER")
            .conditional_resource(
                "hive-site",
                "javax.jdo.option.ConnectionURL",
                "MYSQL_SERVER",
                "hive-env",
                "hive_database",
            )
            .multi_host("hbase-site", "hbase.zookeeper.quorum", "ZOOKEEPER_SERVER")
            .register(
                "storm-site",
                "storm.zookeeper.servers",
                PropertyUpdater::list_format(PropertyUpdater::multi_host("ZOOKEEPER_SERVER")),
            )
            .unit_suffix("hadoop-env", "namenode_heapsize")
            .build()
    }

    #[test]
    fn single_host() {
        let mut properties = property_map! {
            "core-site" => { "fs.defaultFS" => "hdfs://m1:8020" },
            "yarn-site" => { "yarn.log.server.url" => "http://w2:19888/jobhistory/logs" },
        };

        export_for_blueprint(&registry(), &mut properties, &two_group_topology());

        let expected = property_map! {
            "core-site" => { "fs.defaultFS" => "hdfs://%HOSTGROUP::master%:8020" },
            "yarn-site" => { "yarn.log.server.url" => "http://%HOSTGROUP::workers%:19888/jobhistory/logs" },
        };
        assert_eq!(properties, expected);
    }

    #[test]
    fn single_host_without_cluster_host_is_removed() {
        let mut properties = property_map! {
            "core-site" => {
                "fs.defaultFS" => "hdfs://elsewhere:8020",
                "io.file.buffer.size" => "131072",
            },
            "hive-site" => { "javax.jdo.option.ConnectionURL" => "jdbc:mysql://db.corp/hive" },
        };

        export_for_blueprint(&registry(), &mut properties, &two_group_topology());

        let expected = property_map! {
            "core-site" => { "io.file.buffer.size" => "131072" },
            "hive-site" => {},
        };
        assert_eq!(properties, expected);
    }

    #[test]
    fn host_boundaries() {
        let topology = Topology::from_groups([
            HostGroupInfo::new("short", ["h1"], ["NAMENODE"]),
            HostGroupInfo::new("long", ["h10"], ["HISTORYSERVER"]),
        ]);
        let mut properties = property_map! {
            "core-site" => { "fs.defaultFS" => "hdfs://h10:8020" },
            "yarn-site" => { "yarn.log.server.url" => "http://h1.example.com:19888" },
        };

        export_for_blueprint(&registry(), &mut properties, &topology);

        assert_eq!(
            properties["core-site"]["fs.defaultFS"],
            "hdfs://%HOSTGROUP::long%:8020"
        );
        assert!(!properties["yarn-site"].contains_key("yarn.log.server.url"));
    }

    #[test]
    fn hosts_inside_tokens_are_ignored() {
        assert_eq!(
            replace_host("%HOSTGROUP::g1%,g1", "g1", "%HOSTGROUP::other%"),
            "%HOSTGROUP::g1%,%HOSTGROUP::other%"
        );
    }

    #[test]
    fn multi_host_collapses_duplicates() {
        let mut properties = property_map! {
            "hbase-site" => { "hbase.zookeeper.quorum" => "w1:2181,m1:2181,w2:2181" },
        };

        export_for_blueprint(&registry(), &mut properties, &two_group_topology());

        assert_eq!(
            properties["hbase-site"]["hbase.zookeeper.quorum"],
            "%HOSTGROUP::workers%:2181,%HOSTGROUP::master%:2181"
        );
    }

    #[test]
    fn multi_host_in_brackets() {
        let topology = Topology::from_groups([HostGroupInfo::new(
            "G",
            ["h1", "h2"],
            ["ZOOKEEPER_SERVER"],
        )]);
        let mut properties = property_map! {
            "hbase-site" => { "hbase.zookeeper.quorum" => "[h1,h2]" },
            "storm-site" => { "storm.zookeeper.servers" => "['h1','h2']" },
        };

        export_for_blueprint(&registry(), &mut properties, &topology);

        assert_eq!(properties["hbase-site"]["hbase.zookeeper.quorum"], "[%HOSTGROUP::G%]");
        assert_eq!(
            properties["storm-site"]["storm.zookeeper.servers"],
            "['%HOSTGROUP::G%']"
        );
    }

    #[test]
    fn multi_host_keeps_unknown_hosts() {
        let mut properties = property_map! {
            "hbase-site" => { "hbase.zookeeper.quorum" => "external:2181,m1:2181" },
        };

        export_for_blueprint(&registry(), &mut properties, &two_group_topology());

        assert_eq!(
            properties["hbase-site"]["hbase.zookeeper.quorum"],
            "external:2181,%HOSTGROUP::master%:2181"
        );
    }

    #[test]
    fn unit_suffix_untouched() {
        let mut properties = property_map! {
            "hadoop-env" => { "namenode_heapsize" => "1024m" },
        };
        let before = properties.clone();

        export_for_blueprint(&registry(), &mut properties, &two_group_topology());

        assert_eq!(properties, before);
    }

    #[test]
    fn round_trip() {
        let blueprint = property_map! {
            "core-site" => { "fs.defaultFS" => "hdfs://%HOSTGROUP::master%:8020" },
            "yarn-site" => { "yarn.log.server.url" => "http://%HOSTGROUP::workers%:19888/logs" },
            "hbase-site" => { "hbase.zookeeper.quorum" => "%HOSTGROUP::master%:2181" },
        };
        let topology = Topology::from_groups([
            HostGroupInfo::new("master", ["m1"], ["NAMENODE", "ZOOKEEPER_SERVER"]),
            HostGroupInfo::new("workers", ["w1"], ["HISTORYSERVER"]),
        ]);

        let mut properties = blueprint.clone();
        materialize_for_cluster(&registry(), &mut properties, &topology).unwrap();
        assert_eq!(properties["core-site"]["fs.defaultFS"], "hdfs://m1:8020");

        export_for_blueprint(&registry(), &mut properties, &topology);
        assert_eq!(properties, blueprint);
    }
}
