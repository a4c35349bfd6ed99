//! host group token grammar
//!
//! - bare token: `%HOSTGROUP::<name>%`
//! - token with port: `%HOSTGROUP::<name>%:<port>` (port optional)
//!
//! A name is any run of characters other than whitespace and `%`.
use crate::topology::{HostGroup, Topology};
use crate::Error;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static BARE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%HOSTGROUP::([^\s%]+)%").expect("Invalid regex pattern"));

static PORT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%HOSTGROUP::([^\s%]+)%(?::(\d+))?").expect("Invalid regex pattern")
});

/// Location of a bare token inside a value
#[derive(Debug, PartialEq, Eq)]
pub struct BareToken<'v> {
    /// byte range of the whole token, `%` to `%`
    pub range: Range<usize>,
    /// referenced host group name
    pub group: &'v str,
}

/// First bare token in `value`
pub fn find_bare_token(value: &str) -> Option<BareToken<'_>> {
    let captures = BARE_TOKEN.captures(value)?;
    let whole = captures.get(0)?;
    let group = captures.get(1)?;

    Some(BareToken {
        range: whole.range(),
        group: group.as_str(),
    })
}

/// Byte ranges of all bare tokens in `value`
pub fn token_spans(value: &str) -> Vec<Range<usize>> {
    BARE_TOKEN.find_iter(value).map(|m| m.range()).collect()
}

/// Renders the bare token for `group`
pub fn host_group_token(group: &str) -> String {
    format!("%HOSTGROUP::{group}%")
}

/// Resolves every token in `value` to the hosts of the referenced group
///
/// Emits `host:port` when the token carries a port, `host` otherwise. Hosts of all tokens are
/// merged and duplicates collapse.
#[tracing::instrument(level = "trace", skip(topology))]
pub fn resolve_tokens_to_hosts<G: HostGroup>(
    value: &str,
    topology: &Topology<G>,
) -> Result<IndexSet<String>, Error> {
    let mut hosts = IndexSet::new();

    for captures in PORT_TOKEN.captures_iter(value) {
        let Some(name) = captures.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let port = captures.get(2).map(|m| m.as_str());

        let group = topology.get(name).ok_or_else(|| Error::UnknownHostGroup {
            name: name.to_owned(),
        })?;

        for host in group.hosts() {
            match port {
                Some(port) => hosts.insert(format!("{host}:{port}")),
                None => hosts.insert(host.clone()),
            };
        }
    }

    tracing::trace!(?hosts, "tokens resolved");
    Ok(hosts)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::topology::test::two_group_topology;
    use crate::HostGroupInfo;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_token() {
        let value = "hdfs://%HOSTGROUP::master%:8020";
        let token = find_bare_token(value).expect("token");

        assert_eq!(token.group, "master");
        assert_eq!(&value[token.range], "%HOSTGROUP::master%");
    }

    #[test]
    fn bare_token_does_not_span_two_tokens() {
        let token = find_bare_token("%HOSTGROUP::a%,%HOSTGROUP::b%").expect("token");
        assert_eq!(token.group, "a");
    }

    #[test]
    fn no_token() {
        assert_eq!(find_bare_token("localhost:8020"), None);
        assert_eq!(find_bare_token("%HOSTGROUP::%"), None);
        assert_eq!(find_bare_token("%HOSTGROUP::with space%"), None);
    }

    #[test]
    fn spans() {
        let value = "%HOSTGROUP::a%:1,x,%HOSTGROUP::b%";
        let spans = token_spans(value);

        assert_eq!(spans.len(), 2);
        assert_eq!(&value[spans[1].clone()], "%HOSTGROUP::b%");
    }

    #[test]
    fn render() {
        assert_eq!(host_group_token("host_group_1"), "%HOSTGROUP::host_group_1%");
    }

    #[test]
    fn resolve_with_port() {
        let hosts =
            resolve_tokens_to_hosts("%HOSTGROUP::workers%:2181", &two_group_topology()).unwrap();

        assert_eq!(hosts, IndexSet::from(["w1:2181".to_owned(), "w2:2181".to_owned()]));
    }

    #[test]
    fn resolve_without_port() {
        let hosts = resolve_tokens_to_hosts("%HOSTGROUP::master%", &two_group_topology()).unwrap();

        assert_eq!(hosts, IndexSet::from(["m1".to_owned()]));
    }

    #[test]
    fn resolve_merges_shared_hosts() {
        let topology = Topology::from_groups([
            HostGroupInfo::new("a", ["shared", "a1"], ["ZOOKEEPER_SERVER"]),
            HostGroupInfo::new("b", ["shared"], ["ZOOKEEPER_SERVER"]),
        ]);

        let hosts =
            resolve_tokens_to_hosts("%HOSTGROUP::a%:2181,%HOSTGROUP::b%:2181", &topology).unwrap();

        assert_eq!(hosts.len(), 2);
        assert!(hosts.contains("shared:2181"));
        assert!(hosts.contains("a1:2181"));
    }

    #[test]
    fn resolve_plain_value_is_empty() {
        let hosts = resolve_tokens_to_hosts("localhost:2181", &two_group_topology()).unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn resolve_unknown_group() {
        let err = resolve_tokens_to_hosts("%HOSTGROUP::nope%:2181", &two_group_topology())
            .expect_err("must error");

        assert_eq!(
            err,
            Error::UnknownHostGroup {
                name: "nope".to_owned()
            }
        );
    }
}
