//! property updaters
//!
//! Each registered property is bound to one [PropertyUpdater]. Wrapping updaters
//! ([PropertyUpdater::ConditionalResource], [PropertyUpdater::ListFormat]) hold the updater they
//! delegate to.
use crate::properties::{self, PropertyMap};
use crate::registry::Category;
use crate::token;
use crate::topology::{HostGroup, Topology};
use crate::Error;

/// Rewrites a property value for a concrete topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyUpdater {
    /// Replaces a token (or `localhost`) with the host running `component`
    SingleHost { component: String },

    /// Applies `inner` only when `config_type`/`property` starts with `New`
    ///
    /// Otherwise the resource lives outside the cluster and the value is kept.
    ConditionalResource {
        config_type: String,
        property: String,
        inner: Box<PropertyUpdater>,
    },

    /// Replaces tokens with all hosts of the referenced groups, joined by `separator`
    MultiHost { component: String, separator: char },

    /// Appends `m` unless the value already ends with it
    UnitSuffix,

    /// Formats the result of `inner` as a quoted list, `a,b` -> `['a','b']`
    ListFormat(Box<PropertyUpdater>),
}

impl PropertyUpdater {
    pub fn single_host(component: impl Into<String>) -> Self {
        Self::SingleHost {
            component: component.into(),
        }
    }

    /// A [PropertyUpdater::SingleHost] for `component` guarded by `config_type`/`property`
    pub fn conditional_resource(
        component: impl Into<String>,
        config_type: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self::ConditionalResource {
            config_type: config_type.into(),
            property: property.into(),
            inner: Box::new(Self::single_host(component)),
        }
    }

    pub fn multi_host(component: impl Into<String>) -> Self {
        Self::multi_host_with_separator(component, ',')
    }

    pub fn multi_host_with_separator(component: impl Into<String>, separator: char) -> Self {
        Self::MultiHost {
            component: component.into(),
            separator,
        }
    }

    pub fn unit_suffix() -> Self {
        Self::UnitSuffix
    }

    pub fn list_format(inner: PropertyUpdater) -> Self {
        Self::ListFormat(Box::new(inner))
    }

    /// Registry partition this updater belongs to
    ///
    /// Decorators take the category of the updater they wrap.
    pub fn category(&self) -> Category {
        match self {
            Self::SingleHost { .. } => Category::SingleHost,
            Self::ConditionalResource { .. } => Category::ConditionalResource,
            Self::MultiHost { .. } => Category::MultiHost,
            Self::UnitSuffix => Category::UnitSuffix,
            Self::ListFormat(inner) => inner.category(),
        }
    }

    /// Computes the cluster value of a property
    ///
    /// `properties` is the complete, unmodified input. Updaters never see values produced by
    /// other updaters of the same pass.
    pub fn apply<G: HostGroup>(
        &self,
        topology: &Topology<G>,
        original: &str,
        properties: &PropertyMap,
    ) -> Result<String, Error> {
        match self {
            Self::SingleHost { component } => single_host(component, topology, original),
            Self::ConditionalResource {
                config_type,
                property,
                inner,
            } => {
                let condition = properties::property_value(properties, config_type, property)
                    .ok_or_else(|| Error::MissingConditionalProperty {
                        config_type: config_type.clone(),
                        property: property.clone(),
                    })?;

                if condition.starts_with("New") {
                    inner.apply(topology, original, properties)
                } else {
                    tracing::trace!(%condition, "external resource, keeping value");
                    Ok(original.to_owned())
                }
            }
            Self::MultiHost {
                component,
                separator,
            } => multi_host(component, *separator, topology, original),
            Self::UnitSuffix => Ok(if original.ends_with('m') {
                original.to_owned()
            } else {
                format!("{original}m")
            }),
            Self::ListFormat(inner) => {
                let value = inner.apply(topology, original, properties)?;
                Ok(list_format(&value))
            }
        }
    }
}

impl std::fmt::Display for PropertyUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleHost { component } => write!(f, "single-host({component})"),
            Self::ConditionalResource {
                config_type,
                property,
                inner,
            } => write!(f, "if {config_type}/{property} is New: {inner}"),
            Self::MultiHost {
                component,
                separator,
            } => write!(f, "multi-host({component}, '{separator}')"),
            Self::UnitSuffix => f.write_str("unit-suffix(m)"),
            Self::ListFormat(inner) => write!(f, "list-format({inner})"),
        }
    }
}

fn first_host<G: HostGroup>(group: &G) -> Result<&str, Error> {
    group
        .hosts()
        .first()
        .map(String::as_str)
        .ok_or_else(|| Error::EmptyHostGroup {
            name: group.name().to_owned(),
        })
}

fn single_host<G: HostGroup>(
    component: &str,
    topology: &Topology<G>,
    original: &str,
) -> Result<String, Error> {
    if let Some(token) = token::find_bare_token(original) {
        let group = topology
            .get(token.group)
            .ok_or_else(|| Error::UnknownHostGroup {
                name: token.group.to_owned(),
            })?;

        return Ok(original.replace(&original[token.range], first_host(group)?));
    }

    // no token: the stack default `localhost` stands in for the component's host
    match topology.groups_for_component(component).as_slice() {
        [group] => Ok(original.replace("localhost", first_host(*group)?)),
        groups => Err(Error::AmbiguousComponentPlacement {
            component: component.to_owned(),
            matches: groups.len(),
        }),
    }
}

fn multi_host<G: HostGroup>(
    component: &str,
    separator: char,
    topology: &Topology<G>,
    original: &str,
) -> Result<String, Error> {
    let mut hosts = token::resolve_tokens_to_hosts(original, topology)?;

    if hosts.is_empty() {
        // plain default value, e.g. `localhost:2181` or `['localhost:2181']`
        let port = trailing_port(original);

        for group in topology.groups_for_component(component) {
            for host in group.hosts() {
                match port {
                    Some(port) => hosts.insert(format!("{host}:{port}")),
                    None => hosts.insert(host.clone()),
                };
            }
        }
    }

    let separator = separator.to_string();
    Ok(hosts
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&separator))
}

/// Port of the last entry in a host list, ignoring list punctuation
///
/// All entries are expected to share one port, so the last one stands for all of them.
fn trailing_port(value: &str) -> Option<&str> {
    value
        .trim_end_matches(|c: char| matches!(c, '[' | ']' | '\'' | '"') || c.is_whitespace())
        .rsplit_once(':')
        .map(|(_, port)| port)
        .filter(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

fn list_format(value: &str) -> String {
    let quoted: Vec<String> = value.split(',').map(|item| format!("'{item}'")).collect();
    format!("[{}]", quoted.join(","))
}
