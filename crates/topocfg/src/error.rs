//! errors raised while resolving properties against a topology

/// Failure of a single updater
///
/// Any of these aborts the whole materialization call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unable to match blueprint host group token to a host group: {name}")]
    UnknownHostGroup { name: String },
    #[error("Host group {name} has no hosts")]
    EmptyHostGroup { name: String },
    #[error("Unable to update configuration property with topology information. Component '{component}' is not mapped to any host group or is mapped to multiple groups ({matches} groups)")]
    AmbiguousComponentPlacement { component: String, matches: usize },
    #[error("Conditional property {config_type}/{property} is missing")]
    MissingConditionalProperty {
        config_type: String,
        property: String,
    },
}
