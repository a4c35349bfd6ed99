//! loading property maps and topologies from disk
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.
//!
//! Property files are two levels deep:
//! ```yaml
//! core-site:
//!   fs.defaultFS: hdfs://%HOSTGROUP::master%:8020
//! ```
//!
//! Topology files are a list of host groups:
//! ```yaml
//! - name: master
//!   hosts: [m1.example.com]
//!   components: [NAMENODE, ZOOKEEPER_SERVER]
//! ```
use crate::properties::PropertyMap;
use crate::topology::{HostGroupInfo, Topology};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

pub fn load_properties(path: &Path) -> Result<PropertyMap, LoadError> {
    load(path)
}

pub fn load_topology(path: &Path) -> Result<Topology<HostGroupInfo>, LoadError> {
    let groups: Vec<HostGroupInfo> = load(path)?;

    let mut topology = Topology::default();
    for group in groups {
        let name = group.name.clone();
        if topology.insert(group).is_some() {
            return Err(LoadError::DuplicateHostGroup(name));
        }
    }

    Ok(topology)
}

fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let path = path.canonicalize()?;
    tracing::info!(path=%path.display(), "loading file");

    let contents = std::fs::read_to_string(&path)?;
    parse(&contents, Format::from_path(&path))
}

pub fn parse<T: serde::de::DeserializeOwned>(
    contents: &str,
    format: Format,
) -> Result<T, LoadError> {
    Ok(match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Yaml => serde_yaml::from_str(contents)?,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse json file")]
    JsonParseFailed(#[from] serde_json::Error),
    #[error("Unable to parse yaml file")]
    YamlParseFailed(#[from] serde_yaml::Error),
    #[error("Host group {0} defined more than once")]
    DuplicateHostGroup(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::HostGroup;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("b.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("b.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("b")), Format::Yaml);
    }

    #[test]
    fn parse_properties() {
        let properties: PropertyMap = parse(
            r#"{"core-site": {"fs.defaultFS": "hdfs://%HOSTGROUP::master%:8020"}}"#,
            Format::Json,
        )
        .unwrap();

        assert_eq!(
            properties["core-site"]["fs.defaultFS"],
            "hdfs://%HOSTGROUP::master%:8020"
        );
    }

    #[test]
    fn parse_topology() {
        let groups: Vec<HostGroupInfo> = parse(
            "- name: master\n  hosts: [m1]\n  components: [NAMENODE]\n- name: workers\n  hosts: [w1, w2]\n",
            Format::Yaml,
        )
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].hosts().len(), 2);
        assert!(groups[1].components().is_empty());
    }

    #[test]
    fn rejects_nested_values() {
        let result: Result<PropertyMap, _> = parse("core-site:\n  a:\n    b: c\n", Format::Yaml);
        assert!(matches!(result, Err(LoadError::YamlParseFailed(_))));
    }
}
