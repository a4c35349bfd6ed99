//! property map (config type -> property name -> value)
//!
//! Order of config types and properties is preserved so rendered output stays stable.
//! No operation depends on that order.

/// Properties of a single config type
pub type TypeProperties = indexmap::IndexMap<String, String>;

/// All properties, grouped by config type (`hdfs-site`, `core-site`, ...)
pub type PropertyMap = indexmap::IndexMap<String, TypeProperties>;

/// Value of `config_type`/`name`, if present
pub fn property_value<'p>(
    properties: &'p PropertyMap,
    config_type: &str,
    name: &str,
) -> Option<&'p str> {
    properties
        .get(config_type)
        .and_then(|type_properties| type_properties.get(name))
        .map(String::as_str)
}

/// Utility macro to create a [PropertyMap]
///
/// ```
/// # use topocfg::property_map;
/// let properties = property_map! {
///     "core-site" => { "fs.defaultFS" => "hdfs://%HOSTGROUP::master%:8020" },
///     "hadoop-env" => {
///         "namenode_heapsize" => "1024",
///         "dtnode_heapsize" => "1024m",
///     },
/// };
///
/// assert_eq!(properties["hadoop-env"].len(), 2);
/// ```
#[macro_export]
macro_rules! property_map {
    { $($config_type:expr => { $($name:expr => $value:expr),* $(,)? }),* $(,)? } => {{
        #[allow(unused_mut)]
        let mut properties = $crate::properties::PropertyMap::default();
        $(
            let entries: Vec<(String, String)> = vec![$(($name.to_string(), $value.to_string())),*];
            properties
                .entry($config_type.to_string())
                .or_default()
                .extend(entries);
        )*

        properties
    }};
}
