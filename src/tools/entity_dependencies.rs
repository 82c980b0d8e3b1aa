use crate::indexer::{EntityType, ResourceInfo, UsageMap, TERRAFORM_PREFIX};

/// Find an entity's SDK dependencies by Terraform type name.
/// The `microsoft365_` prefix is optional. One name can exist as several
/// kinds (a resource and a data source), so every match is returned.
pub fn entity_dependencies<'a>(
    usage: &'a UsageMap,
    name: &str,
) -> Vec<(EntityType, &'a str, &'a ResourceInfo)> {
    let full_name = if name.starts_with(TERRAFORM_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", TERRAFORM_PREFIX, name)
    };

    EntityType::ALL
        .into_iter()
        .filter_map(|kind| {
            usage
                .entities(kind)
                .get_key_value(&full_name)
                .map(|(key, info)| (kind, key.as_str(), info))
        })
        .collect()
}
