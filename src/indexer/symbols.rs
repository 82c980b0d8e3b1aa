use std::collections::{BTreeMap, BTreeSet};

use super::UsageMap;

/// Rebuild the SDK symbol -> Terraform entity index from the forward maps.
/// Every type, method and enum type an entity records becomes a key.
pub fn index_sdk_usage(usage: &mut UsageMap) {
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (_, name, info) in usage.all_entities() {
        let deps = &info.sdk_dependencies;
        let symbols = deps
            .types
            .iter()
            .chain(deps.methods_called.iter())
            .chain(deps.enums_used.iter().map(|e| &e.enum_type));
        for symbol in symbols {
            index
                .entry(symbol.clone())
                .or_default()
                .insert(name.clone());
        }
    }

    usage.sdk_to_resource_index = index;
}
