use std::collections::BTreeSet;

use crate::indexer::UsageMap;

/// One reverse-index bucket: an SDK symbol and the Terraform entities using it.
#[derive(Debug, Clone, Copy)]
pub struct SdkUsage<'a> {
    pub symbol: &'a str,
    pub entities: &'a BTreeSet<String>,
}

/// Find the Terraform entities that use an SDK symbol.
/// Exact keys win; otherwise a bare name such as `User` matches every
/// key whose last segment is that name (`models.User`, `graphmodels.User`).
pub fn sdk_usages<'a>(usage: &'a UsageMap, symbol: &str) -> Vec<SdkUsage<'a>> {
    if let Some((key, entities)) = usage.sdk_to_resource_index.get_key_value(symbol) {
        return vec![SdkUsage {
            symbol: key,
            entities,
        }];
    }

    usage
        .sdk_to_resource_index
        .iter()
        .filter(|(key, _)| key.rsplit('.').next() == Some(symbol))
        .map(|(key, entities)| SdkUsage {
            symbol: key,
            entities,
        })
        .collect()
}
