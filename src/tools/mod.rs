pub mod entity_dependencies;
pub mod sdk_usages;

use crate::indexer::{EntityType, ResourceInfo};
use sdk_usages::SdkUsage;

/// Format reverse-index lookups into a human-readable string.
pub fn format_sdk_usages(results: &[SdkUsage<'_>]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    let mut lines = Vec::new();
    lines.push(format!("Found {} SDK symbol(s):\n", results.len()));

    for usage in results {
        lines.push(format!(
            "  {} - used by {} entit{}",
            usage.symbol,
            usage.entities.len(),
            if usage.entities.len() == 1 { "y" } else { "ies" }
        ));
        for name in usage.entities {
            lines.push(format!("    {}", name));
        }
    }

    lines.join("\n")
}

/// Format an entity's SDK dependencies into a human-readable string.
pub fn format_entity_dependencies(results: &[(EntityType, &str, &ResourceInfo)]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    let mut lines = Vec::new();
    for (kind, name, info) in results {
        let deps = &info.sdk_dependencies;
        lines.push(format!("{} `{}` [{}]", kind, name, info.resource_path));

        lines.push(format!("  Types ({}):", deps.types.len()));
        for t in &deps.types {
            let fields = deps
                .fields_used
                .get(t)
                .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            if fields.is_empty() {
                lines.push(format!("    {}", t));
            } else {
                lines.push(format!("    {} {{{}}}", t, fields));
            }
        }

        lines.push(format!("  Methods ({}):", deps.methods_called.len()));
        for m in &deps.methods_called {
            lines.push(format!("    {}", m));
        }

        lines.push(format!("  Enums ({}):", deps.enums_used.len()));
        for e in &deps.enums_used {
            lines.push(format!("    {} (via {})", e.enum_type, e.parse_function));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
