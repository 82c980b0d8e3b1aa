use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::IndexerError;
use crate::gomod::Requirement;
use crate::indexer::{EntityType, UsageMap};

/// File the `index` command writes under the repository root.
pub const INDEX_FILE_NAME: &str = "api_endpoint_index_go.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_resources: usize,
    pub total_actions: usize,
    pub total_list_actions: usize,
    pub total_ephemerals: usize,
    pub total_data_sources: usize,
    #[serde(rename = "totalSDKTypesUsed")]
    pub total_sdk_types_used: usize,
    #[serde(rename = "totalSDKMethodsUsed")]
    pub total_sdk_methods_used: usize,
    #[serde(rename = "totalSDKEnumsUsed")]
    pub total_sdk_enums_used: usize,
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Terraform entities:")?;
        writeln!(f, "  Resources:      {}", self.total_resources)?;
        writeln!(f, "  Actions:        {}", self.total_actions)?;
        writeln!(f, "  List resources: {}", self.total_list_actions)?;
        writeln!(f, "  Ephemerals:     {}", self.total_ephemerals)?;
        writeln!(f, "  Data sources:   {}", self.total_data_sources)?;
        writeln!(f, "SDK usage:")?;
        writeln!(f, "  Types:   {}", self.total_sdk_types_used)?;
        writeln!(f, "  Methods: {}", self.total_sdk_methods_used)?;
        write!(f, "  Enums:   {}", self.total_sdk_enums_used)
    }
}

/// Count entities per kind and the distinct SDK symbols used across all of them.
pub fn calculate_statistics(usage: &UsageMap) -> Statistics {
    let mut types = BTreeSet::new();
    let mut methods = BTreeSet::new();
    let mut enums = BTreeSet::new();

    for (_, _, info) in usage.all_entities() {
        let deps = &info.sdk_dependencies;
        types.extend(deps.types.iter());
        methods.extend(deps.methods_called.iter());
        enums.extend(deps.enums_used.iter().map(|e| &e.enum_type));
    }

    Statistics {
        total_resources: usage.entities(EntityType::Resource).len(),
        total_actions: usage.entities(EntityType::Action).len(),
        total_list_actions: usage.entities(EntityType::ListAction).len(),
        total_ephemerals: usage.entities(EntityType::Ephemeral).len(),
        total_data_sources: usage.entities(EntityType::DataSource).len(),
        total_sdk_types_used: types.len(),
        total_sdk_methods_used: methods.len(),
        total_sdk_enums_used: enums.len(),
    }
}

/// Write the usage map as indented JSON.
pub fn output_results<W: Write>(usage: &UsageMap, mut writer: W) -> Result<(), IndexerError> {
    serde_json::to_writer_pretty(&mut writer, usage)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Contents of the index file: the SDK usage index, its statistics and the
/// SDK module versions from go.mod. Request-builder endpoints are not resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport<'a> {
    pub repository: String,
    pub sdk_modules: Vec<Requirement>,
    pub statistics: Statistics,
    #[serde(flatten)]
    pub usage: &'a UsageMap,
}

impl<'a> IndexReport<'a> {
    pub fn new(root: &Path, sdk_modules: Vec<Requirement>, usage: &'a UsageMap) -> Self {
        Self {
            repository: root.display().to_string(),
            sdk_modules,
            statistics: calculate_statistics(usage),
            usage,
        }
    }
}

/// Write the report to `output`, or to `api_endpoint_index_go.json` under the root.
pub fn write_index_file(
    root: &Path,
    output: Option<&Path>,
    report: &IndexReport<'_>,
) -> Result<PathBuf, IndexerError> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(INDEX_FILE_NAME));
    let file = std::fs::File::create(&path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote index to {}", path.display());
    Ok(path)
}
