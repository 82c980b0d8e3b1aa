pub mod classify;
pub mod parser;
pub mod scope;
pub mod symbols;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Prefix every Terraform type name in the provider carries.
pub const TERRAFORM_PREFIX: &str = "microsoft365_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Resource,
    Action,
    ListAction,
    Ephemeral,
    DataSource,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Resource,
        EntityType::Action,
        EntityType::ListAction,
        EntityType::Ephemeral,
        EntityType::DataSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Resource => "resource",
            EntityType::Action => "action",
            EntityType::ListAction => "list-action",
            EntityType::Ephemeral => "ephemeral",
            EntityType::DataSource => "data-source",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Terraform-facing construct, derived from the directory its source lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub entity_type: EntityType,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumUsage {
    pub enum_type: String,
    pub parse_function: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkDependencies {
    pub types: BTreeSet<String>,
    pub fields_used: BTreeMap<String, BTreeSet<String>>,
    pub methods_called: BTreeSet<String>,
    pub enums_used: BTreeSet<EnumUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub resource_path: String,
    pub sdk_dependencies: SdkDependencies,
}

impl ResourceInfo {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            sdk_dependencies: SdkDependencies::default(),
        }
    }

    pub fn track_field_access(&mut self, type_name: &str, field: &str) {
        self.sdk_dependencies
            .fields_used
            .entry(type_name.to_string())
            .or_default()
            .insert(field.to_string());
    }

    pub fn track_type_instantiation(&mut self, type_name: &str) {
        self.sdk_dependencies.types.insert(type_name.to_string());
    }

    pub fn track_enum_usage(&mut self, enum_type: &str, parse_function: &str) {
        self.sdk_dependencies.enums_used.insert(EnumUsage {
            enum_type: enum_type.to_string(),
            parse_function: parse_function.to_string(),
        });
    }

    /// Method called on a variable whose SDK type is known, e.g. `models.NewUser.SetDisplayName`.
    pub fn track_object_method(&mut self, type_name: &str, method: &str) {
        self.sdk_dependencies
            .methods_called
            .insert(format!("{}.{}", type_name, method));
    }

    /// Package-level function call, e.g. `models.NewUser`.
    pub fn track_package_method(&mut self, alias: &str, method: &str) {
        self.sdk_dependencies
            .methods_called
            .insert(format!("{}.{}", alias, method));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub used_by: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMap {
    pub packages: BTreeMap<String, PackageInfo>,
    pub terraform_resources: BTreeMap<String, ResourceInfo>,
    pub terraform_actions: BTreeMap<String, ResourceInfo>,
    pub terraform_list_actions: BTreeMap<String, ResourceInfo>,
    pub terraform_ephemerals: BTreeMap<String, ResourceInfo>,
    pub terraform_data_sources: BTreeMap<String, ResourceInfo>,
    #[serde(rename = "sdkToResourceIndex")]
    pub sdk_to_resource_index: BTreeMap<String, BTreeSet<String>>,
}

impl UsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self, kind: EntityType) -> &BTreeMap<String, ResourceInfo> {
        match kind {
            EntityType::Resource => &self.terraform_resources,
            EntityType::Action => &self.terraform_actions,
            EntityType::ListAction => &self.terraform_list_actions,
            EntityType::Ephemeral => &self.terraform_ephemerals,
            EntityType::DataSource => &self.terraform_data_sources,
        }
    }

    pub fn entities_mut(&mut self, kind: EntityType) -> &mut BTreeMap<String, ResourceInfo> {
        match kind {
            EntityType::Resource => &mut self.terraform_resources,
            EntityType::Action => &mut self.terraform_actions,
            EntityType::ListAction => &mut self.terraform_list_actions,
            EntityType::Ephemeral => &mut self.terraform_ephemerals,
            EntityType::DataSource => &mut self.terraform_data_sources,
        }
    }

    /// Every entity across all kinds, in kind order then name order.
    pub fn all_entities(&self) -> impl Iterator<Item = (EntityType, &String, &ResourceInfo)> {
        EntityType::ALL.into_iter().flat_map(move |kind| {
            self.entities(kind)
                .iter()
                .map(move |(name, info)| (kind, name, info))
        })
    }

    pub fn record_package(&mut self, import_path: &str, entity_name: &str) {
        self.packages
            .entry(import_path.to_string())
            .or_default()
            .used_by
            .insert(entity_name.to_string());
    }

    pub fn entity_count(&self) -> usize {
        EntityType::ALL.iter().map(|k| self.entities(*k).len()).sum()
    }
}

/// Return the record for `entity`, creating an empty one on first use.
pub fn get_or_create_resource_info<'a>(
    usage: &'a mut UsageMap,
    entity: &Entity,
) -> &'a mut ResourceInfo {
    usage
        .entities_mut(entity.entity_type)
        .entry(entity.name.clone())
        .or_insert_with(|| ResourceInfo::new(entity.path.clone()))
}
