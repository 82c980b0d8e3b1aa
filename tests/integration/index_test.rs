use std::path::PathBuf;

use sdk_usage_indexer::indexer::parser::index_repository;
use sdk_usage_indexer::indexer::symbols::index_sdk_usage;
use sdk_usage_indexer::indexer::{EntityType, UsageMap};
use sdk_usage_indexer::report::{calculate_statistics, output_results};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample-provider")
}

fn build_usage() -> UsageMap {
    index_repository(&fixture_path()).expect("fixture should index")
}

#[test]
fn test_entities_per_kind() {
    let usage = build_usage();
    assert_eq!(
        usage.entities(EntityType::Resource).keys().collect::<Vec<_>>(),
        vec!["microsoft365_windows_remediation_script"]
    );
    assert_eq!(
        usage.entities(EntityType::Action).keys().collect::<Vec<_>>(),
        vec!["microsoft365_wipe_managed_device"]
    );
    assert_eq!(
        usage.entities(EntityType::DataSource).keys().collect::<Vec<_>>(),
        vec!["microsoft365_user"]
    );
    assert!(usage.entities(EntityType::ListAction).is_empty());
    assert!(usage.entities(EntityType::Ephemeral).is_empty());
}

#[test]
fn test_resource_dependencies() {
    let usage = build_usage();
    let info = &usage.terraform_resources["microsoft365_windows_remediation_script"];
    assert_eq!(
        info.resource_path,
        "internal/services/resources/device_management/graph_beta/windows_remediation_script"
    );

    let deps = &info.sdk_dependencies;
    assert!(deps.types.contains("graphmodels.DeviceHealthScriptDailySchedule"));
    let fields = &deps.fields_used["graphmodels.DeviceHealthScriptDailySchedule"];
    assert!(fields.contains("Interval"));
    assert!(fields.contains("UseUtc"));

    for method in [
        "graphmodels.NewDeviceHealthScript",
        "graphmodels.NewDeviceHealthScript.SetDisplayName",
        "graphmodels.NewDeviceHealthScript.SetRunAsAccount",
        "graphmodels.ParseRunAsAccountType",
    ] {
        assert!(deps.methods_called.contains(method), "missing {}", method);
    }
    assert_eq!(deps.methods_called.len(), 4, "got {:?}", deps.methods_called);
    assert!(deps
        .enums_used
        .iter()
        .any(|e| e.enum_type == "graphmodels.RunAsAccountType"));
}

#[test]
fn test_skipped_sources_contribute_nothing() {
    let usage = build_usage();
    for symbol in [
        "graphmodels.NewDeviceShellScript",
        "graphmodels.NewBrokenTemplate",
        "graphmodels.NewTooShortToClassify",
        "graphmodels.NewCommonHelperEntity",
    ] {
        assert!(
            !usage.sdk_to_resource_index.contains_key(symbol),
            "{} should not be indexed",
            symbol
        );
    }
}

#[test]
fn test_data_source_literals_and_forward_inference() {
    let usage = build_usage();
    let deps = &usage.terraform_data_sources["microsoft365_user"].sdk_dependencies;
    assert!(deps.types.contains("users.UserItemRequestBuilderGetQueryParameters"));
    assert!(deps.types.contains("users.UserItemRequestBuilderGetRequestConfiguration"));
    assert!(deps.fields_used["users.UserItemRequestBuilderGetQueryParameters"].contains("Select"));
    assert!(deps.methods_called.contains("models.NewUser.SetAccountEnabled"));
    assert!(!deps.methods_called.contains("models.NewUser.GetDisplayName"));
}

#[test]
fn test_reverse_index_shared_symbol() {
    let usage = build_usage();
    let users: Vec<&String> = usage.sdk_to_resource_index["graphmodels.DeviceHealthScriptDailySchedule"]
        .iter()
        .collect();
    assert_eq!(
        users,
        vec!["microsoft365_windows_remediation_script", "microsoft365_wipe_managed_device"]
    );
}

#[test]
fn test_reverse_index_reconstructible() {
    let mut usage = build_usage();
    let original = usage.sdk_to_resource_index.clone();
    usage.sdk_to_resource_index.clear();
    index_sdk_usage(&mut usage);
    assert_eq!(original, usage.sdk_to_resource_index);
}

#[test]
fn test_packages_record_importing_entities() {
    let usage = build_usage();
    let models = &usage.packages["github.com/microsoftgraph/msgraph-beta-sdk-go/models"];
    assert!(models.used_by.contains("microsoft365_windows_remediation_script"));
    assert!(models.used_by.contains("microsoft365_wipe_managed_device"));
    assert!(usage
        .packages
        .contains_key("github.com/microsoftgraph/msgraph-beta-sdk-go"));
    assert!(!usage
        .packages
        .keys()
        .any(|k| k.contains("terraform-plugin-framework")));
}

#[test]
fn test_fixture_statistics() {
    let stats = calculate_statistics(&build_usage());
    assert_eq!(stats.total_resources, 1);
    assert_eq!(stats.total_actions, 1);
    assert_eq!(stats.total_data_sources, 1);
    assert_eq!(stats.total_sdk_types_used, 3);
    assert_eq!(stats.total_sdk_methods_used, 8);
    assert_eq!(stats.total_sdk_enums_used, 1);
}

#[test]
fn test_output_round_trips_as_json() {
    let usage = build_usage();
    let mut buf = Vec::new();
    output_results(&usage, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert!(json["terraformActions"]["microsoft365_wipe_managed_device"]["sdkDependencies"]["methodsCalled"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m == "devicemanagement.NewManagedDevicesItemWipePostRequestBody.SetKeepEnrollmentData"));
}

#[test]
fn test_empty_tree_indexes_to_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let usage = index_repository(dir.path()).unwrap();
    assert_eq!(usage, UsageMap::new());

    let mut buf = Vec::new();
    output_results(&usage, &mut buf).unwrap();
    assert!(!buf.is_empty());
}
