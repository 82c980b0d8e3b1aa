use std::path::{Path, PathBuf};

use sdk_usage_indexer::indexer::classify::{discover_go_files, parse_entity_from_path, should_skip_file};
use sdk_usage_indexer::indexer::EntityType;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample-provider")
}

#[test]
fn test_should_skip_file() {
    assert!(should_skip_file(Path::new("construct_test.go")));
    assert!(should_skip_file(Path::new("docs/index.md")));
    assert!(!should_skip_file(Path::new("construct.go")));
}

#[test]
fn test_parse_entity_from_spec_example() {
    let entity = parse_entity_from_path(
        Path::new("/repo/internal/services/resources/users/graph_beta/user/resource.go"),
        Path::new("/repo"),
    )
    .expect("resource path should classify");
    assert_eq!(entity.entity_type, EntityType::Resource);
    assert_eq!(entity.name, "microsoft365_user");

    assert!(parse_entity_from_path(
        Path::new("/repo/internal/services/common/errors/errors.go"),
        Path::new("/repo"),
    )
    .is_none());
}

#[test]
fn test_discover_fixture_files() {
    let root = fixture_path();
    let files = discover_go_files(&root).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert!(names.contains(&"construct.go".to_string()), "got {:?}", names);
    assert!(names.contains(&"datasource.go".to_string()));
    assert!(names.contains(&"helpers.go".to_string()));
    assert!(!names.iter().any(|n| n.ends_with("_test.go")), "test files must be skipped");
    assert!(!names.contains(&"go.mod".to_string()));
}

#[test]
fn test_fixture_classification() {
    let root = fixture_path();
    let entities: Vec<_> = discover_go_files(&root)
        .unwrap()
        .iter()
        .filter_map(|p| parse_entity_from_path(p, &root))
        .collect();

    // construct.go, resource.go, template.go, datasource.go, action.go
    assert_eq!(entities.len(), 5, "got {:?}", entities);
    assert!(entities
        .iter()
        .any(|e| e.entity_type == EntityType::Action && e.name == "microsoft365_wipe_managed_device"));
    assert!(entities
        .iter()
        .any(|e| e.entity_type == EntityType::DataSource
            && e.path == "internal/services/data-sources/users/graph_v1.0/user"));
}
