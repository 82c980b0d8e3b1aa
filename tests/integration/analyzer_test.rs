use sdk_usage_indexer::indexer::parser::{analyze_source, collect_imports, parse_go};
use sdk_usage_indexer::indexer::ResourceInfo;

const SOURCE: &str = r#"
package user

import (
	"fmt"

	models "github.com/microsoftgraph/msgraph-beta-sdk-go/models"
	"github.com/hashicorp/terraform-plugin-framework/types"
)

func build(name types.String) {
	user := models.NewUser()
	user.SetDisplayName("John")

	config := models.DeviceConfiguration{DisplayName: "Test Config"}
	fmt.Println(config)

	runAs, _ := models.ParseRunAsAccountType("system")
	fmt.Println(runAs)
}
"#;

#[test]
fn test_collect_imports_only_sdk_alias() {
    let tree = parse_go(SOURCE).expect("source should parse");
    let imports = collect_imports(&tree.root_node(), SOURCE.as_bytes());

    assert_eq!(imports.len(), 1, "got {:?}", imports);
    assert!(imports.contains_key("models"));
    assert!(!imports.contains_key("fmt"));
    assert!(!imports.contains_key("types"));
}

#[test]
fn test_constructor_field_method_and_enum_tracking() {
    let mut info = ResourceInfo::new("internal/services/resources/users/graph_beta/user");
    assert!(analyze_source(SOURCE, &mut info));
    let deps = &info.sdk_dependencies;

    let types: Vec<&str> = deps.types.iter().map(String::as_str).collect();
    assert_eq!(types, vec!["models.DeviceConfiguration"]);

    let fields: Vec<&str> = deps.fields_used["models.DeviceConfiguration"]
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(fields, vec!["DisplayName"]);

    assert!(deps.methods_called.contains("models.NewUser"));
    assert!(deps.methods_called.contains("models.NewUser.SetDisplayName"));

    let enums: Vec<&str> = deps.enums_used.iter().map(|e| e.enum_type.as_str()).collect();
    assert_eq!(enums, vec!["models.RunAsAccountType"]);
}

#[test]
fn test_analyzing_twice_is_idempotent() {
    let mut info = ResourceInfo::new("p");
    assert!(analyze_source(SOURCE, &mut info));
    let first = info.clone();
    assert!(analyze_source(SOURCE, &mut info));
    assert_eq!(first, info);
}

#[test]
fn test_forward_only_type_inference() {
    // `user` is typed only after its first use, so the earlier call is not attributed
    let source = r#"
package x

import "github.com/microsoftgraph/msgraph-sdk-go/models"

func early(user models.Userable) {
	user.GetDisplayName()
}

func late() {
	user := models.NewUser()
	user.SetAccountEnabled(nil)
}
"#;
    let mut info = ResourceInfo::new("p");
    assert!(analyze_source(source, &mut info));
    let methods = &info.sdk_dependencies.methods_called;
    assert!(!methods.contains("models.NewUser.GetDisplayName"));
    assert!(methods.contains("models.NewUser.SetAccountEnabled"));
}

#[test]
fn test_kiota_imports_are_tracked() {
    let source = r#"
package x

import abstractions "github.com/microsoft/kiota-abstractions-go"

func headers() {
	h := abstractions.NewRequestHeaders()
	h.Add("Accept", "application/json")
}
"#;
    let mut info = ResourceInfo::new("p");
    assert!(analyze_source(source, &mut info));
    let methods = &info.sdk_dependencies.methods_called;
    assert!(methods.contains("abstractions.NewRequestHeaders"));
    assert!(methods.contains("abstractions.NewRequestHeaders.Add"));
}
