use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::classify::{discover_go_files, parse_entity_from_path};
use super::scope::TypeEnv;
use super::symbols::index_sdk_usage;
use super::{get_or_create_resource_info, ResourceInfo, UsageMap};
use crate::error::IndexerError;

/// Import path fragments that mark a Graph SDK or Kiota package.
const SDK_IMPORT_MARKERS: &[&str] = &["microsoftgraph", "kiota"];

/// Walk `root`, analyze every entity source file and build the usage map with its reverse index.
pub fn index_repository(root: &Path) -> Result<UsageMap, IndexerError> {
    let files = discover_go_files(root)?;
    debug!("Discovered {} Go files", files.len());

    let mut usage = UsageMap::new();
    let mut analyzed = 0usize;
    let mut skipped = 0usize;

    for path in &files {
        let Some(entity) = parse_entity_from_path(path, root) else {
            continue;
        };
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };
        let Some(tree) = parse_go(&source) else {
            debug!("Skipping {}: not valid Go", path.display());
            skipped += 1;
            continue;
        };

        let root_node = tree.root_node();
        let src = source.as_bytes();
        let imports = collect_imports(&root_node, src);
        for import_path in imports.values() {
            usage.record_package(import_path, &entity.name);
        }

        let info = get_or_create_resource_info(&mut usage, &entity);
        analyze_file(&root_node, src, &imports, info);
        analyzed += 1;
    }

    index_sdk_usage(&mut usage);
    info!(
        "Analyzed {} entity files ({} skipped), {} entities, {} SDK symbols",
        analyzed,
        skipped,
        usage.entity_count(),
        usage.sdk_to_resource_index.len()
    );
    Ok(usage)
}

/// Parse Go source. Returns `None` when the source has syntax errors,
/// which is common for templated `.go` files.
pub fn parse_go(source: &str) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_go::LANGUAGE;
    parser
        .set_language(&language.into())
        .expect("Failed to set Go language");

    let tree = parser.parse(source, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    Some(tree)
}

/// Parse and analyze one file's source into `info`. Returns false if the source was skipped.
pub fn analyze_source(source: &str, info: &mut ResourceInfo) -> bool {
    let Some(tree) = parse_go(source) else {
        return false;
    };
    let root = tree.root_node();
    let imports = collect_imports(&root, source.as_bytes());
    analyze_file(&root, source.as_bytes(), &imports, info);
    true
}

/// Map local package alias to import path, keeping only SDK imports.
pub fn collect_imports(root: &tree_sitter::Node, src: &[u8]) -> HashMap<String, String> {
    let mut imports = HashMap::new();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        if child.kind() != "import_declaration" {
            continue;
        }
        let mut inner = child.walk();
        for spec in child.named_children(&mut inner) {
            match spec.kind() {
                "import_spec" => add_import_spec(&spec, src, &mut imports),
                "import_spec_list" => {
                    let mut list_cursor = spec.walk();
                    for item in spec.named_children(&mut list_cursor) {
                        if item.kind() == "import_spec" {
                            add_import_spec(&item, src, &mut imports);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    imports
}

fn add_import_spec(spec: &tree_sitter::Node, src: &[u8], imports: &mut HashMap<String, String>) {
    let Some(path_node) = spec.child_by_field_name("path") else {
        return;
    };
    let path = node_text(&path_node, src).trim_matches(|c| c == '"' || c == '`');
    if !is_sdk_import(path) {
        return;
    }

    let alias = match spec.child_by_field_name("name") {
        Some(name) => {
            let text = node_text(&name, src);
            // Blank and dot imports can never appear as a selector operand
            if text == "_" || text == "." {
                return;
            }
            text
        }
        None => path.rsplit('/').next().unwrap_or(path),
    };
    if !alias.is_empty() {
        imports.insert(alias.to_string(), path.to_string());
    }
}

fn is_sdk_import(path: &str) -> bool {
    SDK_IMPORT_MARKERS.iter().any(|m| path.contains(m))
}

/// Single forward pass over one file, recording every SDK type, field, method and enum it touches.
pub fn analyze_file(
    root: &tree_sitter::Node,
    src: &[u8],
    imports: &HashMap<String, String>,
    info: &mut ResourceInfo,
) {
    if imports.is_empty() {
        return;
    }
    let mut analyzer = Analyzer {
        src,
        imports,
        env: TypeEnv::new(),
        info,
    };
    analyzer.visit(root);
    debug!("File analysis bound {} SDK-typed variables", analyzer.env.len());
}

struct Analyzer<'a> {
    src: &'a [u8],
    imports: &'a HashMap<String, String>,
    env: TypeEnv,
    info: &'a mut ResourceInfo,
}

impl Analyzer<'_> {
    fn visit(&mut self, node: &tree_sitter::Node) {
        match node.kind() {
            "import_declaration" | "comment" => return,
            "short_var_declaration" | "assignment_statement" => {
                self.visit_children(node);
                if let (Some(left), Some(right)) = (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) {
                    let targets = named_children(&left);
                    let values = named_children(&right);
                    self.bind_assignment(&targets, &values);
                }
                return;
            }
            "var_spec" => {
                self.visit_children(node);
                let mut cursor = node.walk();
                let targets: Vec<_> = node.children_by_field_name("name", &mut cursor).collect();
                let values = node
                    .child_by_field_name("value")
                    .map(|v| named_children(&v))
                    .unwrap_or_default();
                self.bind_assignment(&targets, &values);
                return;
            }
            "call_expression" => {
                self.visit_call(node);
                return;
            }
            // Call targets never reach here; visit_call classifies them itself
            "selector_expression" => self.visit_field_access(node),
            "composite_literal" => self.visit_composite_literal(node),
            _ => {}
        }

        self.visit_children(node);
    }

    fn visit_children(&mut self, node: &tree_sitter::Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(&child);
        }
    }

    fn visit_call(&mut self, node: &tree_sitter::Node) {
        let Some(function) = node.child_by_field_name("function") else {
            self.visit_children(node);
            return;
        };

        if function.kind() == "selector_expression" {
            if let (Some(operand), Some(field)) = (
                function.child_by_field_name("operand"),
                function.child_by_field_name("field"),
            ) {
                let method = node_text(&field, self.src);
                if is_identifier(&operand) {
                    let receiver = node_text(&operand, self.src);
                    if self.imports.contains_key(receiver) {
                        self.track_package_call(receiver, method);
                    } else if let Some(type_name) = self.env.type_of(receiver) {
                        let type_name = type_name.to_string();
                        self.info.track_object_method(&type_name, method);
                    }
                } else {
                    // Chained receiver such as `a.GetB().SetC()`
                    self.visit(&operand);
                }
            }
        } else {
            self.visit(&function);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.id() != function.id() {
                self.visit(&child);
            }
        }
    }

    fn track_package_call(&mut self, alias: &str, method: &str) {
        self.info.track_package_method(alias, method);
        if let Some(enum_name) = method.strip_prefix("Parse") {
            if !enum_name.is_empty() {
                self.info.track_enum_usage(
                    &format!("{}.{}", alias, enum_name),
                    &format!("{}.{}", alias, method),
                );
            }
        }
    }

    fn visit_field_access(&mut self, node: &tree_sitter::Node) {
        let (Some(operand), Some(field)) = (
            node.child_by_field_name("operand"),
            node.child_by_field_name("field"),
        ) else {
            return;
        };
        if !is_identifier(&operand) {
            return;
        }
        let receiver = node_text(&operand, self.src);
        // Package-level references (constants, vars) are not field accesses
        if self.imports.contains_key(receiver) {
            return;
        }
        if let Some(type_name) = self.env.type_of(receiver) {
            let type_name = type_name.to_string();
            self.info
                .track_field_access(&type_name, node_text(&field, self.src));
        }
    }

    fn visit_composite_literal(&mut self, node: &tree_sitter::Node) {
        let Some(type_name) = self.sdk_literal_type(node) else {
            return;
        };
        self.info.track_type_instantiation(&type_name);

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        for element in named_children(&body) {
            if element.kind() != "keyed_element" {
                continue;
            }
            if let Some(key) = keyed_element_field(&element, self.src) {
                self.info.track_field_access(&type_name, key);
            }
        }
    }

    /// `pkg.Type` for a composite literal whose type is qualified by an SDK alias.
    fn sdk_literal_type(&self, node: &tree_sitter::Node) -> Option<String> {
        let ty = node.child_by_field_name("type")?;
        if ty.kind() != "qualified_type" {
            return None;
        }
        let package = node_text(&ty.child_by_field_name("package")?, self.src);
        let name = node_text(&ty.child_by_field_name("name")?, self.src);
        if !self.imports.contains_key(package) {
            return None;
        }
        Some(format!("{}.{}", package, name))
    }

    fn bind_assignment(&mut self, targets: &[tree_sitter::Node], values: &[tree_sitter::Node]) {
        let paired = targets.len() == values.len();
        for (i, target) in targets.iter().enumerate() {
            if target.kind() != "identifier" {
                continue;
            }
            let name = node_text(target, self.src);
            let inferred = if paired {
                self.infer_type(&values[i])
            } else {
                None
            };
            match inferred {
                Some(type_name) => self.env.bind(name, type_name),
                None => self.env.unbind(name),
            }
        }
    }

    /// Infer the SDK type of an assignment's right-hand side.
    fn infer_type(&self, value: &tree_sitter::Node) -> Option<String> {
        match value.kind() {
            "call_expression" => {
                let function = value.child_by_field_name("function")?;
                if function.kind() != "selector_expression" {
                    return None;
                }
                let operand = function.child_by_field_name("operand")?;
                if !is_identifier(&operand) {
                    return None;
                }
                let alias = node_text(&operand, self.src);
                let constructor = node_text(&function.child_by_field_name("field")?, self.src);
                if self.imports.contains_key(alias) && constructor.starts_with("New") {
                    Some(format!("{}.{}", alias, constructor))
                } else {
                    None
                }
            }
            "composite_literal" => self.sdk_literal_type(value),
            "unary_expression" => {
                let operator = value.child_by_field_name("operator")?;
                let operand = value.child_by_field_name("operand")?;
                if node_text(&operator, self.src) == "&" && operand.kind() == "composite_literal" {
                    self.sdk_literal_type(&operand)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Field name of a keyed element such as `DisplayName: "x"`.
fn keyed_element_field<'a>(element: &tree_sitter::Node, src: &'a [u8]) -> Option<&'a str> {
    let mut key = element.child_by_field_name("key").or_else(|| element.named_child(0))?;
    if key.kind() == "literal_element" {
        key = key.named_child(0)?;
    }
    match key.kind() {
        "identifier" | "field_identifier" => Some(node_text(&key, src)),
        _ => None,
    }
}

fn is_identifier(node: &tree_sitter::Node) -> bool {
    matches!(node.kind(), "identifier" | "package_identifier")
}

fn named_children<'tree>(node: &tree_sitter::Node<'tree>) -> Vec<tree_sitter::Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn node_text<'a>(node: &tree_sitter::Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}
