use super::{GoModule, Requirement};

/// Parse a go.mod file.
/// Handles both forms of `require`:
/// ```text
/// require github.com/microsoftgraph/msgraph-sdk-go v1.50.0
/// require (
///     github.com/microsoft/kiota-abstractions-go v1.8.1
///     golang.org/x/net v0.30.0 // indirect
/// )
/// ```
/// Other directives (`go`, `toolchain`, `replace`, `exclude`, ...) are ignored.
pub fn parse_go_mod(content: &str) -> GoModule {
    let mut module = GoModule::default();
    let mut in_require_block = false;
    let mut in_other_block = false;

    for line in content.lines() {
        let (code, comment) = split_comment(line);
        let code = code.trim();

        if in_require_block || in_other_block {
            if code == ")" {
                in_require_block = false;
                in_other_block = false;
            } else if in_require_block {
                if let Some(req) = parse_requirement(code, comment) {
                    module.requirements.push(req);
                }
            }
            continue;
        }

        if let Some(rest) = code.strip_prefix("module ") {
            module.module = rest.trim().trim_matches('"').to_string();
        } else if let Some(rest) = code.strip_prefix("require") {
            let rest = rest.trim();
            if rest == "(" {
                in_require_block = true;
            } else if let Some(req) = parse_requirement(rest, comment) {
                module.requirements.push(req);
            }
        } else if code.ends_with('(') {
            in_other_block = true;
        }
    }

    module
}

fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find("//") {
        Some(pos) => (&line[..pos], Some(line[pos + 2..].trim())),
        None => (line, None),
    }
}

fn parse_requirement(spec: &str, comment: Option<&str>) -> Option<Requirement> {
    let mut parts = spec.split_whitespace();
    let path = parts.next()?.trim_matches('"');
    let version = parts.next()?;
    Some(Requirement {
        path: path.to_string(),
        version: version.to_string(),
        indirect: comment.is_some_and(|c| c == "indirect" || c.starts_with("indirect;")),
    })
}
