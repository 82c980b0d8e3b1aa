use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{Entity, EntityType, TERRAFORM_PREFIX};
use crate::error::IndexerError;

/// Source directories that hold Terraform entities, relative to the repository root.
const ENTITY_PREFIXES: &[(&str, EntityType)] = &[
    ("internal/services/resources/", EntityType::Resource),
    ("internal/services/actions/", EntityType::Action),
    ("internal/services/list-resources/", EntityType::ListAction),
    ("internal/services/ephemerals/", EntityType::Ephemeral),
    ("internal/services/data-sources/", EntityType::DataSource),
];

/// Service domain, API version, entity directory, file.
const MIN_SEGMENTS_PAST_PREFIX: usize = 4;

pub fn should_skip_file(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with("_test.go") || !name.ends_with(".go")
}

/// Derive the Terraform entity a source file belongs to from its location under `root`.
pub fn parse_entity_from_path(path: &Path, root: &Path) -> Option<Entity> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = segments.join("/");

    let (prefix, entity_type) = ENTITY_PREFIXES
        .iter()
        .find(|(prefix, _)| joined.starts_with(prefix))?;

    let rest: Vec<&str> = joined[prefix.len()..]
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if rest.len() < MIN_SEGMENTS_PAST_PREFIX {
        debug!("Path too short to name an entity: {}", joined);
        return None;
    }

    let dir_name = rest[2];
    let name = if dir_name.starts_with(TERRAFORM_PREFIX) {
        dir_name.to_string()
    } else {
        format!("{}{}", TERRAFORM_PREFIX, dir_name)
    };

    Some(Entity {
        entity_type: *entity_type,
        name,
        path: format!("{}{}", prefix, rest[..3].join("/")),
    })
}

/// Discover all non-test .go files under `root`, skipping hidden and vendored dirs.
pub fn discover_go_files(root: &Path) -> Result<Vec<PathBuf>, IndexerError> {
    std::fs::read_dir(root).map_err(|source| IndexerError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && name != "vendor" && name != "node_modules"
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(IndexerError::WalkError {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && !should_skip_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
