pub mod parser;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::GoModError;

#[derive(Debug, Clone, Default)]
pub struct GoModule {
    pub module: String,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub path: String,
    pub version: String,
    pub indirect: bool,
}

impl Requirement {
    pub fn is_sdk(&self) -> bool {
        self.path.contains("microsoftgraph") || self.path.contains("kiota")
    }
}

/// Read `<root>/go.mod` and return the Graph SDK and Kiota modules it requires.
pub fn read_sdk_modules(root: &Path) -> Result<Vec<Requirement>, GoModError> {
    let go_mod = root.join("go.mod");
    if !go_mod.is_file() {
        return Err(GoModError::NotFound(go_mod.display().to_string()));
    }

    let content = std::fs::read_to_string(&go_mod)?;
    let module = parser::parse_go_mod(&content);
    let sdk: Vec<Requirement> = module
        .requirements
        .into_iter()
        .filter(Requirement::is_sdk)
        .collect();

    debug!("Found {} SDK modules in {}", sdk.len(), go_mod.display());
    Ok(sdk)
}
