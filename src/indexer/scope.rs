//! Variable-to-SDK-type environment for one Go source file.
//! Bindings are added in source order as assignments are visited; there is no back-patching.
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, String>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: &str, type_name: String) {
        // `_` never names a value that can be read back
        if name != "_" {
            self.bindings.insert(name.to_string(), type_name);
        }
    }

    /// Rebinding to a value of unknown type drops what we knew about the name.
    pub fn unbind(&mut self, name: &str) {
        self.bindings.remove(name);
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
