//! Ordered, immutable collection of generators with name lookup
//!
//! A registry is either built from descriptors directly or loaded from a
//! templates directory laid out as:
//!
//! ```text
//! templates/
//!   generators.yaml          # lists generator directories, in registry order
//!   next-app/generator.yaml  # one GeneratorDescriptor per directory
//!   shared/base/...          # template payloads referenced by descriptors
//! ```

use super::descriptor::GeneratorDescriptor;
use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root manifest (templates/generators.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// Generator directory names, in the order they are offered to the user
    pub generators: Vec<String>,
}

/// Name of the per-generator manifest file
pub const GENERATOR_MANIFEST: &str = "generator.yaml";

/// Name of the root manifest file
pub const ROOT_MANIFEST: &str = "generators.yaml";

#[derive(Debug, Clone)]
pub struct Registry {
    generators: Vec<GeneratorDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names
    pub fn new(generators: Vec<GeneratorDescriptor>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(generators.len());
        for (i, generator) in generators.iter().enumerate() {
            if index.insert(generator.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateGenerator(generator.name.clone()));
            }
        }
        Ok(Self { generators, index })
    }

    /// Load every generator listed in `<root>/generators.yaml`.
    /// Relative template directories are resolved against `root`.
    pub fn load(root: &Path) -> Result<Self, RegistryError> {
        let manifest: RootManifest = read_yaml(&root.join(ROOT_MANIFEST))?;

        let mut generators = Vec::with_capacity(manifest.generators.len());
        for dir in &manifest.generators {
            let mut generator: GeneratorDescriptor =
                read_yaml(&root.join(dir).join(GENERATOR_MANIFEST))?;
            generator.templates = generator
                .templates
                .iter()
                .map(|t| if t.is_absolute() { t.clone() } else { root.join(t) })
                .collect();
            generators.push(generator);
        }

        Self::new(generators)
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&GeneratorDescriptor> {
        self.index.get(name).map(|&i| &self.generators[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in registry order
    pub fn names(&self) -> Vec<String> {
        self.generators.iter().map(|g| g.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratorDescriptor> {
        self.generators.iter()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RegistryError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| RegistryError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Registry::new(vec![
            GeneratorDescriptor::new("nextApp"),
            GeneratorDescriptor::new("nextApp"),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateGenerator(name)) if name == "nextApp"));
    }

    #[test]
    fn test_lookup_and_order() {
        let registry = Registry::new(vec![
            GeneratorDescriptor::new("nextApp"),
            GeneratorDescriptor::new("componentLib"),
            GeneratorDescriptor::new("tailwindcss").addon(true),
        ])
        .unwrap();

        assert_eq!(registry.names(), ["nextApp", "componentLib", "tailwindcss"]);
        assert!(registry.get("tailwindcss").unwrap().addon);
        assert!(registry.get("TailwindCSS").is_none());
        assert!(!registry.contains("bogus"));
    }

    #[test]
    fn test_load_from_directory() {
        let root = tempfile::tempdir().unwrap();
        fs::write(
            root.path().join(ROOT_MANIFEST),
            "generators:\n  - component-lib\n  - tailwind\n",
        )
        .unwrap();

        fs::create_dir_all(root.path().join("component-lib")).unwrap();
        fs::write(
            root.path().join("component-lib").join(GENERATOR_MANIFEST),
            "name: componentLib\ntemplates:\n  - component-lib/files\nactions:\n  - type: render\n",
        )
        .unwrap();

        fs::create_dir_all(root.path().join("tailwind")).unwrap();
        fs::write(
            root.path().join("tailwind").join(GENERATOR_MANIFEST),
            "name: tailwindcss\naddon: true\n",
        )
        .unwrap();

        let registry = Registry::load(root.path()).unwrap();
        assert_eq!(registry.names(), ["componentLib", "tailwindcss"]);

        let lib = registry.get("componentLib").unwrap();
        assert_eq!(lib.templates, [root.path().join("component-lib/files")]);
    }

    #[test]
    fn test_load_missing_manifest() {
        let root = tempfile::tempdir().unwrap();
        let err = Registry::load(root.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }
}
