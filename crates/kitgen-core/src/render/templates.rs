//! Resolving the merged template directories into one file set

use crate::orchestrator::TemplateData;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension marking a file as a handlebars template
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// A file to write into the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Absolute or template-root-relative source path
    pub source: PathBuf,
    /// Destination relative to the output directory
    pub target: PathBuf,
    /// Render through handlebars instead of copying bytes
    pub render: bool,
    /// Registered by an addon generator
    pub addon: bool,
}

/// Collect every template file across the plan's template records.
///
/// Records are walked in plan order. Among base (non-addon) records the first
/// registration of a target path wins, so a base directory shared by two
/// generators is only written once. Addon records overwrite whatever was
/// registered before them.
pub fn collect_files(template_data: &[TemplateData]) -> Result<Vec<PlannedFile>> {
    let mut files: BTreeMap<PathBuf, PlannedFile> = BTreeMap::new();

    for record in template_data {
        for dir in &record.template_dirs {
            for file in walk_dir(dir, record.addon)? {
                if record.addon || !files.contains_key(&file.target) {
                    files.insert(file.target.clone(), file);
                }
            }
        }
    }

    Ok(files.into_values().collect())
}

fn walk_dir(dir: &Path, addon: bool) -> Result<Vec<PlannedFile>> {
    if !dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read template directory {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("Unexpected template path {}", entry.path().display()))?;
        let render = relative.extension() == Some(OsStr::new(TEMPLATE_EXTENSION));
        let target = if render {
            relative.with_extension("")
        } else {
            relative.to_path_buf()
        };

        files.push(PlannedFile {
            source: entry.path().to_path_buf(),
            target,
            render,
            addon,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn record(dirs: &[PathBuf], addon: bool) -> TemplateData {
        TemplateData {
            template_dirs: dirs.to_vec(),
            addon,
        }
    }

    #[test]
    fn test_hbs_extension_is_stripped() {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("base");
        write(&base, "package.json.hbs", "{}");
        write(&base, ".gitignore", "node_modules");
        write(&base, "pages/index.jsx.hbs", "");

        let files = collect_files(&[record(&[base.clone()], false)]).unwrap();
        let targets: Vec<_> = files.iter().map(|f| f.target.clone()).collect();

        assert_eq!(
            targets,
            [
                PathBuf::from(".gitignore"),
                PathBuf::from("package.json"),
                PathBuf::from("pages/index.jsx"),
            ]
        );
        assert!(!files[0].render);
        assert!(files[1].render);
    }

    #[test]
    fn test_shared_base_registered_once() {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("base");
        let app = root.path().join("app");
        let lib = root.path().join("lib");
        write(&base, "README.md.hbs", "base");
        write(&app, "README.md.hbs", "app");
        write(&lib, "index.js", "lib");

        let files = collect_files(&[
            record(&[base.clone(), app.clone()], false),
            record(&[base.clone(), lib.clone()], false),
        ])
        .unwrap();

        assert_eq!(files.len(), 2);
        let readme = files
            .iter()
            .find(|f| f.target == PathBuf::from("README.md"))
            .unwrap();
        assert_eq!(readme.source, base.join("README.md.hbs"));
    }

    #[test]
    fn test_addon_overwrites_base() {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("base");
        let tailwind = root.path().join("tailwind");
        write(&base, "styles/globals.css", "body {}");
        write(&tailwind, "styles/globals.css", "@tailwind base;");
        write(&tailwind, "tailwind.config.js", "");

        let files = collect_files(&[
            record(&[base.clone()], false),
            record(&[tailwind.clone()], true),
        ])
        .unwrap();

        let css = files
            .iter()
            .find(|f| f.target == PathBuf::from("styles/globals.css"))
            .unwrap();
        assert_eq!(css.source, tailwind.join("styles/globals.css"));
        assert!(css.addon);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_directory_fails() {
        let root = tempfile::tempdir().unwrap();
        let err = collect_files(&[record(&[root.path().join("nope")], false)]).unwrap_err();
        assert!(err.to_string().contains("Template directory not found"));
    }
}
