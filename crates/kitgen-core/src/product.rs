//! Product configuration trait for CLI binaries
//!
//! Each binary built on this library implements this trait to configure
//! its identity and where its generators are loaded from.

use crate::render::RenderEngine;
use anyhow::Result;
use std::path::PathBuf;

/// Configuration trait for CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, version)
/// - Where generator manifests and templates live
/// - The rendering engine handed to the action runner
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Version string printed by `--version` and used for compatibility checks
    fn version(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Templates directory used when the env override is not set
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the templates directory
    fn template_dir_env(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Templates directory, honoring the env override
    fn template_dir(&self) -> PathBuf {
        std::env::var_os(self.template_dir_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_template_dir())
    }

    /// Create the rendering engine for one run
    fn render_engine(&self) -> Result<RenderEngine> {
        Ok(RenderEngine::new())
    }
}
