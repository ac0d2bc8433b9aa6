//! Rendering engine and action runner
//!
//! This module provides:
//! - The handlebars engine handle shared by a run's actions
//! - Template deduplication across the merged template records
//! - The filesystem action runner

pub mod engine;
pub mod runner;
pub mod templates;

pub use engine::RenderEngine;
pub use runner::{ActionRunner, FsActionRunner, RenderSummary};
pub use templates::{collect_files, PlannedFile};
