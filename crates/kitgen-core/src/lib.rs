//! Kitgen Core - multi-generator project scaffolding
//!
//! Given zero or more generator names, this library decides which generators
//! run, collects their prompt answers into one shared data bag, merges their
//! actions and template directories into a single plan, and hands that plan
//! to an action runner backed by a handlebars rendering engine.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Data** - [`args`] (flag schema and argument bag) and
//!   [`generator`] (descriptors, registry loading)
//! - **Layer 2: Orchestration** - [`orchestrator`] (selection, answer
//!   accumulation, plan merging) driven by a [`ProductConfig`]
//! - **Layer 3: Collaborators** - [`prompt`] and [`render`] traits with default
//!   implementations, plus optional cliclack prompts in [`tui`]
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt engine and reporter
//!
//! # Example Usage
//!
//! ```ignore
//! use kitgen_core::{DefaultsPrompter, FsActionRunner, Orchestrator, PlainReporter, Registry};
//!
//! let registry = Registry::load(&config.template_dir())?;
//! let outcome = Orchestrator::new(&config, &registry)
//!     .run(&tokens, &mut DefaultsPrompter, &PlainReporter, &FsActionRunner)
//!     .await?;
//! ```

pub mod args;
pub mod error;
pub mod generator;
pub mod help;
pub mod orchestrator;
pub mod product;
pub mod prompt;
pub mod render;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use args::{resolve, ArgumentBag, Flag, Value};
pub use error::{ArgumentError, KitError, KitResult, RegistryError};
pub use generator::{Action, GeneratorDescriptor, Question, QuestionKind, Registry};
pub use orchestrator::{report_version, Orchestrator, Outcome, Plan, TemplateData};
pub use product::ProductConfig;
pub use prompt::{DefaultsPrompter, PlainReporter, Prompter, Reporter};
pub use render::{ActionRunner, FsActionRunner, RenderEngine};

#[cfg(feature = "tui")]
pub use tui::{ClackPrompter, ClackReporter};
