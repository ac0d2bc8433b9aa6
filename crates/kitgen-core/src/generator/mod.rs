//! Generator descriptors and the registry that holds them

pub mod descriptor;
pub mod registry;
pub mod version;

pub use descriptor::{Action, Condition, GeneratorDescriptor, Question, QuestionKind};
pub use registry::{Registry, RootManifest};
pub use version::check_compatibility;
