//! Merging selected generators into one execution plan

use crate::args::ArgumentBag;
use crate::generator::{Action, GeneratorDescriptor};
use std::path::PathBuf;

/// One selected generator's template directories, tagged with its addon flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    pub template_dirs: Vec<PathBuf>,
    pub addon: bool,
}

/// Everything the action runner needs for one invocation
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub template_data: Vec<TemplateData>,
    pub data: ArgumentBag,
}

/// Accumulates actions and template records in selection order.
///
/// Nothing is reordered or deduplicated here; overlapping templates are the
/// rendering engine's business.
#[derive(Debug, Default)]
pub struct PlanMerger {
    actions: Vec<Action>,
    template_data: Vec<TemplateData>,
}

impl PlanMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, generator: &GeneratorDescriptor) {
        self.template_data.push(TemplateData {
            template_dirs: generator.templates.clone(),
            addon: generator.addon,
        });
        self.actions.extend(generator.actions.iter().cloned());
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn template_data(&self) -> &[TemplateData] {
        &self.template_data
    }

    /// Seal the plan with the final data bag
    pub fn finish(self, data: ArgumentBag) -> Plan {
        Plan {
            actions: self.actions,
            template_data: self.template_data,
            data,
        }
    }
}

/// Merge generators, in the given order, into `(actions, template_data)`
pub fn merge<'a, I>(generators: I) -> (Vec<Action>, Vec<TemplateData>)
where
    I: IntoIterator<Item = &'a GeneratorDescriptor>,
{
    let mut merger = PlanMerger::new();
    for generator in generators {
        merger.add(generator);
    }
    (merger.actions, merger.template_data)
}
