//! Run orchestration: resolve → select → (accumulate × merge) → run actions
//!
//! One run is a single linear sequence of awaited steps. Prompting and action
//! execution are the only suspension points, and the shared [`ArgumentBag`]
//! is threaded through each step by `&mut`.

pub mod accumulate;
pub mod plan;
pub mod select;

pub use accumulate::accumulate;
pub use plan::{merge, Plan, PlanMerger, TemplateData};
pub use select::{filter_positionals, select};

use crate::args::{self, ArgumentBag};
use crate::error::{KitError, KitResult};
use crate::generator::{check_compatibility, GeneratorDescriptor, Registry};
use crate::help::help_menu;
use crate::product::ProductConfig;
use crate::prompt::{Prompter, Reporter};
use crate::render::ActionRunner;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--help` was given; the listing was printed
    Help,
    /// `--version` was given; the version was printed
    Version,
    /// The plan was executed
    Generated {
        generators: Vec<String>,
        out_dir: Option<String>,
    },
}

/// Print the version when `--version` is set and `--help` is not.
///
/// Needs no registry, so a binary can answer `--version` before it loads
/// any generators. Returns whether the version was printed.
pub fn report_version<C, R>(config: &C, args: &ArgumentBag, reporter: &R) -> KitResult<bool>
where
    C: ProductConfig,
    R: Reporter + ?Sized,
{
    if !args.flag("version") || args.flag("help") {
        return Ok(false);
    }
    reporter.print(&format!("v{}", config.version()))?;
    Ok(true)
}

/// Drives one invocation against a product config and a registry
pub struct Orchestrator<'a, C: ProductConfig> {
    config: &'a C,
    registry: &'a Registry,
}

impl<'a, C: ProductConfig> Orchestrator<'a, C> {
    pub fn new(config: &'a C, registry: &'a Registry) -> Self {
        Self { config, registry }
    }

    /// Run the whole pipeline for raw CLI `tokens`
    pub async fn run<P, R, A>(
        &self,
        tokens: &[String],
        prompter: &mut P,
        reporter: &R,
        runner: &A,
    ) -> KitResult<Outcome>
    where
        P: Prompter + ?Sized,
        R: Reporter,
        A: ActionRunner + ?Sized,
    {
        let mut args = args::resolve(tokens)?;

        if args.flag("help") {
            reporter.print(&help_menu(self.config, self.registry))?;
            return Ok(Outcome::Help);
        }

        if report_version(self.config, &args, reporter)? {
            return Ok(Outcome::Version);
        }

        if !args.is_silent() {
            reporter.intro(self.config.display_name())?;
        }

        let selected = select(&mut args, self.registry, prompter, reporter).await?;
        let names: Vec<String> = selected.iter().map(|g| g.name.clone()).collect();

        let plan = self.collect(&selected, args, prompter, reporter).await?;

        let engine = self.config.render_engine().map_err(KitError::Action)?;
        runner
            .run(&plan, &engine, reporter)
            .await
            .map_err(KitError::Action)?;

        let out_dir = plan.data.string("outDir").map(String::from);
        if !plan.data.is_silent() {
            reporter.success(&format!(
                "Your project was generated with:\n\t{}",
                names.join("\n\t")
            ))?;
            reporter.outro(&format!(
                "cd into {} to start developing!",
                out_dir.as_deref().unwrap_or("the outDir")
            ))?;
        }

        Ok(Outcome::Generated {
            generators: names,
            out_dir,
        })
    }

    /// Give each selected generator its turn, in order, and merge the plan
    async fn collect<P, R>(
        &self,
        selected: &[&GeneratorDescriptor],
        mut args: ArgumentBag,
        prompter: &mut P,
        reporter: &R,
    ) -> KitResult<Plan>
    where
        P: Prompter + ?Sized,
        R: Reporter,
    {
        let mut merger = PlanMerger::new();

        for generator in selected {
            self.warn_if_outdated(generator, &args, reporter)?;
            accumulate(generator, &mut args, prompter).await?;
            merger.add(generator);
        }

        Ok(merger.finish(args))
    }

    fn warn_if_outdated<R: Reporter>(
        &self,
        generator: &GeneratorDescriptor,
        args: &ArgumentBag,
        reporter: &R,
    ) -> KitResult<()> {
        if args.is_silent() {
            return Ok(());
        }
        let Some(min_version) = &generator.min_cli_version else {
            return Ok(());
        };
        if let Some(warning) = check_compatibility(
            &generator.name,
            self.config.version(),
            min_version,
            self.config.upgrade_command(),
        ) {
            reporter.warning(&warning)?;
        }
        Ok(())
    }
}
