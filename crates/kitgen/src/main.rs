//! Kitgen CLI - scaffold a project from one or more composable generators

use anyhow::{Context, Result};
use clap::Parser;
use include_dir::{include_dir, Dir};
use kitgen_core::{
    report_version, resolve, ClackPrompter, ClackReporter, DefaultsPrompter, FsActionRunner,
    Orchestrator, PlainReporter, ProductConfig, Prompter, Registry, Reporter,
};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generators shipped inside the binary
static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Kitgen product configuration
#[derive(Clone)]
pub struct KitgenConfig;

impl ProductConfig for KitgenConfig {
    fn name(&self) -> &'static str {
        "kitgen"
    }

    fn display_name(&self) -> &'static str {
        "Kitgen"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold a project from one or more composable generators"
    }

    fn default_template_dir(&self) -> PathBuf {
        std::env::temp_dir().join(format!("kitgen-templates-{}", CLI_VERSION))
    }

    fn template_dir_env(&self) -> &'static str {
        "KITGEN_TEMPLATE_DIR"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install kitgen --force"
    }
}

/// Raw tokens are handed to the generator-aware resolver untouched, so any
/// `--flag` can answer a generator prompt and `--help` can list generators.
#[derive(Parser, Debug)]
#[command(name = "kitgen")]
#[command(about = "Scaffold a project from one or more composable generators")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Generator names followed by any flags
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub tokens: Vec<String>,
}

/// Prompts only make sense when someone is at the terminal
fn interactive() -> bool {
    console::user_attended() && std::env::var_os("CI").is_none()
}

/// Templates root for this run. The bundled generators are unpacked into the
/// default directory unless the env override points somewhere else.
fn template_root(config: &KitgenConfig) -> Result<PathBuf> {
    let root = config.template_dir();
    if std::env::var_os(config.template_dir_env()).is_none() {
        std::fs::create_dir_all(&root)
            .and_then(|_| TEMPLATES.extract(&root))
            .with_context(|| format!("Failed to unpack templates into {}", root.display()))?;
    }
    Ok(root)
}

/// One invocation. The registry is only loaded once `--version` is ruled out.
async fn run<P, R>(
    config: &KitgenConfig,
    tokens: &[String],
    root: impl FnOnce() -> Result<PathBuf>,
    prompter: &mut P,
    reporter: &R,
) -> Result<()>
where
    P: Prompter,
    R: Reporter,
{
    if report_version(config, &resolve(tokens)?, reporter)? {
        return Ok(());
    }

    let registry = Registry::load(&root()?)?;
    Orchestrator::new(config, &registry)
        .run(tokens, prompter, reporter, &FsActionRunner)
        .await?;
    Ok(())
}

/// Run and send any failure through the reporter
async fn generate<P, R>(
    config: &KitgenConfig,
    tokens: &[String],
    prompter: &mut P,
    reporter: &R,
) -> bool
where
    P: Prompter,
    R: Reporter,
{
    match run(config, tokens, || template_root(config), prompter, reporter).await {
        Ok(()) => true,
        Err(err) => {
            let _ = reporter.error(&format!("{:#}", err));
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = KitgenConfig;

    let succeeded = if interactive() {
        generate(&config, &args.tokens, &mut ClackPrompter, &ClackReporter).await
    } else {
        generate(&config, &args.tokens, &mut DefaultsPrompter, &PlainReporter).await
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
