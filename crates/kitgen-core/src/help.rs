//! Generator-aware help listing

use crate::args::Flag;
use crate::generator::Registry;
use crate::product::ProductConfig;
use colored::Colorize;

/// Build the `--help` text: usage, every registered generator, and the flags
pub fn help_menu<C: ProductConfig>(config: &C, registry: &Registry) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        config.display_name().cyan().bold(),
        format!("v{}", config.version()).dimmed()
    ));
    lines.push(config.cli_description().to_string());
    lines.push(String::new());
    lines.push(format!(
        "{} {} [generators...] [options]",
        "Usage:".bold(),
        config.name()
    ));
    lines.push(String::new());

    lines.push("Generators:".bold().to_string());
    let width = registry
        .iter()
        .map(|g| g.name.len())
        .max()
        .unwrap_or(0)
        .max(16);
    for generator in registry.iter() {
        let tag = if generator.addon { " (addon)" } else { "" };
        lines.push(format!(
            "  {}  {}{}",
            format!("{:<width$}", generator.name).green(),
            generator.description,
            tag.dimmed()
        ));
    }
    lines.push(String::new());

    lines.push("Options:".bold().to_string());
    for flag in Flag::ALL {
        let usage = match flag.short() {
            Some(c) => format!("-{}, --{}", c, flag.key()),
            None => format!("--{}", flag.key()),
        };
        lines.push(format!("  {:<width$}  {}", usage, flag.description()));
    }
    lines.push(String::new());
    lines.push(
        "Any other --name=value flag answers the generator prompt with the same name."
            .dimmed()
            .to_string(),
    );

    lines.join("\n")
}
