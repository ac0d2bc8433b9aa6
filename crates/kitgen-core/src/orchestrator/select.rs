//! Deciding which generators run

use crate::args::ArgumentBag;
use crate::error::{KitError, KitResult};
use crate::generator::{GeneratorDescriptor, Registry};
use crate::prompt::{Prompter, Reporter};

pub const SELECT_MESSAGE: &str = "Which generator(s) would you like to run?";

/// Split positional tokens into registry matches and unknown names
pub fn filter_positionals<'r>(
    args: &ArgumentBag,
    registry: &'r Registry,
) -> (Vec<&'r GeneratorDescriptor>, Vec<String>) {
    let mut found = Vec::new();
    let mut invalid = Vec::new();

    for token in args.positionals() {
        match registry.get(token) {
            Some(generator) => found.push(generator),
            None => invalid.push(token.clone()),
        }
    }

    (found, invalid)
}

/// Resolve the ordered list of generators to run.
///
/// Valid positionals win; the interactive multi-select is only shown when
/// none matched, and its choice is appended to the bag's positionals.
pub async fn select<'r, P, R>(
    args: &mut ArgumentBag,
    registry: &'r Registry,
    prompter: &mut P,
    reporter: &R,
) -> KitResult<Vec<&'r GeneratorDescriptor>>
where
    P: Prompter + ?Sized,
    R: Reporter + ?Sized,
{
    let (found, invalid) = filter_positionals(args, registry);

    if !args.is_silent() {
        for name in &invalid {
            reporter.warning(&format!("No generator found with name {}.", name))?;
        }
    }

    if !found.is_empty() {
        return Ok(found);
    }

    let names = registry.names();
    let chosen = prompter
        .multiselect(SELECT_MESSAGE, &names)
        .await
        .map_err(KitError::Prompt)?;

    let selected: Vec<&GeneratorDescriptor> =
        chosen.iter().filter_map(|name| registry.get(name)).collect();
    args.push_positionals(selected.iter().map(|g| g.name.clone()));

    if selected.is_empty() {
        return Err(KitError::NoGeneratorSelected { valid: names });
    }

    Ok(selected)
}
