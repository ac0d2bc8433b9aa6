//! Collecting one generator's answers into the shared bag

use crate::args::ArgumentBag;
use crate::error::{KitError, KitResult};
use crate::generator::{GeneratorDescriptor, Question};
use crate::prompt::Prompter;

/// Run one generator's turn.
///
/// Questions already answered are never forwarded. Answers are merged first,
/// then the generator's static data, each overwriting existing keys.
pub async fn accumulate<P>(
    generator: &GeneratorDescriptor,
    args: &mut ArgumentBag,
    prompter: &mut P,
) -> KitResult<()>
where
    P: Prompter + ?Sized,
{
    let pending: Vec<Question> = generator
        .prompts
        .iter()
        .filter(|q| !q.is_answered(args))
        .cloned()
        .collect();

    if !pending.is_empty() {
        let answers = prompter
            .prompt(&pending, args)
            .await
            .map_err(KitError::Prompt)?;
        args.extend(answers);
    }

    args.extend(generator.data.clone());

    Ok(())
}
