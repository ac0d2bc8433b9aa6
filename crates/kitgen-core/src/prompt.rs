//! Prompt engine and console boundary
//!
//! Orchestration talks to the user only through [`Prompter`] and [`Reporter`].
//! The cliclack implementations live in [`crate::tui`]; [`DefaultsPrompter`]
//! answers from question defaults for CI and other unattended runs.

use crate::args::{ArgumentBag, Value};
use crate::generator::{Question, QuestionKind};
use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use std::io;

/// Answers collected on one generator's turn, in the order they were given
pub type Answers = Vec<(String, Value)>;

/// Interactive question/answer engine
#[async_trait]
pub trait Prompter: Send {
    /// Ask `questions` in order. `seed` carries every flag and earlier answer;
    /// a question whose name is already in `seed` must not be asked.
    async fn prompt(&mut self, questions: &[Question], seed: &ArgumentBag) -> Result<Answers>;

    /// Let the user pick any subset of `choices`, preserving their order
    async fn multiselect(&mut self, message: &str, choices: &[String]) -> Result<Vec<String>>;
}

/// Operator-facing status output
pub trait Reporter: Sync {
    fn intro(&self, title: &str) -> io::Result<()>;
    fn info(&self, message: &str) -> io::Result<()>;
    fn warning(&self, message: &str) -> io::Result<()>;
    fn success(&self, message: &str) -> io::Result<()>;
    fn error(&self, message: &str) -> io::Result<()>;
    /// Plain output such as the help listing or version string
    fn print(&self, text: &str) -> io::Result<()>;
    fn outro(&self, message: &str) -> io::Result<()>;
}

/// Walk a turn's questions, skipping answered and inapplicable ones.
///
/// `ask` returns `None` to leave a question unanswered. Each answer is visible
/// to the `when` conditions and choices of the questions after it.
pub fn answer_each<F>(questions: &[Question], seed: &ArgumentBag, mut ask: F) -> Result<Answers>
where
    F: FnMut(&Question, &ArgumentBag) -> Result<Option<Value>>,
{
    let mut scratch = seed.clone();
    let mut answers = Answers::new();

    for question in questions {
        if question.is_answered(&scratch) || !question.applies(&scratch) {
            continue;
        }
        if let Some(value) = ask(question, &scratch)? {
            scratch.insert(question.name.clone(), value.clone());
            answers.push((question.name.clone(), value));
        }
    }

    Ok(answers)
}

/// Non-interactive engine: every question takes its default.
///
/// Select questions without a default take their first choice, confirms take
/// `false`, and inputs without a default stay unanswered.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

#[async_trait]
impl Prompter for DefaultsPrompter {
    async fn prompt(&mut self, questions: &[Question], seed: &ArgumentBag) -> Result<Answers> {
        answer_each(questions, seed, |question, bag| {
            if let Some(default) = &question.default {
                return Ok(Some(default.clone()));
            }
            let value = match question.kind {
                QuestionKind::Input => None,
                QuestionKind::Confirm => Some(Value::Bool(false)),
                QuestionKind::Select => question.choices(bag).into_iter().next().map(Value::String),
                QuestionKind::Multiselect => Some(Value::List(Vec::new())),
            };
            Ok(value)
        })
    }

    async fn multiselect(&mut self, _message: &str, _choices: &[String]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Line-oriented reporter for unattended terminals and CI logs
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainReporter;

impl Reporter for PlainReporter {
    fn intro(&self, title: &str) -> io::Result<()> {
        println!("{}", title.cyan().bold());
        Ok(())
    }

    fn info(&self, message: &str) -> io::Result<()> {
        println!("  {} {}", "->".blue(), message);
        Ok(())
    }

    fn warning(&self, message: &str) -> io::Result<()> {
        eprintln!("{} {}", "Warning:".yellow(), message);
        Ok(())
    }

    fn success(&self, message: &str) -> io::Result<()> {
        println!("{}", message.green());
        Ok(())
    }

    fn error(&self, message: &str) -> io::Result<()> {
        eprintln!("{} {}", "Error:".red(), message);
        Ok(())
    }

    fn print(&self, text: &str) -> io::Result<()> {
        println!("{}", text);
        Ok(())
    }

    fn outro(&self, message: &str) -> io::Result<()> {
        println!();
        println!("{}", message.bold());
        Ok(())
    }
}
