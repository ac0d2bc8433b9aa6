//! Charm-style CLI prompts using cliclack

use crate::args::{ArgumentBag, Value};
use crate::generator::{Question, QuestionKind};
use crate::prompt::{answer_each, Answers, Prompter, Reporter};
use anyhow::Result;
use async_trait::async_trait;
use std::io;

/// Prompt engine backed by cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

#[async_trait]
impl Prompter for ClackPrompter {
    async fn prompt(&mut self, questions: &[Question], seed: &ArgumentBag) -> Result<Answers> {
        answer_each(questions, seed, ask)
    }

    async fn multiselect(&mut self, message: &str, choices: &[String]) -> Result<Vec<String>> {
        if choices.is_empty() {
            return Ok(Vec::new());
        }

        let mut multi = cliclack::multiselect(message);
        for choice in choices {
            multi = multi.item(choice.clone(), choice, "");
        }

        let selected: Vec<String> = multi.required(false).interact()?;
        // Keep the order the choices were offered in
        Ok(choices
            .iter()
            .filter(|c| selected.contains(c))
            .cloned()
            .collect())
    }
}

fn ask(question: &Question, bag: &ArgumentBag) -> Result<Option<Value>> {
    let value = match question.kind {
        QuestionKind::Input => {
            let mut input = cliclack::input(&question.message).required(question.required);
            if let Some(Value::String(default)) = &question.default {
                input = input.placeholder(default).default_input(default);
            }
            let answer: String = input.interact()?;
            Some(Value::String(answer))
        }
        QuestionKind::Confirm => {
            let initial = matches!(question.default, Some(Value::Bool(true)));
            let answer: bool = cliclack::confirm(&question.message)
                .initial_value(initial)
                .interact()?;
            Some(Value::Bool(answer))
        }
        QuestionKind::Select => {
            let choices = question.choices(bag);
            if choices.is_empty() {
                return Ok(None);
            }
            let mut select = cliclack::select(&question.message);
            for choice in &choices {
                select = select.item(choice.clone(), choice, "");
            }
            if let Some(Value::String(default)) = &question.default {
                if choices.contains(default) {
                    select = select.initial_value(default.clone());
                }
            }
            let answer: String = select.interact()?;
            Some(Value::String(answer))
        }
        QuestionKind::Multiselect => {
            let choices = question.choices(bag);
            if choices.is_empty() {
                return Ok(None);
            }
            let mut multi = cliclack::multiselect(&question.message);
            for choice in &choices {
                multi = multi.item(choice.clone(), choice, "");
            }
            if let Some(Value::List(defaults)) = &question.default {
                multi = multi.initial_values(defaults.clone());
            }
            let answer: Vec<String> = multi.required(question.required).interact()?;
            Some(Value::List(answer))
        }
    };

    Ok(value)
}

/// Status output through cliclack's log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackReporter;

impl Reporter for ClackReporter {
    fn intro(&self, title: &str) -> io::Result<()> {
        cliclack::intro(title)
    }

    fn info(&self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn warning(&self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }

    fn success(&self, message: &str) -> io::Result<()> {
        cliclack::log::success(message)
    }

    fn error(&self, message: &str) -> io::Result<()> {
        cliclack::log::error(message)
    }

    fn print(&self, text: &str) -> io::Result<()> {
        println!("{}", text);
        Ok(())
    }

    fn outro(&self, message: &str) -> io::Result<()> {
        cliclack::outro(message)
    }
}
