//! Generator descriptor types and parsing

use crate::args::{ArgumentBag, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A self-contained scaffolding unit: prompts, template directories,
/// static data and file actions. Read-only once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDescriptor {
    /// Unique name, matched exactly against positional tokens
    pub name: String,

    /// One-line summary shown in the help listing
    #[serde(default)]
    pub description: String,

    /// Questions asked on this generator's turn, in order
    #[serde(default)]
    pub prompts: Vec<Question>,

    /// Template directories handed to the rendering engine
    #[serde(default)]
    pub templates: Vec<PathBuf>,

    /// Actions appended to the plan, in declared order
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Static overlay merged into the shared bag after this generator's answers
    #[serde(default)]
    pub data: BTreeMap<String, Value>,

    /// Addon templates layer onto a base generator's output
    #[serde(default)]
    pub addon: bool,

    /// Oldest CLI version this generator was written for
    #[serde(default)]
    pub min_cli_version: Option<String>,
}

impl GeneratorDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            prompts: Vec::new(),
            templates: Vec::new(),
            actions: Vec::new(),
            data: BTreeMap::new(),
            addon: false,
            min_cli_version: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn prompt(mut self, question: Question) -> Self {
        self.prompts.push(question);
        self
    }

    pub fn template(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates.push(dir.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn addon(mut self, addon: bool) -> Self {
        self.addon = addon;
        self
    }
}

/// How a question is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Input,
    Confirm,
    Select,
    Multiselect,
}

/// A single declarative prompt.
///
/// Orchestration only looks at `name`; everything else is for the prompt engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,

    #[serde(default)]
    pub kind: QuestionKind,

    pub message: String,

    #[serde(default)]
    pub default: Option<Value>,

    /// Fixed choices for select/multiselect
    #[serde(default)]
    pub choices: Vec<String>,

    /// Bag key whose list value supplies the choices
    #[serde(default)]
    pub choices_from: Option<String>,

    /// Only ask when this condition holds
    #[serde(default)]
    pub when: Option<Condition>,

    /// Reject empty input
    #[serde(default)]
    pub required: bool,
}

impl Question {
    fn with_kind(kind: QuestionKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            message: message.into(),
            default: None,
            choices: Vec::new(),
            choices_from: None,
            when: None,
            required: false,
        }
    }

    pub fn input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(QuestionKind::Input, name, message)
    }

    pub fn confirm(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(QuestionKind::Confirm, name, message)
    }

    pub fn select<I, S>(name: impl Into<String>, message: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut question = Self::with_kind(QuestionKind::Select, name, message);
        question.choices = choices.into_iter().map(Into::into).collect();
        question
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    /// Whether the bag already holds an answer for this question
    pub fn is_answered(&self, bag: &ArgumentBag) -> bool {
        bag.contains(&self.name)
    }

    /// Whether this question applies given the answers so far
    pub fn applies(&self, bag: &ArgumentBag) -> bool {
        self.when.as_ref().map_or(true, |c| c.matches(bag))
    }

    /// Produce the choices for this question against the current bag
    pub fn choices(&self, bag: &ArgumentBag) -> Vec<String> {
        match &self.choices_from {
            Some(key) => match bag.get(key) {
                Some(Value::List(items)) => items.clone(),
                Some(Value::String(s)) => vec![s.clone()],
                _ => self.choices.clone(),
            },
            None => self.choices.clone(),
        }
    }
}

/// Gate on a bag value: equality when `equals` is set, truthiness otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,

    #[serde(default)]
    pub equals: Option<Value>,
}

impl Condition {
    pub fn truthy(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            equals: None,
        }
    }

    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            equals: Some(value.into()),
        }
    }

    pub fn matches(&self, bag: &ArgumentBag) -> bool {
        match (&self.equals, bag.get(&self.key)) {
            (Some(expected), Some(actual)) => expected == actual,
            (Some(_), None) => false,
            (None, value) => value.is_some_and(Value::is_truthy),
        }
    }
}

/// A unit of work executed by the action runner. Orchestration only
/// concatenates these; it never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Render the deduplicated template set into `outDir`
    Render,

    /// Run a process inside `outDir`
    Run {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        /// Skip when this bag key is truthy
        #[serde(default)]
        skip_when: Option<String>,
    },

    /// Render a handlebars string and report it
    Message { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_APP_YAML: &str = r#"
name: nextApp
description: Next.js application
templates:
  - shared/base
  - next-app/files
prompts:
  - name: appName
    message: What is your project name?
    default: my-app
    required: true
  - name: typescript
    kind: confirm
    message: Use TypeScript?
    default: true
  - name: cmsType
    kind: select
    message: Which CMS?
    choices: [drupal, wordpress]
    when:
      key: typescript
actions:
  - type: render
  - type: run
    command: npm
    args: [install]
    skip_when: noInstall
  - type: message
    text: "Created {{appName}}"
data:
  framework: next
"#;

    #[test]
    fn test_parse_generator_yaml() {
        let generator: GeneratorDescriptor = serde_yaml::from_str(NEXT_APP_YAML).unwrap();

        assert_eq!(generator.name, "nextApp");
        assert!(!generator.addon);
        assert_eq!(generator.prompts.len(), 3);
        assert_eq!(generator.prompts[0].kind, QuestionKind::Input);
        assert_eq!(
            generator.prompts[1].default,
            Some(Value::Bool(true))
        );
        assert_eq!(generator.prompts[2].choices, ["drupal", "wordpress"]);
        assert_eq!(generator.actions[0], Action::Render);
        assert!(matches!(
            &generator.actions[1],
            Action::Run { command, skip_when: Some(skip), .. } if command == "npm" && skip == "noInstall"
        ));
        assert_eq!(generator.data.get("framework"), Some(&Value::from("next")));
    }

    #[test]
    fn test_condition_truthy_and_equals() {
        let mut bag = ArgumentBag::new();
        assert!(!Condition::truthy("typescript").matches(&bag));

        bag.insert("typescript", true);
        bag.insert("cmsType", "drupal");
        assert!(Condition::truthy("typescript").matches(&bag));
        assert!(Condition::equals("cmsType", "drupal").matches(&bag));
        assert!(!Condition::equals("cmsType", "wordpress").matches(&bag));
    }

    #[test]
    fn test_choices_from_bag() {
        let mut question = Question::select("starter", "Pick a starter", ["default"]);
        let mut bag = ArgumentBag::new();
        assert_eq!(question.choices(&bag), ["default"]);

        question.choices_from = Some("starters".to_string());
        bag.insert("starters", vec!["blog".to_string(), "shop".to_string()]);
        assert_eq!(question.choices(&bag), ["blog", "shop"]);
    }

    #[test]
    fn test_is_answered_uses_name() {
        let question = Question::input("appName", "Name?");
        let mut bag = ArgumentBag::new();
        assert!(!question.is_answered(&bag));
        bag.insert("appName", "x");
        assert!(question.is_answered(&bag));
    }
}
