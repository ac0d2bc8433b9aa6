//! Argument resolution: raw CLI tokens into an [`ArgumentBag`]
//!
//! Known flags are coerced through the [`Flag`] schema. Unknown flags pass
//! through with an inferred type so that any prompt can be answered from the
//! command line (`--typescript`, `--cmsType=drupal`, ...). Non-flag tokens are
//! collected in order as positionals.

pub mod bag;
pub mod flag;

pub use bag::{ArgumentBag, Value, POSITIONAL_KEY};
pub use flag::{Flag, FlagKind};

use crate::error::ArgumentError;
use std::collections::HashSet;
use std::iter::Peekable;
use std::slice::Iter;

type Tokens<'a> = Peekable<Iter<'a, String>>;

/// Resolve raw CLI tokens into a typed argument bag
pub fn resolve(tokens: &[String]) -> Result<ArgumentBag, ArgumentError> {
    let mut resolver = Resolver::default();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if token == "--" {
            resolver.positionals.extend(iter.by_ref().cloned());
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            resolver.long(body, &mut iter)?;
        } else if is_flag_like(token) {
            resolver.short(&token[1..], &mut iter)?;
        } else {
            resolver.positionals.push(token.clone());
        }
    }

    let Resolver {
        mut bag,
        positionals,
        ..
    } = resolver;
    bag.push_positionals(positionals);
    Ok(bag)
}

fn is_flag_like(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Infer a pass-through value: `true`/`false` become booleans
fn infer(raw: &str) -> Value {
    match flag::parse_bool(raw) {
        Some(b) => Value::Bool(b),
        None => Value::String(raw.to_string()),
    }
}

#[derive(Default)]
struct Resolver {
    bag: ArgumentBag,
    positionals: Vec<String>,
    /// Unknown keys already seen, so repeats accumulate into a list
    seen: HashSet<String>,
}

impl Resolver {
    fn long(&mut self, body: &str, iter: &mut Tokens<'_>) -> Result<(), ArgumentError> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if inline.is_none() {
            if let Some(negated) = name.strip_prefix("no-") {
                return self.negate(negated);
            }
        }

        match Flag::from_long(name) {
            Some(flag) => self.known(flag, inline, iter),
            None => {
                self.unknown(name, inline, iter);
                Ok(())
            }
        }
    }

    /// `-abc` sets a, b and c; only the last letter may take a value
    fn short(&mut self, letters: &str, iter: &mut Tokens<'_>) -> Result<(), ArgumentError> {
        let chars: Vec<char> = letters.chars().collect();
        let Some((last, rest)) = chars.split_last() else {
            return Ok(());
        };

        for c in rest {
            match Flag::from_short(*c) {
                Some(flag) if flag.kind() == FlagKind::Bool => self.bag.insert(flag.key(), true),
                Some(flag) => {
                    return Err(ArgumentError::MissingValue {
                        flag: flag.key().to_string(),
                    })
                }
                None => self.set_unknown(&c.to_string(), Value::Bool(true)),
            }
        }

        match Flag::from_short(*last) {
            Some(flag) => self.known(flag, None, iter),
            None => {
                self.unknown(&last.to_string(), None, iter);
                Ok(())
            }
        }
    }

    fn negate(&mut self, name: &str) -> Result<(), ArgumentError> {
        match Flag::from_long(name) {
            Some(flag) if flag.kind() == FlagKind::Bool => {
                self.bag.insert(flag.key(), false);
                Ok(())
            }
            Some(flag) => Err(ArgumentError::NotBoolean {
                flag: flag.key().to_string(),
            }),
            None => {
                self.set_unknown(name, Value::Bool(false));
                Ok(())
            }
        }
    }

    fn known(
        &mut self,
        flag: Flag,
        inline: Option<&str>,
        iter: &mut Tokens<'_>,
    ) -> Result<(), ArgumentError> {
        match flag.kind() {
            FlagKind::Bool => {
                let raw = match inline {
                    Some(raw) => Some(raw.to_string()),
                    None => iter
                        .next_if(|next| flag::parse_bool(next).is_some())
                        .cloned(),
                };
                let value = match raw {
                    Some(raw) => {
                        flag::parse_bool(&raw).ok_or_else(|| ArgumentError::InvalidBoolean {
                            flag: flag.key().to_string(),
                            value: raw.clone(),
                        })?
                    }
                    None => true,
                };
                self.bag.insert(flag.key(), value);
            }
            FlagKind::String => {
                let value = match inline {
                    Some(raw) => raw.to_string(),
                    None => iter
                        .next_if(|next| !is_flag_like(next))
                        .cloned()
                        .ok_or_else(|| ArgumentError::MissingValue {
                            flag: flag.key().to_string(),
                        })?,
                };
                self.bag.insert(flag.key(), value);
            }
        }
        Ok(())
    }

    fn unknown(&mut self, name: &str, inline: Option<&str>, iter: &mut Tokens<'_>) {
        let value = match inline {
            Some(raw) => infer(raw),
            None => match iter.next_if(|next| !is_flag_like(next)) {
                Some(next) => infer(next),
                None => Value::Bool(true),
            },
        };
        self.set_unknown(name, value);
    }

    fn set_unknown(&mut self, name: &str, value: Value) {
        let repeated = !self.seen.insert(name.to_string());
        let merged = match (repeated, self.bag.get(name), value) {
            (true, Some(Value::String(prev)), Value::String(next)) => {
                Value::List(vec![prev.clone(), next])
            }
            (true, Some(Value::List(prev)), Value::String(next)) => {
                let mut items = prev.clone();
                items.push(next);
                Value::List(items)
            }
            (_, _, value) => value,
        };
        self.bag.insert(name, merged);
    }
}
