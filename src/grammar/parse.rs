use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    config::Config,
    error::{FormatError, GrammarError, Result},
    Grammar,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLeft {
    Symbol(String),
    Sequence(Vec<String>),
}

#[derive(Deserialize)]
struct RawGrammar {
    terms: Vec<String>,
    non_terms: Vec<String>,
    start_symbol: String,
    productions: Vec<(RawLeft, Vec<String>)>,
}

fn syntax_error(line: usize, message: &str) -> FormatError {
    FormatError::Syntax {
        line: line + 1,
        message: message.to_string(),
    }
}

impl Grammar {
    /// Reads a grammar from a JSON record with `terms`, `non_terms`,
    /// `start_symbol` and `productions` (`[left, [right...]]`).
    pub fn from_json(source: &str, config: &Config) -> Result<Self> {
        let raw: RawGrammar = serde_json::from_str(source).map_err(FormatError::from)?;

        let mut g = Self::new();
        g.terms = raw.terms;
        g.non_terms = raw.non_terms;
        g.start_symbol = Some(raw.start_symbol);

        for (left, right) in raw.productions {
            let left = match left {
                RawLeft::Symbol(symbol) => symbol,
                RawLeft::Sequence(symbols) => {
                    return Err(GrammarError::NotContextFree(symbols.join(" ")).into())
                }
            };
            let right = right
                .into_iter()
                .map(|s| {
                    if config.is_epsilon_token(&s) {
                        config.epsilon.clone()
                    } else {
                        s
                    }
                })
                .collect();
            g.add_production(left, right);
        }

        g.check_grammar()?;
        Ok(g)
    }

    pub fn load(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source, config)
    }

    /// Reads productions written one rule per line, `A -> x y | z`, with
    /// continuation lines starting with `|`.
    ///
    /// Left sides become the non-terminals, the first one being the start
    /// symbol. Every other symbol is a terminal.
    pub fn parse(grammar: &str, config: &Config) -> Result<Self> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(syntax_error(i, "too many \"->\"").into());
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(syntax_error(i, "empty left side").into());
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(GrammarError::NotContextFree(left_str.to_string()).into());
                }
                if !g.is_non_terminal(left_str) {
                    g.non_terms.push(left_str.to_string());
                }
                (left_str, parts[1].trim())
            } else {
                match (previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left, rights.trim()),
                    _ => return Err(syntax_error(i, "cannot find left side").into()),
                }
            };

            previous_left = Some(left);
            raw_productions.push((i, left, rights));
        }

        for (i, left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<String> = right
                    .split_whitespace()
                    .map(|s| {
                        if config.is_epsilon_token(s) {
                            return config.epsilon.clone();
                        }
                        if !g.is_non_terminal(s) && !g.is_terminal(s) {
                            g.terms.push(s.to_string());
                        }
                        s.to_string()
                    })
                    .collect();
                if symbols.is_empty() {
                    return Err(syntax_error(i, "empty alternative").into());
                }
                g.add_production(left, symbols);
            }
        }

        g.start_symbol = g.non_terms.first().cloned();

        g.check_grammar()?;
        Ok(g)
    }
}
