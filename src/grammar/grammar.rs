use std::collections::HashSet;

use serde::Serialize;

use crate::{config::Config, error::GrammarError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Production {
    pub left: String,
    pub right: Vec<String>,
}

impl Production {
    pub fn new(left: impl Into<String>, right: Vec<String>) -> Self {
        Self {
            left: left.into(),
            right,
        }
    }

    pub fn is_epsilon(&self, epsilon: &str) -> bool {
        self.right.len() == 1 && self.right[0] == epsilon
    }

    pub fn starts_with(&self, symbol: &str) -> bool {
        self.right.first().map(String::as_str) == Some(symbol)
    }
}

/// A context-free grammar.
///
/// Symbols are plain strings; whether a symbol is a terminal or a
/// non-terminal is decided by which list it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grammar {
    pub terms: Vec<String>,
    pub non_terms: Vec<String>,
    pub start_symbol: Option<String>,
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terms.iter().any(|t| t == symbol)
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.non_terms.iter().any(|nt| nt == symbol)
    }

    pub fn add_production(&mut self, left: impl Into<String>, right: Vec<String>) {
        self.productions.push(Production::new(left, right));
    }

    pub(crate) fn ensure_non_terminal(&self, symbol: &str) -> Result<(), GrammarError> {
        if self.is_non_terminal(symbol) {
            Ok(())
        } else {
            Err(GrammarError::NotNonTerminal(symbol.to_string()))
        }
    }

    /// Right sides of every production of `symbol`, in list order.
    pub fn symbol_rights(&self, symbol: &str) -> Result<Vec<Vec<String>>, GrammarError> {
        self.ensure_non_terminal(symbol)?;
        Ok(self
            .productions
            .iter()
            .filter(|p| p.left == symbol)
            .map(|p| p.right.clone())
            .collect())
    }

    /// Removes the productions of `symbol` and hands them back.
    pub(crate) fn pop_symbol_productions(
        &mut self,
        symbol: &str,
    ) -> Result<Vec<Production>, GrammarError> {
        self.ensure_non_terminal(symbol)?;
        let (popped, kept) = std::mem::take(&mut self.productions)
            .into_iter()
            .partition(|p| p.left == symbol);
        self.productions = kept;
        Ok(popped)
    }

    /// Removes the productions `left -> right γ` and hands them back.
    pub(crate) fn pop_left_right_productions(
        &mut self,
        left: &str,
        right: &str,
    ) -> Result<Vec<Production>, GrammarError> {
        self.ensure_non_terminal(left)?;
        self.ensure_non_terminal(right)?;
        let (popped, kept) = std::mem::take(&mut self.productions)
            .into_iter()
            .partition(|p| p.left == left && p.starts_with(right));
        self.productions = kept;
        Ok(popped)
    }

    /// `name` followed by as many primes as it takes to clash with no
    /// existing symbol.
    pub fn get_symbol_prime_name(&self, name: &str, config: &Config) -> String {
        let mut name = format!("{}{}", name, config.prime);
        while self.is_non_terminal(&name) || self.is_terminal(&name) {
            name.push_str(&config.prime);
        }
        name
    }

    /// Keeps the first occurrence of every production.
    pub fn dedup_productions(&mut self) {
        let mut seen: HashSet<Production> = HashSet::new();
        self.productions.retain(|p| seen.insert(p.clone()));
    }

    pub(crate) fn appears_on_right(&self, symbol: &str) -> bool {
        self.productions
            .iter()
            .any(|p| p.right.iter().any(|s| s == symbol))
    }
}
