use std::collections::HashSet;

use itertools::Itertools;

use super::{grammar::Production, Grammar};
use crate::{config::Config, error::Result};

impl Grammar {
    pub fn has_epsilon_productions(&self, config: &Config) -> bool {
        self.productions
            .iter()
            .any(|p| p.is_epsilon(&config.epsilon))
    }

    /// Rewrites the grammar so that no non-terminal derives the empty string
    /// through an epsilon-production, except a fresh start symbol when the
    /// language contains the empty string.
    ///
    /// Every production is expanded into all variants with some of its
    /// nullable occurrences left out, so the cost grows as `2^k` in the
    /// number `k` of nullable occurrences of a single production.
    pub fn remove_epsilon_productions(&mut self, config: &Config) -> Result<()> {
        self.check_grammar()?;

        if !self.has_epsilon_productions(config) {
            return Ok(());
        }

        // `S -> ε` is already in final form when `S` never occurs on a right
        // side, e.g. after a previous run introduced `S`.
        let retained_start = self.start_symbol.clone().filter(|start| {
            !self.appears_on_right(start)
                && self
                    .productions
                    .iter()
                    .any(|p| &p.left == start && p.is_epsilon(&config.epsilon))
        });

        let mut nullable: HashSet<String> = HashSet::new();
        self.productions.retain(|p| {
            if p.is_epsilon(&config.epsilon) && Some(&p.left) != retained_start.as_ref() {
                nullable.insert(p.left.clone());
                false
            } else {
                true
            }
        });

        let mut changed = true;
        while changed {
            changed = false;
            for production in &self.productions {
                if nullable.contains(&production.left)
                    || Some(&production.left) == retained_start.as_ref()
                {
                    continue;
                }
                if production.right.iter().all(|s| nullable.contains(s)) {
                    nullable.insert(production.left.clone());
                    changed = true;
                }
            }
        }
        tracing::debug!(nullable = ?nullable, "nullable non-terminals");

        let mut new_productions: Vec<Production> = Vec::new();
        for production in std::mem::take(&mut self.productions) {
            let positions: Vec<usize> = production
                .right
                .iter()
                .enumerate()
                .filter(|(_, s)| nullable.contains(*s))
                .map(|(i, _)| i)
                .collect();

            // S -> AaB gives S -> AaB, S -> aB, S -> Aa, S -> a
            let variants: Vec<Production> = positions
                .into_iter()
                .powerset()
                .skip(1)
                .filter_map(|omitted| {
                    let right: Vec<String> = production
                        .right
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !omitted.contains(i))
                        .map(|(_, s)| s.clone())
                        .collect();
                    let is_unit_self = right.len() == 1 && right[0] == production.left;
                    if right.is_empty() || is_unit_self {
                        None
                    } else {
                        Some(Production::new(production.left.clone(), right))
                    }
                })
                .collect();

            for p in std::iter::once(production).chain(variants) {
                if !new_productions.contains(&p) {
                    new_productions.push(p);
                }
            }
        }

        if let Some(start) = self.start_symbol.clone() {
            if nullable.contains(&start) {
                let new_start = self.get_symbol_prime_name(&start, config);
                tracing::debug!(start = %new_start, "augmenting start symbol");
                new_productions.push(Production::new(new_start.clone(), vec![start]));
                new_productions.push(Production::new(
                    new_start.clone(),
                    vec![config.epsilon.clone()],
                ));
                self.non_terms.push(new_start.clone());
                self.start_symbol = Some(new_start);
            }
        }

        self.productions = new_productions;
        Ok(())
    }
}
