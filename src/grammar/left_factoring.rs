use itertools::Itertools;

use super::{grammar::Production, Grammar};
use crate::{
    config::Config,
    error::{GrammarError, Result},
};

fn common_prefix(rights: &[&Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = rights.split_first() else {
        return Vec::new();
    };
    first
        .iter()
        .enumerate()
        .take_while(|(i, s)| rest.iter().all(|r| r.get(*i) == Some(*s)))
        .map(|(_, s)| s.clone())
        .collect()
}

impl Grammar {
    /// The longest prefix shared by two or more right sides of `symbol`.
    ///
    /// Every combination of alternatives is tried. Among prefixes of the same
    /// length the greatest one wins.
    pub fn longest_common_prefix(
        &self,
        symbol: &str,
    ) -> std::result::Result<Option<Vec<String>>, GrammarError> {
        let rights = self.symbol_rights(symbol)?;

        let mut best: Option<Vec<String>> = None;
        for k in 2..=rights.len() {
            for combination in rights.iter().combinations(k) {
                let prefix = common_prefix(&combination);
                if prefix.is_empty() {
                    continue;
                }
                let better = match &best {
                    Some(b) => (prefix.len(), &prefix) > (b.len(), b),
                    None => true,
                };
                if better {
                    best = Some(prefix);
                }
            }
        }
        Ok(best)
    }

    /// Factors common prefixes out of the alternatives of every non-terminal.
    pub fn left_factoring(&mut self, config: &Config) -> Result<()> {
        self.check_grammar()?;
        self.dedup_productions();

        for symbol in self.non_terms.clone() {
            let mut factored: Vec<Production> = Vec::new();

            while let Some(prefix) = self.longest_common_prefix(&symbol)? {
                let prime = self.get_symbol_prime_name(&symbol, config);
                tracing::debug!(symbol = %symbol, prefix = ?prefix, prime = %prime, "factoring prefix");

                for production in self.pop_symbol_productions(&symbol)? {
                    if production.right.starts_with(&prefix) {
                        let mut rest = production.right[prefix.len()..].to_vec();
                        if rest.is_empty() {
                            rest.push(config.epsilon.clone());
                        }
                        factored.push(Production::new(prime.clone(), rest));
                    } else {
                        self.productions.push(production);
                    }
                }

                let mut right = prefix;
                right.push(prime.clone());
                self.add_production(symbol.as_str(), right);
                self.non_terms.push(prime);
            }

            self.productions.extend(factored);
        }

        self.dedup_productions();
        Ok(())
    }
}
