use super::Grammar;
use crate::{
    config::Config,
    error::{PreconditionError, Result},
};

/// `delta gamma` with epsilon markers dropped, or `ε` when nothing is left.
fn splice(delta: &[String], gamma: &[String], config: &Config) -> Vec<String> {
    let right: Vec<String> = delta
        .iter()
        .chain(gamma.iter())
        .filter(|s| **s != config.epsilon)
        .cloned()
        .collect();
    if right.is_empty() {
        vec![config.epsilon.clone()]
    } else {
        right
    }
}

impl Grammar {
    /// Whether some production has the form `A -> A α`.
    pub fn has_left_recursion_direct_symbol(&self, symbol: &str) -> bool {
        self.productions
            .iter()
            .any(|p| p.left == symbol && p.starts_with(symbol))
    }

    pub fn has_left_recursion_direct(&self) -> bool {
        self.non_terms
            .iter()
            .any(|symbol| self.has_left_recursion_direct_symbol(symbol))
    }

    /// Replaces `A -> A α | β` by `A -> β A'` and `A' -> α A' | ε`.
    pub fn remove_left_recursion_direct_symbol(
        &mut self,
        symbol: &str,
        config: &Config,
    ) -> Result<()> {
        self.ensure_non_terminal(symbol)?;

        if !self.has_left_recursion_direct_symbol(symbol) {
            return Ok(());
        }

        let (recursive, others): (Vec<_>, Vec<_>) = self
            .pop_symbol_productions(symbol)?
            .into_iter()
            .partition(|p| p.starts_with(symbol));

        let prime = self.get_symbol_prime_name(symbol, config);
        tracing::debug!(symbol, prime = %prime, "eliminating direct left recursion");

        for beta in others {
            let mut right: Vec<String> = beta
                .right
                .into_iter()
                .filter(|s| *s != config.epsilon)
                .collect();
            right.push(prime.clone());
            self.add_production(symbol, right);
        }
        for alpha in recursive {
            // `A -> A` adds nothing to the language
            if alpha.right.len() == 1 {
                continue;
            }
            let mut right = alpha.right[1..].to_vec();
            right.push(prime.clone());
            self.add_production(prime.as_str(), right);
        }
        self.add_production(prime.as_str(), vec![config.epsilon.clone()]);

        self.non_terms.push(prime);
        self.dedup_productions();
        Ok(())
    }

    /// Direct elimination for every non-terminal currently in the grammar.
    pub fn remove_left_recursion_direct(&mut self, config: &Config) -> Result<()> {
        for symbol in self.non_terms.clone() {
            self.remove_left_recursion_direct_symbol(&symbol, config)?;
        }
        Ok(())
    }

    /// Eliminates left recursion, direct and indirect, among the non-terminals
    /// of `order`, processing them in that order.
    ///
    /// The grammar must be free of epsilon-productions and of unit cycles.
    pub fn remove_left_recursion_indirect(
        &mut self,
        order: &[String],
        config: &Config,
    ) -> Result<()> {
        if self.has_epsilon_productions(config) {
            return Err(PreconditionError::EpsilonProductions.into());
        }
        if self.has_cycles() {
            return Err(PreconditionError::Cycles.into());
        }
        for symbol in order {
            self.ensure_non_terminal(symbol)?;
        }

        for (i, a_i) in order.iter().enumerate() {
            if i == 0 {
                self.remove_left_recursion_direct_symbol(a_i, config)?;
            }

            for a_j in &order[..i] {
                let gammas = self.pop_left_right_productions(a_i, a_j)?;
                if gammas.is_empty() {
                    continue;
                }
                let deltas = self.symbol_rights(a_j)?;
                tracing::debug!(
                    left = %a_i,
                    substituted = %a_j,
                    count = gammas.len() * deltas.len(),
                    "substituting leading non-terminal"
                );
                for gamma in &gammas {
                    for delta in &deltas {
                        self.add_production(a_i.as_str(), splice(delta, &gamma.right[1..], config));
                    }
                }
            }

            self.remove_left_recursion_direct_symbol(a_i, config)?;
        }

        self.dedup_productions();
        Ok(())
    }

    /// Indirect elimination over the non-terminals in declaration order.
    pub fn remove_left_recursion(&mut self, config: &Config) -> Result<()> {
        let order = self.non_terms.clone();
        self.remove_left_recursion_indirect(&order, config)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        error::{Error, GrammarError, PreconditionError},
        grammar::grammar::Production,
        Grammar,
    };

    fn p(left: &str, right: &str) -> Production {
        Production::new(left, right.split_whitespace().map(String::from).collect())
    }

    fn course_example(config: &Config) -> Grammar {
        Grammar::parse("S -> S X | S S b | X S | a\nX -> X b | S a | b", config).unwrap()
    }

    #[test]
    fn direct_simple() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> S a | b", &config).unwrap();
        g.remove_left_recursion_direct_symbol("S", &config).unwrap();

        assert_eq!(g.non_terms, vec!["S", "S'"]);
        assert_eq!(
            g.productions,
            vec![p("S", "b S'"), p("S'", "a S'"), p("S'", "ε")]
        );
        assert!(!g.has_left_recursion_direct_symbol("S"));
    }

    #[test]
    fn direct_drops_duplicate_alternatives() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> S a | S a | b | b", &config).unwrap();
        g.remove_left_recursion_direct_symbol("S", &config).unwrap();

        assert_eq!(
            g.productions,
            vec![p("S", "b S'"), p("S'", "a S'"), p("S'", "ε")]
        );
    }

    #[test]
    fn direct_leaves_other_symbols_alone() {
        let config = Config::default();
        let mut g = course_example(&config);
        g.remove_left_recursion_direct_symbol("S", &config).unwrap();

        assert_eq!(g.terms, vec!["b", "a"]);
        assert_eq!(g.non_terms, vec!["S", "X", "S'"]);
        assert_eq!(g.start_symbol.as_deref(), Some("S"));
        assert_eq!(
            g.productions,
            vec![
                p("X", "X b"),
                p("X", "S a"),
                p("X", "b"),
                p("S", "X S S'"),
                p("S", "a S'"),
                p("S'", "X S'"),
                p("S'", "S b S'"),
                p("S'", "ε"),
            ]
        );
    }

    #[test]
    fn direct_without_recursion_is_a_no_op() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> a S | b", &config).unwrap();
        let before = g.clone();
        g.remove_left_recursion_direct_symbol("S", &config).unwrap();

        assert_eq!(g, before);
    }

    #[test]
    fn direct_rejects_terminal() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> S a | b", &config).unwrap();
        let err = g.remove_left_recursion_direct_symbol("a", &config).unwrap_err();

        assert!(matches!(
            err,
            Error::Grammar(GrammarError::NotNonTerminal(s)) if s == "a"
        ));
    }

    #[test]
    fn direct_all_symbols() {
        let config = Config::default();
        let mut g = Grammar::parse("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id", &config)
            .unwrap();
        g.remove_left_recursion_direct(&config).unwrap();

        assert!(!g.has_left_recursion_direct());
        assert_eq!(g.non_terms, vec!["E", "T", "F", "E'", "T'"]);
        assert_eq!(g.symbol_rights("E'").unwrap().len(), 2);
    }

    #[test]
    fn indirect() {
        let config = Config::default();
        let mut g = course_example(&config);
        g.remove_left_recursion(&config).unwrap();

        assert_eq!(g.non_terms, vec!["S", "X", "S'", "X'"]);
        assert_eq!(g.start_symbol.as_deref(), Some("S"));
        assert_eq!(
            g.productions,
            vec![
                p("S", "X S S'"),
                p("S", "a S'"),
                p("S'", "X S'"),
                p("S'", "S b S'"),
                p("S'", "ε"),
                p("X", "b X'"),
                p("X", "a S' a X'"),
                p("X'", "b X'"),
                p("X'", "S S' a X'"),
                p("X'", "ε"),
            ]
        );
        for symbol in ["S", "X"] {
            assert!(!g.has_left_recursion_direct_symbol(symbol));
        }
    }

    #[test]
    fn indirect_through_chain() {
        let config = Config::default();
        let mut g = Grammar::parse("A -> B a | c\nB -> A b | d", &config).unwrap();
        g.remove_left_recursion(&config).unwrap();

        assert_eq!(
            g.productions,
            vec![
                p("A", "B a"),
                p("A", "c"),
                p("B", "d B'"),
                p("B", "c b B'"),
                p("B'", "a b B'"),
                p("B'", "ε"),
            ]
        );
    }

    #[test]
    fn indirect_respects_order() {
        let config = Config::default();
        let mut g = Grammar::parse("A -> B a | c\nB -> A b | d", &config).unwrap();
        let order = vec!["B".to_string(), "A".to_string()];
        g.remove_left_recursion_indirect(&order, &config).unwrap();

        assert_eq!(
            g.productions,
            vec![
                p("B", "A b"),
                p("B", "d"),
                p("A", "c A'"),
                p("A", "d a A'"),
                p("A'", "b a A'"),
                p("A'", "ε"),
            ]
        );
    }

    #[test]
    fn indirect_requires_epsilon_free_grammar() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> S a | ε", &config).unwrap();
        let err = g.remove_left_recursion(&config).unwrap_err();

        assert!(matches!(
            err,
            Error::Precondition(PreconditionError::EpsilonProductions)
        ));
    }

    #[test]
    fn indirect_requires_cycle_free_grammar() {
        let config = Config::default();
        let mut g = Grammar::parse("S -> A | a\nA -> S | b", &config).unwrap();
        let err = g.remove_left_recursion(&config).unwrap_err();

        assert!(matches!(err, Error::Precondition(PreconditionError::Cycles)));
    }
}
