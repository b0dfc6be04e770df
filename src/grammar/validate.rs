use crate::error::GrammarError;

use super::Grammar;

impl Grammar {
    /// Checks the structural invariants every engine relies on.
    pub fn check_grammar(&self) -> Result<(), GrammarError> {
        let start_symbol = match &self.start_symbol {
            Some(start)
                if !self.terms.is_empty()
                    && !self.non_terms.is_empty()
                    && !self.productions.is_empty() =>
            {
                start
            }
            _ => return Err(GrammarError::Empty),
        };

        if !self.is_non_terminal(start_symbol) {
            return Err(GrammarError::StartSymbolNotNonTerminal(
                start_symbol.clone(),
            ));
        }

        if let Some(symbol) = self.terms.iter().find(|t| self.is_non_terminal(t)) {
            return Err(GrammarError::NotDisjoint(symbol.clone()));
        }

        for production in &self.productions {
            if production.left.split_whitespace().count() != 1 {
                return Err(GrammarError::NotContextFree(production.left.clone()));
            }
            if !self.is_non_terminal(&production.left) {
                return Err(GrammarError::UnknownLeftSide(production.left.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, error::GrammarError, Grammar};

    fn valid() -> Grammar {
        Grammar::parse("S -> a S | b", &Config::default()).unwrap()
    }

    #[test]
    fn accepts_valid_grammar() {
        assert_eq!(valid().check_grammar(), Ok(()));
    }

    #[test]
    fn rejects_empty_parts() {
        let mut g = valid();
        g.terms.clear();
        assert_eq!(g.check_grammar(), Err(GrammarError::Empty));

        let mut g = valid();
        g.productions.clear();
        assert_eq!(g.check_grammar(), Err(GrammarError::Empty));

        let mut g = valid();
        g.start_symbol = None;
        assert_eq!(g.check_grammar(), Err(GrammarError::Empty));

        assert_eq!(Grammar::new().check_grammar(), Err(GrammarError::Empty));
    }

    #[test]
    fn rejects_start_symbol_outside_non_terminals() {
        let mut g = valid();
        g.start_symbol = Some("a".to_string());
        assert_eq!(
            g.check_grammar(),
            Err(GrammarError::StartSymbolNotNonTerminal("a".to_string()))
        );
    }

    #[test]
    fn rejects_overlapping_symbol_sets() {
        let mut g = valid();
        g.terms.push("S".to_string());
        assert_eq!(
            g.check_grammar(),
            Err(GrammarError::NotDisjoint("S".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_left_side() {
        let mut g = valid();
        g.add_production("A", vec!["a".to_string()]);
        assert_eq!(
            g.check_grammar(),
            Err(GrammarError::UnknownLeftSide("A".to_string()))
        );
    }

    #[test]
    fn rejects_sequence_on_left_side() {
        let mut g = valid();
        g.add_production("a S", vec!["b".to_string()]);
        assert_eq!(
            g.check_grammar(),
            Err(GrammarError::NotContextFree("a S".to_string()))
        );
    }
}
