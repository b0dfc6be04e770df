use super::Grammar;
use crate::error::GrammarError;

impl Grammar {
    /// Non-terminals reachable from `symbol` through unit productions
    /// `A -> B`, not counting `symbol` itself.
    pub fn unit_closure(&self, symbol: &str) -> Result<Vec<String>, GrammarError> {
        self.ensure_non_terminal(symbol)?;

        let mut closure: Vec<String> = vec![symbol.to_string()];
        let mut changed = true;
        while changed {
            changed = false;
            for production in &self.productions {
                if production.right.len() != 1 || !closure.contains(&production.left) {
                    continue;
                }
                let target = &production.right[0];
                if self.is_non_terminal(target) && !closure.contains(target) {
                    closure.push(target.clone());
                    changed = true;
                }
            }
        }

        closure.remove(0);
        Ok(closure)
    }

    /// Whether some non-terminal reaches another one through unit
    /// productions alone.
    pub fn has_cycles(&self) -> bool {
        self.non_terms.iter().any(|symbol| {
            self.unit_closure(symbol)
                .map(|closure| !closure.is_empty())
                .unwrap_or(false)
        })
    }
}
