use std::{fmt, str::FromStr};

use super::Grammar;
use crate::{
    config::Config,
    error::{Error, Result},
};

/// A rewrite that can be named on the command line or in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    EliminateEpsilon,
    EliminateDirectLeftRecursion(String),
    /// Indirect elimination, over the given order or the declared one.
    EliminateLeftRecursion(Option<Vec<String>>),
    LeftFactoring,
}

impl FromStr for Transformation {
    type Err = Error;

    /// `eps`, `direct:A`, `lr`, `lr:A,B,...` or `lf`.
    fn from_str(s: &str) -> Result<Self> {
        let (name, argument) = match s.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s, None),
        };
        match (name, argument) {
            ("eps", None) => Ok(Self::EliminateEpsilon),
            ("direct", Some(symbol)) if !symbol.is_empty() => {
                Ok(Self::EliminateDirectLeftRecursion(symbol.to_string()))
            }
            ("lr", None) => Ok(Self::EliminateLeftRecursion(None)),
            ("lr", Some(order)) if !order.is_empty() => Ok(Self::EliminateLeftRecursion(Some(
                order.split(',').map(|s| s.trim().to_string()).collect(),
            ))),
            ("lf", None) => Ok(Self::LeftFactoring),
            _ => Err(Error::UnknownTransformation(s.to_string())),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EliminateEpsilon => write!(f, "eps"),
            Self::EliminateDirectLeftRecursion(symbol) => write!(f, "direct:{}", symbol),
            Self::EliminateLeftRecursion(None) => write!(f, "lr"),
            Self::EliminateLeftRecursion(Some(order)) => write!(f, "lr:{}", order.join(",")),
            Self::LeftFactoring => write!(f, "lf"),
        }
    }
}

impl Grammar {
    pub fn apply(&mut self, transformation: &Transformation, config: &Config) -> Result<()> {
        tracing::info!(%transformation, "applying transformation");
        match transformation {
            Transformation::EliminateEpsilon => self.remove_epsilon_productions(config),
            Transformation::EliminateDirectLeftRecursion(symbol) => {
                self.remove_left_recursion_direct_symbol(symbol, config)
            }
            Transformation::EliminateLeftRecursion(None) => self.remove_left_recursion(config),
            Transformation::EliminateLeftRecursion(Some(order)) => {
                self.remove_left_recursion_indirect(order, config)
            }
            Transformation::LeftFactoring => self.left_factoring(config),
        }
    }

    pub fn apply_all<'a>(
        &mut self,
        transformations: impl IntoIterator<Item = &'a Transformation>,
        config: &Config,
    ) -> Result<()> {
        for transformation in transformations {
            self.apply(transformation, config)?;
        }
        Ok(())
    }
}
