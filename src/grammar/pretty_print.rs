use crowbook_text_processing::escape;
use serde::Serialize;

use super::Grammar;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool, epsilon: &str) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|&s| {
                        if s == epsilon {
                            "\\epsilon".to_string()
                        } else {
                            escape::tex(s).to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
    epsilon: &'a str,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true, self.epsilon)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    /// Productions grouped by left side, in non-terminal order.
    pub fn to_production_output_vec<'a>(&'a self, config: &'a Config) -> ProductionOutputVec<'a> {
        let productions = self
            .non_terms
            .iter()
            .map(|non_terminal| ProductionOutput {
                left: non_terminal.as_str(),
                rights: self
                    .productions
                    .iter()
                    .filter(|p| &p.left == non_terminal)
                    .map(|p| p.right.iter().map(String::as_str).collect())
                    .collect(),
            })
            .filter(|p| !p.rights.is_empty())
            .collect();
        ProductionOutputVec {
            productions,
            epsilon: config.epsilon.as_str(),
        }
    }
}

/// A listing of the whole grammar, productions in their current order.
#[derive(Serialize)]
pub struct GrammarOutput<'a> {
    terms: Vec<&'a str>,
    non_terms: Vec<&'a str>,
    start_symbol: Option<&'a str>,
    production_count: usize,
    productions: Vec<String>,
}

impl GrammarOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        format!(
            "Terms: {}\nNon-terms: {}\nStart symbol: {}\nProductions ({}):\n{}",
            self.terms.join(" "),
            self.non_terms.join(" "),
            self.start_symbol.unwrap_or(""),
            self.production_count,
            self.productions
                .iter()
                .map(|p| format!("  {}", p))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Grammar {
    pub fn to_info_output(&self) -> GrammarOutput<'_> {
        GrammarOutput {
            terms: self.terms.iter().map(String::as_str).collect(),
            non_terms: self.non_terms.iter().map(String::as_str).collect(),
            start_symbol: self.start_symbol.as_deref(),
            production_count: self.productions.len(),
            productions: self
                .productions
                .iter()
                .map(|p| format!("{} -> {}", p.left, p.right.join(" ")))
                .collect(),
        }
    }
}
