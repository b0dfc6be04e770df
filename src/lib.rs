extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
mod grammar;

pub use config::Config;
pub use error::{Error, FormatError, GrammarError, PreconditionError, Result};
pub use grammar::pretty_print::{GrammarOutput, ProductionOutputVec};
pub use grammar::{Grammar, Production, Transformation};

/// Loads a JSON grammar, applies the whitespace separated transformations
/// in `actions` and returns the resulting grammar as JSON.
#[wasm_bindgen]
pub fn transform_to_json(grammar: &str, actions: &str) -> String {
    let config = Config::default();
    let result = Grammar::from_json(grammar, &config).and_then(|mut g| {
        for action in actions.split_whitespace() {
            g.apply(&action.parse()?, &config)?;
        }
        Ok(g.to_info_output().to_json())
    });
    match result {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}
