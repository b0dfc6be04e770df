use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use grammar_rewriter::{Config, Grammar, Result, Transformation};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

/// Rewrite a context-free grammar for top-down parsing
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Grammar file (default: read from stdin)
    file: Option<PathBuf>,

    /// Transformation to apply, repeatable: eps, direct:SYMBOL, lr, lr:A,B,..., lf
    #[arg(short, long = "action", value_name = "ACTION")]
    actions: Vec<Transformation>,

    /// Read `A -> x y | z` productions instead of JSON
    #[arg(short, long)]
    text: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Print the input grammar before transforming it
    #[arg(short, long)]
    input: bool,

    /// JSON file overriding the epsilon symbol, epsilon token and prime marker
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn print_grammar(g: &Grammar, config: &Config, format: OutputFormat, header: &str) {
    match format {
        OutputFormat::Plain => {
            println!("{}", header);
            println!("{}", g.to_info_output().to_plaintext());
            println!("{}\n", g.to_production_output_vec(config).to_plaintext());
        }
        OutputFormat::Latex => println!("{}", g.to_production_output_vec(config).to_latex()),
        OutputFormat::Json => println!("{}", g.to_info_output().to_json()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let source = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    let mut g = if cli.text {
        Grammar::parse(&source, &config)?
    } else {
        Grammar::from_json(&source, &config)?
    };
    tracing::info!(
        productions = g.productions.len(),
        non_terms = g.non_terms.len(),
        "grammar loaded"
    );

    if cli.input {
        print_grammar(&g, &config, cli.format, "INPUT");
    }

    g.apply_all(&cli.actions, &config)?;

    print_grammar(&g, &config, cli.format, "OUTPUT");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!(error = %e, "transformation failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
