//! # Simulate Subcommand
//!
//! Runs an input sequence through a definition and prints the final state
//! and verdict. Symbols come either as trailing arguments or as one
//! `--input` string split on the configured separator.
//!
//! Without `--strict` malformed definitions are simulated best-effort: the
//! resolver breaks ties and a missing transition rejects.

use anyhow::Result;
use clap::Args;

use dfa_core::{trace, SimulationTrace};

use crate::config::{CliConfig, OutputFormat};
use crate::validate::strict_refusal;
use crate::{load_definition, DefinitionSource};

/// Arguments for the `dfa simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Definition file or `store:<key>` reference.
    #[arg(value_name = "DEFINITION")]
    pub definition: String,

    /// Input symbols, in order.
    #[arg(value_name = "SYMBOL", conflicts_with = "input")]
    pub symbols: Vec<String>,

    /// Input as one string, split on the separator.
    #[arg(long, short)]
    pub input: Option<String>,

    /// Separator for `--input` (overrides configuration).
    #[arg(long)]
    pub separator: Option<String>,

    /// Print every applied transition and the halt point.
    #[arg(long)]
    pub trace: bool,

    /// Refuse to simulate a definition with structural problems.
    #[arg(long)]
    pub strict: bool,

    /// User for `store:` references.
    #[arg(long)]
    pub user: Option<String>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Split `--input` on `separator`, trimming each symbol.
///
/// An empty or all-whitespace string is the empty input.
pub fn split_input(raw: &str, separator: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(separator).map(|s| s.trim().to_string()).collect()
}

/// Collect the input symbols from the arguments.
pub fn input_symbols(args: &SimulateArgs, config: &CliConfig) -> Vec<String> {
    match args.input {
        Some(ref raw) => {
            let separator = args
                .separator
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(&config.input_separator);
            split_input(raw, separator)
        }
        None => args.symbols.clone(),
    }
}

/// Execute the simulate subcommand.
///
/// Returns exit code: 0 if the input is accepted, 1 if it is rejected or
/// `--strict` found structural problems.
pub fn run_simulate(args: &SimulateArgs, config: &CliConfig) -> Result<u8> {
    let source = DefinitionSource::parse(&args.definition)?;
    let dfa = load_definition(&source, args.user.as_deref(), config)?;

    let json = args.json || config.output == OutputFormat::Json;
    if args.strict {
        if let Some(refusal) = strict_refusal(&source.to_string(), &dfa, json)? {
            print!("{refusal}");
            return Ok(1);
        }
    }

    let input = input_symbols(args, config);
    tracing::debug!(source = %source, symbols = input.len(), "simulating");
    let outcome = trace(&dfa, &input);

    if json {
        if args.trace {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        }
    } else {
        print!("{}", render_text(&outcome, args.trace));
    }

    Ok(if outcome.result.accepted { 0 } else { 1 })
}

/// Text rendering of a run, newline-terminated.
pub fn render_text(outcome: &SimulationTrace, with_steps: bool) -> String {
    let mut out = String::new();
    if with_steps {
        for step in &outcome.steps {
            out.push_str(&format!(
                "  [{}] {} --{}--> {}\n",
                step.position, step.from, step.symbol, step.to
            ));
        }
        if let Some(ref halt) = outcome.halted {
            out.push_str(&format!(
                "  [{}] halted: no transition from \"{}\" on \"{}\"\n",
                halt.position, halt.state, halt.symbol
            ));
        }
    }
    out.push_str(&format!("final state: {}\n", outcome.result.final_state));
    out.push_str(if outcome.result.accepted {
        "result: ACCEPTED\n"
    } else {
        "result: REJECTED\n"
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfa_core::Dfa;

    fn args(definition: &str) -> SimulateArgs {
        SimulateArgs {
            definition: definition.to_string(),
            symbols: Vec::new(),
            input: None,
            separator: None,
            trace: false,
            strict: false,
            user: None,
            json: false,
        }
    }

    fn write_definition(dir: &std::path::Path, name: &str, dfa: &Dfa) -> String {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(dfa).unwrap()).unwrap();
        path.display().to_string()
    }

    fn ends_in_one() -> Dfa {
        Dfa::new("even")
            .with_states(["even", "odd"])
            .with_alphabet(["0", "1"])
            .with_transition("even", "0", "even")
            .with_transition("even", "1", "odd")
            .with_transition("odd", "0", "even")
            .with_transition("odd", "1", "odd")
            .with_final_states(["odd"])
    }

    #[test]
    fn split_input_trims_and_handles_empty() {
        assert_eq!(split_input("1, 0 ,1", ","), vec!["1", "0", "1"]);
        assert_eq!(split_input("a b", " "), vec!["a", "b"]);
        assert!(split_input("", ",").is_empty());
        assert!(split_input("   ", ",").is_empty());
    }

    #[test]
    fn input_flag_uses_configured_separator() {
        let config = CliConfig {
            input_separator: ";".into(),
            ..CliConfig::default()
        };
        let mut a = args("x.json");
        a.input = Some("1;0".into());
        assert_eq!(input_symbols(&a, &config), vec!["1", "0"]);

        a.separator = Some("|".into());
        a.input = Some("1|1".into());
        assert_eq!(input_symbols(&a, &config), vec!["1", "1"]);
    }

    #[test]
    fn positional_symbols_used_without_input_flag() {
        let mut a = args("x.json");
        a.symbols = vec!["1".into(), "0".into()];
        assert_eq!(input_symbols(&a, &CliConfig::default()), vec!["1", "0"]);
    }

    #[test]
    fn accepted_input_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&write_definition(dir.path(), "p.json", &ends_in_one()));
        a.symbols = vec!["1".into(), "0".into(), "1".into()];
        assert_eq!(run_simulate(&a, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn rejected_input_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&write_definition(dir.path(), "p.json", &ends_in_one()));
        a.input = Some("1,0".into());
        a.trace = true;
        assert_eq!(run_simulate(&a, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn strict_refuses_invalid_definition() {
        let dir = tempfile::tempdir().unwrap();
        let sparse = Dfa::new("s0")
            .with_states(["s0", "s1"])
            .with_alphabet(["a"])
            .with_transition("s0", "a", "s1")
            .with_final_states(["s1"]);
        let path = write_definition(dir.path(), "sparse.json", &sparse);

        let mut a = args(&path);
        a.symbols = vec!["a".into()];
        assert_eq!(run_simulate(&a, &CliConfig::default()).unwrap(), 0);

        a.strict = true;
        assert_eq!(run_simulate(&a, &CliConfig::default()).unwrap(), 1);

        a.json = true;
        assert_eq!(run_simulate(&a, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn missing_definition_is_operational_error() {
        assert!(run_simulate(&args("/nonexistent/x.json"), &CliConfig::default()).is_err());
    }

    #[test]
    fn text_rendering_with_halt() {
        let dfa = Dfa::new("s0")
            .with_states(["s0", "s1"])
            .with_alphabet(["a", "b"])
            .with_transition("s0", "a", "s1");
        let outcome = trace(&dfa, &["a", "b"]);

        assert_eq!(
            render_text(&outcome, true),
            "  [0] s0 --a--> s1\n  [1] halted: no transition from \"s1\" on \"b\"\nfinal state: s1\nresult: REJECTED\n"
        );
        assert_eq!(
            render_text(&outcome, false),
            "final state: s1\nresult: REJECTED\n"
        );
    }
}
