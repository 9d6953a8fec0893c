//! # Validate Subcommand
//!
//! Loads each referenced definition and reports every structural problem
//! found by the validator. A definition that cannot be loaded counts as a
//! failure and the remaining ones are still checked.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use dfa_core::{diagnose, Diagnostic, Dfa};

use crate::config::{CliConfig, OutputFormat};
use crate::{load_definition, DefinitionSource};

/// Arguments for the `dfa validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Definition files or `store:<key>` references.
    #[arg(value_name = "DEFINITION", required = true)]
    pub definitions: Vec<String>,

    /// User for `store:` references.
    #[arg(long)]
    pub user: Option<String>,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Validation outcome for one definition.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// The reference as given on the command line.
    pub source: String,
    /// Whether the definition loaded and has no diagnostics.
    pub valid: bool,
    /// Structural problems, in validator order.
    pub diagnostics: Vec<ReportedDiagnostic>,
    /// Why the definition could not be loaded, if it could not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A diagnostic with its rendered message.
#[derive(Debug, Serialize)]
pub struct ReportedDiagnostic {
    /// The typed diagnostic, flattened with its `kind` tag.
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
    /// Human-readable message.
    pub message: String,
}

/// Report the structural problems of an already loaded definition.
pub fn report_for(source: &str, dfa: &Dfa) -> ValidationReport {
    let diagnostics: Vec<ReportedDiagnostic> = diagnose(dfa)
        .into_iter()
        .map(|diagnostic| ReportedDiagnostic {
            message: diagnostic.to_string(),
            diagnostic,
        })
        .collect();
    ValidationReport {
        source: source.to_string(),
        valid: diagnostics.is_empty(),
        diagnostics,
        error: None,
    }
}

/// Validate one reference without failing the whole run.
pub fn check_definition(reference: &str, user: Option<&str>, config: &CliConfig) -> ValidationReport {
    let loaded = DefinitionSource::parse(reference)
        .and_then(|source| load_definition(&source, user, config));

    match loaded {
        Ok(dfa) => report_for(reference, &dfa),
        Err(e) => {
            tracing::warn!(source = reference, error = %e, "could not load definition");
            ValidationReport {
                source: reference.to_string(),
                valid: false,
                diagnostics: Vec::new(),
                error: Some(format!("{e:#}")),
            }
        }
    }
}

/// Output for a definition that `--strict` refuses, or `None` if it is valid.
///
/// JSON mode renders the single report as a JSON document.
pub fn strict_refusal(source: &str, dfa: &Dfa, json: bool) -> Result<Option<String>> {
    let report = report_for(source, dfa);
    if report.valid {
        return Ok(None);
    }
    tracing::info!(source, problems = report.diagnostics.len(), "refusing invalid definition");
    if json {
        Ok(Some(format!("{}\n", serde_json::to_string_pretty(&report)?)))
    } else {
        Ok(Some(render_text(&report)))
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every definition is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let reports: Vec<ValidationReport> = args
        .definitions
        .iter()
        .map(|reference| check_definition(reference, args.user.as_deref(), config))
        .collect();

    let failed = reports.iter().filter(|r| !r.valid).count();
    tracing::info!(total = reports.len(), failed, "validation finished");

    if args.json || config.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", render_text(report));
        }
        if reports.len() > 1 {
            println!(
                "\nDefinitions: {}/{} valid",
                reports.len() - failed,
                reports.len()
            );
        }
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Text rendering of one report, newline-terminated.
pub fn render_text(report: &ValidationReport) -> String {
    if let Some(ref error) = report.error {
        return format!("ERROR: {}: {}\n", report.source, error);
    }
    if report.valid {
        return format!("OK: {}\n", report.source);
    }
    let mut out = format!("FAIL: {}\n", report.source);
    for d in &report.diagnostics {
        out.push_str("  - ");
        out.push_str(&d.message);
        out.push('\n');
    }
    out
}
