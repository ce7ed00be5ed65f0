//! External analysis collaborators
//!
//! The anomaly check that looks for missing fields, duplicate line IDs and
//! other inconsistencies runs outside this crate. An [`Analyzer`] hands an
//! order to it and returns its issue list, or fails. Failures are never
//! fatal: the reconciler turns them into a well-formed result.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::entities::issue::AnalysisResult;
use crate::entities::order::Order;

/// Why the external analysis produced no result
#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalysisError {
    #[error("no external analyzer configured")]
    #[diagnostic(
        code(bomcheck::analysis::unconfigured),
        help("Pass --analysis <FILE> or --analyzer-cmd <PROGRAM>, or set `analyzer` in the config")
    )]
    NotConfigured,

    #[error("failed to run analyzer '{program}': {source}")]
    #[diagnostic(code(bomcheck::analysis::spawn))]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("analyzer '{program}' exited with {status}: {stderr}")]
    #[diagnostic(code(bomcheck::analysis::exit))]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("failed to read analysis from {path}: {source}")]
    #[diagnostic(code(bomcheck::analysis::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("analyzer returned invalid JSON: {0}")]
    #[diagnostic(code(bomcheck::analysis::json))]
    InvalidResponse(#[from] serde_json::Error),
}

/// Capability to analyse an order for anomalies
pub trait Analyzer {
    /// Short label used in logs and reports
    fn name(&self) -> &str;

    fn analyze(&self, order: &Order) -> Result<AnalysisResult, AnalysisError>;
}

/// Parse an analysis document
///
/// Model output is often wrapped in a markdown code fence; the fence is
/// stripped before parsing.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = text.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    };
    Ok(serde_json::from_str(body)?)
}

/// Analyzer used when nothing is configured; always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl Analyzer for Unconfigured {
    fn name(&self) -> &str {
        "none"
    }

    fn analyze(&self, _order: &Order) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::NotConfigured)
    }
}

/// Reads a pre-computed analysis document from disk
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    path: PathBuf,
}

impl FileAnalyzer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Analyzer for FileAnalyzer {
    fn name(&self) -> &str {
        "file"
    }

    fn analyze(&self, _order: &Order) -> Result<AnalysisResult, AnalysisError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| AnalysisError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_analysis(&content)
    }
}

/// Runs an external program
///
/// The order is written as JSON to the program's stdin; the program prints
/// an analysis document on stdout. A non-zero exit is a failure. Stdin is
/// fed from its own thread so a program that writes while still reading
/// cannot block on a full pipe.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Analyzer for CommandAnalyzer {
    fn name(&self) -> &str {
        &self.program
    }

    fn analyze(&self, order: &Order) -> Result<AnalysisResult, AnalysisError> {
        let spawn_err = |source| AnalysisError::Spawn {
            program: self.program.clone(),
            source,
        };

        let payload = serde_json::to_vec_pretty(order)?;

        debug!(program = %self.program, args = ?self.args, "running external analyzer");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        let feeder = child
            .stdin
            .take()
            .map(|mut stdin| std::thread::spawn(move || stdin.write_all(&payload)));

        let output = child.wait_with_output().map_err(spawn_err)?;

        if let Some(feeder) = feeder {
            match feeder.join() {
                // The program may exit without reading its input
                Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(spawn_err(e)),
                Ok(Ok(())) => {}
                Err(_) => {
                    return Err(spawn_err(std::io::Error::other(
                        "stdin writer thread panicked",
                    )))
                }
            }
        }
        if !output.status.success() {
            return Err(AnalysisError::Exit {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_analysis(&String::from_utf8_lossy(&output.stdout))
    }
}
