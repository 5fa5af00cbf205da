// transnet-cli: shared utilities for CLI tools.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use transnet::config::{DEFAULT_MAX_STATES, DEFAULT_MAX_TRANSITIONS};
use transnet::{ConflictPolicy, NetworkConfig, NetworkError, StateId, TransitionNetwork};

/// Options shared by every tool that builds a network from a path list.
#[derive(Debug, Clone, Args)]
pub struct NetworkArgs {
    /// File with one path per line. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Highest state id that may be allocated.
    #[arg(long, env = "TRANSNET_MAX_STATES", default_value_t = DEFAULT_MAX_STATES)]
    pub max_states: usize,

    /// Maximum number of distinct labels.
    #[arg(long, env = "TRANSNET_MAX_TRANSITIONS", default_value_t = DEFAULT_MAX_TRANSITIONS)]
    pub max_transitions: usize,

    /// What to do when a path would flip a terminal edge into a continuation
    /// or back.
    #[arg(long, value_enum, default_value_t = PolicyArg::Overwrite)]
    pub on_conflict: PolicyArg,

    /// Label separator within a line. Labels are whitespace separated when omitted.
    #[arg(long, short = 's')]
    pub separator: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Replace the existing edge.
    Overwrite,
    /// Skip the conflicting path with a warning.
    Reject,
}

impl From<PolicyArg> for ConflictPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Overwrite => ConflictPolicy::Overwrite,
            PolicyArg::Reject => ConflictPolicy::Reject,
        }
    }
}

impl NetworkArgs {
    pub fn config(&self) -> NetworkConfig {
        NetworkConfig::new(self.max_states, self.max_transitions)
            .with_conflict_policy(self.on_conflict.into())
    }
}

/// One non-blank input line split into labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub labels: Vec<String>,
}

/// Split one input line into labels.
///
/// Without a separator, labels are separated by runs of whitespace. With a
/// separator, each piece is trimmed and empty pieces are dropped.
pub fn split_path<'a>(line: &'a str, separator: Option<&str>) -> Vec<&'a str> {
    match separator {
        Some(sep) => line
            .split(sep)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect(),
        None => line.split_whitespace().collect(),
    }
}

/// Read one path per line, skipping blank lines.
pub fn read_paths<R: BufRead>(reader: R, separator: Option<&str>) -> Result<Vec<PathLine>> {
    let mut paths = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", i + 1))?;
        let labels = split_path(&line, separator);
        if labels.is_empty() {
            continue;
        }
        paths.push(PathLine {
            line: i + 1,
            labels: labels.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(paths)
}

/// Open `path` for reading, or stdin for `None` and `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file =
                File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Insert every path into a fresh network.
///
/// Conflicts rejected by [`ConflictPolicy::Reject`] are logged and skipped;
/// any other error aborts with the offending line number.
pub fn build_network(paths: &[PathLine], config: NetworkConfig) -> Result<TransitionNetwork> {
    let mut network = TransitionNetwork::with_config(config)?;
    let mut skipped = 0usize;
    for path in paths {
        match network.add_path(&path.labels) {
            Ok(()) => {}
            Err(e @ NetworkError::ConflictingTransition { .. }) => {
                warn!(line = path.line, "skipping path: {e}");
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("line {}", path.line));
            }
        }
    }
    info!(
        paths = paths.len(),
        skipped,
        states = network.state_count(),
        labels = network.label_count(),
        "network built"
    );
    Ok(network)
}

/// Read paths as configured by `args` and build the network.
pub fn load_network(args: &NetworkArgs) -> Result<TransitionNetwork> {
    let reader = open_input(args.input.as_deref())?;
    let paths = read_paths(reader, args.separator.as_deref())?;
    if paths.is_empty() {
        bail!("no paths in input");
    }
    build_network(&paths, args.config())
}

/// Parse state ids given on the command line; all states when `ids` is empty.
pub fn select_states(network: &TransitionNetwork, ids: &[u32]) -> Result<Vec<StateId>> {
    if ids.is_empty() {
        return Ok(network.states().collect());
    }
    ids.iter()
        .map(|&id| {
            let state = StateId::new(id);
            if network.state_exists(state.into()) {
                Ok(state)
            } else {
                bail!("state {id} does not exist (highest is {})", network.state_count())
            }
        })
        .collect()
}

/// Write a labelled distance matrix: a header row of state names, then one
/// row per state.
pub fn write_matrix<W: Write>(
    out: &mut W,
    states: &[StateId],
    matrix: &[Vec<f64>],
    delimiter: &str,
    precision: usize,
) -> io::Result<()> {
    for state in states {
        write!(out, "{delimiter}{state}")?;
    }
    writeln!(out)?;
    for (state, row) in states.iter().zip(matrix) {
        write!(out, "{state}")?;
        for value in row {
            write!(out, "{delimiter}{value:.precision$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
