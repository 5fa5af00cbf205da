// transnet-dump: Build a transition network from paths and print its dump.
//
// Reads one path per line from INPUT (or stdin) and writes the text dump:
// the label header, then one line per state with its outgoing transitions.
//
// Usage:
//   transnet-dump [OPTIONS] [INPUT]
//
// Options:
//   --max-states N          State capacity (env TRANSNET_MAX_STATES)
//   --max-transitions N     Label capacity (env TRANSNET_MAX_TRANSITIONS)
//   --on-conflict POLICY    overwrite | reject
//   -s, --separator SEP     Label separator (default: whitespace)
//   --leaf-counts           Append the leaf count of every state

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use transnet_cli::NetworkArgs;

#[derive(Debug, Parser)]
#[command(
    name = "transnet-dump",
    version,
    about = "Print the text dump of a transition network built from paths"
)]
struct Cli {
    #[command(flatten)]
    network: NetworkArgs,

    /// Append the number of terminal edges beneath each state.
    #[arg(long)]
    leaf_counts: bool,
}

fn main() -> Result<()> {
    transnet_cli::init_tracing();
    let cli = Cli::parse();

    let network = transnet_cli::load_network(&cli.network)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write!(out, "{network}")?;

    if cli.leaf_counts {
        writeln!(out)?;
        for state in network.states() {
            writeln!(out, "{state}\t{}", network.count_sub_states(state)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
