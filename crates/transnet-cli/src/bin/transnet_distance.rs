// transnet-distance: Pairwise structural distances between network states.
//
// Builds the network from INPUT (or stdin) and prints a distance matrix with
// one row and column per selected state. 0 means identical structure below
// both states, 1 means nothing in common.
//
// Usage:
//   transnet-distance [OPTIONS] [INPUT]
//
// Options:
//   --states 1,4,7          States to compare (default: all)
//   --delimiter STR         Column delimiter (default: tab)
//   --precision N           Digits after the decimal point (default: 4)
//   plus the network options of transnet-dump

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use transnet_cli::NetworkArgs;

#[derive(Debug, Parser)]
#[command(
    name = "transnet-distance",
    version,
    about = "Print pairwise structural distances between states of a transition network"
)]
struct Cli {
    #[command(flatten)]
    network: NetworkArgs,

    /// Comma-separated state ids to compare. All states when omitted.
    #[arg(long, value_delimiter = ',')]
    states: Vec<u32>,

    /// Column delimiter of the matrix.
    #[arg(long, default_value = "\t")]
    delimiter: String,

    /// Digits after the decimal point.
    #[arg(long, default_value_t = 4)]
    precision: usize,
}

fn main() -> Result<()> {
    transnet_cli::init_tracing();
    let cli = Cli::parse();

    let network = transnet_cli::load_network(&cli.network)?;
    let states = transnet_cli::select_states(&network, &cli.states)?;
    let matrix = network.distance_matrix(&states)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    transnet_cli::write_matrix(&mut out, &states, &matrix, &cli.delimiter, cli.precision)?;
    out.flush()?;
    Ok(())
}
