//! Wavebench command-line interface.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wavebench_core::AliasConfig;

#[derive(Parser)]
#[command(name = "wavebench")]
#[command(about = "Subcircuit scanning, testbench generation and waveform extraction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON alias hints, merged ahead of SUPPLY_ALIASES_JSON
    #[arg(long, global = true, value_name = "FILE")]
    hints: Option<PathBuf>,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the subcircuits of a netlist and their pins
    Scan {
        /// Netlist file
        netlist: PathBuf,

        /// Include parameter names
        #[arg(long)]
        params: bool,
    },

    /// Infer supply, input and output pins of a subcircuit
    Roles {
        /// Netlist file
        netlist: PathBuf,

        /// Subcircuit name (defaults to the first one)
        #[arg(short, long)]
        subckt: Option<String>,
    },

    /// Generate a testbench from a JSON simulation request
    Testbench {
        /// Request file
        request: PathBuf,

        /// Path the simulator should write its results to
        #[arg(short, long, default_value = "sim.txt")]
        results: PathBuf,
    },

    /// Embed a netlist in a placeholder testbench template
    Template {
        /// Netlist file
        netlist: PathBuf,
    },

    /// Fill the placeholders of a testbench template
    Render {
        /// Template file
        template: PathBuf,

        /// JSON simulation parameters
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Driven and loaded nodes
        #[arg(short, long, value_delimiter = ',', default_value = "a,y")]
        nodes: Vec<String>,

        /// JSON with SUBCKT_NAME and PIN_LIST overrides
        #[arg(long)]
        vars: Option<PathBuf>,

        /// Path the simulator should write its results to
        #[arg(short, long, default_value = "sim.txt")]
        results: PathBuf,
    },

    /// Extract waveforms from wrdata output
    Extract {
        /// Results file
        results: PathBuf,

        /// Column labels in output order, e.g. v(a),v(y)
        #[arg(short, long, value_delimiter = ',', required_unless_present = "legacy")]
        labels: Vec<String>,

        /// Header-aware extraction of v(a) and v(y)
        #[arg(long)]
        legacy: bool,
    },

    /// List warnings from the tail of a simulator log
    Warnings {
        /// Log file
        log: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();

    let config = AliasConfig::from_env();
    let hints = commands::read_hints(cli.hints.as_deref())?;
    let aliases = config.merged(hints.as_ref());

    let text = match &cli.command {
        Command::Scan { netlist, params } => commands::scan(netlist, &aliases, *params)?,
        Command::Roles { netlist, subckt } => {
            commands::roles(netlist, subckt.as_deref(), &aliases)?
        }
        Command::Testbench { request, results } => {
            commands::testbench(request, results, &config, hints.as_ref())?
        }
        Command::Template { netlist } => commands::template(netlist)?,
        Command::Render {
            template,
            params,
            nodes,
            vars,
            results,
        } => commands::render(template, params.as_deref(), nodes, vars.as_deref(), results)?,
        Command::Extract {
            results,
            labels,
            legacy,
        } => commands::extract(results, labels, *legacy)?,
        Command::Warnings { log } => commands::warnings(log)?,
    };

    commands::emit(&text, cli.output.as_deref())
}
