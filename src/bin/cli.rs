// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Trix CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trix::cli::{exit_code, NormalStep, Reporter, Runner};
use trix::{DecodePolicy, Destination, Source, StlMode, TrixConfig};

#[derive(Parser)]
#[command(name = "trix")]
#[command(about = "Inspect and rewrite STL triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keep the faces read before a truncated or malformed facet
    #[arg(long, global = true)]
    lenient: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of faces in each STL file
    Facecount {
        /// STL files
        #[arg(required = true)]
        files: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute facet normals and write ASCII STL
    Renormal {
        /// Input STL file (stdin when omitted or "-")
        input: Option<String>,

        /// Output file (stdout when omitted or "-")
        #[arg(short, long)]
        output: Option<String>,

        /// Spread the computation over all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Reset facet normals to 0 0 0 and write ASCII STL
    Zeronormals {
        /// Input STL file (stdin when omitted or "-")
        input: Option<String>,

        /// Output file (stdout when omitted or "-")
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Re-encode an STL file
    Convert {
        /// Input STL file (stdin when omitted or "-")
        input: Option<String>,

        /// Output file (stdout when omitted or "-")
        #[arg(short, long)]
        output: Option<String>,

        /// Output framing (ascii, binary); defaults to the configured mode
        #[arg(short, long)]
        format: Option<StlMode>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(&cli) {
        Reporter::report_error(&format!("{:#}", error));
        std::process::exit(exit_code(&error));
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "trix=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<TrixConfig> {
    let mut config = match &cli.config {
        Some(path) => TrixConfig::from_file(path)?,
        None => TrixConfig::default(),
    };
    if cli.lenient {
        config.read.policy = DecodePolicy::Lenient;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if cli.verbose && config.read.policy == DecodePolicy::Lenient {
        Reporter::report_warning("lenient decoding: truncated input is accepted");
    }
    let runner = Runner::with_options(config.read);

    match &cli.command {
        Commands::Facecount { files, json } => {
            let entries = runner.facecount_all(files);
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                entries.iter().for_each(Reporter::report_facecount);
            }
        }
        Commands::Renormal {
            input,
            output,
            parallel,
        } => {
            let step = if *parallel {
                NormalStep::RecalculateParallel
            } else {
                NormalStep::Recalculate
            };
            let result = runner.run(
                &Source::from_arg(input.as_deref()),
                &Destination::from_arg(output.as_deref()),
                step,
                StlMode::Ascii,
            )?;
            if cli.verbose {
                Reporter::report_run("renormal", &result);
            }
        }
        Commands::Zeronormals { input, output } => {
            let result = runner.run(
                &Source::from_arg(input.as_deref()),
                &Destination::from_arg(output.as_deref()),
                NormalStep::Reset,
                StlMode::Ascii,
            )?;
            if cli.verbose {
                Reporter::report_run("zeronormals", &result);
            }
        }
        Commands::Convert {
            input,
            output,
            format,
        } => {
            let mode = format.unwrap_or(config.write.mode);
            let result = runner.run(
                &Source::from_arg(input.as_deref()),
                &Destination::from_arg(output.as_deref()),
                NormalStep::Keep,
                mode,
            )?;
            if cli.verbose {
                Reporter::report_run(&format!("convert ({})", mode), &result);
            }
        }
        Commands::Version => {
            println!("trix v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
