// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cluster-dsp
//!
//! Command-line interface for the cluster-dsp kernel library.
//!
//! ## Usage
//! ```bash
//! # Show the detected core class and worker count
//! cluster-dsp status
//!
//! # Cross-check scalar and vectorized variants on every operation
//! cluster-dsp verify --iterations 200
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cluster-dsp",
    about = "Fixed-point linear-algebra kernels for multi-core compute clusters",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the detected core class and worker-team configuration.
    Status,

    /// Verify that scalar and vectorized kernel variants are bit-exact,
    /// and that parallel forms match serial results.
    Verify {
        /// Number of randomised shapes to check per operation.
        #[arg(long, default_value_t = 100)]
        iterations: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = match cli.config {
        Some(path) => cluster_kernels::ClusterConfig::from_file(&path)?,
        None => cluster_kernels::ClusterConfig::default(),
    };

    match cli.command {
        Commands::Status => commands::status::execute(&config),
        Commands::Verify { iterations } => commands::verify::execute(&config, iterations),
    }
}
