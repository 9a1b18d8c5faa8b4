// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cluster-dsp status` command: display the execution environment as the
//! kernel dispatcher sees it.

use cluster_kernels::{ClusterConfig, CoreClass};

pub fn execute(config: &ClusterConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            cluster-dsp · Execution Environment       ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let detected = CoreClass::current();
    let effective = config.resolve_core_class()?;
    let workers = config.resolve_workers();

    println!("  Core class");
    println!("   Detected:     {detected}");
    if effective != detected {
        println!("   Override:     {effective} (from configuration)");
    }
    println!(
        "   Kernel path:  {}",
        if effective.is_vector_capable() {
            "vectorized (wide datapath)"
        } else {
            "scalar (control core)"
        }
    );
    println!();

    println!("  Worker team");
    println!("   Workers:      {workers}");
    for core_id in 0..workers.min(8) {
        let share = work_partition::share_len(1000, workers, core_id);
        println!("   pe-{core_id}:         {share} / 1000 units");
    }
    if workers > 8 {
        println!("   … ({} more workers)", workers - 8);
    }
    println!();

    Ok(())
}
