//! Info command implementation.

use crcfold_core::clmul::{Backend, FORCE_PORTABLE_ENV, force_portable};
use crcfold_core::dispatch::FOLD_THRESHOLD;
use crcfold_core::{Crc64, Crc64Dispatcher};
use serde::{Deserialize, Serialize};

/// JSON serializable backend report.
#[derive(Debug, Serialize, Deserialize)]
struct InfoJson {
    arch: String,
    detected: String,
    implementation: String,
    hardware_clmul: bool,
    forced_portable: bool,
    fold_threshold: usize,
    backends: Vec<BackendJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BackendJson {
    name: String,
    supported: bool,
}

fn collect() -> InfoJson {
    let detected = Backend::detect();
    InfoJson {
        arch: std::env::consts::ARCH.to_string(),
        detected: detected.name().to_string(),
        implementation: Crc64Dispatcher::new().implementation_name().to_string(),
        hardware_clmul: Crc64::is_simd_available(),
        forced_portable: force_portable(),
        fold_threshold: FOLD_THRESHOLD,
        backends: Backend::ALL
            .iter()
            .map(|backend| BackendJson {
                name: backend.name().to_string(),
                supported: backend.is_supported(),
            })
            .collect(),
    }
}

pub fn cmd_info(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let info = collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("CRC-64/XZ Backend Information");
    println!("=============================");
    println!("Architecture: {}", info.arch);
    println!("Carry-less multiply: {}", info.detected);
    println!("Large inputs: {}", info.implementation);
    println!("Fold threshold: {} bytes", info.fold_threshold);
    if info.forced_portable {
        println!("Note: {} is set", FORCE_PORTABLE_ENV);
    }

    println!();
    println!("Backends:");
    for backend in &info.backends {
        let status = if backend.supported { "yes" } else { "no" };
        println!("  {:<10} {}", backend.name, status);
    }

    Ok(())
}
