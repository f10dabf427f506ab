//! Build script for the K5 firmware
//!
//! Handles:
//! - Memory layout for the selected board revision (`board-v1` or default v2)

use std::env;
use std::fs;
use std::path::PathBuf;

/// DP32G030: 64 KiB flash, 16 KiB RAM
const MEMORY_V1: &str = "MEMORY
{
  FLASH : ORIGIN = 0x00000000, LENGTH = 64K
  RAM   : ORIGIN = 0x20000000, LENGTH = 16K
}
";

/// PY32F071: 128 KiB flash, 16 KiB RAM
const MEMORY_V2: &str = "MEMORY
{
  FLASH : ORIGIN = 0x08000000, LENGTH = 128K
  RAM   : ORIGIN = 0x20000000, LENGTH = 16K
}
";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only the target binary links against cortex-m-rt
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    let memory = if env::var_os("CARGO_FEATURE_BOARD_V1").is_some() {
        MEMORY_V1
    } else {
        MEMORY_V2
    };

    let out = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out.join("memory.x"), memory).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
}
