//! Soft-proof analysis CLI tool
//!
//! Command-line interface for scoring how faithfully an output ICC profile
//! reproduces an image, using the softproof library.

#[cfg(feature = "cli")]
use softproof::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
