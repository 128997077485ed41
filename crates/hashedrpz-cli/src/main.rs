//! hasher - HashedRPZ command-line hasher
//!
//! Reads domain names line by line and writes their HashedRPZ form.

use anyhow::Result;

fn main() -> Result<()> {
    hashedrpz_cli::run()
}
