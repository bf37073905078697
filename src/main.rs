//! Code Mentor - terminal client for an AI code-analysis service
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use code_mentor::Args;
use mentor_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let code = code_mentor::run(args).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
