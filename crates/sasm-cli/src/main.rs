//! Simple Assembler - CLI
//!
//! Loads a mnemonic program, prints its encoded listing and executes it,
//! then drops into a numbered menu for further loads and runs.

mod display;
mod menu;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use sasm_core::{ImmediateMode, SasmConfig};
use tracing_subscriber::EnvFilter;

use menu::Session;

#[derive(Parser, Debug)]
#[command(name = "sasm")]
#[command(about = "Simple assembler and interpreter for a ten-opcode instruction set", long_about = None)]
struct Args {
    /// The file you would like to assemble
    #[arg(short = 'l', long)]
    load_file: Option<PathBuf>,

    /// Assemble the loaded file and print the listing
    #[arg(short, long, action = ArgAction::SetTrue)]
    assemble: bool,

    /// Execute the assembled program (requires --assemble)
    #[arg(short = 'x', long, action = ArgAction::SetTrue)]
    execute: bool,

    /// Stop execution after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Read arithmetic immediates by their first digit only
    #[arg(long, action = ArgAction::SetTrue)]
    legacy_immediates: bool,

    /// Exit after the startup actions instead of showing the menu
    #[arg(long, action = ArgAction::SetTrue)]
    no_menu: bool,
}

impl Args {
    fn config(&self) -> SasmConfig {
        let mut config = SasmConfig::new();
        config.step_limit = self.max_steps;
        if self.legacy_immediates {
            config.immediate_mode = ImmediateMode::FirstCharacter;
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SASM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut session = Session::new(args.config(), io::stdout());

    if let Some(path) = &args.load_file {
        let result = session.load_file(path).and_then(|()| {
            if args.assemble {
                session.assemble()?;
                if args.execute {
                    session.execute()?;
                }
            }
            Ok(())
        });
        session.report(result);
    }

    if args.no_menu {
        return Ok(());
    }
    session.run(io::stdin().lock())
}
