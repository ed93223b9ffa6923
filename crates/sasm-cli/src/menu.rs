//! Interactive session: load, assemble, execute.
//!
//! Errors from the core are reported and the loop keeps going.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sasm_core::{Machine, SasmConfig, SystemOutput};
use tracing::{error, info};

use crate::display;

/// Forwards `system` output to the session's writer.
struct WriterOutput<'a, W: Write>(&'a mut W);

impl<W: Write> SystemOutput for WriterOutput<'_, W> {
    fn emit(&mut self, value: i16) -> io::Result<()> {
        writeln!(self.0, "{}", value)
    }
}

pub struct Session<W: Write> {
    machine: Machine,
    program: Option<Vec<String>>,
    path: Option<PathBuf>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: SasmConfig, out: W) -> Self {
        Session {
            machine: Machine::new(config),
            program: None,
            path: None,
            out,
        }
    }

    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        info!(path = %path.display(), lines = lines.len(), "program loaded");
        self.program = Some(lines);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn assemble(&mut self) -> Result<()> {
        let Some(program) = self.program.clone() else {
            writeln!(self.out, "No assembly file loaded. Please load a file")?;
            return Ok(());
        };
        let listing = self.machine.assemble(program)?;
        write!(self.out, "{}", display::listing(listing))?;
        Ok(())
    }

    pub fn execute(&mut self) -> Result<()> {
        write!(self.out, "{}", display::registers(self.machine.registers()))?;
        self.machine.execute(&mut WriterOutput(&mut self.out))?;
        write!(self.out, "{}", display::registers(self.machine.registers()))?;
        Ok(())
    }

    /// Report a failed action without ending the session.
    pub fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            error!("{:#}", e);
            let _ = writeln!(self.out, "error: {:#}", e);
        }
    }

    /// Run the numbered menu until the user exits or input ends.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        loop {
            let current = self
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "None".to_string());
            writeln!(self.out, "1 Load new assembly file (current: {})", current)?;
            writeln!(self.out, "2 Assemble the code")?;
            writeln!(self.out, "3 Execute the code")?;
            writeln!(self.out, "4 Exit")?;
            writeln!(self.out, "\n\n\n")?;

            let Some(choice) = prompt(&mut input, &mut self.out, ":")? else {
                return Ok(());
            };
            let choice: u32 = match choice.parse() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.out, "Input must be an integer")?;
                    continue;
                }
            };

            match choice {
                1 => {
                    let Some(path) = prompt(&mut input, &mut self.out, "filepath: ")? else {
                        return Ok(());
                    };
                    let result = self.load_file(Path::new(&path));
                    self.report(result);
                }
                2 => {
                    let result = self.assemble();
                    self.report(result);
                }
                3 => {
                    let result = self.execute();
                    self.report(result);
                }
                4 => {
                    writeln!(self.out, "Goodbye")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Incorrect choice please choose Options 1-4")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Read one trimmed line, `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
