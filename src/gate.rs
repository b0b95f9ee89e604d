//! The single gate every mutating action passes through.
//!
//! `Execute` approves everything, `DryRun` reports and declines everything,
//! `Confirm` asks the operator. Callers never touch the filesystem for an
//! action the gate declined.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::log_sink::{Level, RunLog};

/// A mutating action awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir { path: PathBuf },
    Move { item: PathBuf, dest: PathBuf },
}

impl Action {
    pub fn create_dir(path: &Path) -> Self {
        Action::CreateDir {
            path: path.to_path_buf(),
        }
    }

    pub fn move_item(item: &Path, dest: &Path) -> Self {
        Action::Move {
            item: item.to_path_buf(),
            dest: dest.to_path_buf(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateDir { path } => write!(f, "create directory '{}'", path.display()),
            Action::Move { item, dest } => {
                write!(f, "move '{}' -> '{}'", item.display(), dest.display())
            }
        }
    }
}

pub trait Gate {
    /// Return true if `action` may be carried out.
    fn should_perform(&mut self, action: &Action) -> bool;
}

/// Approves every action.
#[derive(Debug, Default)]
pub struct Execute;

impl Gate for Execute {
    fn should_perform(&mut self, _action: &Action) -> bool {
        true
    }
}

/// Reports each action as "What if: ..." to the operator and the log; approves nothing.
pub struct DryRun<'a, W: Write> {
    out: W,
    log: &'a dyn RunLog,
}

impl<'a, W: Write> DryRun<'a, W> {
    pub fn new(out: W, log: &'a dyn RunLog) -> Self {
        Self { out, log }
    }
}

impl<W: Write> Gate for DryRun<'_, W> {
    fn should_perform(&mut self, action: &Action) -> bool {
        let line = format!("What if: {action}");
        // Operator output is best-effort; the log line is the record.
        let _ = writeln!(self.out, "{line}");
        self.log.log(Level::Info, &line);
        false
    }
}

/// Sticky answer from "yes to all" / "no to all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sticky {
    Ask,
    All,
    None,
}

/// Prompts before every action. End of input declines the action and every
/// later one.
pub struct Confirm<R: BufRead, W: Write> {
    input: R,
    prompt: W,
    sticky: Sticky,
}

impl<R: BufRead, W: Write> Confirm<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            sticky: Sticky::Ask,
        }
    }

    fn ask(&mut self, action: &Action) -> bool {
        loop {
            let _ = write!(
                self.prompt,
                "Confirm: {action}? [y] Yes  [a] Yes to all  [n] No  [l] No to all (default n): "
            );
            let _ = self.prompt.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    let _ = writeln!(self.prompt);
                    self.sticky = Sticky::None;
                    return false;
                }
                Ok(_) => {}
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "a" | "all" => {
                    self.sticky = Sticky::All;
                    return true;
                }
                "" | "n" | "no" => return false,
                "l" | "none" => {
                    self.sticky = Sticky::None;
                    return false;
                }
                other => {
                    let _ = writeln!(self.prompt, "Unrecognized answer '{other}'.");
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Gate for Confirm<R, W> {
    fn should_perform(&mut self, action: &Action) -> bool {
        match self.sticky {
            Sticky::All => true,
            Sticky::None => false,
            Sticky::Ask => self.ask(action),
        }
    }
}
