//! Completion candidates and the tab-request policy.
//!
//! The engine computes command-position candidates (builtin names plus
//! executable names from the startup PATH snapshot) and applies the
//! editor-facing policy: bell on no match, auto-complete a unique match
//! with a trailing space, extend to a shared prefix, and list the
//! candidates on the second consecutive request for the same input.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use rustyline::Helper;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;

use crate::builtins;
use crate::exec::is_executable;

/// What the line editor should do with one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// No candidates, or an ambiguous set on its first request.
    Bell,
    /// Replace the typed input with this text.
    Complete(String),
    /// Print the candidate list (sorted; display joins with two spaces).
    ShowCandidates(Vec<String>),
}

/// Candidate computation plus the double-request policy state.
#[derive(Debug, Default)]
pub struct CompletionEngine {
    path_dirs: Vec<PathBuf>,
    /// The last input that produced an ambiguous candidate set.
    pending: Option<String>,
}

impl CompletionEngine {
    pub fn new(path_dirs: Vec<PathBuf>) -> Self {
        Self {
            path_dirs,
            pending: None,
        }
    }

    /// All candidates for a typed prefix: builtin names plus executable
    /// names from the PATH snapshot, deduplicated and sorted.
    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        let mut set = BTreeSet::new();
        for name in builtins::NAMES {
            if name.starts_with(prefix) {
                set.insert(name.to_string());
            }
        }
        for dir in &self.path_dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if name.starts_with(prefix) && is_executable(&entry.path()) {
                    set.insert(name.to_string());
                }
            }
        }
        set.into_iter().collect()
    }

    /// Apply the completion policy to one tab request for `line`.
    pub fn advance(&mut self, line: &str) -> CompletionAction {
        let candidates = self.candidates(line);
        match candidates.as_slice() {
            [] => {
                self.pending = None;
                CompletionAction::Bell
            }
            [only] => {
                self.pending = None;
                CompletionAction::Complete(format!("{only} "))
            }
            _ => {
                let shared = common_prefix(&candidates);
                if shared.len() > line.len() {
                    self.pending = None;
                    return CompletionAction::Complete(shared);
                }
                if self.pending.as_deref() == Some(line) {
                    self.pending = None;
                    CompletionAction::ShowCandidates(candidates)
                } else {
                    self.pending = Some(line.to_string());
                    CompletionAction::Bell
                }
            }
        }
    }
}

/// Longest prefix shared by every candidate.
fn common_prefix(names: &[String]) -> String {
    let Some(first) = names.first() else {
        return String::new();
    };
    let mut prefix = first.as_str();
    for name in &names[1..] {
        let shared = prefix
            .chars()
            .zip(name.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let end = prefix
            .char_indices()
            .nth(shared)
            .map_or(prefix.len(), |(i, _)| i);
        prefix = &prefix[..end];
    }
    prefix.to_string()
}

// ── rustyline adapter ──

/// Exposes the candidate set to the stock line editor. Only the command
/// position (no word break before the cursor) is completed.
pub struct ShellHelper {
    engine: CompletionEngine,
}

impl ShellHelper {
    pub fn new(engine: CompletionEngine) -> Self {
        Self { engine }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        if head.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let pairs = self
            .engine
            .candidates(head)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{name} "),
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}
