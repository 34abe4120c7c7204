//! shoal: a small interactive shell.
//!
//! Reads one line at a time, interprets shell syntax (quoting, escaping,
//! redirection, pipelines), resolves builtins versus PATH executables, and
//! executes the result with standard streams wired appropriately.

use log::{debug, warn};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use shoal::builtins::BuiltinRegistry;
use shoal::complete::{CompletionEngine, ShellHelper};
use shoal::config::Config;
use shoal::{Session, exec, logging};

fn main() {
    let config = Config::load();
    logging::init(&config.settings.log_level);

    let mut session = Session::from_env();
    let registry = BuiltinRegistry::new();

    let mut editor: Editor<ShellHelper, DefaultHistory> = match Editor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("shoal: cannot start line editor: {e}");
            return;
        }
    };
    editor.set_helper(Some(ShellHelper::new(CompletionEngine::new(
        session.path_dirs().to_vec(),
    ))));

    loop {
        match editor.readline(&config.settings.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                // Recorded before execution so `history` sees itself.
                session.record(&line);
                let outcomes = exec::run_line(&mut session, &registry, &line);
                debug!("{line:?} -> {} stage(s)", outcomes.len());
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!("read error: {e}");
                continue;
            }
        }
    }
}
