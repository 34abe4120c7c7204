//! `history` — list the session's command log.

use std::io::{self, Write};

use crate::builtins::{Builtin, BuiltinIo};
use crate::parse::ParsedCommand;
use crate::session::Session;

/// Lists history with 1-based absolute indices. The read loop records each
/// line before executing it, so an invocation always sees itself as the
/// final entry and the builtin itself is read-only.
pub struct History;

impl Builtin for History {
    fn run(
        &self,
        cmd: &ParsedCommand,
        session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        let entries = session.history();
        let start = match cmd.args.as_slice() {
            [] => 0,
            [count] => match count.parse::<usize>() {
                Ok(n) => entries.len().saturating_sub(n),
                Err(_) => {
                    return writeln!(io.err, "history: {count}: numeric argument required");
                }
            },
            _ => {
                return writeln!(io.err, "history: too many arguments");
            }
        };
        for (idx, line) in entries.iter().enumerate().skip(start) {
            writeln!(io.out, "{:5}  {}", idx + 1, line)?;
        }
        Ok(())
    }
}
