//! `exit` — terminate the shell.

use std::io;

use crate::builtins::{Builtin, BuiltinIo};
use crate::parse::ParsedCommand;
use crate::session::Session;

/// Terminates the process with status 0 iff the sole argument is literally
/// `"0"`. Every other invocation is a no-op; other exit codes are not
/// handled.
pub struct Exit;

impl Builtin for Exit {
    fn run(
        &self,
        cmd: &ParsedCommand,
        _session: &mut Session,
        _io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        if cmd.args.len() == 1 && cmd.args[0] == "0" {
            std::process::exit(0);
        }
        Ok(())
    }

    fn mutates_session(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tokenize;

    // `exit 0` cannot be exercised here; it would end the test process.

    #[test]
    fn non_zero_argument_is_a_noop() {
        let cmd = tokenize("exit 1").expect("tokenize");
        let mut session = Session::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        Exit.run(
            &cmd,
            &mut session,
            &mut BuiltinIo {
                out: &mut out,
                err: &mut err,
            },
        )
        .expect("exit");
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn missing_argument_is_a_noop() {
        let cmd = tokenize("exit").expect("tokenize");
        let mut session = Session::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        Exit.run(
            &cmd,
            &mut session,
            &mut BuiltinIo {
                out: &mut out,
                err: &mut err,
            },
        )
        .expect("exit");
        assert!(out.is_empty());
    }
}
