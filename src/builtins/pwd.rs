//! `pwd` — report the working directory.

use std::env;
use std::io::{self, Write};

use crate::builtins::{Builtin, BuiltinIo};
use crate::parse::ParsedCommand;
use crate::session::Session;

pub struct Pwd;

impl Builtin for Pwd {
    fn run(
        &self,
        cmd: &ParsedCommand,
        _session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        if !cmd.args.is_empty() {
            return writeln!(io.err, "pwd: too many arguments");
        }
        match env::current_dir() {
            Ok(dir) => writeln!(io.out, "{}", dir.display()),
            Err(e) => writeln!(io.err, "pwd: {e}"),
        }
    }
}
