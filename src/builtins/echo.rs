//! Data-free `echo`: arguments in, line out.

use std::io::{self, Write};

use crate::builtins::{Builtin, BuiltinIo};
use crate::parse::ParsedCommand;
use crate::session::Session;

pub struct Echo;

impl Builtin for Echo {
    fn run(
        &self,
        cmd: &ParsedCommand,
        _session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        writeln!(io.out, "{}", cmd.arg_string())
    }
}
