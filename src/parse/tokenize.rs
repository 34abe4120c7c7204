//! Quote- and escape-aware tokenization of a single pipeline stage.

use super::types::ParsedCommand;

/// Characters a backslash escapes inside double quotes. For anything else
/// the backslash itself is kept.
const DOUBLE_QUOTE_ESCAPES: [char; 4] = ['\\', '$', '"', ' '];

/// Split a stage into words, honoring single quotes, double quotes, and
/// backslash escapes.
///
/// Single quotes copy everything up to the closing quote literally. Inside
/// double quotes a backslash escapes only [`DOUBLE_QUOTE_ESCAPES`]. Outside
/// quotes a backslash escapes the next character unconditionally, quote
/// characters toggle their state without being copied, and an unescaped
/// space run delimits words. A trailing line break is stripped before the
/// scan; a dangling escape is dropped and an unclosed quote runs to the end
/// of the line.
pub fn split_words(text: &str) -> Vec<String> {
    let text = text.trim_end_matches(['\n', '\r']);
    let mut words = Vec::new();
    let mut current = String::new();
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for c in text.chars() {
        if esc {
            esc = false;
            if dq && !DOUBLE_QUOTE_ESCAPES.contains(&c) {
                current.push('\\');
            }
            current.push(c);
            continue;
        }
        if c == '\\' && !sq {
            esc = true;
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            continue;
        }
        if c.is_whitespace() && !sq && !dq {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Tokenize a stage into a command name and argument list.
///
/// The first word is the command name. Whitespace-only input yields `None`.
pub fn tokenize(text: &str) -> Option<ParsedCommand> {
    let mut words = split_words(text).into_iter();
    let name = words.next()?;
    Some(ParsedCommand {
        name,
        args: words.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        split_words(text)
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("echo  hello\tworld"), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn strips_trailing_newline() {
        assert_eq!(words("pwd\n"), vec!["pwd"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(words("").is_empty());
        assert!(words("   \n").is_empty());
        assert!(tokenize("   ").is_none());
    }

    #[test]
    fn single_quotes_preserve_spaces() {
        let cmd = tokenize("echo 'a b' c").unwrap();
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, vec!["a b", "c"]);
    }

    #[test]
    fn single_quotes_keep_backslash() {
        assert_eq!(words(r"echo 'a\nb'"), vec!["echo", r"a\nb"]);
    }

    #[test]
    fn double_quotes_preserve_spaces() {
        assert_eq!(words(r#"echo "a b""#), vec!["echo", "a b"]);
    }

    #[test]
    fn double_quote_escaped_quote() {
        let cmd = tokenize(r#"echo "a\"b""#).unwrap();
        assert_eq!(cmd.args, vec![r#"a"b"#]);
    }

    #[test]
    fn double_quote_keeps_backslash_for_other_chars() {
        assert_eq!(words(r#"echo "a\nb""#), vec!["echo", r"a\nb"]);
    }

    #[test]
    fn double_quote_escaped_backslash() {
        assert_eq!(words(r#"echo "a\\b""#), vec!["echo", r"a\b"]);
    }

    #[test]
    fn unquoted_backslash_escapes_anything() {
        assert_eq!(words(r"echo a\ b"), vec!["echo", "a b"]);
        assert_eq!(words(r"echo a\nb"), vec!["echo", "anb"]);
    }

    #[test]
    fn unquoted_escaped_quote_is_literal() {
        assert_eq!(words(r"echo \'hi\'"), vec!["echo", "'hi'"]);
    }

    #[test]
    fn adjacent_quoted_parts_join() {
        assert_eq!(words("echo 'a''b'"), vec!["echo", "ab"]);
        assert_eq!(words(r#"echo "a"'b'"#), vec!["echo", "ab"]);
    }

    #[test]
    fn quoted_command_name() {
        let cmd = tokenize("'my prog' arg").unwrap();
        assert_eq!(cmd.name, "my prog");
        assert_eq!(cmd.args, vec!["arg"]);
    }

    #[test]
    fn unclosed_quote_runs_to_end() {
        assert_eq!(words("echo 'a b"), vec!["echo", "a b"]);
    }

    #[test]
    fn dangling_escape_is_dropped() {
        assert_eq!(words("echo a\\"), vec!["echo", "a"]);
    }

    #[test]
    fn arg_string_joins_args() {
        let cmd = tokenize("echo one two").unwrap();
        assert_eq!(cmd.arg_string(), "one two");
    }
}
