//! Splitting a raw input line into pipeline stages.

/// Split a line at unquoted, unescaped `|` characters.
///
/// Quote and escape characters are copied through into the stage text so
/// each stage still carries them for its own tokenization. Stages are
/// trimmed; empty stages are dropped. Input without a `|` yields a single
/// stage, so the one-command path is just a one-stage pipeline.
pub fn segment(line: &str) -> Vec<String> {
    let mut stages = Vec::new();
    let mut buf = String::new();
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for c in line.chars() {
        if esc {
            buf.push(c);
            esc = false;
            continue;
        }
        if c == '\\' && !sq {
            esc = true;
            buf.push(c);
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            buf.push(c);
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            buf.push(c);
            continue;
        }
        if c == '|' && !sq && !dq {
            stages.push(std::mem::take(&mut buf));
            continue;
        }
        buf.push(c);
    }
    stages.push(buf);

    stages
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
