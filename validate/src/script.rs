//! Replay script parsing.
//!
//! One command per line, prefixed by a timestamp in milliseconds:
//!
//! ```text
//! # hadouken, then a dropped uppercut
//! 0    press Down
//! 80   press Forward
//! 150  press Punch
//! 150  expect completed hadouken
//! 400  press Down
//! 1200 expect reset timed_out
//! ```

use combo_core::ResetReason;

#[derive(Debug, thiserror::Error)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// A combo with this id completed since the previous expectation
    Completed(String),
    /// The sequence was abandoned for this reason since the previous expectation
    Reset(ResetReason),
    /// Still accumulating, nothing terminal since the previous expectation
    Pending,
    /// Nothing in progress
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Press(String),
    Tick,
    Reset,
    Expect(Expectation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the script file
    pub line: usize,
    pub at_ms: u64,
    pub command: Command,
}

/// Parse a whole script. Timestamps must never go backwards.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    let mut last_ms = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let parsed = parse_line(line, content)?;
        if parsed.at_ms < last_ms {
            return Err(ScriptError::new(
                line,
                format!("timestamp {} is earlier than {}", parsed.at_ms, last_ms),
            ));
        }
        last_ms = parsed.at_ms;
        lines.push(parsed);
    }

    Ok(lines)
}

fn parse_line(line: usize, content: &str) -> Result<ScriptLine, ScriptError> {
    let mut parts = content.split_whitespace();

    let at_ms = parts
        .next()
        .and_then(|t| t.parse::<u64>().ok())
        .ok_or_else(|| ScriptError::new(line, "expected a timestamp in milliseconds"))?;

    let command = match parts.next() {
        Some("press") => {
            let symbol = parts
                .next()
                .ok_or_else(|| ScriptError::new(line, "press needs a symbol"))?;
            Command::Press(symbol.to_string())
        }
        Some("tick") => Command::Tick,
        Some("reset") => Command::Reset,
        Some("expect") => Command::Expect(parse_expectation(line, &mut parts)?),
        Some(other) => {
            return Err(ScriptError::new(line, format!("unknown command '{}'", other)));
        }
        None => return Err(ScriptError::new(line, "missing command")),
    };

    if let Some(extra) = parts.next() {
        return Err(ScriptError::new(line, format!("unexpected '{}'", extra)));
    }

    Ok(ScriptLine {
        line,
        at_ms,
        command,
    })
}

fn parse_expectation<'a>(
    line: usize,
    parts: &mut impl Iterator<Item = &'a str>,
) -> Result<Expectation, ScriptError> {
    match parts.next() {
        Some("completed") => parts
            .next()
            .map(|id| Expectation::Completed(id.to_string()))
            .ok_or_else(|| ScriptError::new(line, "expect completed needs a combo id")),
        Some("reset") => {
            let name = parts
                .next()
                .ok_or_else(|| ScriptError::new(line, "expect reset needs a reason"))?;
            ResetReason::ALL
                .into_iter()
                .find(|r| r.as_str() == name)
                .map(Expectation::Reset)
                .ok_or_else(|| ScriptError::new(line, format!("unknown reset reason '{}'", name)))
        }
        Some("pending") => Ok(Expectation::Pending),
        Some("idle") => Ok(Expectation::Idle),
        Some(other) => Err(ScriptError::new(
            line,
            format!("unknown expectation '{}'", other),
        )),
        None => Err(ScriptError::new(line, "expect needs a condition")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        let script = r#"
# opening
0 press Down
16 tick
20 reset   # player got stunned
30 expect completed hadouken
40 expect reset timed_out
50 expect pending
60 expect idle
"#;
        let lines = parse_script(script).unwrap();
        let commands: Vec<_> = lines.iter().map(|l| l.command.clone()).collect();
        assert_eq!(
            commands,
            vec![
                Command::Press("Down".to_string()),
                Command::Tick,
                Command::Reset,
                Command::Expect(Expectation::Completed("hadouken".to_string())),
                Command::Expect(Expectation::Reset(ResetReason::TimedOut)),
                Command::Expect(Expectation::Pending),
                Command::Expect(Expectation::Idle),
            ]
        );
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[3].at_ms, 30);
    }

    #[test]
    fn test_rejects_backwards_time() {
        let err = parse_script("100 press A\n50 press B\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert_eq!(parse_script("press A").unwrap_err().line, 1);
        assert!(parse_script("0 press").is_err());
        assert!(parse_script("0 jump").is_err());
        assert!(parse_script("0 tick now").is_err());
        assert!(parse_script("0 expect reset sometime").is_err());
        assert!(parse_script("0 expect").is_err());
    }

    #[test]
    fn test_error_message_names_line() {
        let err = parse_script("\n\n0 dance\n").unwrap_err();
        assert_eq!(err.to_string(), "script line 3: unknown command 'dance'");
    }
}
