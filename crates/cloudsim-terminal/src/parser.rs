//! Input line tokenizer.
//!
//! Lines are split on whitespace only. There is no quoting, escaping,
//! chaining, or piping: every token is a plain word.

/// A non-empty input line split into its command word and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Arguments as borrowed slices, the shape `Command::execute` takes.
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Tokenize a raw input line. Returns `None` for blank input.
pub fn parse(line: &str) -> Option<ParsedLine> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let command = tokens.next()?;
    Some(ParsedLine {
        command,
        args: tokens.collect(),
    })
}
