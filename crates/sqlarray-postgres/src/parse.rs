//! Array literal parser.
//!
//! Parses the textual array format the catalog emits (`{1,2,3}` on
//! PostgreSQL, `[1,2,3]` on Redshift) into nested [`ArrayElement`]s.
//! Like the catalog itself, the parser accepts a leading dimension-bound
//! prefix (`[1:3]={...}`) and discards it.
//!
//! The scan is a single left-to-right pass with one-element lookahead over
//! a fixed buffer of decoded characters, driven by a stack of open
//! containers and one recording buffer of characters pending classification
//! as the next scalar token. The buffer is flushed into the top-of-stack
//! container on every delimiter boundary.

use std::sync::OnceLock;

use regex::Regex;
use sqlarray_core::{Dialect, Error, Result, Value};

use crate::array::{ArrayElement, SqlArray};
use crate::registry::ConversionProc;

/// Delimiter set for one dialect's catalog output, selected once per parse.
#[derive(Debug, Clone, Copy)]
struct Grammar {
    open: char,
    close: char,
}

const BRACES: Grammar = Grammar {
    open: '{',
    close: '}',
};

const BRACKETS: Grammar = Grammar {
    open: '[',
    close: ']',
};

impl Grammar {
    fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Postgres => BRACES,
            Dialect::Redshift => BRACKETS,
        }
    }

    /// Pattern matching the optional dimension-bound prefix plus the opening
    /// delimiter, anchored at the start of input.
    fn opening_pattern(&self) -> &'static Regex {
        static BRACE_OPEN: OnceLock<Regex> = OnceLock::new();
        static BRACKET_OPEN: OnceLock<Regex> = OnceLock::new();
        match self.open {
            '{' => BRACE_OPEN.get_or_init(|| {
                Regex::new(r"^(?:(?:\[[0-9]+:[0-9]+\])+=)?\{").unwrap()
            }),
            _ => BRACKET_OPEN.get_or_init(|| {
                Regex::new(r"^(?:(?:\[[0-9]+:[0-9]+\])+=)?\[").unwrap()
            }),
        }
    }
}

/// Parse an array literal into its nested element structure.
///
/// `converter` is applied to every unquoted token that is not the `NULL`
/// marker and to every quoted token; conversion failures propagate to the
/// caller unchanged. Without a converter, tokens become [`Value::Text`].
pub fn parse_array(
    source: &str,
    dialect: Dialect,
    converter: Option<&ConversionProc>,
) -> Result<Vec<ArrayElement>> {
    tracing::trace!(dialect = dialect.name(), len = source.len(), "parsing array literal");

    if source.is_empty() {
        return Err(Error::MalformedArray("empty string"));
    }

    let grammar = Grammar::for_dialect(dialect);
    let Some(opening) = grammar.opening_pattern().find(source) else {
        return Err(Error::MalformedArray("missing opening delimiter"));
    };

    Parser {
        chars: source[opening.end()..].chars().collect(),
        pos: 0,
        stack: vec![Vec::new()],
        recorded: String::new(),
        converter,
        grammar,
    }
    .run()
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    stack: Vec<Vec<ArrayElement>>,
    recorded: String,
    converter: Option<&'a ConversionProc>,
    grammar: Grammar,
}

impl Parser<'_> {
    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Flush the recording buffer as a new element of the top container.
    ///
    /// An empty buffer only flushes when `include_empty` is set, which
    /// happens for quoted tokens; a quoted `NULL` is therefore the
    /// four-character string rather than the null marker.
    fn flush_entry(&mut self, include_empty: bool) -> Result<()> {
        if self.recorded.is_empty() && !include_empty {
            return Ok(());
        }
        let token = std::mem::take(&mut self.recorded);
        let element = if token == "NULL" && !include_empty {
            ArrayElement::Null
        } else if let Some(convert) = self.converter {
            ArrayElement::Scalar(convert(&token)?)
        } else {
            ArrayElement::Scalar(Value::Text(token))
        };
        if let Some(top) = self.stack.last_mut() {
            top.push(element);
        }
        Ok(())
    }

    fn run(mut self) -> Result<Vec<ArrayElement>> {
        while let Some(c) = self.next() {
            if c == ',' {
                // Comma outside a quoted token ends the current entry.
                self.flush_entry(false)?;
            } else if c == '"' {
                if !self.recorded.is_empty() {
                    return Err(Error::MalformedArray(
                        "opening quote with existing recorded data",
                    ));
                }
                self.scan_quoted()?;
                self.flush_entry(true)?;
            } else if c == self.grammar.open {
                if !self.recorded.is_empty() {
                    return Err(Error::MalformedArray(
                        "opening delimiter with existing recorded data",
                    ));
                }
                self.stack.push(Vec::new());
            } else if c == self.grammar.close {
                self.flush_entry(false)?;
                let closed = self
                    .stack
                    .pop()
                    .ok_or(Error::MalformedArray("unbalanced closing delimiter"))?;
                if let Some(parent) = self.stack.last_mut() {
                    parent.push(ArrayElement::Array(SqlArray::new(closed)));
                } else {
                    if self.pos < self.chars.len() {
                        return Err(Error::MalformedArray(
                            "trailing data after closing delimiter",
                        ));
                    }
                    return Ok(closed);
                }
            } else {
                self.recorded.push(c);
            }
        }

        Err(Error::UnterminatedArray)
    }

    /// Copy a quoted token into the recording buffer.
    ///
    /// A backslash forces the next character to be copied literally. The
    /// closing quote must be followed by a comma or the container's closing
    /// delimiter.
    fn scan_quoted(&mut self) -> Result<()> {
        loop {
            match self.next() {
                Some('\\') => match self.next() {
                    Some(escaped) => self.recorded.push(escaped),
                    None => return Err(Error::UnterminatedArray),
                },
                Some('"') => {
                    return match self.peek() {
                        Some(next) if next == ',' || next == self.grammar.close => Ok(()),
                        _ => Err(Error::MalformedArray(
                            "closing quote not followed by comma or closing delimiter",
                        )),
                    };
                }
                Some(other) => self.recorded.push(other),
                None => return Err(Error::UnterminatedArray),
            }
        }
    }
}
