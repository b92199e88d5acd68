#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip, RenderError};

pub mod ast;
pub mod errors;
pub mod macros;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: u32, end: u32, file: &Rc<String>) -> Self {
        Span {
            start: Position(start, Rc::clone(file)),
            end: Position(end, Rc::clone(file)),
        }
    }

    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing a byte offset of `source`.
///
/// Returns the 1-based line number, the line text and the offset inside that line.
pub fn get_line_at_position(source: &str, position: u32) -> Result<(usize, String, usize), RenderError> {
    let pos = position as usize;

    if pos >= source.len() {
        return Err(RenderError::PositionOutOfRange {
            position,
            length: source.len(),
        });
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Ok((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    Err(RenderError::PositionOutOfRange {
        position,
        length: source.len(),
    })
}

/// Renders a diagnostic against the source text it was reported for.
///
/// ```text
/// Error: NonArithmetic (Operator `+` expects a number, found `string`)
/// -> main.fire
///   |
/// 1 | let x = 1 + "a";
///   | ------------^
/// ```
pub fn render_diagnostic(error: &Error, file_name: &str, source: &str) -> Result<String, RenderError> {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0)?;

    let line_str = line.to_string();
    let padding = line_str.len() + 2;
    let mut out = String::new();

    // Writing into a String cannot fail.
    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file_name);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_str, line_text_removed.trim_end());

    // `line_pos` is a byte offset; the caret is placed by characters.
    let column = line_text
        .get(..line_pos)
        .map_or(line_pos, |before| before.chars().count());
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    let _ = write!(out, "{:>padding$} {:->arrows$}", "|", "^");
    Ok(out)
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use crate::{
        ast::types::Type,
        errors::errors::{Error, ErrorImpl, RenderError},
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\nbar\nTesting { }\n";
        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_out_of_range() {
        let result = super::get_line_at_position("abc", 3);
        assert_eq!(
            result,
            Err(RenderError::PositionOutOfRange {
                position: 3,
                length: 3
            })
        );
    }

    #[test]
    fn test_render_diagnostic() {
        let error = Error::new(
            ErrorImpl::NonArithmetic {
                context: "+".to_string(),
                received: Type::String,
            },
            Position(12, Rc::new("main.fire".to_string())),
        );

        let rendered = super::render_diagnostic(&error, "main.fire", "let x = 1 + \"a\";\n").unwrap();
        assert_eq!(
            rendered,
            "Error: NonArithmetic (Operator `+` expects a number, found `string`)\n\
             -> main.fire\n  |\n\
             1 | let x = 1 + \"a\";\n  | ------------^"
        );
    }

    #[test]
    fn test_render_diagnostic_strips_indentation() {
        let error = Error::new(
            ErrorImpl::InitializerOrTypeRequired {
                variable: "x".to_string(),
            },
            Position(11, Rc::new("main.fire".to_string())),
        );

        let rendered = super::render_diagnostic(&error, "main.fire", "a;\n    let x;\n").unwrap();
        let last_line = rendered.lines().last().unwrap();
        assert_eq!(last_line, "  | ----^");
    }

    #[test]
    fn test_render_diagnostic_counts_characters() {
        let error = Error::new(
            ErrorImpl::NonArithmetic {
                context: "+".to_string(),
                received: Type::String,
            },
            Position(13, Rc::new("main.fire".to_string())),
        );

        let rendered = super::render_diagnostic(&error, "main.fire", "let é = 1 + \"a\";\n").unwrap();
        let last_line = rendered.lines().last().unwrap();
        assert_eq!(last_line, "  | ------------^");
    }

    #[test]
    fn test_render_diagnostic_without_tip() {
        let error = Error::new(ErrorImpl::NonWritableLValue, Position(0, Rc::new("main.fire".to_string())));

        let rendered = super::render_diagnostic(&error, "main.fire", "1 = 2;\n").unwrap();
        assert_eq!(
            rendered,
            "Error: NonWritableLValue\n-> main.fire\n  |\n1 | 1 = 2;\n  | ^"
        );
    }
}
