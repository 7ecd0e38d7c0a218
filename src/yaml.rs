//! YAML serialization for generated files.
//!
//! `serde_yaml` writes block sequences flush with their parent key:
//!
//! ```yaml
//! branches:
//! - main
//! ```
//!
//! Generated workflows and linter configs indent them by two spaces under
//! the key instead, which is what hand-written GitHub workflow files look
//! like. [`to_string`] serializes with `serde_yaml` and then re-indents the
//! result line by line. Scalar content is never touched.

use serde::Serialize;

use crate::error::Result;

const INDENT: usize = 2;

/// Serializes `value` with block sequences indented under their key.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(indent_sequences(&serde_yaml::to_string(value)?))
}

/// A block sequence that is currently open.
struct OpenSequence {
    /// Column of its `-` markers in the input.
    column: usize,
    /// Whether it hangs off a mapping key and therefore gets shifted.
    shifted: bool,
}

/// Block scalar whose content lines are being copied verbatim.
struct OpenScalar {
    /// Column of the mapping that owns the scalar; content is deeper.
    owner: usize,
    shift: usize,
}

/// Indents every block sequence nested under a mapping key by [`INDENT`]
/// columns per enclosing sequence.
pub(crate) fn indent_sequences(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len() + yaml.len() / 4);
    let mut open: Vec<OpenSequence> = Vec::new();
    let mut scalar: Option<OpenScalar> = None;
    let mut after_key = false;

    for line in yaml.lines() {
        let column = line.len() - line.trim_start_matches(' ').len();
        let content = &line[column..];

        if let Some(s) = &scalar {
            if content.is_empty() {
                out.push('\n');
                continue;
            }
            if column > s.owner {
                push_line(&mut out, s.shift, line);
                continue;
            }
            scalar = None;
        }

        while let Some(top) = open.last() {
            if top.column > column || (top.column == column && !is_item(content)) {
                open.pop();
            } else {
                break;
            }
        }

        // `- - a` opens one sequence per marker; only the outermost can
        // hang off a key.
        let markers = leading_markers(content);
        if markers > 0 && open.last().map(|s| s.column) != Some(column) {
            open.push(OpenSequence {
                column,
                shifted: after_key,
            });
        }
        for depth in 1..markers {
            let inner = column + depth * INDENT;
            if open.last().map(|s| s.column) != Some(inner) {
                open.push(OpenSequence {
                    column: inner,
                    shifted: false,
                });
            }
        }

        let shift = INDENT * open.iter().filter(|s| s.shifted).count();
        push_line(&mut out, shift, line);

        if starts_block_scalar(content) {
            scalar = Some(OpenScalar {
                owner: column + markers * INDENT,
                shift,
            });
        }
        after_key = content.ends_with(':');
    }

    out
}

fn push_line(out: &mut String, shift: usize, line: &str) {
    if !line.is_empty() {
        out.push_str(&" ".repeat(shift));
    }
    out.push_str(line);
    out.push('\n');
}

fn is_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Number of `- ` sequence markers at the start of `content`.
fn leading_markers(mut content: &str) -> usize {
    let mut markers = 0;
    while is_item(content) {
        markers += 1;
        content = content.get(2..).unwrap_or_default();
    }
    markers
}

/// Whether the line ends in a block scalar header such as `|`, `|-` or `>2`.
fn starts_block_scalar(content: &str) -> bool {
    let header = content.rsplit(' ').next().unwrap_or_default();
    let mut chars = header.chars();
    if !matches!(chars.next(), Some('|' | '>')) || !chars.all(|c| matches!(c, '+' | '-' | '0'..='9')) {
        return false;
    }
    let head = content[..content.len() - header.len()].trim_end();
    head.is_empty() || head.ends_with(':') || head.ends_with('-')
}
