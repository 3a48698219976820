//! Subcommands of the `rio` command line.
//!
//! Each command exposes its clap `Args` and an `execute` function writing to
//! any [`Write`] so it can run against stdout or a buffer.

pub mod bounds;
pub mod info;
pub mod insp;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

use crate::errors::Result;

/// Writes `value` as JSON followed by a newline.
///
/// `indent` pretty-prints with that many spaces, `None` writes a single line.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    indent: Option<usize>,
) -> Result<()> {
    match indent {
        Some(indent) => {
            let indent = " ".repeat(indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut *out, formatter);
            value.serialize(&mut serializer)?;
        }
        None => serde_json::to_writer(&mut *out, value)?,
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, "{\"a\":[1,2]}\n")]
    #[case(Some(1), "{\n \"a\": [\n  1,\n  2\n ]\n}\n")]
    fn json_indentation(#[case] indent: Option<usize>, #[case] expected: &str) {
        let mut out = Vec::new();
        write_json(&mut out, &json!({"a": [1, 2]}), indent).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
