//! Parsing of the line-oriented task source.
//!
//! One record per line: a single-character action code (`p` = compute,
//! `w` = wait) followed by a signed integer value. Blank lines are skipped;
//! anything else malformed is fatal to the load.

use crate::error::{Error, Result};
use crate::queue::SharedQueue;
use crate::task::Task;
use std::io::BufRead;

/// Parse one record. `line_no` is 1-based and only used for diagnostics.
pub fn parse_line(line: &str, line_no: usize) -> Result<Task> {
    let mut fields = line.split_whitespace();

    let action = fields
        .next()
        .ok_or_else(|| Error::parse(line_no, "missing action code"))?;

    let value = fields
        .next()
        .ok_or_else(|| Error::parse(line_no, "missing value"))?;
    let value: i64 = value
        .parse()
        .map_err(|_| Error::parse(line_no, format!("invalid value `{}`", value)))?;

    if let Some(extra) = fields.next() {
        return Err(Error::parse(line_no, format!("trailing input `{}`", extra)));
    }

    match action {
        "p" => Ok(Task::compute(value)),
        "w" => Ok(Task::wait(value)),
        other => Err(Error::parse(
            line_no,
            format!("unknown action code `{}`", other),
        )),
    }
}

/// Read every record from `input` and push it onto the queue in order.
/// Returns the number of tasks loaded.
///
/// Runs single-threaded, before any consumer exists, so pushes never race
/// pops.
pub fn load_into<R: BufRead>(input: R, queue: &SharedQueue) -> Result<usize> {
    let mut loaded = 0;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        queue.push(parse_line(&line, idx + 1)?);
        loaded += 1;
    }

    Ok(loaded)
}
