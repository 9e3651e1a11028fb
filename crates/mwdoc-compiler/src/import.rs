//! Page import with heading renumbering.

use crate::heading::{format_heading, parse_heading};

/// Depth of a heading after shifting it under an outline entry.
///
/// Never less than 1.
#[must_use]
pub fn shift_depth(depth: usize, base_depth: usize) -> usize {
    (depth + base_depth).saturating_sub(1).max(1)
}

/// Retag every heading of `body` so its nesting is relative to `base_depth`.
///
/// A level-1 heading becomes a level-`base_depth` heading; deeper headings
/// keep their relative nesting. Non-heading lines pass through with trailing
/// whitespace trimmed.
#[must_use]
pub fn import_page(body: &str, base_depth: usize) -> Vec<String> {
    body.lines()
        .map(|line| match parse_heading(line) {
            Some(heading) => {
                let mut line =
                    format_heading(shift_depth(heading.depth, base_depth), heading.title);
                if !heading.trailer.is_empty() {
                    line.push(' ');
                    line.push_str(heading.trailer);
                }
                line
            }
            None => line.trim_end().to_owned(),
        })
        .collect()
}
