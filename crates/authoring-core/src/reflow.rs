//! Hard line reflow.
//!
//! Proposes line breaks for lines wider than the configured width. Widths follow UAX #11 (via
//! `unicode-width`), with tabs expanded to the next tab stop. A break always replaces a single
//! whitespace character with `'\n'`, so:
//!
//! - a word is never split; a line with no whitespace before the limit is left as is,
//! - every proposal is a one-for-one replacement and the set can be applied in any order,
//! - no proposal touches a letter, so reflow never invalidates a flagged word range.
//!
//! The host applies the proposals and reports them back as
//! [`EditOrigin::Programmatic`](crate::EditOrigin::Programmatic) deltas.

use crate::config::ReflowConfig;
use crate::delta::EditDelta;
use unicode_width::UnicodeWidthChar;

/// Display width of `ch` in cells.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

fn cell_width_at(ch: char, x: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - x % tab_width
    } else {
        char_width(ch)
    }
}

fn is_break_char(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n' && ch != '\r'
}

/// Line breaks that bring every line of `text` within `config.max_width`, where possible.
///
/// Returns nothing when reflow is disabled.
pub fn plan_reflow(text: &str, config: &ReflowConfig) -> Vec<EditDelta> {
    let mut out = Vec::new();
    if !config.enabled || config.max_width == 0 {
        return out;
    }

    let mut line_start = 0usize;
    for line in text.split('\n') {
        plan_line(line, line_start, config, &mut out);
        line_start += line.chars().count() + 1;
    }
    out
}

fn plan_line(line: &str, line_start: usize, config: &ReflowConfig, out: &mut Vec<EditDelta>) {
    let mut x = 0usize;
    // (document offset, x after the whitespace)
    let mut last_break: Option<(usize, usize)> = None;

    for (i, ch) in line.chars().enumerate() {
        let offset = line_start + i;
        let width = cell_width_at(ch, x, config.tab_width);

        if x + width > config.max_width
            && !is_break_char(ch)
            && let Some((break_offset, x_after)) = last_break.take()
        {
            out.push(EditDelta::new(break_offset, break_offset + 1, "\n"));
            x -= x_after;
        }

        x += width;
        if is_break_char(ch) {
            last_break = Some((offset, x));
        }
    }
}
