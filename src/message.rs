//! Message assembly: run header and greedy chunking.

use log::warn;
use time::{OffsetDateTime, UtcOffset};

/// Label prefixed to every broadcast, ahead of the timestamp.
pub const HEADER_LABEL: &str = "新着物件";

/// Returns the current time at the fixed UTC+9 display offset.
pub fn jst_now() -> OffsetDateTime {
    let jst = UtcOffset::from_hms(9, 0, 0).expect("UTC+9 is a valid offset");
    OffsetDateTime::now_utc().to_offset(jst)
}

/// Renders the run header: label plus zero-padded `YYYY-MM-DD HH:MM`.
pub fn build_header(now: OffsetDateTime) -> String {
    format!(
        "{} {:04}-{:02}-{:02} {:02}:{:02}",
        HEADER_LABEL,
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute()
    )
}

/// Packs `lines` into messages of at most `max_len` characters, each prefixed
/// with `header`.
///
/// Greedy first-fit in one pass: a line joins the open buffer while the
/// candidate stays within `max_len`, otherwise the buffer closes and the next
/// one opens at `header\n{line}`. A freshly opened buffer is not re-checked,
/// so a line that can never fit still goes out as one oversized message
/// (logged, never split). Lengths are counted in characters, not bytes.
///
/// Empty `lines` yields no messages; a header-only message is never produced.
pub fn chunk_lines(lines: &[String], header: &str, max_len: usize) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let header_chars = header.chars().count();
    let mut chunks = Vec::new();
    let mut buf = header.to_string();
    let mut buf_chars = header_chars;
    let mut lines_in_buf = 0usize;

    for line in lines {
        let line_chars = line.chars().count();
        let candidate_chars = if buf.is_empty() {
            line_chars
        } else {
            buf_chars + 1 + line_chars
        };

        if candidate_chars <= max_len {
            if !buf.is_empty() {
                buf.push('\n');
            }
            buf.push_str(line);
            buf_chars = candidate_chars;
            lines_in_buf += 1;
        } else {
            if lines_in_buf > 0 {
                chunks.push(std::mem::take(&mut buf));
            }
            buf = format!("{header}\n{line}");
            buf_chars = header_chars + 1 + line_chars;
            lines_in_buf = 1;
            if buf_chars > max_len {
                warn!(
                    "line of {line_chars} chars exceeds max message length {max_len}, sending oversized message"
                );
            }
        }
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }
    chunks
}
