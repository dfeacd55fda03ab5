//! Detection of declarations that already carry a comment.
//!
//! Only the nearest non-blank line above a declaration is inspected. A
//! line comment there, or the closing line of a block comment, counts as
//! documentation; a comment trailing code on that line does not. This is
//! what makes repeated runs over the same file leave previously inserted
//! blocks alone.

const LINE_COMMENT: &str = "//";
const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

/// Whether the declaration starting at `start` is already documented
pub fn is_documented(buffer: &str, start: usize) -> bool {
    let Some(before) = buffer.get(..start) else {
        return false;
    };

    let mut lines = before
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(previous) = lines.next() else {
        return false;
    };

    if previous.starts_with(LINE_COMMENT) {
        return true;
    }

    if !previous.contains(BLOCK_CLOSE) {
        return false;
    }

    // `/* ... */` on one line documents only when nothing precedes it
    if previous.contains(BLOCK_OPEN) {
        return previous.starts_with(BLOCK_OPEN);
    }

    for line in lines {
        match (line.rfind(BLOCK_OPEN), line.rfind(BLOCK_CLOSE)) {
            // Another comment closes on this line, so the closer below was never opened
            (Some(open), Some(close)) if close > open => return false,
            (Some(_), _) => return true,
            (None, Some(_)) => return false,
            (None, None) => {}
        }
    }

    false
}
