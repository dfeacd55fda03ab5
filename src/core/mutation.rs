use crate::error::{DoxyfillError, Result};
use super::Insertion;

/// Splice every insertion into `buffer`, returning the new text.
///
/// All offsets refer to `buffer` as given. Insertions are applied from the
/// highest offset down, so text already spliced in never shifts an offset
/// that is still pending. The output is assembled in one linear pass.
pub fn apply_insertions(buffer: &str, mut insertions: Vec<Insertion>) -> Result<String> {
    insertions.sort_by(|a, b| b.offset.cmp(&a.offset));

    if let Some(bad) = insertions.iter().find(|ins| !buffer.is_char_boundary(ins.offset)) {
        return Err(DoxyfillError::Mutation(format!(
            "offset {} is outside the {}-byte buffer or splits a character",
            bad.offset,
            buffer.len()
        )));
    }

    // Walking down from the end, each insertion owns the buffer slice up to
    // the previous (higher) offset
    let mut segments = Vec::with_capacity(insertions.len());
    let mut prev = buffer.len();
    for insertion in &insertions {
        segments.push((insertion.text.as_str(), &buffer[insertion.offset..prev]));
        prev = insertion.offset;
    }

    let added: usize = insertions.iter().map(|ins| ins.text.len()).sum();
    let mut output = String::with_capacity(buffer.len() + added);
    output.push_str(&buffer[..prev]);
    for (text, tail) in segments.iter().rev() {
        output.push_str(text);
        output.push_str(tail);
    }

    Ok(output)
}
