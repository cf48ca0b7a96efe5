/// Keep at most `max_chars` characters of `content`.
///
/// Counts Unicode scalar values, not bytes, so the cut always lands on a
/// valid UTF-8 boundary. Nothing is appended to mark the cut. Returns the
/// kept slice and whether anything was dropped.
pub fn truncate_chars(content: &str, max_chars: usize) -> (&str, bool) {
    // Byte length bounds char count from above, so short content skips the scan.
    if content.len() <= max_chars {
        return (content, false);
    }
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&content[..byte_idx], true),
        None => (content, false),
    }
}
