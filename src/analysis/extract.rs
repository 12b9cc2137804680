/// Returns the slice between the first `{` and the last `}` (inclusive).
///
/// Braces inside the surrounding prose are not distinguished from the JSON
/// block, so a stray `}` after the block widens the region and the parse fails.
pub fn json_region(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
