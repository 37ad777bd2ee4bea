//! Comment and blank-line removal for program text.

/// Marker that starts a trailing comment.
pub const COMMENT_MARKER: &str = "//";

/// Truncate each line at its first `//` and drop lines left empty.
///
/// Trailing whitespace is removed; leading whitespace (the indentation) is kept.
pub fn strip<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(strip_line).collect()
}

/// Strip a single line; `None` when nothing but whitespace remains.
pub fn strip_line(line: &str) -> Option<&str> {
    let code = match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let code = code.trim_end();
    (!code.is_empty()).then_some(code)
}
