//! Multi-line text views over list fields.
//!
//! Forms edit list-valued fields (job requirements, benefits) as one entry
//! per line. [`join`] renders the list; [`parse`] reads it back, dropping
//! lines that are blank after trimming and keeping the rest verbatim.

/// Render a list as newline-separated text.
pub fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split text on `\n`, discarding blank lines.
pub fn parse(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
