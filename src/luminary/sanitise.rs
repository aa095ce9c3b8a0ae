// Symbol and text sanitising for the Luminary assembler
//
// Both filters drop characters rather than escaping them: the assembler has no
// escape syntax for arbitrary bytes inside labels or dc.b strings.

use log::trace;

/// Prefix shared by every generated label
pub const LABEL_PREFIX: &str = "Yarn_";

/// Punctuation kept by `sanitise_text` in addition to ASCII letters and digits
pub const TEXT_PUNCTUATION: &str = "?!()/:', ";

/// Build an assembler label for `raw_name`, scoped to `program_name`.
///
/// Any path prefix on `raw_name` is discarded and everything but ASCII
/// letters and digits is removed from what remains. The program name is
/// used as given.
pub fn generate_label(program_name: &str, raw_name: &str) -> String {
    let file_name = final_path_segment(raw_name);
    let symbol: String = file_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if symbol.len() != file_name.len() {
        trace!("Label '{}' sanitised to '{}'", raw_name, symbol);
    }

    format!("{}{}_{}", LABEL_PREFIX, program_name, symbol)
}

/// Lossy filter for text emitted inside a quoted `dc.b` string.
///
/// Keeps ASCII letters, digits and `TEXT_PUNCTUATION`, silently dropping
/// everything else.
pub fn sanitise_text(raw_text: &str) -> String {
    let text: String = raw_text.chars().filter(|&c| is_text_safe(c)).collect();

    if text.len() != raw_text.len() {
        trace!("Text {:?} sanitised to {:?}", raw_text, text);
    }

    text
}

/// Whether `c` survives `sanitise_text`
pub fn is_text_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || TEXT_PUNCTUATION.contains(c)
}

/// Whether a program name can be used as a label scope without producing
/// illegal assembler identifiers
pub fn is_label_safe(program_name: &str) -> bool {
    !program_name.is_empty() && program_name.chars().all(|c| c.is_ascii_alphanumeric())
}

// Both separators are honoured so that labels don't depend on the host platform
fn final_path_segment(raw_name: &str) -> &str {
    raw_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw_name)
}
