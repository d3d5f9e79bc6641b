//! Escaping for text placed inside fish string literals.

/// Escape text for use between fish single quotes.
///
/// Inside single quotes fish only treats `\\` and `\'` as escapes.
pub fn escape_single_quoted(text: &str) -> String {
  text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape text for use between fish double quotes.
///
/// `\`, `"` and `$` are escaped; a single quote is literal there.
pub fn escape_double_quoted(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '"' | '$') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}
