//! Escaping of free text placed inside a quoted CSV cell.
//!
//! Line breaks and tabs never reach the file as control characters: they are written as the
//! two-character sequences `\n` and `\t`, which keeps every entry on a single CRLF-delimited row.
//! Authored text that already contains a literal `\n` or `\t` is indistinguishable from an
//! escaped line break or tab when backslashes are not escaped too.

/// Which characters are escaped on export (and restored on import).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// Backslash and double quote are backslash-escaped; CR, LF and tab become `\n` / `\t`.
    Full,
    /// Only CR, LF and tab become `\n` / `\t`; quotes and backslashes pass through.
    LineBreaks,
}

impl Escaping {
    /// Escapes `text` for output in a quoted cell.
    pub fn escape(self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' | '"' if self == Escaping::Full => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                '\r' | '\n' => escaped.push_str(r"\n"),
                '\t' => escaped.push_str(r"\t"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Restores text escaped by [`Escaping::escape`].
    ///
    /// `Full` follows C-style unescaping: `\n`, `\t` and `\r` become control characters and any
    /// other escaped character stands for itself. `LineBreaks` only restores `\n` and `\t`.
    pub fn unescape(self, text: &str) -> String {
        let mut unescaped = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' {
                unescaped.push(c);
                continue;
            }
            let Some(&next) = chars.peek() else {
                // A trailing backslash has nothing to escape.
                unescaped.push(c);
                break;
            };
            match (self, next) {
                (_, 'n') => unescaped.push('\n'),
                (_, 't') => unescaped.push('\t'),
                (Escaping::Full, 'r') => unescaped.push('\r'),
                (Escaping::Full, other) => unescaped.push(other),
                (Escaping::LineBreaks, _) => {
                    unescaped.push(c);
                    continue;
                }
            }
            chars.next();
        }
        unescaped
    }
}

/// Escapes `text` with [`Escaping::Full`].
pub fn escape(text: &str) -> String {
    Escaping::Full.escape(text)
}

/// Unescapes `text` with [`Escaping::Full`].
pub fn unescape(text: &str) -> String {
    Escaping::Full.unescape(text)
}
