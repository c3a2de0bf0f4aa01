use std::{borrow::Cow, fmt::Write};

use gpcsv::TranslationCollection;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Values longer than this many terminal columns are cut unless `--full` is given.
pub const MAX_VALUE_WIDTH: usize = 50;

/// Print a view of the entries in a collection.
pub fn print_view(collection: &TranslationCollection, full: bool) {
    print!("{}", render_view(collection, full));
}

/// Renders the listing printed by `view`.
pub fn render_view(collection: &TranslationCollection, full: bool) -> String {
    let show = |value: &str| -> String {
        if full {
            value.to_string()
        } else {
            truncate(value, MAX_VALUE_WIDTH).into_owned()
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "Entries: {}", collection.len());

    for (i, entry) in collection.iter().enumerate() {
        let _ = writeln!(out, "\n  Entry {}: {}", i + 1, show(&entry.singular));

        if let Some(context) = &entry.context {
            let _ = writeln!(out, "    Context: {}", show(context));
        }
        if let Some(plural) = &entry.plural {
            let _ = writeln!(out, "    Plural: {}", show(plural));
        }
        if let Some(comments) = &entry.extracted_comments {
            let _ = writeln!(out, "    Comments: {}", show(comments));
        }
        for reference in &entry.references {
            let _ = writeln!(out, "    Reference: {}", reference);
        }

        if !entry.is_translated() {
            let _ = writeln!(out, "    (untranslated)");
            continue;
        }
        for (index, translation) in entry.translations.iter().enumerate() {
            if let Some(value) = translation {
                let _ = writeln!(out, "    [{}]: {}", index, show(value));
            }
        }
    }

    out
}

/// Cuts `value` to at most `max_width` display columns, appending `...` when anything was cut.
pub fn truncate(value: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(value) <= max_width {
        return Cow::Borrowed(value);
    }

    let mut width = 0;
    let mut cut = String::new();
    for ch in value.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        cut.push(ch);
    }
    cut.push_str("...");
    Cow::Owned(cut)
}
