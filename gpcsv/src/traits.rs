//! Extension points for customizing exported CSV files.

use crate::{plural_rules::PluralRule, types::TranslationEntry};

/// What a row hook knows about the row being exported.
pub struct RowContext<'a> {
    /// Project the strings belong to, when the caller supplied one.
    pub project: Option<&'a str>,
    pub rule: &'a dyn PluralRule,
    pub entry: &'a TranslationEntry,
}

/// Hooks run while exporting, allowing callers to add, remove or relabel columns.
///
/// Both hooks default to the identity. The rewritten header is written as-is, and rows are not
/// re-validated against it.
///
/// # Example
///
/// ```rust
/// use gpcsv::traits::{CsvHooks, RowContext};
/// use gpcsv::plural_rules::PluralRule;
///
/// struct Status;
///
/// impl CsvHooks for Status {
///     fn transform_header(&self, mut header: Vec<String>, _rule: &dyn PluralRule) -> Vec<String> {
///         header.push("Status".to_string());
///         header
///     }
///
///     fn transform_row(&self, mut row: Vec<String>, ctx: &RowContext<'_>) -> Vec<String> {
///         let status = if ctx.entry.is_translated() { "done" } else { "todo" };
///         row.push(status.to_string());
///         row
///     }
/// }
/// ```
pub trait CsvHooks {
    fn transform_header(&self, header: Vec<String>, _rule: &dyn PluralRule) -> Vec<String> {
        header
    }

    /// Receives the escaped cells of one row.
    fn transform_row(&self, row: Vec<String>, _ctx: &RowContext<'_>) -> Vec<String> {
        row
    }
}

/// Leaves header and rows untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CsvHooks for NoHooks {}

impl<H: CsvHooks + ?Sized> CsvHooks for &H {
    fn transform_header(&self, header: Vec<String>, rule: &dyn PluralRule) -> Vec<String> {
        (**self).transform_header(header, rule)
    }

    fn transform_row(&self, row: Vec<String>, ctx: &RowContext<'_>) -> Vec<String> {
        (**self).transform_row(row, ctx)
    }
}

impl<H: CsvHooks + ?Sized> CsvHooks for Box<H> {
    fn transform_header(&self, header: Vec<String>, rule: &dyn PluralRule) -> Vec<String> {
        (**self).transform_header(header, rule)
    }

    fn transform_row(&self, row: Vec<String>, ctx: &RowContext<'_>) -> Vec<String> {
        (**self).transform_row(row, ctx)
    }
}
