//! Building the header row for an export and validating the header row of an import.

use tracing::debug;

use crate::{
    error::Error,
    plural_rules::PluralRule,
    schema::{SchemaMode, TRANSLATION_LABEL, standard_fields},
};

/// Ordered column labels for an export in `mode`.
///
/// The translation columns depend on the locale: the binary rule gets "Singular"/"Plural"
/// columns, a single-form locale one plain `Translation` column, and any other locale one column
/// per plural form labeled with example quantities.
pub fn build_header(rule: &dyn PluralRule, mode: SchemaMode) -> Vec<String> {
    let mut header: Vec<String> = mode
        .fixed_fields()
        .iter()
        .map(|field| field.label().to_string())
        .collect();
    header.extend(translation_labels(rule, mode));
    header
}

/// Labels of the translation columns only.
pub fn translation_labels(rule: &dyn PluralRule, mode: SchemaMode) -> Vec<String> {
    let form_count = rule.form_count();

    if rule.is_binary() {
        return vec![
            mode.translation_label("Singular"),
            mode.translation_label("Plural"),
        ];
    }
    if form_count <= 1 {
        return vec![TRANSLATION_LABEL.to_string()];
    }

    (0..form_count)
        .map(|index| {
            let numbers = rule
                .numbers_for_index(index)
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            mode.translation_label(&numbers)
        })
        .collect()
}

/// Number of translation columns written for `rule`.
pub fn translation_column_count(rule: &dyn PluralRule) -> usize {
    rule.form_count().max(1)
}

/// Checks an imported header against the standard strict header.
///
/// Cells are compared positionally; comparison stops when the header runs out of cells, and
/// cells past the last translation slot are not checked. Every offending label is reported.
pub fn validate_header(header: &[String]) -> Result<(), Error> {
    let errors: Vec<String> = standard_fields()
        .zip(header)
        .filter(|(field, label)| !field.accepts_label(label))
        .map(|(_, label)| label.clone())
        .collect();

    if errors.is_empty() {
        return Ok(());
    }

    debug!(
        "An error occurred while importing the CSV file: Invalid column headers found ({})",
        errors.join(", ")
    );
    Err(Error::HeaderMismatch(errors))
}
