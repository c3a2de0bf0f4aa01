use gpcsv::{
    CodecOptions, CsvCodec, LocalePluralRule, PluralRule, SchemaMode, TranslationEntry, escape,
    unescape,
};
use proptest::prelude::*;

const LOCALES: &[&str] = &["en", "fr", "ja", "ru", "pl", "ar"];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[A-Za-z0-9 ,.%"\\\n\t!?éü]{1,20}"#).expect("valid regex")
}

fn plain_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 .!?éü]{1,20}").expect("valid regex")
}

fn reference_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z/._-]{1,12}:[0-9]{1,4}").expect("valid regex")
}

fn strict_entry_strategy(forms: usize) -> impl Strategy<Value = TranslationEntry> {
    (
        prop::option::of(text_strategy()),
        text_strategy(),
        prop::option::of(text_strategy()),
        prop::option::of(text_strategy()),
        prop::collection::vec(reference_strategy(), 0..3),
        prop::collection::vec(prop::option::of(text_strategy()), forms),
    )
        .prop_map(
            |(context, singular, plural, extracted_comments, references, mut translations)| {
                // Import cannot tell a trailing missing form from an absent one.
                while matches!(translations.last(), Some(None)) {
                    translations.pop();
                }
                TranslationEntry {
                    context,
                    singular,
                    plural,
                    extracted_comments,
                    references,
                    translations,
                }
            },
        )
}

fn strict_case() -> impl Strategy<Value = (LocalePluralRule, Vec<TranslationEntry>)> {
    prop::sample::select(LOCALES).prop_flat_map(|code| {
        let rule = LocalePluralRule::for_locale(code).expect("known locale");
        let forms = rule.form_count().max(1);
        (
            Just(rule),
            prop::collection::vec(strict_entry_strategy(forms), 0..6),
        )
    })
}

fn minimal_entry_strategy() -> impl Strategy<Value = TranslationEntry> {
    (
        plain_text_strategy(),
        prop::option::of(plain_text_strategy()),
        prop::option::of(plain_text_strategy()),
        prop::option::of(plain_text_strategy()),
    )
        .prop_map(|(singular, plural, first, second)| TranslationEntry {
            context: None,
            singular,
            plural,
            extracted_comments: None,
            references: Vec::new(),
            translations: vec![first, second],
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unescape_inverts_escape(text in "[^\r]{0,40}") {
        prop_assert_eq!(unescape(&escape(&text)), text);
    }

    #[test]
    fn strict_export_then_import_preserves_entries((rule, entries) in strict_case()) {
        let codec = CsvCodec::new();
        let csv = codec.export(&rule, &entries);
        let imported = codec
            .import_str(&csv)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(imported.into_entries(), entries);
    }

    #[test]
    fn minimal_export_then_import_preserves_entries(
        entries in prop::collection::vec(minimal_entry_strategy(), 1..6)
    ) {
        let rule = LocalePluralRule::for_locale("en").expect("known locale");
        let codec = CsvCodec::with_options(CodecOptions::new().with_mode(SchemaMode::Minimal));
        let csv = codec.export(&rule, &entries);
        let imported = codec
            .import_str(&csv)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(imported.into_entries(), entries);
    }

    #[test]
    fn every_exported_row_has_header_width((rule, entries) in strict_case()) {
        let codec = CsvCodec::new();
        let width = codec.header(&rule).len();
        for entry in &entries {
            prop_assert_eq!(codec.export_row(&rule, entry).len(), width);
        }
    }
}
