use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use unic_langid::LanguageIdentifier;

use crate::{error::Error, plural_expression::PluralExpression};

/// How many example quantities are listed per plural form in column labels.
const EXAMPLES_PER_FORM: usize = 3;

/// Quantities below this bound are searched for examples.
const EXAMPLE_SEARCH_LIMIT: u64 = 1000;

lazy_static! {
    /// Locale code → (number of plural forms, gettext plural expression), GlotPress style codes.
    static ref LOCALE_TABLE: BTreeMap<&'static str, (usize, &'static str)> = {
        let mut m = BTreeMap::new();

        // One/other with a singular of exactly one
        for code in [
            "en", "de", "nl", "sv", "da", "nb", "nn", "fi", "et", "it", "es", "pt", "el",
            "hu", "bg", "ca", "eu", "gl", "af", "sw", "he", "hi", "bn", "ur", "fa", "sq",
        ] {
            m.insert(code, (2, "n != 1"));
        }

        // One/other where zero is singular too
        for code in ["fr", "pt_BR", "tr", "fil", "hy", "oc"] {
            m.insert(code, (2, "n > 1"));
        }

        // No plural distinction
        for code in ["ja", "zh", "zh_CN", "zh_TW", "ko", "th", "vi", "id", "ms", "km", "lo", "my"] {
            m.insert(code, (1, "0"));
        }

        for code in ["ru", "uk", "be", "sr", "hr", "bs"] {
            m.insert(
                code,
                (3, "(n % 10 == 1 && n % 100 != 11) ? 0 : ((n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 12 || n % 100 > 14)) ? 1 : 2)"),
            );
        }

        m.insert(
            "pl",
            (3, "(n == 1) ? 0 : ((n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 12 || n % 100 > 14)) ? 1 : 2)"),
        );

        for code in ["cs", "sk"] {
            m.insert(code, (3, "(n == 1) ? 0 : ((n >= 2 && n <= 4) ? 1 : 2)"));
        }

        m.insert(
            "lt",
            (3, "(n % 10 == 1 && (n % 100 < 11 || n % 100 > 19)) ? 0 : ((n % 10 >= 2 && n % 10 <= 9 && (n % 100 < 11 || n % 100 > 19)) ? 1 : 2)"),
        );
        m.insert("lv", (3, "(n % 10 == 1 && n % 100 != 11) ? 0 : (n != 0 ? 1 : 2)"));
        m.insert("ro", (3, "(n == 1) ? 0 : ((n == 0 || n % 100 >= 2 && n % 100 <= 19) ? 1 : 2)"));
        m.insert(
            "sl",
            (4, "(n % 100 == 1) ? 0 : ((n % 100 == 2) ? 1 : ((n % 100 == 3 || n % 100 == 4) ? 2 : 3))"),
        );
        m.insert("cy", (4, "(n == 1) ? 0 : ((n == 2) ? 1 : ((n != 8 && n != 11) ? 2 : 3))"));
        m.insert("ga", (5, "n == 1 ? 0 : n == 2 ? 1 : n < 7 ? 2 : n < 11 ? 3 : 4"));
        m.insert(
            "ar",
            (6, "n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : n % 100 >= 3 && n % 100 <= 10 ? 3 : n % 100 >= 11 && n % 100 <= 99 ? 4 : 5"),
        );

        m
    };

    static ref PLURAL_FORMS_REGEX: Regex =
        Regex::new(r"^\s*nplurals\s*=\s*(\d+)\s*;\s*plural\s*=\s*(.+?)\s*;?\s*$").unwrap();
}

/// The plural behaviour of a locale, as far as CSV column layout is concerned.
pub trait PluralRule {
    /// Number of plural forms, at least one.
    fn form_count(&self) -> usize;

    /// The gettext plural expression, e.g. `n != 1`.
    fn expression(&self) -> &str;

    /// Example quantities that select the form at `index`.
    fn numbers_for_index(&self, index: usize) -> Vec<u64>;

    /// Whether this is the common English-like rule with a "Singular" and a "Plural" form.
    fn is_binary(&self) -> bool {
        self.form_count() == 2 && is_binary_expression(self.expression())
    }
}

/// `n != 1`, ignoring whitespace and a trailing `;`.
pub fn is_binary_expression(expression: &str) -> bool {
    let compact: String = expression
        .trim()
        .trim_end_matches(';')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact == "n!=1"
}

/// A plural rule backed by a parsed gettext expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePluralRule {
    form_count: usize,
    expression: PluralExpression,
}

impl LocalePluralRule {
    pub fn new(form_count: usize, expression: &str) -> Result<Self, Error> {
        if form_count == 0 {
            return Err(Error::invalid_expression(
                "a locale needs at least one plural form",
            ));
        }
        Ok(Self {
            form_count,
            expression: PluralExpression::parse(expression)?,
        })
    }

    /// Parses a gettext `Plural-Forms` header value, e.g. `nplurals=2; plural=n != 1;`.
    pub fn from_plural_forms_header(header: &str) -> Result<Self, Error> {
        let captures = PLURAL_FORMS_REGEX.captures(header).ok_or_else(|| {
            Error::invalid_expression(format!("malformed Plural-Forms header `{}`", header))
        })?;
        let form_count = captures[1].parse::<usize>().map_err(|_| {
            Error::invalid_expression(format!("invalid nplurals `{}`", &captures[1]))
        })?;
        Self::new(form_count, &captures[2])
    }

    /// Looks up a built-in rule by locale code (`fr`, `pt_BR`, `pt-BR`, ...).
    ///
    /// A region-specific entry wins over the base language.
    pub fn for_locale(code: &str) -> Result<Self, Error> {
        let normalized = code.trim().replace('_', "-");
        let lang: LanguageIdentifier = normalized
            .parse()
            .map_err(|_| Error::UnknownLocale(code.to_string()))?;

        let language = lang.language.as_str();
        let regional = lang
            .region
            .map(|region| format!("{}_{}", language, region.as_str()));

        let (form_count, expression) = regional
            .as_deref()
            .and_then(|key| LOCALE_TABLE.get(key))
            .or_else(|| LOCALE_TABLE.get(language))
            .ok_or_else(|| Error::UnknownLocale(code.to_string()))?;

        Self::new(*form_count, expression)
    }

    /// Codes of all built-in locales.
    pub fn known_locales() -> impl Iterator<Item = &'static str> {
        LOCALE_TABLE.keys().copied()
    }

    /// Plural form selected for quantity `n`; out-of-range results fall back to the last form.
    pub fn index_for_number(&self, n: u64) -> usize {
        let index = usize::try_from(self.expression.evaluate(n)).unwrap_or(usize::MAX);
        index.min(self.form_count - 1)
    }
}

impl PluralRule for LocalePluralRule {
    fn form_count(&self) -> usize {
        self.form_count
    }

    fn expression(&self) -> &str {
        self.expression.source()
    }

    fn numbers_for_index(&self, index: usize) -> Vec<u64> {
        (0..EXAMPLE_SEARCH_LIMIT)
            .filter(|&n| self.index_for_number(n) == index)
            .take(EXAMPLES_PER_FORM)
            .collect()
    }
}
