//! Canonical field-name form used for sensitive-key matching.
//!
//! Field names arrive in every style a codebase can produce (`apiKey`,
//! `API_KEY`, `api-key`, `ApiKey`). Matching happens on a single snake_case
//! form so the denylist only needs one spelling per name.

/// Separator inserted at word boundaries.
const SEPARATOR: char = '_';

fn is_separator(ch: char) -> bool {
    matches!(ch, '-' | '_' | ' ' | '\t' | '\n' | '\r')
}

/// Converts a field name into its canonical snake_case form.
///
/// Word boundaries are detected at:
/// - lowercase → uppercase (`fooBar` → `foo_bar`)
/// - the last capital of an uppercase run followed by lowercase
///   (`HTTPRequest` → `http_request`)
/// - uppercase → digit and digit → uppercase (`SomeID2` → `some_id_2`,
///   `123Numbers` → `123_numbers`)
///
/// Runs of whitespace, `-` and `_` collapse into one `_`, and separators at
/// either end are dropped. Characters without case are kept as they are.
///
/// ```rust
/// use logscrub::normalize;
///
/// assert_eq!(normalize("HTTPRequest"), "http_request");
/// assert_eq!(normalize("HTTP_REQUEST"), "http_request");
/// assert_eq!(normalize("api-key"), "api_key");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut out = String::with_capacity(trimmed.len() + 4);
    let mut prev: Option<char> = None;

    for (index, &curr) in chars.iter().enumerate() {
        if is_separator(curr) {
            if prev.is_some_and(|p| !is_separator(p)) {
                out.push(SEPARATOR);
            }
            prev = Some(curr);
            continue;
        }

        if let Some(p) = prev {
            if curr.is_uppercase() {
                let next_is_lower = chars.get(index + 1).is_some_and(|n| n.is_lowercase());
                if p.is_lowercase() || (p.is_uppercase() && next_is_lower) {
                    out.push(SEPARATOR);
                }
            }
        }

        if curr.is_numeric() {
            if prev.is_some_and(|p| !p.is_numeric() && p.is_uppercase()) {
                out.push(SEPARATOR);
            }
            out.push(curr);
        } else {
            if prev.is_some_and(char::is_numeric) && curr.is_uppercase() {
                out.push(SEPARATOR);
            }
            out.extend(curr.to_lowercase());
        }

        prev = Some(curr);
    }

    let end = out.trim_end_matches(SEPARATOR).len();
    out.truncate(end);
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::normalize;

    #[test]
    fn normalizes_common_styles() {
        let cases = [
            ("", ""),
            ("simple_string", "simple_string"),
            ("CamelCase", "camel_case"),
            ("ThisIsATest", "this_is_a_test"),
            ("HTTPRequest", "http_request"),
            ("http_request", "http_request"),
            ("HTTP_REQUEST", "http_request"),
            ("UpperCamelCase", "upper_camel_case"),
            ("  leadingAndTrailingSpaces  ", "leading_and_trailing_spaces"),
            ("MixedCaseAnd_underscores", "mixed_case_and_underscores"),
            ("ALL_CAPS_STRING", "all_caps_string"),
            ("already_snake_case", "already_snake_case"),
            ("123NumbersAtStart", "123_numbers_at_start"),
            ("NumbersInMiddle123Word", "numbers_in_middle123_word"),
            ("WordWithNumbersAtEnd123", "word_with_numbers_at_end123"),
            ("SomeID", "some_id"),
            ("SomeUUID", "some_uuid"),
            ("unicodeTest你好世界", "unicode_test你好世界"),
            ("  你好世界  ", "你好世界"),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "normalize({input:?})");
        }
    }

    #[test]
    fn separator_runs_collapse() {
        assert_eq!(normalize("api--key"), "api_key");
        assert_eq!(normalize("api - key"), "api_key");
        assert_eq!(normalize("api_\t_key"), "api_key");
    }

    #[test]
    fn separators_at_the_edges_are_dropped() {
        assert_eq!(normalize("_password"), "password");
        assert_eq!(normalize("password_"), "password");
        assert_eq!(normalize("--card-number--"), "card_number");
        assert_eq!(normalize("___"), "");
    }

    #[test]
    fn uppercase_before_digit_gets_a_boundary() {
        assert_eq!(normalize("CVV2"), "cvv_2");
        assert_eq!(normalize("cvv2"), "cvv2");
        assert_eq!(normalize("ssnLast4"), "ssn_last4");
    }

    #[test]
    fn non_latin_letters_keep_their_case_mapping() {
        assert_eq!(normalize("ÜberName"), "über_name");
        assert_eq!(normalize("ПарольПользователя"), "пароль_пользователя");
    }

    proptest! {
        #[test]
        fn output_is_lowercase_snake(input in "[A-Za-z0-9 _-]{0,24}") {
            let out = normalize(&input);
            prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(!out.contains("__"));
            prop_assert!(!out.contains('-'));
            prop_assert!(!out.contains(' '));
            prop_assert!(!out.starts_with('_'));
            prop_assert!(!out.ends_with('_'));
        }

        #[test]
        fn never_panics_on_arbitrary_text(input in "\\PC{0,32}") {
            let _ = normalize(&input);
        }
    }
}
