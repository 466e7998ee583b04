//! Placeholder substitution engine

use super::map::PlaceholderMap;
use super::{CLOSE, OPEN};

/// Substitute `{{key}}` tokens in a template with values from `values`.
///
/// Keys are matched literally. The template is scanned once from left to
/// right and inserted values are never rescanned, so a value that itself
/// contains `{{other}}` is emitted verbatim. When several keys match at the
/// same position the longest token wins. Tokens without a mapping are left
/// in place.
pub fn substitute(template: &str, values: &PlaceholderMap) -> String {
    if values.is_empty() {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find(OPEN) {
        result.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        match token_at(tail, values) {
            Some((token_len, value)) => {
                result.push_str(value);
                rest = &tail[token_len..];
            }
            None => {
                // `{{{name}}` may still match one character later
                result.push('{');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Longest `{{key}}` token at the start of `tail`, as (byte length, value)
fn token_at<'a>(tail: &str, values: &'a PlaceholderMap) -> Option<(usize, &'a str)> {
    values
        .iter()
        .filter(|(key, _)| starts_with_token(tail, key))
        .map(|(key, value)| (OPEN.len() + key.len() + CLOSE.len(), value))
        .max_by_key(|(len, _)| *len)
}

fn starts_with_token(tail: &str, key: &str) -> bool {
    tail.strip_prefix(OPEN)
        .and_then(|rest| rest.strip_prefix(key))
        .is_some_and(|rest| rest.starts_with(CLOSE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::extract_placeholders;

    fn map(entries: &[(&str, &str)]) -> PlaceholderMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_substitute_simple() {
        let result = substitute("Hi {{name}}", &map(&[("name", "Ann")]));
        assert_eq!(result, "Hi Ann");
    }

    #[test]
    fn test_substitute_unmapped_preserved() {
        assert_eq!(substitute("Hi {{name}}", &map(&[])), "Hi {{name}}");
        assert_eq!(
            substitute("Hi {{name}} at {{company}}", &map(&[("name", "Ann")])),
            "Hi Ann at {{company}}"
        );
    }

    #[test]
    fn test_substitute_multiple_occurrences() {
        let values = map(&[("company", "Acme"), ("position", "Engineer")]);
        let result = substitute(
            "I want the {{position}} role at {{company}}. {{company}} rocks.",
            &values,
        );
        assert_eq!(result, "I want the Engineer role at Acme. Acme rocks.");
    }

    #[test]
    fn test_substitute_keys_are_literal() {
        let values = map(&[("a.b", "dot"), ("(x)+", "group")]);
        assert_eq!(substitute("{{a.b}} {{axb}} {{(x)+}}", &values), "dot {{axb}} group");
    }

    #[test]
    fn test_substitute_is_single_pass() {
        let values = map(&[("a", "{{b}}"), ("b", "B")]);
        assert_eq!(substitute("{{a}} {{b}}", &values), "{{b}} B");

        let reversed = map(&[("b", "B"), ("a", "{{b}}")]);
        assert_eq!(substitute("{{a}} {{b}}", &reversed), "{{b}} B");
    }

    #[test]
    fn test_substitute_with_extra_braces() {
        let values = map(&[("a", "v")]);
        assert_eq!(substitute("{{{a}}}", &values), "{v}");
        assert_eq!(substitute("{{ {{a}}", &values), "{{ v");
    }

    #[test]
    fn test_substitute_key_containing_close_brace() {
        let values = map(&[("a}b", "x"), ("a", "y")]);
        assert_eq!(substitute("{{a}b}} {{a}}", &values), "x y");
    }

    #[test]
    fn test_substitute_empty_value() {
        assert_eq!(substitute("[{{gap}}]", &map(&[("gap", "")])), "[]");
    }

    #[test]
    fn test_substitute_unicode() {
        let values = map(&[("név", "Ádám")]);
        assert_eq!(substitute("Kedves {{név}}!", &values), "Kedves Ádám!");
    }

    #[test]
    fn test_full_map_leaves_no_tokens() {
        let template = "Dear {{company}},\n\nI am applying for {{position}}.\n{{name}}";
        let mut values = PlaceholderMap::new();
        for name in extract_placeholders(template) {
            values.add_or_update(name.clone(), format!("<{}>", name)).unwrap();
        }

        let letter = substitute(template, &values);
        assert!(extract_placeholders(&letter).is_empty());

        values.add_or_update("name", "{{signature}}").unwrap();
        let letter = substitute(template, &values);
        assert!(!extract_placeholders(&letter).is_empty());
    }

    #[test]
    fn test_empty_token_is_never_substituted() {
        let values: PlaceholderMap = [("", "x"), ("a", "1")].into_iter().collect();
        assert_eq!(substitute("{{}} {{a}}", &values), "{{}} 1");
    }
}
