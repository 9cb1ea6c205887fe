//! FILENAME: core/catalog/src/normalize.rs
//! PURPOSE: Canonical (snake_case) field naming for catalog records.
//! CONTEXT: The backend is inconsistent about key casing, so the same field
//! arrives as `table_count` from one endpoint and `tableCount` from another.
//! Keys are folded to snake_case once, at decode time, and nothing past this
//! point ever has to look a field up under two names.

/// Convert a field name to its canonical snake_case form.
///
/// - `tableCount` -> `table_count`
/// - `HTTPServer` -> `http_server`
/// - `upstreamDatasourceIDs` -> `upstream_datasource_ids`
/// - `owner-name` / `owner name` -> `owner_name`
pub fn canonical_field_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            push_separator(&mut out);
            continue;
        }

        if c.is_uppercase() {
            let prev = if i > 0 { chars.get(i - 1).copied() } else { None };
            let next = chars.get(i + 1).copied();
            let after_next = chars.get(i + 2).copied();

            let after_lower_or_digit = prev
                .map(|p| p.is_lowercase() || p.is_ascii_digit())
                .unwrap_or(false);
            let ends_acronym = prev.map(char::is_uppercase).unwrap_or(false)
                && next.map(char::is_lowercase).unwrap_or(false)
                && !is_plural_suffix(next, after_next);

            if after_lower_or_digit || ends_acronym {
                push_separator(&mut out);
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('_') {
        out.push('_');
    }
}

/// A lone trailing `s` after an acronym (`IDs`, `URLs`) belongs to the acronym.
fn is_plural_suffix(next: Option<char>, after_next: Option<char>) -> bool {
    next == Some('s')
        && after_next
            .map(|c| !c.is_lowercase())
            .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_becomes_snake_case() {
        assert_eq!(canonical_field_name("tableCount"), "table_count");
        assert_eq!(canonical_field_name("usageCount"), "usage_count");
        assert_eq!(canonical_field_name("isCertified"), "is_certified");
    }

    #[test]
    fn snake_case_is_unchanged() {
        assert_eq!(canonical_field_name("table_count"), "table_count");
        assert_eq!(canonical_field_name("luid"), "luid");
    }

    #[test]
    fn acronyms_are_kept_together() {
        assert_eq!(canonical_field_name("HTTPServer"), "http_server");
        assert_eq!(canonical_field_name("upstreamDatasourceIDs"), "upstream_datasource_ids");
        assert_eq!(canonical_field_name("datasourceID"), "datasource_id");
        assert_eq!(canonical_field_name("URLsList"), "urls_list");
    }

    #[test]
    fn separators_and_digits() {
        assert_eq!(canonical_field_name("owner-name"), "owner_name");
        assert_eq!(canonical_field_name("owner name"), "owner_name");
        assert_eq!(canonical_field_name("field2Name"), "field2_name");
        assert_eq!(canonical_field_name("__id"), "id");
        assert_eq!(canonical_field_name("trailing_"), "trailing");
    }
}
