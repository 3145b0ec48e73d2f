//! Comma-separated identifier lists for many-to-many references
//!
//! Some records keep their related ids (a procedure's policies, an
//! application's databases) as one comma-separated string instead of a join
//! table. Older rows mix display names with ids, so writers re-resolve every
//! entry against the current option set before saving.

use std::collections::HashSet;

/// A selectable reference: the id that gets stored and the name users see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOption {
    pub id: String,
    pub name: String,
}

impl ReferenceOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Split a stored list into trimmed, non-empty, de-duplicated entries
///
/// Order of first occurrence is preserved.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.to_string()))
        .map(str::to_string)
        .collect()
}

/// Join ids back into the stored representation
pub fn format_id_list<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolve every entry of a stored list to a valid id
///
/// Entries match an option id exactly, or else an option name
/// case-insensitively. Entries matching neither are dropped.
pub fn resolve_reference_list(raw: &str, options: &[ReferenceOption]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut resolved = vec![];

    for entry in parse_id_list(raw) {
        let hit = options
            .iter()
            .find(|o| o.id == entry)
            .or_else(|| {
                options
                    .iter()
                    .find(|o| o.name.trim().eq_ignore_ascii_case(&entry))
            });

        match hit {
            Some(option) => {
                if seen.insert(option.id.clone()) {
                    resolved.push(option.id.clone());
                }
            }
            None => log::debug!(entry = entry.as_str(); "dropping unresolvable reference"),
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> Vec<ReferenceOption> {
        vec![
            ReferenceOption::new("p-1", "Data Retention"),
            ReferenceOption::new("p-2", "Access Control"),
            ReferenceOption::new("p-3", "Encryption at Rest"),
        ]
    }

    #[test]
    fn test_parse_trims_and_dedupes() {
        assert_eq!(parse_id_list(" a, b,,a ,c ,"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ,").is_empty());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_id_list(&["a", " b ", ""]), "a,b");
        assert_eq!(format_id_list::<&str>(&[]), "");
    }

    #[test]
    fn test_resolve_mixed_names_and_ids() {
        let resolved = resolve_reference_list("p-2, data retention, Unknown Policy", &options());
        assert_eq!(resolved, vec!["p-2", "p-1"]);
    }

    #[test]
    fn test_resolve_collapses_name_and_id_of_same_option() {
        let resolved = resolve_reference_list("p-3,Encryption at Rest", &options());
        assert_eq!(resolved, vec!["p-3"]);
    }
}
