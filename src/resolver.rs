//! Bounds-checked lookup of display strings.

/// Returns the entry at `id`, or an empty string when `id` is outside the table. A missing name
/// is a display concern, so this never fails.
pub fn resolve<S: AsRef<str>>(table: &[S], id: impl Into<i64>) -> &str {
    usize::try_from(id.into())
        .ok()
        .and_then(|idx| table.get(idx))
        .map_or("", |name| name.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_in_range() {
        let table = ["", "Pound", "Karate Chop"];
        assert_eq!(resolve(&table, 1), "Pound");
        assert_eq!(resolve(&table, 2u16), "Karate Chop");
        assert_eq!(resolve(&table, 0u8), "");
    }

    #[test]
    fn test_resolve_is_total() {
        let table = vec![String::from("Hardy"), String::from("Lonely")];
        for id in [-1i64, -1000, 2, 3, i64::MAX, i64::MIN] {
            assert_eq!(resolve(&table, id), "", "{id}");
        }
        let empty: [&str; 0] = [];
        assert_eq!(resolve(&empty, 0), "");
    }
}
