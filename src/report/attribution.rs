/// Label for every transaction without a (visible) category.
pub const UNCATEGORIZED_LABEL: &str = "Otros";

/// Label a report row is attributed to.
///
/// Category names are used verbatim. A missing category (no reference, or a
/// reference that no longer resolves for the owner) maps to [`UNCATEGORIZED_LABEL`].
pub fn label_for(category_name: Option<&str>) -> String {
    match category_name {
        Some(name) => name.to_string(),
        None => UNCATEGORIZED_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_category_used_verbatim() {
        assert_eq!(label_for(Some("Food")), "Food");
        assert_eq!(label_for(Some("  food ")), "  food ");
    }

    #[test]
    fn test_missing_category_is_otros() {
        assert_eq!(label_for(None), "Otros");
    }

    #[test]
    fn test_empty_name_is_not_uncategorized() {
        assert_eq!(label_for(Some("")), "");
    }
}
