/// Sentinel category that selects every listing.
pub const ALL_CATEGORIES: &str = "All";

pub trait Categorized {
    fn category(&self) -> &str;
}

/// Normalise a category query parameter; `None` means no filtering.
pub fn selected_category(category: Option<&str>) -> Option<&str> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

pub fn filter_by_category<T: Categorized>(items: Vec<T>, category: Option<&str>) -> Vec<T> {
    match selected_category(category) {
        Some(selected) => items
            .into_iter()
            .filter(|item| item.category() == selected)
            .collect(),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, &'static str);

    impl Categorized for Item {
        fn category(&self) -> &str {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item("wrench", "Hand Tools"),
            Item("drill", "Power Tools"),
            Item("pliers", "Hand Tools"),
        ]
    }

    #[test]
    fn keeps_only_matching_category() {
        let filtered = filter_by_category(items(), Some("Hand Tools"));
        assert_eq!(
            filtered,
            vec![Item("wrench", "Hand Tools"), Item("pliers", "Hand Tools")]
        );
    }

    #[test]
    fn all_returns_full_set() {
        assert_eq!(filter_by_category(items(), Some("All")).len(), 3);
        assert_eq!(filter_by_category(items(), None).len(), 3);
        assert_eq!(filter_by_category(items(), Some("  ")).len(), 3);
    }

    #[test]
    fn unknown_category_is_empty() {
        assert!(filter_by_category(items(), Some("Plumbing")).is_empty());
    }
}
