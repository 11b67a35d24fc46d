//! Prefix filtering over the sorted index list.
//!
//! Every function here assumes its input is sorted by upper-cased label.
//! Under that order all entries sharing a prefix form one contiguous run, which
//! is what lets the scan stop at the first miss after a hit. Use
//! [`first_unsorted`] to check the precondition when the list comes from an
//! untrusted page.

/// Outcome of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    /// One flag per input entry, `true` when the entry stays visible.
    pub visible: Vec<bool>,
    /// Number of entries whose label starts with the query.
    pub match_count: usize,
    /// Index of the first matching entry.
    pub first_match: Option<usize>,
}

impl FilterResult {
    fn all_visible(len: usize) -> Self {
        Self {
            visible: vec![true; len],
            match_count: len,
            first_match: (len > 0).then_some(0),
        }
    }

    /// Indices of the visible entries, in order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(idx, shown)| shown.then_some(idx))
    }
}

/// Normalized query: upper-cased once so each comparison is a plain prefix test.
struct Needle {
    text: String,
    lead: char,
}

impl Needle {
    fn new(query: &str) -> Option<Self> {
        let text = query.to_uppercase();
        let lead = text.chars().next()?;
        Some(Self { text, lead })
    }

    fn matches(&self, label: &str) -> bool {
        let label = label.to_uppercase();
        // Cheap first-character check before the full prefix test.
        label.chars().next() == Some(self.lead) && label.starts_with(&self.text)
    }
}

/// Filters `labels` down to the entries that start with `query`, ignoring case.
///
/// An empty query shows everything. Otherwise entries before the matching run
/// are tested and hidden one by one; once a match has been seen, the first
/// miss ends the scan and the rest of the list is hidden untested.
pub fn filter_sorted<L: AsRef<str>>(labels: &[L], query: &str) -> FilterResult {
    let Some(needle) = Needle::new(query) else {
        return FilterResult::all_visible(labels.len());
    };

    let mut result = FilterResult {
        visible: vec![false; labels.len()],
        match_count: 0,
        first_match: None,
    };

    for (idx, label) in labels.iter().enumerate() {
        if needle.matches(label.as_ref()) {
            result.visible[idx] = true;
            result.match_count += 1;
            result.first_match.get_or_insert(idx);
        } else if result.match_count > 0 {
            break;
        }
    }

    result
}

/// Returns the index of the first label starting with `query`, stopping at
/// the first hit. An empty query never matches.
pub fn first_prefix_match<L: AsRef<str>>(labels: &[L], query: &str) -> Option<usize> {
    let needle = Needle::new(query)?;
    labels
        .iter()
        .position(|label| needle.matches(label.as_ref()))
}

/// Returns the first position whose label sorts before its predecessor under
/// case-insensitive ordering, or `None` when the list is sorted.
pub fn first_unsorted<L: AsRef<str>>(labels: &[L]) -> Option<usize> {
    let mut previous: Option<String> = None;
    for (idx, label) in labels.iter().enumerate() {
        let current = label.as_ref().to_uppercase();
        if let Some(prev) = &previous
            && current < *prev
        {
            return Some(idx);
        }
        previous = Some(current);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visible_labels<'a>(labels: &[&'a str], result: &FilterResult) -> Vec<&'a str> {
        result.visible_indices().map(|idx| labels[idx]).collect()
    }

    #[test]
    fn test_prefix_not_substring() {
        let labels = ["Apple", "Banana", "Cherry", "Cranberry"];
        let result = filter_sorted(&labels, "cr");
        assert_eq!(visible_labels(&labels, &result), vec!["Cranberry"]);
        assert_eq!(result.match_count, 1);
        assert_eq!(result.first_match, Some(3));
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let labels = ["Apple", "Banana", "Cherry"];
        let result = filter_sorted(&labels, "");
        assert_eq!(result.visible, vec![true, true, true]);
        assert_eq!(result.match_count, 3);
    }

    #[test]
    fn test_no_match_hides_everything() {
        let labels = ["Apple", "Banana", "Cherry"];
        let result = filter_sorted(&labels, "z");
        assert_eq!(result.visible, vec![false, false, false]);
        assert_eq!(result.match_count, 0);
        assert_eq!(result.first_match, None);
    }

    #[test]
    fn test_query_longer_than_labels() {
        let labels = ["a", "ab", "abc"];
        let result = filter_sorted(&labels, "abcdefgh");
        assert_eq!(result.match_count, 0);
        assert!(result.visible.iter().all(|shown| !shown));
    }

    #[test]
    fn test_query_matching_all_entries() {
        let labels = ["ns::a", "NS::b", "ns::c"];
        let result = filter_sorted(&labels, "Ns::");
        assert_eq!(result.match_count, labels.len());
        assert!(result.visible.iter().all(|shown| *shown));
    }

    #[test]
    fn test_empty_list() {
        let labels: [&str; 0] = [];
        let result = filter_sorted(&labels, "x");
        assert!(result.visible.is_empty());
        assert_eq!(result.match_count, 0);
        assert_eq!(first_prefix_match(&labels, "x"), None);
    }

    #[test]
    fn test_stops_after_matching_run() {
        // The trailing "cab" is out of order on purpose: a correct early exit
        // never reaches it.
        let labels = ["apple", "cat", "catalog", "dog", "cab"];
        let result = filter_sorted(&labels, "ca");
        assert_eq!(visible_labels(&labels, &result), vec!["cat", "catalog"]);
        assert_eq!(result.first_match, Some(1));
    }

    #[test]
    fn test_duplicates_and_mixed_case() {
        let labels = ["Set", "set", "SET", "setup", "zip"];
        let result = filter_sorted(&labels, "SeT");
        assert_eq!(result.match_count, 4);
        assert_eq!(result.visible, vec![true, true, true, true, false]);
    }

    #[test]
    fn test_first_prefix_match() {
        let labels = ["Apple", "Banana", "Cherry", "Cranberry"];
        assert_eq!(first_prefix_match(&labels, "c"), Some(2));
        assert_eq!(first_prefix_match(&labels, "CRAN"), Some(3));
        assert_eq!(first_prefix_match(&labels, ""), None);
        assert_eq!(first_prefix_match(&labels, "q"), None);
    }

    #[test]
    fn test_first_unsorted() {
        assert_eq!(first_unsorted(&["a", "B", "c"]), None);
        assert_eq!(first_unsorted(&["a", "a", "A"]), None);
        assert_eq!(first_unsorted(&["b", "a"]), Some(1));
        assert_eq!(first_unsorted::<&str>(&[]), None);
    }

    fn sorted_labels() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-cA-C]{0,4}", 0..24).prop_map(|mut labels| {
            labels.sort_by_key(|label| label.to_uppercase());
            labels
        })
    }

    proptest! {
        #[test]
        fn visible_set_is_exactly_the_prefix_matches(
            labels in sorted_labels(),
            query in "[a-cA-C]{1,3}",
        ) {
            let result = filter_sorted(&labels, &query);
            let upper = query.to_uppercase();
            let expected: Vec<bool> = labels
                .iter()
                .map(|label| label.to_uppercase().starts_with(&upper))
                .collect();

            prop_assert_eq!(&result.visible, &expected);
            prop_assert_eq!(result.match_count, expected.iter().filter(|m| **m).count());
            prop_assert_eq!(result.first_match, expected.iter().position(|m| *m));
        }

        #[test]
        fn matches_form_one_contiguous_run(
            labels in sorted_labels(),
            query in "[a-cA-C]{1,2}",
        ) {
            let result = filter_sorted(&labels, &query);
            let shown: Vec<usize> = result.visible_indices().collect();
            if let (Some(first), Some(last)) = (shown.first(), shown.last()) {
                prop_assert_eq!(last - first + 1, shown.len());
            }
        }
    }
}
