//! Field predicates for matching playbook triggers against resources.

/// `None` matches anything; otherwise the values must be equal.
#[must_use]
pub fn exact_match<T: PartialEq + ?Sized>(expected: Option<&T>, value: &T) -> bool {
    expected.map_or(true, |expected| expected == value)
}

/// An empty or absent prefix matches anything. A missing value never
/// matches a non-empty prefix.
#[must_use]
pub fn prefix_match(prefix: Option<&str>, value: Option<&str>) -> bool {
    match prefix {
        None | Some("") => true,
        Some(prefix) => value.is_some_and(|v| v.starts_with(prefix)),
    }
}
