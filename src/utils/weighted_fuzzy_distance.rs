use strsim::jaro_winkler;

/// Computes the smallest weighted distance between `query` and any weighted field value.
///
/// Each value is compared with Jaro-Winkler similarity; its distance (`1 - similarity`) is
/// divided by the field weight, so heavier fields tolerate more difference.
///
/// # Arguments
/// * `query` - The lowercased entity name.
/// * `fields` - `(weight, value)` pairs; values are expected to be lowercased.
///
/// # Returns
/// `None` if no field values were provided.
pub fn weighted_fuzzy_distance<'a>(
    query: &str,
    fields: impl IntoIterator<Item = (f64, &'a str)>,
) -> Option<f64> {
    fields
        .into_iter()
        .filter(|(weight, value)| *weight > 0.0 && !value.is_empty())
        .map(|(weight, value)| (1.0 - jaro_winkler(query, value)) / weight)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_value_has_zero_distance() {
        let distance = weighted_fuzzy_distance("tencent", [(1.0, "tencent"), (0.5, "other")]);
        assert_eq!(distance, Some(0.0));
    }

    #[test]
    fn test_heavier_field_yields_smaller_distance() {
        let heavy = weighted_fuzzy_distance("tencnt", [(1.0, "tencent")]).unwrap();
        let light = weighted_fuzzy_distance("tencnt", [(0.5, "tencent")]).unwrap();
        assert!(heavy < light);
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(weighted_fuzzy_distance("tencent", Vec::<(f64, &str)>::new()), None);
    }
}
