/// Split `values` at the given positions into `indices.len() + 1`
/// consecutive slices.
///
/// Positions past the end are clamped to `values.len()`. A position smaller
/// than the one before it yields an empty slice and the next slice restarts
/// from it.
pub fn split_at_indices<'a, T>(values: &'a [T], indices: &[usize]) -> Vec<&'a [T]> {
    let mut parts = Vec::with_capacity(indices.len() + 1);
    let mut start = 0;
    for &index in indices {
        let end = index.min(values.len());
        parts.push(values.get(start..end).unwrap_or(&[]));
        start = end;
    }
    parts.push(&values[start..]);
    parts
}
