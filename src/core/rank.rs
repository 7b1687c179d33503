use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Rank the values in ascending order starting from 1.
///
/// Tied values share the mean of the positions they occupy, so `[1, 1, 2]` ranks as `[1.5, 1.5, 3]`.
#[expect(clippy::cast_precision_loss)]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let order = (0..values.len()).sorted_by_key(|&index| OrderedFloat(values[index])).collect_vec();
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    for group in order.chunk_by(|&lhs, &rhs| OrderedFloat(values[lhs]) == OrderedFloat(values[rhs]))
    {
        let end = start + group.len();
        let rank = (start + 1 + end) as f64 / 2.0;
        for &index in group {
            ranks[index] = rank;
        }
        start = end;
    }
    ranks
}

/// Rank the values so that the highest one gets rank 1, averaging the ties.
#[expect(clippy::cast_precision_loss)]
pub fn exceedance_ranks(values: &[f64]) -> Vec<f64> {
    let n_values = values.len() as f64;
    average_ranks(values).into_iter().map(|rank| n_values + 1.0 - rank).collect()
}
