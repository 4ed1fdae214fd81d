pub fn mean(data: &[u64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|x| *x as f64).sum::<f64>() / data.len() as f64
}

/// Population standard deviation
pub fn std_deviation(data: &[u64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let variance = data
        .iter()
        .map(|x| (*x as f64 - mean).powi(2))
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}

/// Nearest rank percentile of sorted data, `pct` in `0.0..=1.0`
///
/// Index is `floor((n + 1) * pct) - 1`, clamped into the slice.
pub fn percentile_of_sorted(sorted: &[u64], pct: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((sorted.len() + 1) as f64 * pct).floor() - 1.0;
    let index = (rank.max(0.0) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Indices of the values whose z-score is at or beyond `threshold`
///
/// Nothing is an outlier when all values are equal.
pub fn find_outliers_by_zscore(data: &[u64], threshold: f64) -> Vec<usize> {
    let mean = mean(data);
    let std_dev = std_deviation(data, mean);
    if std_dev == 0.0 {
        return Vec::new();
    }
    data.iter()
        .enumerate()
        .filter_map(|(i, &x)| {
            if ((x as f64 - mean) / std_dev).abs() >= threshold {
                Some(i)
            } else {
                None
            }
        })
        .collect()
}

pub fn remove_indices<T>(vec: &mut Vec<T>, indices: &[usize]) {
    let mut indices_sorted = indices.to_vec();
    indices_sorted.sort_unstable_by(|a, b| b.cmp(a));
    for &index in &indices_sorted {
        if index < vec.len() {
            vec.remove(index);
        }
    }
}
