use crate::types::Value;
use std::collections::HashMap;

/// Descriptive summary of a numeric column over its non-missing values.
/// `std_dev` is `None` when fewer than two values exist.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    pub top: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum ColumnSummary {
    /// `None` when the column holds no numeric values at all.
    Numeric(Option<NumericSummary>),
    Categorical(CategoricalSummary),
}

/// One histogram bucket. Bounds are inclusive at `lower` and exclusive at
/// `upper` except for the last bin, which closes at the column maximum.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

pub fn numeric_values(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_number).collect()
}

/// Mean and sample standard deviation (n-1 denominator) written out
/// explicitly so the numeric behavior is exactly what is documented here.
pub fn summarize_numeric(values: &[Value]) -> Option<NumericSummary> {
    let numbers = numeric_values(values);
    if numbers.is_empty() {
        return None;
    }

    let count = numbers.len();
    let mut min = numbers[0];
    let mut max = numbers[0];
    let mut sum = 0.0;
    for &n in &numbers {
        if n < min {
            min = n;
        }
        if n > max {
            max = n;
        }
        sum += n;
    }
    let mean = sum / count as f64;

    let std_dev = if count >= 2 {
        let sq_diff: f64 = numbers.iter().map(|n| (n - mean) * (n - mean)).sum();
        Some((sq_diff / (count - 1) as f64).sqrt())
    } else {
        None
    };

    Some(NumericSummary {
        count,
        min,
        max,
        mean,
        std_dev,
    })
}

pub fn summarize_categorical(values: &[Value], top_n: usize) -> CategoricalSummary {
    let freq = frequency_table(values);
    let unique_count = freq.len();
    CategoricalSummary {
        unique_count,
        top: rank_entries(freq, top_n),
    }
}

/// Counts each distinct label in first-appearance order. Missing cells count
/// under their own explicit bucket rather than being dropped.
fn frequency_table(values: &[Value]) -> Vec<(String, usize)> {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        let label = value.label();
        match order.get(&label) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                order.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}

fn rank_entries(mut freq: Vec<(String, usize)>, top_n: usize) -> Vec<(String, usize)> {
    // Stable sort keeps first-seen order among equal counts.
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    freq.truncate(top_n);
    freq
}

/// Ranks distinct labels by descending count and truncates to `top_n`.
pub fn rank_values(values: &[Value], top_n: usize) -> Vec<(String, usize)> {
    rank_entries(frequency_table(values), top_n)
}

/// Partitions `values` into `bin_count` equal-width bins spanning
/// [min, max]. The last bin is closed at `max` so boundary values are never
/// dropped; empty bins are kept so charts show gaps faithfully.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }
    let bin_count = bin_count.max(1);

    let mut min = values[0];
    let mut max = values[0];
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        // Floating-point placement at the top edge clamps into the last bin.
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}
