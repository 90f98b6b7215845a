use crate::stats::Bin;

/// Fixed label column width so bars line up across a chart.
pub const LABEL_WIDTH: usize = 15;

const FILL: char = '█';

/// Renders `(label, count)` entries as horizontal bars scaled against the
/// largest count in the chart. Input order is preserved; the caller sorts.
pub fn render_bars(entries: &[(String, usize)], max_bar_width: usize) -> Vec<String> {
    let peak = entries.iter().map(|&(_, count)| count).max().unwrap_or(1).max(1);

    entries
        .iter()
        .map(|(label, count)| {
            let len = (*count as f64 / peak as f64 * max_bar_width as f64).round() as usize;
            let bar: String = std::iter::repeat(FILL).take(len).collect();
            format!(
                "{:<lw$} {:<bw$} {}",
                clip(label),
                bar,
                count,
                lw = LABEL_WIDTH,
                bw = max_bar_width
            )
        })
        .collect()
}

/// Chart entries for a numeric column's histogram bins.
pub fn bin_entries(bins: &[Bin]) -> Vec<(String, usize)> {
    bins.iter()
        .map(|bin| {
            (
                format!("{}..{}", fmt_bound(bin.lower), fmt_bound(bin.upper)),
                bin.count,
            )
        })
        .collect()
}

fn clip(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        label.chars().take(LABEL_WIDTH).collect()
    } else {
        label.to_string()
    }
}

fn fmt_bound(v: f64) -> String {
    if v.abs() >= 10000.0 || (v != 0.0 && v.abs() < 0.01) {
        format!("{v:.1e}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|&(l, c)| (l.to_string(), c)).collect()
    }

    #[test]
    fn peak_bar_spans_full_width() {
        let lines = render_bars(&entries(&[("a", 4), ("b", 2)]), 20);
        let bar_len = |line: &str| line.chars().filter(|&c| c == FILL).count();
        assert_eq!(bar_len(&lines[0]), 20);
        assert_eq!(bar_len(&lines[1]), 10);
    }

    #[test]
    fn counts_are_appended() {
        let lines = render_bars(&entries(&[("a", 3)]), 10);
        assert!(lines[0].ends_with(" 3"));
    }

    #[test]
    fn labels_align() {
        let lines = render_bars(&entries(&[("short", 1), ("a-very-long-category-name", 1)]), 8);
        let bar_col = |line: &str| line.chars().position(|c| c == FILL).unwrap();
        assert_eq!(bar_col(&lines[0]), bar_col(&lines[1]));
        assert!(!lines[1].contains("a-very-long-category-name"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_bars(&[], 20).is_empty());
    }

    #[test]
    fn all_zero_counts_do_not_divide_by_zero() {
        let lines = render_bars(&entries(&[("a", 0), ("b", 0)]), 20);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.contains(FILL)));
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = entries(&[("x", 5), ("y", 1)]);
        assert_eq!(render_bars(&input, 30), render_bars(&input, 30));
    }

    #[test]
    fn bin_labels_are_compact() {
        let bins = vec![Bin {
            lower: 0.0,
            upper: 123456.0,
            count: 1,
        }];
        let labeled = bin_entries(&bins);
        assert_eq!(labeled[0].0, "0.00..1.2e5");
    }
}
