use serde::{Deserialize, Serialize};

/// Chart-ready data extracted from one sheet.
///
/// `values[category][group]`; a `None` is a point that is not plotted.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct ChartSeries {
    pub title: String,
    pub groups: Vec<String>,
    pub categories: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// One rectangle of a stacked bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub category: usize,
    pub group: usize,
    pub bottom: f64,
    pub top: f64,
}

impl ChartSeries {
    pub fn value(&self, category: usize, group: usize) -> Option<f64> {
        self.values.get(category)?.get(group).copied().flatten()
    }

    /// Sum of the present values of each group.
    pub fn group_totals(&self) -> Vec<f64> {
        (0..self.groups.len())
            .map(|g| {
                (0..self.categories.len())
                    .filter_map(|c| self.value(c, g))
                    .sum::<f64>()
            })
            .collect()
    }

    /// Stacks every present value in category order.
    ///
    /// Positive values grow upward from zero, negative values downward,
    /// each sign with its own running offset per group.
    pub fn stacked_segments(&self) -> Vec<Segment> {
        let mut up = vec![0.0; self.groups.len()];
        let mut down = vec![0.0; self.groups.len()];
        let mut segments = Vec::new();

        for category in 0..self.categories.len() {
            for group in 0..self.groups.len() {
                let Some(v) = self.value(category, group) else {
                    continue;
                };
                let offset = if v >= 0.0 { &mut up[group] } else { &mut down[group] };
                let bottom = *offset;
                *offset += v;
                segments.push(Segment {
                    category,
                    group,
                    bottom,
                    top: *offset,
                });
            }
        }
        segments
    }

    /// `(lowest, highest)` reached by any stack, always including zero.
    pub fn value_bounds(&self) -> (f64, f64) {
        self.stacked_segments()
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), s| {
                (lo.min(s.bottom.min(s.top)), hi.max(s.bottom.max(s.top)))
            })
    }

    /// Category labels that appear more than once, in first-seen order.
    pub fn duplicate_categories(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = Vec::new();
        for (i, label) in self.categories.iter().enumerate() {
            if label.is_empty() || dups.contains(&label.as_str()) {
                continue;
            }
            if self.categories[..i].contains(label) {
                dups.push(label);
            }
        }
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartSeries {
        ChartSeries {
            title: String::new(),
            groups: vec!["USA".into(), "China".into()],
            categories: vec!["Labour".into(), "Electricity".into(), "Wafer".into()],
            values: vec![
                vec![Some(1.0), Some(0.5)],
                vec![None, Some(0.25)],
                vec![Some(2.0), Some(-0.5)],
            ],
        }
    }

    #[test]
    fn totals_skip_absent_points() {
        assert_eq!(sample().group_totals(), vec![3.0, 0.25]);
    }

    #[test]
    fn segments_stack_in_category_order() {
        let segments = sample().stacked_segments();
        let usa: Vec<_> = segments.iter().filter(|s| s.group == 0).collect();
        assert_eq!(usa.len(), 2);
        assert_eq!((usa[0].category, usa[0].bottom, usa[0].top), (0, 0.0, 1.0));
        assert_eq!((usa[1].category, usa[1].bottom, usa[1].top), (2, 1.0, 3.0));

        let china: Vec<_> = segments.iter().filter(|s| s.group == 1).collect();
        assert_eq!(china[2].bottom, 0.0);
        assert_eq!(china[2].top, -0.5);
        assert_eq!(sample().value_bounds(), (-0.5, 3.0));
    }

    #[test]
    fn duplicates_are_reported_once() {
        let mut series = sample();
        series.categories = vec!["A".into(), "".into(), "A".into(), "".into(), "A".into()];
        assert_eq!(series.duplicate_categories(), vec!["A"]);
    }
}
