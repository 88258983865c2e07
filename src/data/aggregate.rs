//! Scalar and grouped statistics over the filtered rows.
//!
//! Every function takes the full dataset plus the indices that survived the
//! filter, so nothing here copies records.

use std::collections::BTreeMap;

use super::model::{SalaryDataset, SalaryRecord};

/// Headline metrics shown in the KPI row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub total_records: usize,
    /// Most frequent job title; empty when there are no rows.
    pub most_common_title: String,
}

/// One histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Mean salary for a group key (job title or country code).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

fn rows<'a>(
    dataset: &'a SalaryDataset,
    indices: &'a [usize],
) -> impl Iterator<Item = &'a SalaryRecord> + 'a {
    indices.iter().filter_map(|&i| dataset.records.get(i))
}

/// Running sum/count per key, kept sorted by key.
fn group_means<'a, I, K>(records: I, key: K) -> Vec<GroupMean>
where
    I: Iterator<Item = &'a SalaryRecord>,
    K: Fn(&'a SalaryRecord) -> &'a str,
{
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in records {
        let slot = acc.entry(key(rec)).or_insert((0.0, 0));
        slot.0 += rec.usd;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(k, (sum, count))| GroupMean {
            key: k.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// Mean, max, count and most frequent title. Zero/empty for no rows.
pub fn summarize(dataset: &SalaryDataset, indices: &[usize]) -> Summary {
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut count = 0usize;
    let mut title_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for rec in rows(dataset, indices) {
        sum += rec.usd;
        max = max.max(rec.usd);
        count += 1;
        *title_counts.entry(rec.job_title.as_str()).or_default() += 1;
    }

    if count == 0 {
        return Summary::default();
    }

    // BTreeMap iterates in sorted order, so the first title reaching the
    // highest count wins ties.
    let mut most_common = "";
    let mut best = 0;
    for (title, n) in title_counts {
        if n > best {
            best = n;
            most_common = title;
        }
    }

    Summary {
        mean_salary: sum / count as f64,
        max_salary: max,
        total_records: count,
        most_common_title: most_common.to_string(),
    }
}

/// The `n` job titles with the highest mean salary, ascending by mean.
pub fn top_titles_by_mean(dataset: &SalaryDataset, indices: &[usize], n: usize) -> Vec<GroupMean> {
    let mut groups = group_means(rows(dataset, indices), |r| r.job_title.as_str());
    // Highest first; equal means keep title order.
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    groups.truncate(n);
    groups.reverse();
    groups
}

/// Equal-width histogram of salaries over `[min, max]`.
pub fn salary_histogram(dataset: &SalaryDataset, indices: &[usize], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }
    let values: Vec<f64> = rows(dataset, indices).map(|r| r.usd).collect();
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let width = if range > 0.0 { range / bins as f64 } else { 1.0 };

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for v in values {
        let slot = if range > 0.0 {
            (((v - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        out[slot].count += 1;
    }
    out
}

/// Frequency of each remote-work type, most common first.
pub fn remote_counts(dataset: &SalaryDataset, indices: &[usize]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in rows(dataset, indices) {
        *counts.entry(rec.remote.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Mean salary per residence country, only over rows whose title is exactly `title`.
pub fn country_means(dataset: &SalaryDataset, indices: &[usize], title: &str) -> Vec<GroupMean> {
    group_means(
        rows(dataset, indices).filter(|r| r.job_title == title),
        |r| r.residence_iso3.as_str(),
    )
}

// ---------------------------------------------------------------------------
// Dashboard – everything the central panel needs for one filter state
// ---------------------------------------------------------------------------

/// Parameters that shape the grouped aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateParams {
    pub top_titles: usize,
    pub histogram_bins: usize,
    pub focus_title: String,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            top_titles: 10,
            histogram_bins: 30,
            focus_title: "Data Scientist".to_string(),
        }
    }
}

/// Precomputed view of the filtered rows. Rebuilt on every filter change.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub summary: Summary,
    pub top_titles: Vec<GroupMean>,
    pub histogram: Vec<HistogramBin>,
    pub remote: Vec<(String, usize)>,
    pub countries: Vec<GroupMean>,
}

impl Dashboard {
    pub fn compute(dataset: &SalaryDataset, indices: &[usize], params: &AggregateParams) -> Self {
        Dashboard {
            summary: summarize(dataset, indices),
            top_titles: top_titles_by_mean(dataset, indices, params.top_titles),
            histogram: salary_histogram(dataset, indices, params.histogram_bins),
            remote: remote_counts(dataset, indices),
            countries: country_means(dataset, indices, &params.focus_title),
        }
    }

    /// True when the filter left no rows; charts show a notice instead.
    pub fn is_empty(&self) -> bool {
        self.summary.total_records == 0
    }
}
