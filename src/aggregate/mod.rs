//! Aggregations over cleaned records.
//!
//! All functions are pure and deterministic: ties are broken by a fixed rule
//! (documented per function) rather than by hash-map iteration order.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::{SaleRecord, YearMonth};

/// Summed amount for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    /// Sum of the non-missing amounts; `0.0` when every amount is missing.
    pub total: f64,
    /// Records in the month.
    pub rows: usize,
    /// Records in the month that contributed an amount.
    pub amount_rows: usize,
}

/// A categorical value and its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Group records by month and sum their amounts, skipping missing ones.
///
/// The result is in chronological order.
pub fn monthly_totals(records: &[SaleRecord]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<YearMonth, MonthlyTotal> = BTreeMap::new();
    for r in records {
        let entry = by_month.entry(r.month).or_insert(MonthlyTotal {
            month: r.month,
            total: 0.0,
            rows: 0,
            amount_rows: 0,
        });
        entry.rows += 1;
        if let Some(amount) = r.amount {
            entry.total += amount;
            entry.amount_rows += 1;
        }
    }
    by_month.into_values().collect()
}

/// Month with the largest total; the earliest month wins a tie.
///
/// `series` must be chronological (as returned by `monthly_totals`).
pub fn peak_month(series: &[MonthlyTotal]) -> Option<&MonthlyTotal> {
    let mut best: Option<&MonthlyTotal> = None;
    for m in series {
        match best {
            Some(b) if m.total <= b.total => {}
            _ => best = Some(m),
        }
    }
    best
}

/// Sum of box counts; rows with a missing count contribute nothing.
pub fn total_boxes_shipped(records: &[SaleRecord]) -> i64 {
    records.iter().filter_map(|r| r.boxes_shipped).sum()
}

/// Most frequent value; ties go to the lowest value in lexical order.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    // BTreeMap iterates in ascending key order, so a strict `>` keeps the lowest key on ties.
    for (value, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v)
}

/// The `n` most frequent values, by descending count; ties keep first-appearance order.
pub fn top_counts<'a>(values: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<ValueCount> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for v in values {
        let c = counts.entry(v).or_insert(0);
        if *c == 0 {
            order.push(v);
        }
        *c += 1;
    }

    let mut ranked: Vec<ValueCount> = order
        .into_iter()
        .map(|v| ValueCount {
            value: v.to_string(),
            count: counts[v],
        })
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}
