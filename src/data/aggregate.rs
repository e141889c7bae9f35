use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::filter::FilteredTable;
use super::model::{PokeType, Record, Region};

// ---------------------------------------------------------------------------
// Selector enums
// ---------------------------------------------------------------------------

/// Which numeric column a region statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Height,
    Weight,
}

impl Measure {
    pub fn of(self, rec: &Record) -> f64 {
        match self {
            Measure::Height => rec.height,
            Measure::Weight => rec.weight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Measure::Height => "Height",
            Measure::Weight => "Weight",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Measure::Height => "m",
            Measure::Weight => "kg",
        }
    }
}

/// Summary statistic offered in the Height / Weight tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    #[default]
    Min,
    Mean,
    Max,
}

impl Statistic {
    pub const ALL: [Statistic; 3] = [Statistic::Min, Statistic::Mean, Statistic::Max];
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Statistic::Min => "Min",
            Statistic::Mean => "Mean",
            Statistic::Max => "Max",
        })
    }
}

// ---------------------------------------------------------------------------
// Type frequency
// ---------------------------------------------------------------------------

/// Occurrences of one type in the exploded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCount {
    pub ptype: PokeType,
    pub count: usize,
}

/// Count type occurrences, one per (record, type) slot.
///
/// Only selected types that occur at least once are returned. Ordered by
/// descending count; equal counts keep the order in which the types were
/// first seen.
pub fn type_counts(view: &FilteredTable<'_>, selected: &BTreeSet<PokeType>) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for ptype in view.iter().flat_map(|rec| rec.types.iter().copied()) {
        match counts.iter_mut().find(|c| c.ptype == ptype) {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount { ptype, count: 1 }),
        }
    }
    counts.retain(|c| selected.contains(&c.ptype));
    // sort_by is stable, so first-seen order survives among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Total number of type slots in the view (dual-type records count twice).
pub fn total_type_slots(view: &FilteredTable<'_>) -> usize {
    view.iter().map(|rec| rec.types.len()).sum()
}

// ---------------------------------------------------------------------------
// Per-region statistics
// ---------------------------------------------------------------------------

/// One scalar per region present in the view, Kanto → Unova.
pub type RegionStat = BTreeMap<Region, f64>;

/// Count, extrema and mean of one measure within a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSummary {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl RegionSummary {
    pub fn get(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Min => self.min,
            Statistic::Mean => self.mean,
            Statistic::Max => self.max,
        }
    }
}

/// Per-region summary of `measure`. Regions without rows are absent.
pub fn region_summary(view: &FilteredTable<'_>, measure: Measure) -> BTreeMap<Region, RegionSummary> {
    let mut acc: BTreeMap<Region, (usize, f64, f64, f64)> = BTreeMap::new();
    for rec in view.iter() {
        let v = measure.of(rec);
        let (count, sum, min, max) = acc
            .entry(rec.region)
            .or_insert((0, 0.0, f64::INFINITY, f64::NEG_INFINITY));
        *count += 1;
        *sum += v;
        *min = min.min(v);
        *max = max.max(v);
    }

    acc.into_iter()
        .map(|(region, (count, sum, min, max))| {
            // Float summation can land the mean a ulp outside the extrema.
            let mean = (sum / count as f64).clamp(min, max);
            (
                region,
                RegionSummary {
                    count,
                    min,
                    mean,
                    max,
                },
            )
        })
        .collect()
}

/// `stat` of `measure`, grouped by region.
pub fn region_stat(view: &FilteredTable<'_>, measure: Measure, stat: Statistic) -> RegionStat {
    region_summary(view, measure)
        .into_iter()
        .map(|(region, summary)| (region, summary.get(stat)))
        .collect()
}

// ---------------------------------------------------------------------------
// Height vs weight
// ---------------------------------------------------------------------------

/// Ordinary least-squares line `weight = slope * height + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Centered sums over the (height, weight) pairs.
struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
    /// Every height is identical.
    x_constant: bool,
    /// Every weight is identical.
    y_constant: bool,
}

fn moments(view: &FilteredTable<'_>) -> Option<Moments> {
    let n = view.len();
    if n < 2 {
        return None;
    }
    let mut sum = (0.0, 0.0);
    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
    for rec in view.iter() {
        sum.0 += rec.height;
        sum.1 += rec.weight;
        x_range = (x_range.0.min(rec.height), x_range.1.max(rec.height));
        y_range = (y_range.0.min(rec.weight), y_range.1.max(rec.weight));
    }
    let mean_x = sum.0 / n as f64;
    let mean_y = sum.1 / n as f64;

    // Centred sums are not exactly zero for a constant column whose value
    // has no exact binary form, so constancy comes from the range instead.
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for rec in view.iter() {
        let dx = rec.height - mean_x;
        let dy = rec.weight - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    Some(Moments {
        mean_x,
        mean_y,
        sxx,
        syy,
        sxy,
        x_constant: x_range.0 == x_range.1,
        y_constant: y_range.0 == y_range.1,
    })
}

/// Pearson correlation between height and weight.
///
/// `None` with fewer than two rows or when either column is constant.
pub fn pearson(view: &FilteredTable<'_>) -> Option<f64> {
    let m = moments(view)?;
    if m.x_constant || m.y_constant || m.sxx <= 0.0 || m.syy <= 0.0 {
        return None;
    }
    let r = m.sxy / (m.sxx.sqrt() * m.syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Regression of weight on height. `None` when height is constant.
pub fn linear_fit(view: &FilteredTable<'_>) -> Option<LinearFit> {
    let m = moments(view)?;
    if m.x_constant || m.sxx <= 0.0 {
        return None;
    }
    let slope = m.sxy / m.sxx;
    Some(LinearFit {
        slope,
        intercept: m.mean_y - slope * m.mean_x,
    })
}
