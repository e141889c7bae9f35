//! Chart descriptions built from the table and the current selections.
//!
//! Nothing here touches egui state; `ui::plot` turns a [`DashboardView`] into
//! widgets.

use eframe::egui::Color32;

use crate::color::{outline, to_color32, type_color, MEASURE_BAR, REGRESSION_LINE, SCATTER_POINT};
use crate::config::DECIMALS;
use crate::data::aggregate::{
    linear_fit, pearson, region_stat, region_summary, total_type_slots, type_counts, Measure,
    RegionSummary, Statistic,
};
use crate::data::filter::{filter_by_region, FilteredTable};
use crate::data::model::{PokeType, Region, Table};
use crate::state::Selections;

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    /// Text drawn above the bar.
    pub annotation: String,
    pub fill: Color32,
    pub stroke: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub id: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<BarSpec>,
}

impl BarChartSpec {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// Regression segment spanning the observed height range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionLine {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    pub point_color: Color32,
    pub regression: Option<RegressionLine>,
    pub correlation: Option<f64>,
}

impl ScatterSpec {
    pub fn correlation_text(&self) -> String {
        match self.correlation {
            Some(r) => format!("Correlation Coefficient: {r:.DECIMALS$}"),
            None => "Correlation Coefficient: undefined".to_string(),
        }
    }
}

/// Everything the dashboard draws for one set of selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_records: usize,
    pub visible_records: usize,
    /// Type entries after exploding dual-type records.
    pub type_slots: usize,
    /// Types present after region filtering, most frequent first.
    pub type_options: Vec<PokeType>,
    pub type_chart: BarChartSpec,
    pub height_chart: BarChartSpec,
    pub height_summary: Vec<(Region, RegionSummary)>,
    pub weight_chart: BarChartSpec,
    pub weight_summary: Vec<(Region, RegionSummary)>,
    pub scatter: ScatterSpec,
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Run filter → aggregate → describe for the current selections.
pub fn render(table: &Table, selections: &Selections) -> DashboardView {
    let view = filter_by_region(table, &selections.regions);
    if view.is_empty() {
        log::debug!("No records for regions {:?}", selections.regions);
    }

    let all_types = PokeType::ALL.into_iter().collect();
    let type_options = type_counts(&view, &all_types)
        .into_iter()
        .map(|c| c.ptype)
        .collect();

    let (height_chart, height_summary) = measure_chart(&view, Measure::Height, selections.height_stat);
    let (weight_chart, weight_summary) = measure_chart(&view, Measure::Weight, selections.weight_stat);

    DashboardView {
        total_records: table.len(),
        visible_records: view.len(),
        type_slots: total_type_slots(&view),
        type_options,
        type_chart: type_chart(&view, selections),
        height_chart,
        height_summary,
        weight_chart,
        weight_summary,
        scatter: scatter(&view),
    }
}

fn type_chart(view: &FilteredTable<'_>, selections: &Selections) -> BarChartSpec {
    let bars = type_counts(view, &selections.types)
        .into_iter()
        .map(|c| {
            let color = type_color(c.ptype);
            BarSpec {
                label: c.ptype.to_string(),
                value: c.count as f64,
                annotation: c.count.to_string(),
                fill: to_color32(color),
                stroke: to_color32(outline(color)),
            }
        })
        .collect();

    BarChartSpec {
        id: "type_counts",
        title: "Type Counts".to_string(),
        x_label: "Type".to_string(),
        y_label: "Count".to_string(),
        bars,
    }
}

fn measure_chart(
    view: &FilteredTable<'_>,
    measure: Measure,
    stat: Statistic,
) -> (BarChartSpec, Vec<(Region, RegionSummary)>) {
    let summary: Vec<(Region, RegionSummary)> = region_summary(view, measure).into_iter().collect();

    let bars = region_stat(view, measure, stat)
        .into_iter()
        .map(|(region, value)| {
            BarSpec {
                label: region.to_string(),
                value,
                annotation: format!("{value:.DECIMALS$}"),
                fill: to_color32(MEASURE_BAR),
                stroke: to_color32(outline(MEASURE_BAR)),
            }
        })
        .collect();

    let chart = BarChartSpec {
        id: match measure {
            Measure::Height => "height_by_region",
            Measure::Weight => "weight_by_region",
        },
        title: format!("Pokémon {} by Region ({stat})", measure.label()),
        x_label: "Region".to_string(),
        y_label: format!("{} ({})", measure.label(), measure.unit()),
        bars,
    };
    (chart, summary)
}

fn scatter(view: &FilteredTable<'_>) -> ScatterSpec {
    let points: Vec<[f64; 2]> = view.iter().map(|rec| [rec.height, rec.weight]).collect();

    let regression = linear_fit(view).map(|fit| {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[0]), hi.max(p[0]))
            });
        RegressionLine {
            start: [lo, fit.predict(lo)],
            end: [hi, fit.predict(hi)],
            color: to_color32(REGRESSION_LINE),
        }
    });

    ScatterSpec {
        title: "Height vs Weight Correlation".to_string(),
        x_label: "Height (m)".to_string(),
        y_label: "Weight (kg)".to_string(),
        points,
        point_color: to_color32(SCATTER_POINT),
        regression,
        correlation: pearson(view),
    }
}
