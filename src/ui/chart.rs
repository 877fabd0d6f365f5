use crate::data::filter::FilteredView;
use crate::data::model::{CategoryValue, GroupField};
use crate::stats::distribution::{income_by_attrition, BoxStats};
use crate::stats::grouped::{attrition_by, value_counts};
use crate::stats::kpi::KpiSummary;

// ---------------------------------------------------------------------------
// Display-ready shapes (no egui types, so they can be tested headless)
// ---------------------------------------------------------------------------

/// One labelled number in the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub category: CategoryValue,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Bars(Vec<BarDatum>),
    Boxes(Vec<(CategoryValue, BoxStats)>),
}

/// Everything a plot widget needs to draw one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Stable egui id.
    pub id: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub body: ChartBody,
}

impl ChartSpec {
    fn bars(
        id: &'static str,
        title: &'static str,
        x_label: &'static str,
        y_label: &'static str,
        rows: Vec<(CategoryValue, usize)>,
    ) -> Self {
        let bars = rows
            .into_iter()
            .map(|(category, value)| BarDatum { category, value })
            .collect();
        ChartSpec {
            id,
            title,
            x_label,
            y_label,
            body: ChartBody::Bars(bars),
        }
    }

    /// Category labels along the x axis, in drawing order.
    pub fn categories(&self) -> Vec<String> {
        match &self.body {
            ChartBody::Bars(bars) => bars.iter().map(|b| b.category.to_string()).collect(),
            ChartBody::Boxes(boxes) => boxes.iter().map(|(k, _)| k.to_string()).collect(),
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ChartBody::Bars(bars) => bars.is_empty(),
            ChartBody::Boxes(boxes) => boxes.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardView – the whole screen for one filter selection
// ---------------------------------------------------------------------------

/// Header metrics plus the five chart panels, in layout order:
/// overall, department, overtime, work-life balance, income distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub kpi: KpiSummary,
    pub metrics: [Metric; 3],
    pub charts: [ChartSpec; 5],
}

impl DashboardView {
    pub fn build(view: &FilteredView<'_>) -> Self {
        let kpi = KpiSummary::from_view(view);
        let metrics = [
            Metric {
                label: "Total Employees",
                value: kpi.total_employees.to_string(),
            },
            Metric {
                label: "Employees Left",
                value: kpi.attrition_count.to_string(),
            },
            Metric {
                label: "Attrition Rate (%)",
                value: kpi.rate_label(),
            },
        ];

        let overall = ChartSpec::bars(
            "overall_attrition",
            "Overall Employee Attrition",
            "Attrition",
            "Number of Employees",
            value_counts(view, GroupField::Attrition),
        );
        let department = ChartSpec::bars(
            "attrition_by_department",
            "Attrition by Department",
            "Department",
            "Employees Left",
            attrition_by(view, GroupField::Department).rows(),
        );
        let overtime = ChartSpec::bars(
            "attrition_by_overtime",
            "Attrition by Overtime",
            "Overtime",
            "Employees Left",
            attrition_by(view, GroupField::OverTime).rows(),
        );
        let work_life = ChartSpec::bars(
            "attrition_by_work_life_balance",
            "Attrition by Work-Life Balance",
            "Work-Life Balance Rating",
            "Employees Left",
            attrition_by(view, GroupField::WorkLifeBalance).rows(),
        );
        let income = ChartSpec {
            id: "income_by_attrition",
            title: "Monthly Income Distribution by Attrition",
            x_label: "Attrition",
            y_label: "Monthly Income",
            body: ChartBody::Boxes(income_by_attrition(view)),
        };

        DashboardView {
            kpi,
            metrics,
            charts: [overall, department, overtime, work_life, income],
        }
    }
}
