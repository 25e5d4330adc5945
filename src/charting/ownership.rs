//! Institutional ownership breakdown.

use serde::Serialize;
use utoipa::ToSchema;

/// How many holders are reported and counted as institutional.
pub const TOP_HOLDERS: usize = 10;

pub const RETAIL_LABEL: &str = "Retail";
pub const INSIDER_LABEL: &str = "Insider";
pub const INSTITUTIONAL_LABEL: &str = "Institutional";

const SLICE_COLORS: [&str; 3] = ["#3b82f6", "#9ca3af", "#22c55e"];

#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionalHolder {
    pub name: String,
    pub shares: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalOwner {
    pub name: String,
    pub total_shares: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PieDataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub datasets: Vec<PieDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipBreakdown {
    pub institutional_owners: Vec<InstitutionalOwner>,
    pub institutional_breakdown: PieChart,
}

/// Splits `outstanding` shares into retail, insider and institutional
/// percentages using the largest [`TOP_HOLDERS`] institutional positions.
///
/// Insider data is not available from any provider, so that slice is
/// always zero.
pub fn ownership_breakdown(holders: &[InstitutionalHolder], outstanding: f64) -> OwnershipBreakdown {
    let mut top: Vec<&InstitutionalHolder> = holders
        .iter()
        .filter(|h| h.shares.is_finite())
        .collect();
    top.sort_by(|a, b| b.shares.total_cmp(&a.shares));
    top.truncate(TOP_HOLDERS);

    let slices = if outstanding > 0.0 && outstanding.is_finite() {
        let held: f64 = top.iter().map(|h| h.shares.max(0.0)).sum();
        let institutional = held.min(outstanding);
        let retail_and_insider = outstanding - institutional;
        [
            retail_and_insider / outstanding * 100.0,
            0.0,
            institutional / outstanding * 100.0,
        ]
    } else {
        [0.0; 3]
    };

    OwnershipBreakdown {
        institutional_owners: top
            .into_iter()
            .map(|h| InstitutionalOwner {
                name: h.name.clone(),
                total_shares: h.shares,
            })
            .collect(),
        institutional_breakdown: PieChart {
            labels: vec![
                RETAIL_LABEL.to_string(),
                INSIDER_LABEL.to_string(),
                INSTITUTIONAL_LABEL.to_string(),
            ],
            datasets: vec![PieDataset {
                data: slices.to_vec(),
                background_color: SLICE_COLORS.iter().map(|c| c.to_string()).collect(),
            }],
        },
    }
}
