//! Feature Registry
//!
//! Catalogue of the engineered features: what each one measures and which
//! merged columns it is derived from.

use serde::Serialize;
use std::collections::HashMap;

/// Feature groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureGroup {
    /// Day counts to fixed holiday anchors
    Calendar,
    /// Holiday-week flags
    Holiday,
    /// Promotional markdown aggregates
    Promotion,
    /// Integer encodings of categorical columns
    Encoding,
}

/// Feature metadata
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInfo {
    /// Output column name
    pub name: &'static str,
    /// Feature group
    pub group: FeatureGroup,
    /// Brief description of the feature
    pub description: &'static str,
    /// Merged-table columns the feature is derived from
    pub input_columns: &'static [&'static str],
}

/// All engineered features, in output column order.
///
/// `IsHoliday` and `Type` are rewritten in place, so they keep their merged
/// position; they are listed last here.
pub fn available_features() -> Vec<FeatureInfo> {
    vec![
        // Calendar
        FeatureInfo {
            name: "Days_to_Thanksgiving",
            group: FeatureGroup::Calendar,
            description: "Signed days from the row date to 2012-11-22",
            input_columns: &["Date"],
        },
        FeatureInfo {
            name: "Days_to_Christmas",
            group: FeatureGroup::Calendar,
            description: "Signed days from the row date to 2012-12-25",
            input_columns: &["Date"],
        },
        // Holiday weeks
        FeatureInfo {
            name: "SuperBowlWeek",
            group: FeatureGroup::Holiday,
            description: "Date falls in the Super Bowl week (2010-2012)",
            input_columns: &["Date"],
        },
        FeatureInfo {
            name: "LaborDay",
            group: FeatureGroup::Holiday,
            description: "Date is Labor Day (2010-2012)",
            input_columns: &["Date"],
        },
        FeatureInfo {
            name: "Thanksgiving",
            group: FeatureGroup::Holiday,
            description: "Date is Thanksgiving Day (2010-2012)",
            input_columns: &["Date"],
        },
        FeatureInfo {
            name: "Christmas",
            group: FeatureGroup::Holiday,
            description: "Date is Christmas Day (2010-2012)",
            input_columns: &["Date"],
        },
        // Promotion
        FeatureInfo {
            name: "MarkdownsSum",
            group: FeatureGroup::Promotion,
            description: "Sum of all MarkDown columns, missing counted as 0",
            input_columns: &["MarkDown1", "MarkDown2", "MarkDown3", "MarkDown4", "MarkDown5"],
        },
        // Encodings
        FeatureInfo {
            name: "IsHoliday",
            group: FeatureGroup::Encoding,
            description: "Holiday-week flag as 0/1",
            input_columns: &["IsHoliday"],
        },
        FeatureInfo {
            name: "Type",
            group: FeatureGroup::Encoding,
            description: "Store type A/B/C as 1/2/3, anything else 0",
            input_columns: &["Type"],
        },
    ]
}

/// Get features by group
pub fn features_by_group(group: FeatureGroup) -> Vec<FeatureInfo> {
    available_features()
        .into_iter()
        .filter(|f| f.group == group)
        .collect()
}

/// Get feature info by name
pub fn get_feature_info(name: &str) -> Option<FeatureInfo> {
    available_features().into_iter().find(|f| f.name == name)
}

/// Count features by group
pub fn count_by_group() -> HashMap<FeatureGroup, usize> {
    let mut counts = HashMap::new();
    for feature in available_features() {
        *counts.entry(feature.group).or_insert(0) += 1;
    }
    counts
}
