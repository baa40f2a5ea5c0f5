use serde::Serialize;
use thiserror::Error;

use crate::counters::InstructionCounters;
use crate::model::ClassRecordStore;

pub(crate) mod hierarchy;
pub(crate) mod overrides;

use hierarchy::resolve_depths;
use overrides::count_overrides;

/// Aggregate metrics for one analyzed input.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricsReport {
    pub(crate) average_inheritance_depth: f64,
    pub(crate) max_inheritance_depth: usize,
    pub(crate) average_override_count: f64,
    pub(crate) average_field_count: f64,
    pub(crate) complexity_score: f64,
}

#[derive(Debug, Error)]
pub(crate) enum MetricsError {
    #[error("cyclic class hierarchy through {class}")]
    CyclicHierarchy { class: String },
}

/// Compute the report from a completed store and counter set.
pub(crate) fn calculate_metrics(
    store: &ClassRecordStore,
    counters: &InstructionCounters,
) -> Result<MetricsReport, MetricsError> {
    let parents = store.parent_edges();
    let depths = resolve_depths(&parents)?;
    let depth_sum: usize = depths.values().sum();
    let max_inheritance_depth = depths.values().copied().max().unwrap_or(0);

    let override_sum: usize = store
        .iter()
        .map(|(name, _)| count_overrides(store, name))
        .sum();

    let mut field_sum = 0;
    let mut field_classes = 0;
    for (_, record) in store.iter() {
        if record.field_count > 0 {
            field_sum += record.field_count;
            field_classes += 1;
        }
    }

    Ok(MetricsReport {
        average_inheritance_depth: average(depth_sum, depths.len()),
        max_inheritance_depth,
        average_override_count: average(override_sum, store.len()),
        average_field_count: average(field_sum, field_classes),
        complexity_score: counters.abc_magnitude(),
    })
}

fn average(sum: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
