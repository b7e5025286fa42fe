//! Grouping of flat measure lists into per-set views.
//!
//! Both views are keyed by [`Measure::full_set_name`]. Maps are ordered so
//! downstream stages never depend on hash iteration order; values inside a
//! bucket keep input order.

use std::collections::BTreeMap;

use crate::measure::Measure;

/// Suffix appended to every iteration-view set name.
pub const BY_ITERATIONS_SUFFIX: &str = " by iterations";

/// Full set name → browser → sample values.
pub type SetGroups = BTreeMap<String, BTreeMap<String, Vec<f64>>>;

/// Full set name (with [`BY_ITERATIONS_SUFFIX`]) → iteration → measures.
pub type IterationGroups = BTreeMap<String, BTreeMap<String, Vec<Measure>>>;

/// Collect every measure's value under `[full set name][browser]`.
pub fn group_by_set(measures: &[Measure]) -> SetGroups {
    let mut groups = SetGroups::new();
    for m in measures {
        groups
            .entry(m.full_set_name())
            .or_default()
            .entry(m.browser.clone())
            .or_default()
            .push(m.value);
    }
    groups
}

/// Collect full measure records under `[full set name + suffix][iteration]`.
pub fn group_by_iteration(measures: &[Measure]) -> IterationGroups {
    let mut groups = IterationGroups::new();
    for m in measures {
        let set_name = m.full_set_name() + BY_ITERATIONS_SUFFIX;
        groups
            .entry(set_name)
            .or_default()
            .entry(m.iteration.clone())
            .or_default()
            .push(m.clone());
    }
    groups
}
