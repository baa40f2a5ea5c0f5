use std::collections::{BTreeMap, HashSet};

use super::MetricsError;

/// Resolve inheritance depth for every class reachable from `parents`.
///
/// The result also holds every ancestor visited on the way, including ancestors
/// without a parent edge of their own, which resolve to depth 0.
pub(crate) fn resolve_depths<'a>(
    parents: &BTreeMap<&'a str, &'a str>,
) -> Result<BTreeMap<&'a str, usize>, MetricsError> {
    let mut depths: BTreeMap<&'a str, usize> = BTreeMap::new();

    for &start in parents.keys() {
        if depths.contains_key(start) {
            continue;
        }

        // Climb until a memoized ancestor or a class with no known parent.
        let mut chain = Vec::new();
        let mut on_chain = HashSet::new();
        let mut current = start;
        let resolved = loop {
            if let Some(&depth) = depths.get(current) {
                break Some(depth);
            }
            if !on_chain.insert(current) {
                return Err(MetricsError::CyclicHierarchy {
                    class: current.to_string(),
                });
            }
            chain.push(current);
            match parents.get(current) {
                Some(&parent) => current = parent,
                None => break None,
            }
        };

        let mut depth = resolved.map_or(0, |depth| depth + 1);
        for name in chain.into_iter().rev() {
            depths.insert(name, depth);
            depth += 1;
        }
    }

    Ok(depths)
}
