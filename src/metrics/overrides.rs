use std::collections::{HashMap, HashSet};

use crate::model::{ClassRecordStore, MethodKey};

/// Count method keys declared by more than one class on the ancestor chain of
/// `class_name`, the class itself included.
///
/// The walk ends at the first ancestor without a record, or at a class already
/// visited.
pub(crate) fn count_overrides(store: &ClassRecordStore, class_name: &str) -> usize {
    let mut occurrences: HashMap<&MethodKey, usize> = HashMap::new();
    let mut visited = HashSet::new();
    let mut current = Some(class_name);

    while let Some(name) = current {
        let Some(record) = store.get(name) else {
            break;
        };
        if !visited.insert(name) {
            break;
        }
        for key in &record.declared_methods {
            *occurrences.entry(key).or_default() += 1;
        }
        current = record.parent.as_deref();
    }

    occurrences.values().filter(|count| **count > 1).count()
}
