use std::collections::{BTreeMap, BTreeSet};

use crate::ir::{ClassKind, Visibility};

/// Internal name of the implicit root class.
pub(crate) const ROOT_CLASS: &str = "java/lang/Object";

/// Method identity used for override detection.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct MethodKey {
    pub(crate) name: String,
    pub(crate) descriptor: String,
}

impl MethodKey {
    pub(crate) fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Summary of one eligible class.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ClassRecord {
    pub(crate) parent: Option<String>,
    pub(crate) declared_methods: BTreeSet<MethodKey>,
    pub(crate) field_count: usize,
}

/// Class records keyed by internal class name.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClassRecordStore {
    records: BTreeMap<String, ClassRecord>,
}

impl ClassRecordStore {
    /// Register `name` and return the class that is now open, if any.
    ///
    /// Ineligible kinds leave no record and close the cursor. A class seen twice
    /// keeps its members and takes the latest non-root parent; a root parent never
    /// clears one recorded earlier.
    pub(crate) fn enter_class(
        &mut self,
        name: &str,
        kind: ClassKind,
        parent: Option<&str>,
    ) -> Option<String> {
        if !kind.is_eligible() {
            return None;
        }
        let record = self.records.entry(name.to_string()).or_default();
        if let Some(parent) = parent.filter(|parent| *parent != ROOT_CLASS) {
            record.parent = Some(parent.to_string());
        }
        Some(name.to_string())
    }

    pub(crate) fn declare_method(
        &mut self,
        current: Option<&str>,
        name: &str,
        descriptor: &str,
        visibility: Visibility,
    ) {
        if visibility == Visibility::Private {
            return;
        }
        if let Some(record) = current.and_then(|class| self.records.get_mut(class)) {
            record
                .declared_methods
                .insert(MethodKey::new(name, descriptor));
        }
    }

    pub(crate) fn declare_field(&mut self, current: Option<&str>) {
        if let Some(record) = current.and_then(|class| self.records.get_mut(class)) {
            record.field_count += 1;
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.records.get(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &ClassRecord)> {
        self.records
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// `(class, parent)` for every record with a known parent.
    pub(crate) fn parent_edges(&self) -> BTreeMap<&str, &str> {
        self.iter()
            .filter_map(|(name, record)| record.parent.as_deref().map(|parent| (name, parent)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = "com/example/App";

    #[test]
    fn root_parent_is_normalized_away() {
        let mut store = ClassRecordStore::default();
        store.enter_class("com/example/App", ClassKind::Ordinary, Some(ROOT_CLASS));

        let record = store.get("com/example/App").expect("record");
        assert_eq!(None, record.parent);
        assert!(store.parent_edges().is_empty());
    }

    #[test]
    fn ineligible_kinds_leave_no_record() {
        let mut store = ClassRecordStore::default();
        for kind in [
            ClassKind::Enum,
            ClassKind::Record,
            ClassKind::Interface,
            ClassKind::Module,
        ] {
            let current = store.enter_class("com/example/Skipped", kind, None);
            assert_eq!(None, current);
            store.declare_method(current.as_deref(), "run", "()V", Visibility::Public);
            store.declare_field(current.as_deref());
        }

        assert_eq!(0, store.len());
    }

    #[test]
    fn private_methods_are_not_declared() {
        let mut store = ClassRecordStore::default();
        let current = store.enter_class("com/example/App", ClassKind::Ordinary, None);
        store.declare_method(current.as_deref(), "helper", "()V", Visibility::Private);
        store.declare_method(current.as_deref(), "run", "()V", Visibility::Package);
        store.declare_method(current.as_deref(), "run", "()V", Visibility::Public);

        let record = store.get("com/example/App").expect("record");
        assert_eq!(1, record.declared_methods.len());
        assert!(record.declared_methods.contains(&MethodKey::new("run", "()V")));
    }

    #[test]
    fn fields_count_regardless_of_visibility() {
        let mut store = ClassRecordStore::default();
        let current = store.enter_class("com/example/App", ClassKind::Ordinary, None);
        store.declare_field(current.as_deref());
        store.declare_field(current.as_deref());
        store.declare_field(None);

        assert_eq!(2, store.get("com/example/App").expect("record").field_count);
    }

    #[test]
    fn reentered_class_accumulates_members() {
        let mut store = ClassRecordStore::default();
        let current = store.enter_class(APP, ClassKind::Ordinary, Some("a/Base"));
        store.declare_field(current.as_deref());
        store.declare_method(current.as_deref(), "run", "()V", Visibility::Public);
        let current = store.enter_class(APP, ClassKind::Ordinary, Some("b/Base"));
        store.declare_field(current.as_deref());
        store.declare_method(current.as_deref(), "stop", "()V", Visibility::Public);

        let record = store.get(APP).expect("record");
        assert_eq!(Some("b/Base"), record.parent.as_deref());
        assert_eq!(2, record.field_count);
        assert_eq!(2, record.declared_methods.len());
        assert_eq!(1, store.len());
    }

    #[test]
    fn reentered_class_with_root_parent_keeps_earlier_parent() {
        let mut store = ClassRecordStore::default();
        store.enter_class(APP, ClassKind::Ordinary, Some("a/Base"));
        store.enter_class(APP, ClassKind::Ordinary, Some(ROOT_CLASS));
        store.enter_class(APP, ClassKind::Ordinary, None);

        let record = store.get(APP).expect("record");
        assert_eq!(Some("a/Base"), record.parent.as_deref());
    }
}
