use crate::counters::InstructionCounters;
use crate::ir::ClassEvent;
use crate::model::ClassRecordStore;

/// Frozen result of one ingestion pass.
#[derive(Clone, Debug, Default)]
pub(crate) struct Ingested {
    pub(crate) store: ClassRecordStore,
    pub(crate) counters: InstructionCounters,
}

/// Single-pass consumer of decoder events.
///
/// Method and field events are attributed to the class opened by the most recent
/// `ClassEntered`; events arriving while no eligible class is open only reach the
/// instruction counters.
#[derive(Debug, Default)]
pub(crate) struct IngestSession {
    ingested: Ingested,
    current: Option<String>,
}

impl IngestSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn accept(&mut self, event: ClassEvent) {
        let store = &mut self.ingested.store;
        match event {
            ClassEvent::ClassEntered { name, kind, parent } => {
                self.current = store.enter_class(&name, kind, parent.as_deref());
            }
            ClassEvent::MethodDeclared {
                name,
                descriptor,
                visibility,
            } => {
                store.declare_method(self.current.as_deref(), &name, &descriptor, visibility);
            }
            ClassEvent::FieldDeclared => store.declare_field(self.current.as_deref()),
            ClassEvent::InstructionObserved(category) => self.ingested.counters.record(category),
        }
    }

    pub(crate) fn accept_all(&mut self, events: impl IntoIterator<Item = ClassEvent>) {
        for event in events {
            self.accept(event);
        }
    }

    pub(crate) fn finish(self) -> Ingested {
        self.ingested
    }
}
