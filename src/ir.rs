/// Structural category of a decoded class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClassKind {
    Ordinary,
    Enum,
    Record,
    Interface,
    Module,
}

impl ClassKind {
    /// Only ordinary classes contribute class records.
    pub(crate) fn is_eligible(self) -> bool {
        matches!(self, ClassKind::Ordinary)
    }
}

/// Declared visibility of a method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

/// Instruction categories that feed the ABC counters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InstructionCategory {
    VariableStore,
    FieldStore,
    Jump,
    ConditionalJump,
    /// `targets` excludes the default target.
    MultiWayBranch { targets: usize },
}

/// Event emitted by the class decoder, in class-file order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ClassEvent {
    ClassEntered {
        name: String,
        kind: ClassKind,
        parent: Option<String>,
    },
    MethodDeclared {
        name: String,
        descriptor: String,
        visibility: Visibility,
    },
    FieldDeclared,
    InstructionObserved(InstructionCategory),
}
