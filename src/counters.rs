use crate::ir::InstructionCategory;

/// Assignment, branch and condition totals across every observed method.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct InstructionCounters {
    pub(crate) assignments: u64,
    pub(crate) branches: u64,
    pub(crate) conditions: u64,
}

impl InstructionCounters {
    pub(crate) fn record(&mut self, category: InstructionCategory) {
        match category {
            InstructionCategory::VariableStore | InstructionCategory::FieldStore => {
                self.assignments += 1;
            }
            InstructionCategory::Jump => self.branches += 1,
            InstructionCategory::ConditionalJump => {
                self.branches += 1;
                self.conditions += 1;
            }
            // One branch per case plus the default target.
            InstructionCategory::MultiWayBranch { targets } => {
                self.branches += targets as u64 + 1;
            }
        }
    }

    /// Euclidean norm of the three counters.
    pub(crate) fn abc_magnitude(&self) -> f64 {
        let a = self.assignments as f64;
        let b = self.branches as f64;
        let c = self.conditions as f64;
        (a * a + b * b + c * c).sqrt()
    }
}
