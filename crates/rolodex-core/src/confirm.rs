/// Result of an explicit confirmation step for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Cancelled,
}

impl ConfirmOutcome {
    pub fn is_confirmed(self) -> bool {
        matches!(self, ConfirmOutcome::Confirmed)
    }
}
