//! Session toggles shared by the manual-operation state machines

/// Flags that persist across ticks of manual operation.
///
/// Pneumatic flags hold the commanded state; the operator loop writes an
/// output only when its flag changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Forward axis is negated
    pub drive_reversed: bool,
    pub grab_extended: bool,
    pub intake_lift_raised: bool,
    pub redirect_extended: bool,
    /// Ring sorting (ejection chain arming) enabled
    pub sort_enabled: bool,
    /// A lift macro owns the lift
    pub lift_manual_disabled: bool,
    /// The ejection chain owns the upper intake
    pub upper_intake_override: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
