//! Plain data row types written by decision-log backends.

/// One goal change.  Empty `from_goal`/`to_goal` means "no goal".
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSwitchRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub from_goal: String,
    pub to_goal:   String,
    pub context:   String,
}

/// The arbitration result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorChoiceRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub goal:      String,
    pub behavior:  String,
}
