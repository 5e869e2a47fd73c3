use serde::Deserialize;

/// Flat strategy configuration as it comes out of a goal table.
///
/// `type` selects the strategy kind; the remaining fields are read only by
/// the kinds that use them.  Validation happens in
/// [`GoalStrategy::from_config`][crate::GoalStrategy::from_config].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    #[serde(rename = "type")]
    pub kind: String,

    pub min_run_secs:                  Option<f64>,
    pub max_run_secs:                  Option<f64>,
    pub cooldown_secs:                 Option<f64>,
    pub required_min_start_mood_score: Option<f32>,

    // EventDriven / IdleTimeout
    pub events:                 Vec<String>,
    pub availability_intention: Option<String>,

    // IdleTimeout
    pub max_time_without_interaction_secs: Option<f64>,

    // CompositeHasWork
    pub create_beacons:                     bool,
    pub visit_interesting_edges:            bool,
    pub gather_usable_cubes_out_of_beacons: bool,
    pub search_possible_objects:            bool,
}

impl StrategyConfig {
    /// Config of the given kind with every optional field absent.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), ..Self::default() }
    }
}
