//! Goal-table loading.
//!
//! # CSV format
//!
//! One row per goal.  Empty cells mean "absent"; list cells (`events`,
//! `behaviors`) are `;`-separated.
//!
//! ```csv
//! name,priority,required_context,strategy,min_run_secs,max_run_secs,cooldown_secs,required_min_start_mood_score,events,availability_intention,max_time_without_interaction_secs,create_beacons,visit_interesting_edges,gather_usable_cubes_out_of_beacons,search_possible_objects,chooser,behaviors
//! Socialize,1,,EventDriven,5,60,30,,FaceObserved,,,,,,,single,LookAtFace
//! BuildPyramid,1,pyramid,SparkPassthrough,,,,,,,,,,,,sequence,PickUp;Stack
//! Explore,2,,CompositeHasWork,,,,,,,,true,true,,,sequence,DriveToEdge;LookAround
//! ```
//!
//! An empty `required_context` means the default context.
//!
//! # Bad rows
//!
//! A row that fails to parse, names an invalid strategy, or names a chooser
//! the factory cannot build is logged with `tracing::error!` and dropped; the
//! remaining goals still load.  I/O failures abort the load.

use std::io::Read;
use std::path::Path;

use ai_strategy::{GoalStrategy, StrategyConfig};
use serde::Deserialize;

use crate::behavior::BehaviorChooser;
use crate::context::ContextKey;
use crate::error::{GoalError, GoalResult};
use crate::goal::Goal;

// ── Configs ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ChooserConfig {
    #[serde(rename = "type")]
    pub kind:      String,
    #[serde(default)]
    pub behaviors: Vec<String>,
}

/// One goal, already parsed from whatever format it came in.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GoalConfig {
    pub name:             String,
    pub priority:         u8,
    #[serde(default)]
    pub required_context: ContextKey,
    pub strategy:         StrategyConfig,
    pub chooser:          ChooserConfig,
}

/// Builds concrete choosers; owned by whoever owns the behavior system.
pub trait ChooserFactory {
    fn make_chooser(&mut self, goal: &str, config: &ChooserConfig) -> GoalResult<Box<dyn BehaviorChooser>>;
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GoalRecord {
    name:                               String,
    priority:                           u8,
    required_context:                   Option<String>,
    strategy:                           String,
    min_run_secs:                       Option<f64>,
    max_run_secs:                       Option<f64>,
    cooldown_secs:                      Option<f64>,
    required_min_start_mood_score:      Option<f32>,
    events:                             Option<String>,
    availability_intention:             Option<String>,
    max_time_without_interaction_secs:  Option<f64>,
    create_beacons:                     Option<bool>,
    visit_interesting_edges:            Option<bool>,
    gather_usable_cubes_out_of_beacons: Option<bool>,
    search_possible_objects:            Option<bool>,
    chooser:                            String,
    behaviors:                          Option<String>,
}

impl GoalRecord {
    fn into_config(self) -> GoalConfig {
        GoalConfig {
            name:             self.name.trim().to_owned(),
            priority:         self.priority,
            required_context: self
                .required_context
                .map(|c| ContextKey::new(c.trim()))
                .unwrap_or_default(),
            strategy: StrategyConfig {
                kind:                               self.strategy.trim().to_owned(),
                min_run_secs:                       self.min_run_secs,
                max_run_secs:                       self.max_run_secs,
                cooldown_secs:                      self.cooldown_secs,
                required_min_start_mood_score:      self.required_min_start_mood_score,
                events:                             split_list(self.events.as_deref()),
                availability_intention:             self.availability_intention.map(|s| s.trim().to_owned()),
                max_time_without_interaction_secs:  self.max_time_without_interaction_secs,
                create_beacons:                     self.create_beacons.unwrap_or(false),
                visit_interesting_edges:            self.visit_interesting_edges.unwrap_or(false),
                gather_usable_cubes_out_of_beacons: self.gather_usable_cubes_out_of_beacons.unwrap_or(false),
                search_possible_objects:            self.search_possible_objects.unwrap_or(false),
            },
            chooser: ChooserConfig {
                kind:      self.chooser.trim().to_owned(),
                behaviors: split_list(self.behaviors.as_deref()),
            },
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load goal configs from a CSV file.
pub fn load_goal_configs_csv(path: &Path) -> GoalResult<Vec<GoalConfig>> {
    let file = std::fs::File::open(path)?;
    load_goal_configs_reader(file)
}

/// Like [`load_goal_configs_csv`] but accepts any `Read` source.
pub fn load_goal_configs_reader<R: Read>(reader: R) -> GoalResult<Vec<GoalConfig>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut configs = Vec::new();

    for (row, result) in csv_reader.deserialize::<GoalRecord>().enumerate() {
        match result {
            Ok(record) => configs.push(record.into_config()),
            Err(e) if e.is_io_error() => return Err(GoalError::Parse(e.to_string())),
            Err(e) => {
                tracing::error!(row = row + 1, error = %e, "GoalLoader.BadRow");
            }
        }
    }
    Ok(configs)
}

/// Turn one config into a goal.
pub fn goal_from_config(config: &GoalConfig, factory: &mut dyn ChooserFactory) -> GoalResult<Goal> {
    let strategy = GoalStrategy::from_config(&config.strategy).map_err(|source| GoalError::Strategy {
        goal: config.name.clone(),
        source,
    })?;
    let chooser = factory.make_chooser(&config.name, &config.chooser)?;
    Ok(Goal::new(
        config.name.clone(),
        config.priority,
        config.required_context.clone(),
        strategy,
        chooser,
    ))
}

/// Build every valid goal; invalid ones are logged and dropped.
pub fn build_goals<'a>(
    configs: impl IntoIterator<Item = &'a GoalConfig>,
    factory: &mut dyn ChooserFactory,
) -> Vec<Goal> {
    configs
        .into_iter()
        .filter_map(|config| match goal_from_config(config, factory) {
            Ok(goal) => Some(goal),
            Err(e) => {
                tracing::error!(goal = %config.name, error = %e, "GoalLoader.DroppedGoal");
                None
            }
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn split_list(cell: Option<&str>) -> Vec<String> {
    cell.map(|s| {
        s.split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
