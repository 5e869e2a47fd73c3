//! CSV decision-log backend.
//!
//! Creates two files in the configured directory:
//! - `goal_switches.csv`
//! - `behavior_choices.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::DecisionWriter;
use crate::{BehaviorChoiceRow, GoalSwitchRow, OutputResult};

pub struct CsvDecisionWriter {
    switches: Writer<File>,
    choices:  Writer<File>,
    finished: bool,
}

impl CsvDecisionWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut switches = Writer::from_path(dir.join("goal_switches.csv"))?;
        switches.write_record(["tick", "time_secs", "from_goal", "to_goal", "context"])?;

        let mut choices = Writer::from_path(dir.join("behavior_choices.csv"))?;
        choices.write_record(["tick", "time_secs", "goal", "behavior"])?;

        Ok(Self { switches, choices, finished: false })
    }
}

impl DecisionWriter for CsvDecisionWriter {
    fn write_goal_switch(&mut self, row: &GoalSwitchRow) -> OutputResult<()> {
        self.switches.write_record([
            row.tick.to_string().as_str(),
            row.time_secs.to_string().as_str(),
            row.from_goal.as_str(),
            row.to_goal.as_str(),
            row.context.as_str(),
        ])?;
        Ok(())
    }

    fn write_behavior_choice(&mut self, row: &BehaviorChoiceRow) -> OutputResult<()> {
        self.choices.write_record([
            row.tick.to_string().as_str(),
            row.time_secs.to_string().as_str(),
            row.goal.as_str(),
            row.behavior.as_str(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.switches.flush()?;
        self.choices.flush()?;
        Ok(())
    }
}
