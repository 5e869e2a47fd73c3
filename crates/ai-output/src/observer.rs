//! `DecisionLogObserver<W>`: bridges `BrainObserver` to a `DecisionWriter`.

use ai_brain::BrainObserver;
use ai_core::{Tick, Timestamp};
use ai_goal::{BehaviorHandle, GoalSwitch};

use crate::row::{BehaviorChoiceRow, GoalSwitchRow};
use crate::writer::DecisionWriter;
use crate::{OutputError, OutputResult};

/// A [`BrainObserver`] that logs goal switches and per-tick behavior choices
/// to any [`DecisionWriter`].
///
/// Observer hooks cannot fail, so the first write error is kept and later
/// ones are dropped.  Check [`take_error`][Self::take_error] after the run.
pub struct DecisionLogObserver<W: DecisionWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: DecisionWriter> DecisionLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                tracing::error!(error = %e, "DecisionLog.WriteFailed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: DecisionWriter> BrainObserver for DecisionLogObserver<W> {
    fn on_goal_switch(&mut self, tick: Tick, switch: &GoalSwitch) {
        let row = GoalSwitchRow {
            tick:      tick.0,
            time_secs: switch.at.secs(),
            from_goal: switch.from.clone().unwrap_or_default(),
            to_goal:   switch.to.clone().unwrap_or_default(),
            context:   switch.context.to_string(),
        };
        let result = self.writer.write_goal_switch(&row);
        self.store_err(result);
    }

    fn on_behavior_chosen(
        &mut self,
        tick:     Tick,
        now:      Timestamp,
        goal:     Option<&str>,
        behavior: Option<&BehaviorHandle>,
    ) {
        let row = BehaviorChoiceRow {
            tick:      tick.0,
            time_secs: now.secs(),
            goal:      goal.unwrap_or_default().to_owned(),
            behavior:  behavior.map(|b| b.name.clone()).unwrap_or_default(),
        };
        let result = self.writer.write_behavior_choice(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
