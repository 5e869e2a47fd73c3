//! [`GoalStrategy`]: a generic timing gate wrapped around one of a closed set
//! of start/end policies.
//!
//! ```text
//! wants_to_start(last_stopped):
//!   now - last_stopped < cooldown          → false
//!   mood gate configured and not met       → false
//!   otherwise                              → kind's start rule
//!
//! wants_to_end(last_started):
//!   elapsed < min_run                      → false
//!   max_run set and elapsed >= max_run     → true
//!   otherwise                              → kind's end rule
//! ```

use ai_core::Timestamp;
use ai_whiteboard::ObjectUseIntention;

use crate::config::StrategyConfig;
use crate::context::DecisionContext;
use crate::error::{StrategyError, StrategyResult};
use crate::event::{EventTag, GameEvent};

// ── Timing gate ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrategyTiming {
    pub min_run_secs:                  f64,
    /// `None` means the kind alone decides when to end.
    pub max_run_secs:                  Option<f64>,
    pub cooldown_secs:                 f64,
    /// Start is blocked unless the context's mood score reaches this.
    pub required_min_start_mood_score: Option<f32>,
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Extra precondition for an event-driven goal to start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Availability {
    Always,
    BestObjectFor(ObjectUseIntention),
}

/// One "is there work to do" check of [`StrategyKind::CompositeHasWork`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkCheck {
    /// No beacon exists yet.
    CreateBeacons,
    /// Navigation memory has unexplored edges.
    VisitInterestingEdges,
    /// A usable cube sits outside every beacon.
    GatherUsableCubesOutOfBeacons,
    /// A possible object awaits a search in the robot's current origin.
    SearchPossibleObjects,
}

impl WorkCheck {
    pub fn has_work(self, ctx: &DecisionContext<'_>) -> bool {
        let wb = ctx.whiteboard;
        match self {
            WorkCheck::CreateBeacons => wb.active_beacon().is_none(),
            WorkCheck::VisitInterestingEdges => ctx.world.has_interesting_edges(),
            WorkCheck::GatherUsableCubesOutOfBeacons => {
                !wb.find_usable_cubes_out_of_beacons(ctx.world, ctx.now).is_empty()
            }
            WorkCheck::SearchPossibleObjects => {
                let origin = ctx.world.robot_pose().origin;
                wb.possible_objects_in_origin(origin).next().is_some()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StrategyKind {
    /// Always starts, never asks to end; the chooser running dry ends it.
    AlwaysStart,
    /// Ends once a subscribed event arrives after the run started.
    EventDriven {
        events:        Vec<EventTag>,
        availability:  Availability,
        last_event_at: Option<Timestamp>,
    },
    /// Runs while any check reports work.
    CompositeHasWork { checks: Vec<WorkCheck> },
    /// Ends after `max_secs` without a qualifying interaction.
    IdleTimeout {
        max_secs:            f64,
        tags:                Vec<EventTag>,
        last_interaction_at: Option<Timestamp>,
    },
    /// Never ends on its own; superseded only by a context change.
    SparkPassthrough,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::AlwaysStart             => "AlwaysStart",
            StrategyKind::EventDriven { .. }      => "EventDriven",
            StrategyKind::CompositeHasWork { .. } => "CompositeHasWork",
            StrategyKind::IdleTimeout { .. }      => "IdleTimeout",
            StrategyKind::SparkPassthrough        => "SparkPassthrough",
        }
    }

    fn start_rule(&self, ctx: &DecisionContext<'_>) -> bool {
        match self {
            StrategyKind::AlwaysStart
            | StrategyKind::IdleTimeout { .. }
            | StrategyKind::SparkPassthrough => true,
            StrategyKind::EventDriven { availability, .. } => match availability {
                Availability::Always => true,
                Availability::BestObjectFor(intention) => {
                    ctx.whiteboard.best_object_for_action(*intention).is_some()
                }
            },
            StrategyKind::CompositeHasWork { checks } => checks.iter().any(|c| c.has_work(ctx)),
        }
    }

    fn end_rule(&self, ctx: &DecisionContext<'_>, started: Timestamp) -> bool {
        match self {
            StrategyKind::AlwaysStart | StrategyKind::SparkPassthrough => false,
            StrategyKind::EventDriven { last_event_at, .. } => {
                last_event_at.is_some_and(|t| t > started)
            }
            StrategyKind::CompositeHasWork { checks } => !checks.iter().any(|c| c.has_work(ctx)),
            StrategyKind::IdleTimeout { max_secs, last_interaction_at, .. } => {
                let since = match last_interaction_at {
                    Some(t) if *t > started => *t,
                    _ => started,
                };
                ctx.now > since + *max_secs
            }
        }
    }
}

// ── GoalStrategy ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GoalStrategy {
    pub timing: StrategyTiming,
    pub kind:   StrategyKind,
}

impl GoalStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self { timing: StrategyTiming::default(), kind }
    }

    pub fn with_timing(mut self, timing: StrategyTiming) -> Self {
        self.timing = timing;
        self
    }

    /// `last_stopped_at == None` means the goal never ran, so no cooldown.
    pub fn wants_to_start(&self, ctx: &DecisionContext<'_>, last_stopped_at: Option<Timestamp>) -> bool {
        if last_stopped_at.is_some_and(|stopped| ctx.now < stopped + self.timing.cooldown_secs) {
            return false;
        }
        if let Some(required) = self.timing.required_min_start_mood_score {
            match ctx.mood_score {
                Some(score) if score >= required => {}
                _ => return false,
            }
        }
        self.kind.start_rule(ctx)
    }

    pub fn wants_to_end(&self, ctx: &DecisionContext<'_>, last_started_at: Timestamp) -> bool {
        if ctx.now < last_started_at + self.timing.min_run_secs {
            return false;
        }
        if self.timing.max_run_secs.is_some_and(|max| ctx.now >= last_started_at + max) {
            return true;
        }
        self.kind.end_rule(ctx, last_started_at)
    }

    /// Record a delivered event.  Only timestamps change.
    pub fn on_event(&mut self, event: &GameEvent) {
        match &mut self.kind {
            StrategyKind::EventDriven { events, last_event_at, .. } => {
                if events.contains(&event.tag) {
                    *last_event_at = Some(event.at);
                }
            }
            StrategyKind::IdleTimeout { tags, last_interaction_at, .. } => {
                if tags.contains(&event.tag) {
                    *last_interaction_at = Some(event.at);
                }
            }
            _ => {}
        }
    }

    /// Events this strategy listens to.
    pub fn subscribed_events(&self) -> &[EventTag] {
        match &self.kind {
            StrategyKind::EventDriven { events, .. } => events,
            StrategyKind::IdleTimeout { tags, .. } => tags,
            _ => &[],
        }
    }

    // ── Config ────────────────────────────────────────────────────────────────

    pub fn from_config(config: &StrategyConfig) -> StrategyResult<Self> {
        let min_run_secs = non_negative("min_run_secs", config.min_run_secs)?.unwrap_or(0.0);
        let mut max_run_secs = non_negative("max_run_secs", config.max_run_secs)?;
        let cooldown_secs = non_negative("cooldown_secs", config.cooldown_secs)?.unwrap_or(0.0);
        if let Some(max) = max_run_secs.filter(|&max| min_run_secs > max) {
            return Err(StrategyError::MinExceedsMax { min: min_run_secs, max });
        }

        let kind = match config.kind.as_str() {
            "AlwaysStart" => StrategyKind::AlwaysStart,
            "EventDriven" => {
                let events = parse_events(&config.events)?;
                if events.is_empty() {
                    return Err(StrategyError::NoEvents("EventDriven"));
                }
                let availability = match &config.availability_intention {
                    None => Availability::Always,
                    Some(name) => Availability::BestObjectFor(
                        name.parse()
                            .map_err(|_| StrategyError::UnknownIntention(name.clone()))?,
                    ),
                };
                StrategyKind::EventDriven { events, availability, last_event_at: None }
            }
            "CompositeHasWork" => {
                let checks: Vec<WorkCheck> = [
                    (config.create_beacons,                     WorkCheck::CreateBeacons),
                    (config.visit_interesting_edges,            WorkCheck::VisitInterestingEdges),
                    (config.gather_usable_cubes_out_of_beacons, WorkCheck::GatherUsableCubesOutOfBeacons),
                    (config.search_possible_objects,            WorkCheck::SearchPossibleObjects),
                ]
                .into_iter()
                .filter_map(|(on, check)| on.then_some(check))
                .collect();
                if checks.is_empty() {
                    return Err(StrategyError::NoWorkChecks);
                }
                StrategyKind::CompositeHasWork { checks }
            }
            "IdleTimeout" => {
                let max_secs = non_negative(
                    "max_time_without_interaction_secs",
                    config.max_time_without_interaction_secs,
                )?
                .ok_or(StrategyError::MissingField("max_time_without_interaction_secs"))?;
                let mut tags = parse_events(&config.events)?;
                if tags.is_empty() {
                    tags = EventTag::INTERACTIONS.to_vec();
                }
                StrategyKind::IdleTimeout { max_secs, tags, last_interaction_at: None }
            }
            "SparkPassthrough" => {
                if max_run_secs.take().is_some() {
                    tracing::warn!("GoalStrategy.FromConfig: SparkPassthrough ignores max_run_secs");
                }
                StrategyKind::SparkPassthrough
            }
            other => return Err(StrategyError::UnknownType(other.to_owned())),
        };

        Ok(Self {
            timing: StrategyTiming {
                min_run_secs,
                max_run_secs,
                cooldown_secs,
                required_min_start_mood_score: config.required_min_start_mood_score,
            },
            kind,
        })
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> StrategyResult<Option<f64>> {
    match value {
        Some(v) if v < 0.0 => Err(StrategyError::NegativeDuration { field, value: v }),
        other => Ok(other),
    }
}

fn parse_events(names: &[String]) -> StrategyResult<Vec<EventTag>> {
    names.iter().map(|n| n.trim().parse()).collect()
}
