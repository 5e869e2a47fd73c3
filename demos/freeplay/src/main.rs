//! freeplay: scripted two-minute freeplay session for the rust_ai framework.
//!
//! Loads an embedded goal table, builds a brain over an in-memory block
//! world, and plays a fixed script of sensor facts and game events against
//! it.  Goal switches and per-tick behavior choices are written to
//! `output/freeplay/`.
//!
//! `RUST_LOG=debug cargo run -p freeplay` shows every arbitration step.

mod choosers;

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use ai_brain::{BehaviorExecutor, BrainBuilder, BrainConfig, BrainObserver};
use ai_core::{ObjectId, ObjectType, OriginId, Pose3d, Tick, Timestamp};
use ai_goal::{
    BehaviorHandle, ContextKey, DebugGoalOverride, GoalEvaluatorBuilder, GoalSwitch,
    ManualContextSource, PutDownDispatch, build_goals, load_goal_configs_reader,
};
use ai_output::{CsvDecisionWriter, DecisionLogObserver, DecisionWriter};
use ai_strategy::{EventTag, GameEvent};
use ai_whiteboard::{MemoryWorld, WhiteboardFact, WorldObject};

use choosers::DemoChooserFactory;

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_DURATION_SECS: f64 = 0.5;
const TOTAL_TICKS:        u64 = 240;
const BEHAVIOR_TICKS:     u32 = 6;      // every demo behavior takes 3 s
const ORIGIN:             OriginId = OriginId(1);
const CUBE_TYPE:          ObjectType = ObjectType(1);

// ── Goal table ────────────────────────────────────────────────────────────────

// `Nap` is deliberately invalid (EventDriven without events) and is dropped
// with an error at load time.
const GOALS_CSV: &str = "\
name,priority,required_context,strategy,min_run_secs,max_run_secs,cooldown_secs,required_min_start_mood_score,events,availability_intention,max_time_without_interaction_secs,create_beacons,visit_interesting_edges,gather_usable_cubes_out_of_beacons,search_possible_objects,chooser,behaviors\n\
Socialize,1,,EventDriven,2,8,20,,FaceObserved,,,,,,,single,LookAtFace\n\
PlayWithCube,2,,EventDriven,,10,15,,CubeTapped,PickUpAnyObject,,,,,,sequence,PickUpCube;RollCube\n\
Explore,3,,CompositeHasWork,,12,,,,,,,true,,true,sequence,DriveToEdge;SearchForObject\n\
Bored,4,,IdleTimeout,,,60,,,,30,,,,,single,BoredAnimation\n\
Rest,5,,AlwaysStart,,20,,,,,,,,,,single,Sleep\n\
BuildPyramid,1,pyramid,SparkPassthrough,,,,,,,,,,,,sequence,PickUp;Stack;Celebrate\n\
Nap,6,,EventDriven,,,,,,,,,,,,single,Nap\n\
";

// ── Executor ──────────────────────────────────────────────────────────────────

/// Runs each behavior for a fixed number of ticks.
#[derive(Default)]
struct TimedExecutor {
    running:    Option<BehaviorHandle>,
    ticks_left: u32,
    started:    usize,
}

impl BehaviorExecutor for TimedExecutor {
    fn running_behavior(&self) -> Option<BehaviorHandle> {
        self.running.clone()
    }

    fn apply(&mut self, chosen: Option<&BehaviorHandle>, _now: Timestamp) {
        match chosen.filter(|b| !b.is_noop()) {
            None => self.running = None,
            Some(b) if self.running.as_ref().is_some_and(|r| r.is(b)) => {
                self.ticks_left = self.ticks_left.saturating_sub(1);
                if self.ticks_left == 0 {
                    self.running = None;
                }
            }
            Some(b) => {
                self.running = Some(b.clone());
                self.ticks_left = BEHAVIOR_TICKS;
                self.started += 1;
            }
        }
    }
}

// ── Observer wrapper to count switches ───────────────────────────────────────

struct CountingObserver<W: DecisionWriter> {
    inner:    DecisionLogObserver<W>,
    entered:  BTreeMap<String, usize>,
    switches: usize,
}

impl<W: DecisionWriter> CountingObserver<W> {
    fn new(inner: DecisionLogObserver<W>) -> Self {
        Self { inner, entered: BTreeMap::new(), switches: 0 }
    }
}

impl<W: DecisionWriter> BrainObserver for CountingObserver<W> {
    fn on_goal_switch(&mut self, tick: Tick, switch: &GoalSwitch) {
        self.switches += 1;
        if let Some(to) = &switch.to {
            *self.entered.entry(to.clone()).or_default() += 1;
        }
        self.inner.on_goal_switch(tick, switch);
    }

    fn on_behavior_chosen(
        &mut self,
        tick:     Tick,
        now:      Timestamp,
        goal:     Option<&str>,
        behavior: Option<&BehaviorHandle>,
    ) {
        self.inner.on_behavior_chosen(tick, now, goal, behavior);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    println!("=== freeplay: rust_ai decision core ===");
    println!("Ticks: {TOTAL_TICKS}  |  Tick: {TICK_DURATION_SECS} s");
    println!();

    // 1. Goal table.
    let configs = load_goal_configs_reader(Cursor::new(GOALS_CSV))?;
    let goals = build_goals(&configs, &mut DemoChooserFactory::default());
    println!("Loaded {} goals from {} rows", goals.len(), configs.len());

    // 2. Brain.
    let console = DebugGoalOverride::new();
    let dispatch = PutDownDispatch {
        face_only: Some("Socialize".into()),
        cube_only: Some("PlayWithCube".into()),
        ..Default::default()
    };
    let world = MemoryWorld::new(Pose3d::at(0.0, 0.0, ORIGIN));
    let mut brain = BrainBuilder::new(
        BrainConfig { tick_duration_secs: TICK_DURATION_SECS, ..Default::default() },
        world,
        ManualContextSource::default(),
    )
    .evaluator(
        GoalEvaluatorBuilder::new()
            .goals(goals)
            .debug_override(console.clone())
            .put_down(dispatch)
            .object_tap_goal("PlayWithCube"),
    )
    .build()?;

    // 3. Output.
    let out_dir = Path::new("output/freeplay");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = CountingObserver::new(DecisionLogObserver::new(CsvDecisionWriter::new(out_dir)?));
    let mut executor = TimedExecutor::default();

    // 4. Scripted run.
    for tick in 0..TOTAL_TICKS {
        let now = brain.now();
        match tick {
            10 => brain.push_fact(WhiteboardFact::ObservedPossibleObject {
                object_type: CUBE_TYPE,
                pose:        Pose3d::at(300.0, 100.0, ORIGIN),
            }),
            30 => brain.world.interesting_edges = true,
            50 => brain.post_event(GameEvent::new(EventTag::FaceObserved, now)),
            80 => {
                let cube = WorldObject::cube(ObjectId(7), CUBE_TYPE, Pose3d::at(300.0, 100.0, ORIGIN));
                brain.push_fact(WhiteboardFact::ObservedObject { object_type: cube.object_type, pose: cube.pose });
                brain.world.upsert(cube);
                brain.world.interesting_edges = false;
            }
            90 => {
                brain.post_event(GameEvent::new(EventTag::CubeTapped, now));
                brain.whiteboard.set_object_tap_interaction(ObjectId(7));
                brain.evaluator.on_object_tapped();
            }
            110 => {
                brain.evaluator.clear_object_tap_request();
                brain.whiteboard.clear_object_tap_interaction(&brain.world, now);
            }
            120 => brain.push_fact(WhiteboardFact::OffTreadsStateChanged { on_treads: false }),
            126 => {
                brain.push_fact(WhiteboardFact::OffTreadsStateChanged { on_treads: true });
                brain.evaluator.on_robot_put_down(true, false);
            }
            150 => brain.contexts.request(ContextKey::new("pyramid")),
            180 => brain.contexts.request(ContextKey::default()),
            200 => console.force("Rest"),
            220 => console.clear(),
            _ => {}
        }

        let running = executor.running_behavior();
        let chosen = brain.tick(running.as_ref(), &mut obs);
        executor.apply(chosen.as_ref(), now);
    }
    obs.on_run_end(brain.current_tick());

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Run complete at {}", brain.now());
    println!("  goal switches     : {}", obs.switches);
    println!("  behaviors started : {}", executor.started);
    println!();
    println!("{:<14} {:>7}", "Goal", "Entered");
    println!("{}", "-".repeat(22));
    for goal in brain.evaluator.goals() {
        let n = obs.entered.get(goal.name()).copied().unwrap_or(0);
        println!("{:<14} {:>7}", goal.name(), n);
    }

    Ok(())
}
