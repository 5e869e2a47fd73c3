//! Integration tests for ai-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvDecisionWriter;
    use crate::row::{BehaviorChoiceRow, GoalSwitchRow};
    use crate::writer::DecisionWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvDecisionWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read(&dir, "goal_switches.csv");
        assert_eq!(headers, ["tick", "time_secs", "from_goal", "to_goal", "context"]);
        assert!(rows.is_empty());

        let (headers, _) = read(&dir, "behavior_choices.csv");
        assert_eq!(headers, ["tick", "time_secs", "goal", "behavior"]);
    }

    #[test]
    fn rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvDecisionWriter::new(dir.path()).unwrap();
        w.write_goal_switch(&GoalSwitchRow {
            tick:      4,
            time_secs: 0.5,
            from_goal: String::new(),
            to_goal:   "Explore".into(),
            context:   "freeplay".into(),
        })
        .unwrap();
        for tick in 4..6 {
            w.write_behavior_choice(&BehaviorChoiceRow {
                tick,
                time_secs: tick as f64 * 0.5,
                goal:      "Explore".into(),
                behavior:  "DriveToEdge".into(),
            })
            .unwrap();
        }
        w.finish().unwrap();
        w.finish().unwrap();

        let (_, switches) = read(&dir, "goal_switches.csv");
        assert_eq!(switches.len(), 1);
        assert_eq!(&switches[0][0], "4");
        assert_eq!(&switches[0][1], "0.5");
        assert_eq!(&switches[0][2], "");
        assert_eq!(&switches[0][3], "Explore");

        let (_, choices) = read(&dir, "behavior_choices.csv");
        assert_eq!(choices.len(), 2);
        assert_eq!(&choices[1][0], "5");
        assert_eq!(&choices[1][1], "2.5");
        assert_eq!(&choices[1][3], "DriveToEdge");
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tmp();
        assert!(CsvDecisionWriter::new(&dir.path().join("absent")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use ai_brain::{BehaviorExecutor, BrainBuilder, BrainConfig, BrainObserver};
    use ai_core::{BehaviorId, OriginId, Pose3d, Tick, Timestamp};
    use ai_goal::{
        BehaviorChooser, BehaviorHandle, ContextKey, Goal, GoalEvaluatorBuilder, GoalSwitch,
        ManualContextSource,
    };
    use ai_strategy::{DecisionContext, GoalStrategy, StrategyKind, StrategyTiming};
    use ai_whiteboard::MemoryWorld;

    use crate::{
        BehaviorChoiceRow, CsvDecisionWriter, DecisionLogObserver, DecisionWriter, GoalSwitchRow,
        OutputError, OutputResult,
    };

    struct Fixed(BehaviorHandle);

    impl BehaviorChooser for Fixed {
        fn desired_active_behavior(
            &mut self,
            _ctx:     &DecisionContext<'_>,
            _current: Option<&BehaviorHandle>,
        ) -> Option<BehaviorHandle> {
            Some(self.0.clone())
        }
    }

    struct Instant;

    impl BehaviorExecutor for Instant {
        fn running_behavior(&self) -> Option<BehaviorHandle> {
            None
        }
        fn apply(&mut self, _chosen: Option<&BehaviorHandle>, _now: Timestamp) {}
    }

    /// Fails every write after the first `ok` ones.
    struct Flaky {
        ok:     usize,
        writes: usize,
    }

    impl Flaky {
        fn next(&mut self) -> OutputResult<()> {
            self.writes += 1;
            if self.writes > self.ok {
                return Err(OutputError::Io(std::io::Error::other(format!("write {}", self.writes))));
            }
            Ok(())
        }
    }

    impl DecisionWriter for Flaky {
        fn write_goal_switch(&mut self, _row: &GoalSwitchRow) -> OutputResult<()> {
            self.next()
        }
        fn write_behavior_choice(&mut self, _row: &BehaviorChoiceRow) -> OutputResult<()> {
            self.next()
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn goal(name: &str, priority: u8, timing: StrategyTiming, b: u32) -> Goal {
        let strategy = GoalStrategy::new(StrategyKind::AlwaysStart).with_timing(timing);
        let handle = BehaviorHandle::new(BehaviorId(b), format!("b{b}"));
        Goal::new(name, priority, ContextKey::default(), strategy, Box::new(Fixed(handle)))
    }

    #[test]
    fn brain_run_logged_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let short = StrategyTiming { max_run_secs: Some(1.0), cooldown_secs: 10.0, ..Default::default() };
        let goals = [goal("Dance", 1, short, 1), goal("Rest", 2, StrategyTiming::default(), 2)];
        let mut brain = BrainBuilder::new(
            BrainConfig { tick_duration_secs: 0.5, ..Default::default() },
            MemoryWorld::new(Pose3d::at(0.0, 0.0, OriginId(1))),
            ManualContextSource::default(),
        )
        .evaluator(GoalEvaluatorBuilder::new().goals(goals))
        .build()
        .unwrap();

        let mut obs = DecisionLogObserver::new(CsvDecisionWriter::new(dir.path()).unwrap());
        brain.run_ticks(4, &mut Instant, &mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("goal_switches.csv")).unwrap();
        let switches: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(switches.len(), 2);
        assert_eq!((&switches[0][2], &switches[0][3]), ("", "Dance"));
        assert_eq!((&switches[1][0], &switches[1][1]), ("2", "1"));
        assert_eq!((&switches[1][2], &switches[1][3], &switches[1][4]), ("Dance", "Rest", "freeplay"));

        let mut rdr = csv::Reader::from_path(dir.path().join("behavior_choices.csv")).unwrap();
        let behaviors: Vec<String> = rdr.records().map(|r| r.unwrap()[3].to_owned()).collect();
        assert_eq!(behaviors, ["b1", "b1", "b2", "b2"]);
    }

    #[test]
    fn first_error_kept() {
        let mut obs = DecisionLogObserver::new(Flaky { ok: 1, writes: 0 });
        let switch = GoalSwitch { from: None, to: Some("A".into()), context: ContextKey::default(), at: Timestamp(0.0) };
        for i in 0..4 {
            obs.on_goal_switch(Tick(i), &switch);
        }
        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "write 2"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().writes, 4);
    }
}
