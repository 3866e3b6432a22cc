//! End-to-end sweep scenarios against a real configuration file.
//!
//! The recording runner snapshots the configuration each time training is
//! launched, which is what the external trainer would read.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gravsweep_core::{
    CoreError, GravityEntry, GravityVector, ProcessError, SweepEvent, SweepEventEmitter,
    SweepOptions, SweepRequest, SweepService, SweepSet, TrainingCommand, TrainingOutcome,
    TrainingRunner, backup_path_for,
};
use tempfile::TempDir;

const WALKER: &str = r#"<mujoco model="planar walker">
  <option timestep="0.0025" gravity="0 0 -9.81"/>
  <default><joint damping=".1" armature="0.01"/></default>
</mujoco>
"#;

struct RecordingRunner {
    config_path: PathBuf,
    /// 1-based call number that fails with a spawn error, if any.
    fail_on_call: Option<usize>,
    /// 1-based call number after which the configuration file disappears.
    delete_config_after_call: Option<usize>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingRunner {
    fn new(config_path: &Path) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            fail_on_call: None,
            delete_config_after_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(config_path: &Path, call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new(config_path)
        }
    }

    fn deleting_config_after(config_path: &Path, call: usize) -> Self {
        Self {
            delete_config_after_call: Some(call),
            ..Self::new(config_path)
        }
    }

    fn labels(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    fn snapshots(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl TrainingRunner for RecordingRunner {
    async fn run(
        &self,
        label: &str,
        command: &TrainingCommand,
    ) -> Result<TrainingOutcome, ProcessError> {
        let snapshot = fs::read_to_string(&self.config_path).unwrap();
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((label.to_string(), snapshot));
            calls.len()
        };

        if self.delete_config_after_call == Some(call) {
            fs::remove_file(&self.config_path).unwrap();
        }
        if self.fail_on_call == Some(call) {
            return Err(ProcessError::SpawnFailed {
                program: command.program.clone(),
                reason: "simulated".to_string(),
            });
        }
        Ok(TrainingOutcome::succeeded(label, Duration::from_millis(5)))
    }
}

#[derive(Default)]
struct CollectingEmitter {
    events: Mutex<Vec<SweepEvent>>,
}

impl SweepEventEmitter for CollectingEmitter {
    fn emit(&self, event: SweepEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn config_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("walker.xml");
    fs::write(&path, WALKER).unwrap();
    (dir, path)
}

fn mars_moon() -> SweepSet {
    SweepSet::new(vec![
        GravityEntry::new("Mars", GravityVector::new(0.0, 0.0, -3.71)),
        GravityEntry::new("Moon", GravityVector::new(0.0, 0.0, -1.62)),
    ])
    .unwrap()
}

fn request(config_path: &Path, sweep: SweepSet) -> SweepRequest {
    SweepRequest {
        config_path: config_path.to_path_buf(),
        sweep,
        command: TrainingCommand::hilp_walker_run("python", "/data/replay.pt"),
        options: SweepOptions::default(),
    }
}

#[tokio::test]
async fn mars_then_moon_sees_each_gravity_and_restores() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::new(&path));

    let report = SweepService::new(runner.clone())
        .run(&request(&path, mars_moon()))
        .await
        .unwrap();

    let snapshots = runner.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].contains(r#"gravity="0 0 -3.71""#));
    assert!(snapshots[1].contains(r#"gravity="0 0 -1.62""#));
    assert_eq!(
        snapshots[0],
        WALKER.replace(r#"gravity="0 0 -9.81""#, r#"gravity="0 0 -3.71""#)
    );

    assert!(report.all_processed);
    assert_eq!(fs::read_to_string(&path).unwrap(), WALKER);
    assert!(!backup_path_for(&path).exists());
}

#[tokio::test]
async fn runner_is_called_once_per_entry_in_order() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::new(&path));

    SweepService::new(runner.clone())
        .run(&request(&path, SweepSet::planetary()))
        .await
        .unwrap();

    assert_eq!(runner.labels(), vec!["Mars", "Jupiter", "Moon"]);
}

#[tokio::test]
async fn failure_on_second_entry_restores_and_stops() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::failing_on(&path, 2));

    let err = SweepService::new(runner.clone())
        .run(&request(&path, SweepSet::planetary()))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Process(_)));
    // Mars ran, Jupiter was attempted, Moon never started.
    assert_eq!(runner.labels(), vec!["Mars", "Jupiter"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), WALKER);
    assert!(!backup_path_for(&path).exists());
}

#[tokio::test]
async fn rewrite_failure_mid_sweep_restores_and_stops() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::deleting_config_after(&path, 1));

    let err = SweepService::new(runner.clone())
        .run(&request(&path, SweepSet::planetary()))
        .await
        .unwrap_err();

    // Jupiter's rewrite cannot read the configuration.
    assert!(matches!(err, CoreError::Io { path: ref p, .. } if *p == path));
    assert_eq!(runner.labels(), vec!["Mars"]);
    // The restore still ran and put the original back.
    assert_eq!(fs::read_to_string(&path).unwrap(), WALKER);
    assert!(!backup_path_for(&path).exists());
}

#[tokio::test]
async fn stale_backup_blocks_sweep_and_is_preserved() {
    let (_dir, path) = config_fixture();
    // An interrupted sweep left Mars gravity in place and the original in
    // the backup.
    let edited = WALKER.replace(r#"gravity="0 0 -9.81""#, r#"gravity="0 0 -3.71""#);
    fs::write(&path, &edited).unwrap();
    fs::write(backup_path_for(&path), WALKER).unwrap();
    let runner = Arc::new(RecordingRunner::new(&path));

    let err = SweepService::new(runner.clone())
        .run(&request(&path, SweepSet::planetary()))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::StaleBackup { .. }));
    assert!(runner.labels().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), edited);
    assert_eq!(fs::read_to_string(backup_path_for(&path)).unwrap(), WALKER);
}

#[tokio::test]
async fn config_without_gravity_is_left_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cheetah.xml");
    let body = "<mujoco model=\"cheetah\">\n  <option timestep=\"0.01\"/>\n</mujoco>\n";
    fs::write(&path, body).unwrap();
    let runner = Arc::new(RecordingRunner::new(&path));

    let report = SweepService::new(runner.clone())
        .run(&request(&path, mars_moon()))
        .await
        .unwrap();

    assert_eq!(report.unmatched, vec!["Mars", "Moon"]);
    assert!(runner.snapshots().iter().all(|s| s == body));
    assert_eq!(fs::read_to_string(&path).unwrap(), body);
}

#[tokio::test]
async fn empty_sweep_only_backs_up_and_restores() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::new(&path));

    let report = SweepService::new(runner.clone())
        .run(&request(&path, SweepSet::new(Vec::new()).unwrap()))
        .await
        .unwrap();

    assert!(report.all_processed);
    assert!(runner.labels().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), WALKER);
}

#[tokio::test]
async fn events_follow_sweep_order() {
    let (_dir, path) = config_fixture();
    let runner = Arc::new(RecordingRunner::new(&path));
    let emitter = Arc::new(CollectingEmitter::default());

    SweepService::new(runner)
        .with_emitter(emitter.clone())
        .run(&request(&path, mars_moon()))
        .await
        .unwrap();

    let events = emitter.events.lock().unwrap();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            SweepEvent::Started { .. } => "started",
            SweepEvent::EntryStarted { .. } => "entry",
            SweepEvent::GravityMissing { .. } => "missing",
            SweepEvent::EntryFinished { .. } => "finished",
            SweepEvent::EntrySkipped { .. } => "skipped",
            SweepEvent::Completed { .. } => "completed",
            SweepEvent::Restored { .. } => "restored",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "started", "entry", "finished", "entry", "finished", "completed", "restored"
        ]
    );

    let Some(SweepEvent::EntryStarted { command, .. }) = events.get(1) else {
        panic!("expected EntryStarted");
    };
    assert!(command.starts_with("PYTHONPATH=. python url_benchmark/train_offline.py"));
    assert!(!command.contains("Mars"));
}
