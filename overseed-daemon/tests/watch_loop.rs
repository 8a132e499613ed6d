//! Watch loop behaviour against a scripted executor: no real watch tool,
//! no real shell.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use overseed_core::{config, environment, Config, Environment};
use overseed_daemon::{watch_invocation, CommandExecutor, CycleOutcome, WatchLoop};
use rstest::rstest;
use tempfile::TempDir;

const WATCHER: &str = "/stub/inotifywait";

/// Replays scripted exit codes for watch-tool calls and records every line.
#[derive(Default)]
struct ScriptedExecutor {
    watch_codes: VecDeque<i32>,
    reaction_codes: HashMap<String, i32>,
    calls: Vec<String>,
}

impl ScriptedExecutor {
    fn with_watch_codes(codes: &[i32]) -> Self {
        Self {
            watch_codes: codes.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn failing(mut self, command: &str, code: i32) -> Self {
        self.reaction_codes.insert(command.to_string(), code);
        self
    }

    fn watch_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.starts_with(WATCHER)).count()
    }

    fn reactions(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|c| !c.starts_with(WATCHER))
            .map(String::as_str)
            .collect()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run(&mut self, command_line: &str) -> i32 {
        self.calls.push(command_line.to_string());
        if command_line.starts_with(WATCHER) {
            self.watch_codes
                .pop_front()
                .expect("watch tool called more often than scripted")
        } else {
            self.reaction_codes.get(command_line).copied().unwrap_or(0)
        }
    }
}

fn env_with(on_event: &[&str]) -> (TempDir, Environment) {
    let dir = TempDir::new().expect("tempdir");
    let env = environment::create(dir.path()).expect("create");
    let cfg = Config {
        events: vec!["modify".to_string(), "create".to_string()],
        exclude: vec![r"\.overseed".to_string()],
        on_event: on_event.iter().map(|s| s.to_string()).collect(),
        watcher_binary: PathBuf::from(WATCHER),
    };
    config::save(&env, &cfg).expect("save");
    (dir, env)
}

#[test]
fn prime_runs_reactions_before_any_watch_call() {
    let (_dir, env) = env_with(&["echo A"]);
    let mut engine = WatchLoop::new(env, ScriptedExecutor::with_watch_codes(&[0]));

    engine.prime().expect("prime");
    assert_eq!(engine.executor().calls, vec!["echo A".to_string()]);

    assert_eq!(
        engine.cycle().expect("cycle"),
        CycleOutcome::Reacted { failures: 0 }
    );
    let calls = &engine.executor().calls;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], "echo A");
    assert!(calls[1].starts_with(WATCHER));
    assert_eq!(calls[2], "echo A");
}

#[test]
fn nonzero_watch_exit_skips_reactions() {
    let (_dir, env) = env_with(&["make", "make test"]);
    let mut engine = WatchLoop::new(env, ScriptedExecutor::with_watch_codes(&[1, 2, 0, 130]));

    let outcomes: Vec<_> = (0..4).map(|_| engine.cycle().expect("cycle")).collect();
    assert_eq!(
        outcomes,
        vec![
            CycleOutcome::Skipped { status: 1 },
            CycleOutcome::Skipped { status: 2 },
            CycleOutcome::Reacted { failures: 0 },
            CycleOutcome::Skipped { status: 130 },
        ]
    );

    let exec = engine.into_executor();
    assert_eq!(exec.watch_calls(), 4);
    assert_eq!(exec.reactions(), vec!["make", "make test"]);
}

#[test]
fn reaction_sequence_continues_past_failures() {
    let (_dir, env) = env_with(&["first", "second", "third"]);
    let exec = ScriptedExecutor::with_watch_codes(&[0]).failing("first", 1).failing("second", 127);
    let mut engine = WatchLoop::new(env, exec);

    assert_eq!(
        engine.cycle().expect("cycle"),
        CycleOutcome::Reacted { failures: 2 }
    );
    assert_eq!(engine.executor().reactions(), vec!["first", "second", "third"]);
}

#[test]
fn config_edits_apply_on_next_cycle() {
    let (_dir, env) = env_with(&["old"]);
    let mut engine = WatchLoop::new(env.clone(), ScriptedExecutor::with_watch_codes(&[0, 0]));

    engine.cycle().expect("first cycle");

    let mut cfg = config::load(&env).expect("load");
    cfg.on_event = vec!["new".to_string()];
    cfg.events.clear();
    config::save(&env, &cfg).expect("save");

    engine.cycle().expect("second cycle");
    let exec = engine.into_executor();
    assert_eq!(exec.reactions(), vec!["old", "new"]);
    assert!(exec.calls[0].contains("-e modify,create"));
    assert!(!exec.calls[2].contains("-e "));
}

#[test]
fn malformed_config_stops_the_loop() {
    let (_dir, env) = env_with(&["echo A"]);
    std::fs::write(env.config_path(), "on_event: {{{").expect("corrupt");

    let mut engine = WatchLoop::new(env, ScriptedExecutor::default());
    assert!(engine.cycle().is_err());
    assert!(engine.prime().is_err());
    assert!(engine.executor().calls.is_empty());
}

#[test]
fn missing_config_is_healed_before_priming() {
    let (_dir, env) = env_with(&["echo A"]);
    std::fs::remove_file(env.config_path()).expect("remove config");

    let mut engine = WatchLoop::new(env.clone(), ScriptedExecutor::default());
    engine.prime().expect("prime");
    assert_eq!(engine.executor().calls, config::default_config().on_event);
    assert!(env.config_path().is_file());
}

#[rstest]
#[case::both(&["modify", "delete"], &["a", "b"], Some("-e modify,delete"), Some("--exclude '(a|b)'"))]
#[case::events_only(&["close_write"], &[], Some("-e close_write"), None)]
#[case::exclude_only(&[], &[r"\.git"], None, Some(r"--exclude '(\.git)'"))]
#[case::neither(&[], &[], None, None)]
fn invocation_filters_follow_config(
    #[case] events: &[&str],
    #[case] exclude: &[&str],
    #[case] event_filter: Option<&str>,
    #[case] exclude_filter: Option<&str>,
) {
    let cfg = Config {
        events: events.iter().map(|s| s.to_string()).collect(),
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
        on_event: vec![],
        watcher_binary: PathBuf::from(WATCHER),
    };
    let line = watch_invocation(&cfg);

    assert!(line.starts_with("/stub/inotifywait -r"), "got: {line}");
    assert!(line.ends_with(" ."), "got: {line}");
    assert_eq!(line.contains(" -e "), event_filter.is_some(), "got: {line}");
    assert_eq!(line.contains("--exclude"), exclude_filter.is_some(), "got: {line}");
    if let Some(filter) = event_filter {
        assert!(line.contains(filter), "got: {line}");
    }
    if let Some(filter) = exclude_filter {
        assert!(line.contains(filter), "got: {line}");
    }
}
