//! Tests for progress reporting.

use super::*;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct RecordingListener {
    events: Mutex<Vec<(bool, Task)>>,
}

impl ProgressListener for RecordingListener {
    fn on_task_started(&self, task: Task) {
        self.events.lock().unwrap().push((true, task));
    }

    fn on_task_ended(&self, task: Task) {
        self.events.lock().unwrap().push((false, task));
    }
}

#[test]
fn test_tracker_broadcasts_in_order() {
    let first = Arc::new(RecordingListener::default());
    let second = Arc::new(RecordingListener::default());
    let mut tracker = ProgressTracker::new();
    tracker.add_listener(first.clone());
    tracker.add_listener(second.clone());

    tracker.begin(Task::LocalSearch);
    tracker.begin(Task::ComputeCost);
    tracker.end(Task::ComputeCost);
    tracker.end(Task::LocalSearch);

    let expected = vec![
        (true, Task::LocalSearch),
        (true, Task::ComputeCost),
        (false, Task::ComputeCost),
        (false, Task::LocalSearch),
    ];
    assert_eq!(*first.events.lock().unwrap(), expected);
    assert_eq!(*second.events.lock().unwrap(), expected);
    assert_eq!(tracker.listener_count(), 2);
}

#[test]
fn test_empty_tracker() {
    let tracker = ProgressTracker::new();
    assert!(!tracker.has_listeners());
    tracker.begin(Task::Grasp);
    tracker.end(Task::Grasp);
}

#[test]
fn test_clone_shares_listeners() {
    let counter = Arc::new(CountingProgressListener::new());
    let mut tracker = ProgressTracker::new();
    tracker.add_listener(counter.clone());

    let copy = tracker.clone();
    copy.begin(Task::Construction);
    copy.end(Task::Construction);

    assert_eq!(counter.started_count(), 1);
    assert_eq!(counter.ended_count(), 1);
}

#[test]
fn test_counting_listener_by_kind() {
    let counter = CountingProgressListener::new();
    counter.on_task_started(Task::Trial { index: 1 });
    counter.on_task_started(Task::LocalSearch);
    counter.on_task_started(Task::ComputeAffinities);
    counter.on_task_started(Task::ComputeAffinities);
    counter.on_task_started(Task::VnsRound { order: 0 });
    counter.on_task_started(Task::ComputeCost);

    assert_eq!(counter.started_count(), 6);
    assert_eq!(counter.trial_count(), 1);
    assert_eq!(counter.local_search_count(), 1);
    assert_eq!(counter.convergence_round_count(), 2);
    assert_eq!(counter.vns_round_count(), 1);

    counter.reset();
    assert_eq!(counter.started_count(), 0);
    assert_eq!(counter.convergence_round_count(), 0);
}

#[test]
fn test_task_display() {
    assert_eq!(Task::Trial { index: 3 }.to_string(), "Trial 3");
    assert_eq!(Task::VnsRound { order: 2 }.to_string(), "VnsRound (order 2)");
}

#[test]
fn test_logging_listener_does_not_panic() {
    let listener = LoggingProgressListener::new();
    listener.on_task_started(Task::Grasp);
    listener.on_task_ended(Task::Grasp);
}
