// File: orgomon-core/tests/stats_tests.rs

use orgomon_core::models::{StatBlock, UNKNOWN_STAT};
use orgomon_core::stats::extract_stats;

#[test]
fn reads_all_four_fields() {
    let text = "Node dashboard\nTasks: 42\nCompleted: 7/10\nSuccess: 93.5%\nRuntime: 1h 2m 3s\n";
    let stats = extract_stats(text);
    assert_eq!(
        stats,
        StatBlock {
            tasks: Some("42".into()),
            completed: Some("7/10".into()),
            success_rate: Some("93.5%".into()),
            runtime: Some("1h 2m 3s".into()),
        }
    );
}

#[test]
fn uptime_is_used_when_runtime_is_absent() {
    let stats = extract_stats("Tasks: 3\nUptime: 2h 10m\n");
    assert_eq!(stats.runtime.as_deref(), Some("2h 10m"));
}

#[test]
fn runtime_wins_over_uptime() {
    let stats = extract_stats("Uptime: 9h\nRuntime: 4m\n");
    assert_eq!(stats.runtime.as_deref(), Some("4m"));
}

#[test]
fn first_match_wins() {
    let stats = extract_stats("Tasks: 1\nTasks: 2");
    assert_eq!(stats.tasks.as_deref(), Some("1"));
}

#[test]
fn completed_tolerates_spaces_around_slash() {
    let stats = extract_stats("Completed 12 /  40");
    assert_eq!(stats.completed.as_deref(), Some("12/40"));
}

#[test]
fn partial_and_malformed_text_degrade_to_unknown() {
    let inputs = [
        "",
        "   \n\t",
        "Tasks:",
        "Tasks: many",
        "Completed: 7 of 10",
        "Success: %",
        "Success: 93.5",
        "Runtime:",
        "Uptime: forever",
        "\u{0}\u{ffff}garbage ✓✓✓",
    ];
    for input in inputs {
        let stats = extract_stats(input);
        assert!(stats.is_unknown(), "expected all unknown for {input:?}, got {stats:?}");
        assert_eq!(stats.tasks_or_unknown(), UNKNOWN_STAT);
        assert_eq!(stats.runtime_or_unknown(), UNKNOWN_STAT);
    }
}

#[test]
fn one_good_field_does_not_need_the_others() {
    let stats = extract_stats("garbage Success: 80% more garbage");
    assert_eq!(stats.success_rate.as_deref(), Some("80%"));
    assert_eq!(stats.tasks, None);
    assert_eq!(stats.completed, None);
    assert_eq!(stats.runtime, None);
}
