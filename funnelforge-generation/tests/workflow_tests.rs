use funnelforge_generation::{GenerationWorkflow, StageProgress, WorkflowConfig, DEFAULT_STAGES};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

fn workflow(stages: &[&str], delay_ms: u64) -> GenerationWorkflow {
    GenerationWorkflow::new(WorkflowConfig {
        stages: stages.iter().map(|s| s.to_string()).collect(),
        stage_delay_ms: delay_ms,
    })
}

// ── Progress math ────────────────────────────────────────────────

#[test]
fn percent_is_proportional() {
    assert_eq!(GenerationWorkflow::percent_after(0, 4), 0);
    assert_eq!(GenerationWorkflow::percent_after(1, 4), 25);
    assert_eq!(GenerationWorkflow::percent_after(3, 4), 75);
    assert_eq!(GenerationWorkflow::percent_after(4, 4), 100);
    assert_eq!(GenerationWorkflow::percent_after(1, 3), 33);
}

#[test]
fn default_config_has_five_stages() {
    let workflow = GenerationWorkflow::default();
    assert_eq!(workflow.stages().len(), DEFAULT_STAGES.len());
    assert_eq!(workflow.total_duration(), Duration::from_millis(7_500));
}

#[test]
fn huge_stage_delay_saturates_total_duration() {
    let workflow = workflow(&["a", "b", "c", "d", "e"], u64::MAX);
    assert_eq!(workflow.total_duration(), Duration::MAX);
}

// ── Timed playback ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn reaches_100_only_after_all_stages_in_order() {
    let workflow = workflow(&["one", "two", "three"], 1_000);
    let start = Instant::now();
    let mut seen: Vec<(StageProgress, Duration)> = Vec::new();

    let history = workflow
        .run(None, |p| seen.push((p.clone(), start.elapsed())))
        .await;

    let stages: Vec<_> = seen.iter().map(|(p, _)| p.stage.as_str()).collect();
    assert_eq!(stages, ["one", "two", "three"]);
    let percents: Vec<_> = seen.iter().map(|(p, _)| p.percent).collect();
    assert_eq!(percents, [33, 66, 100]);
    for (i, (progress, at)) in seen.iter().enumerate() {
        assert_eq!(progress.index, i);
        assert!(*at >= Duration::from_millis(1_000 * (i as u64 + 1)));
    }
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert_eq!(history.len(), 3);
    assert_eq!(history.iter().filter(|p| p.percent == 100).count(), 1);
}

#[tokio::test(start_paused = true)]
async fn not_complete_before_last_delay_elapses() {
    let workflow = workflow(&["a", "b"], 500);
    let run = workflow.run(None, |_| {});
    let outcome = tokio::time::timeout(Duration::from_millis(999), run).await;
    assert!(outcome.is_err());
}

#[tokio::test(start_paused = true)]
async fn each_stage_emits_a_notification() {
    let workflow = workflow(&["x", "y"], 10);
    let (tx, mut rx) = mpsc::unbounded_channel();
    workflow.run(Some(&tx), |_| {}).await;
    drop(tx);

    let mut titles = Vec::new();
    while let Some(n) = rx.recv().await {
        titles.push((n.title, n.description.unwrap_or_default()));
    }
    assert_eq!(
        titles,
        [
            ("x".to_string(), "50% complete".to_string()),
            ("y".to_string(), "100% complete".to_string())
        ]
    );
}

#[tokio::test]
async fn empty_stage_list_finishes_immediately() {
    let workflow = workflow(&[], 1_000);
    assert!(workflow.run(None, |_| {}).await.is_empty());
}
