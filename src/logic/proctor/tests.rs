use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::json;

use super::Proctor;
use crate::logic::clock::TokioClock;
use crate::logic::config::ProctorConfig;
use crate::logic::error::ProctorError;
use crate::logic::events::names;
use crate::logic::integrity::SeverityTier;
use crate::logic::ledger::SuspicionCategory;
use crate::logic::session::ProctoringData;
use crate::logic::signals::{LocalSignalSource, Signal, SignalKind, SignalResponse};

// ============================================================================
// HELPERS
// ============================================================================

fn start(config: ProctorConfig) -> (Arc<LocalSignalSource>, Proctor) {
    start_with(LocalSignalSource::new(), config)
}

fn start_with(source: LocalSignalSource, config: ProctorConfig) -> (Arc<LocalSignalSource>, Proctor) {
    let source = Arc::new(source);
    let proctor = Proctor::builder(source.clone())
        .config(config)
        .clock(Arc::new(TokioClock::new()))
        .build()
        .unwrap();
    proctor.activate();
    (source, proctor)
}

async fn advance(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn copied(text: &str) -> Signal {
    Signal::Copied {
        field_value: Some(text.to_string()),
    }
}

// ============================================================================
// CONSTRUCTION & ACTIVATION
// ============================================================================

#[test]
fn test_build_without_runtime_fails() {
    let result = Proctor::builder(Arc::new(LocalSignalSource::new())).build();
    assert!(matches!(result, Err(ProctorError::RuntimeUnavailable)));
}

#[tokio::test(start_paused = true)]
async fn test_build_rejects_invalid_config() {
    let config = ProctorConfig {
        warning_dismiss_ms: 0,
        ..ProctorConfig::default()
    };
    let result = Proctor::builder(Arc::new(LocalSignalSource::new()))
        .config(config)
        .build();
    assert!(matches!(result, Err(ProctorError::InvalidConfig(_))));
}

#[tokio::test(start_paused = true)]
async fn test_starts_inactive_and_ignores_signals() {
    let proctor = Proctor::builder(Arc::new(LocalSignalSource::new()))
        .build()
        .unwrap();

    assert!(!proctor.is_active());
    proctor.handle_signal(Signal::Pasted);
    assert_eq!(proctor.integrity_score(), 100);
    assert!(proctor.ledger().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_activation_subscribes_every_kind_once() {
    let (source, proctor) = start(ProctorConfig::default());
    assert!(proctor.is_active());
    assert_eq!(source.subscriber_count(), SignalKind::ALL.len());

    // Second activate is a no-op
    proctor.activate();
    assert_eq!(source.subscriber_count(), SignalKind::ALL.len());

    proctor.deactivate();
    assert!(!proctor.is_active());
    assert_eq!(source.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_subscription_does_not_block_others() {
    let (source, proctor) = start_with(
        LocalSignalSource::without(&[SignalKind::Clipboard]),
        ProctorConfig::default(),
    );

    assert!(proctor.is_active());
    assert_eq!(source.subscriber_count_for(SignalKind::Clipboard), 0);
    assert_eq!(source.subscriber_count(), SignalKind::ALL.len() - 1);

    source.dispatch(copied("answer"));
    source.dispatch(Signal::FocusLost);

    let ledger = proctor.ledger();
    assert_eq!(ledger.counts().copy_events, 0);
    assert_eq!(ledger.counts().focus_loss, 1);
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_stops_counting_and_keeps_counts() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::Pasted);
    proctor.deactivate();

    source.dispatch(Signal::Pasted);
    proctor.handle_signal(Signal::FocusLost);

    let ledger = proctor.ledger();
    assert_eq!(ledger.counts().paste_events, 1);
    assert_eq!(ledger.counts().total(), 1);
    assert!(!proctor.current_warning().visible);

    proctor.set_active(true);
    source.dispatch(Signal::Pasted);
    assert_eq!(proctor.ledger().counts().paste_events, 2);
}

#[tokio::test(start_paused = true)]
async fn test_drop_unsubscribes() {
    let (source, proctor) = start(ProctorConfig::default());
    drop(proctor);

    assert_eq!(source.subscriber_count(), 0);
    assert_eq!(source.dispatch(Signal::ContextMenu), SignalResponse::Proceed);
}

// ============================================================================
// SCORING THROUGH THE RUNTIME
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_copy_and_paste_scenario_scores_good() {
    let (source, proctor) = start(ProctorConfig::default());
    for _ in 0..3 {
        source.dispatch(copied("function twoSum(nums, target)"));
    }
    source.dispatch(Signal::Pasted);

    let assessment = proctor.assessment();
    assert_eq!(assessment.raw_suspicion, 17);
    assert_eq!(proctor.integrity_score(), 83);

    let level = proctor.integrity_level();
    assert_eq!(level.label, "Good");
    assert_eq!(level.color, "blue");
}

#[tokio::test(start_paused = true)]
async fn test_ten_tab_switches_floor_at_zero() {
    let (source, proctor) = start(ProctorConfig::default());
    for _ in 0..10 {
        source.dispatch(Signal::VisibilityChanged { hidden: true });
        advance(2_500).await;
        source.dispatch(Signal::VisibilityChanged { hidden: false });
    }

    let ledger = proctor.ledger();
    assert_eq!(ledger.counts().tab_switches, 10);
    assert_eq!(ledger.time_away_secs(), 20);
    assert_eq!(proctor.integrity_score(), 0);
    assert_eq!(proctor.assessment().tier, SeverityTier::Suspicious);
    assert_eq!(proctor.integrity_level().color, "red");
}

#[tokio::test(start_paused = true)]
async fn test_tab_switch_warning_carries_duration() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::VisibilityChanged { hidden: true });
    advance(1_200).await;
    source.dispatch(Signal::VisibilityChanged { hidden: true });
    advance(4_300).await;
    source.dispatch(Signal::VisibilityChanged { hidden: false });

    let ledger = proctor.ledger();
    assert_eq!(ledger.events()[0].duration_secs, Some(5));
    assert_eq!(
        proctor.current_warning().message,
        "Tab switching detected! (5s away)"
    );
}

// ============================================================================
// POINTER DEBOUNCE
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pointer_return_before_window_is_not_counted() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::PointerLeft);
    assert_eq!(proctor.pending_timers(), 1);

    advance(999).await;
    source.dispatch(Signal::PointerEntered);
    assert_eq!(proctor.pending_timers(), 0);

    advance(5_000).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 0);
    assert!(!proctor.current_warning().visible);
}

#[tokio::test(start_paused = true)]
async fn test_pointer_absence_counted_at_window() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::PointerLeft);

    advance(999).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 0);

    advance(1).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 1);
    assert_eq!(
        proctor.current_warning().message,
        "Mouse left the interview window"
    );

    // Returning afterwards does not count it again
    source.dispatch(Signal::PointerEntered);
    assert_eq!(proctor.ledger().counts().mouse_leaves, 1);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_leave_restarts_window() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::PointerLeft);
    advance(600).await;
    source.dispatch(Signal::PointerLeft);
    assert_eq!(proctor.pending_timers(), 1);

    advance(600).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 0);

    advance(400).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 1);
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_cancels_pending_pointer_timer() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::PointerLeft);
    proctor.deactivate();
    assert_eq!(proctor.pending_timers(), 0);

    advance(2_000).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 0);
}

// ============================================================================
// WARNING BANNER
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_warning_auto_hides() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::FocusLost);
    assert!(proctor.current_warning().visible);
    assert_eq!(proctor.current_warning().message, "Window focus lost");

    advance(3_999).await;
    assert!(proctor.current_warning().visible);

    advance(1).await;
    let warning = proctor.current_warning();
    assert!(!warning.visible);
    assert_eq!(warning.message, "Window focus lost");
}

#[tokio::test(start_paused = true)]
async fn test_stale_dismiss_timer_cannot_hide_newer_warning() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::FocusLost);

    advance(1_000).await;
    proctor.dismiss_warning();
    assert!(!proctor.current_warning().visible);

    advance(1_000).await;
    source.dispatch(Signal::Pasted);
    assert_eq!(proctor.current_warning().message, "Paste event detected");

    // First warning's original deadline
    advance(2_000).await;
    assert!(proctor.current_warning().visible);

    advance(2_000).await;
    assert!(!proctor.current_warning().visible);
}

#[tokio::test(start_paused = true)]
async fn test_latest_warning_replaces_previous() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(Signal::FocusLost);
    advance(3_000).await;
    source.dispatch(copied("x"));

    assert_eq!(proctor.current_warning().message, "Copy event detected");
    assert_eq!(proctor.pending_timers(), 1);

    advance(1_500).await;
    assert!(proctor.current_warning().visible);
}

// ============================================================================
// CONTEXT MENU POLICY
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_context_menu_blocked_when_configured() {
    let (source, proctor) = start(ProctorConfig::strict());
    assert_eq!(source.dispatch(Signal::ContextMenu), SignalResponse::PreventDefault);
    assert_eq!(proctor.ledger().counts().right_clicks, 1);
    assert_eq!(proctor.current_warning().message, "Right-click detected");
}

#[tokio::test(start_paused = true)]
async fn test_context_menu_silent_when_lenient() {
    let (source, proctor) = start(ProctorConfig::lenient());
    assert_eq!(source.dispatch(Signal::ContextMenu), SignalResponse::Proceed);
    assert_eq!(proctor.ledger().counts().right_clicks, 1);
    assert!(!proctor.current_warning().visible);
    assert_eq!(proctor.pending_timers(), 0);
}

// ============================================================================
// RESET & SUBMISSION
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_reset_restores_clean_session() {
    let (source, proctor) = start(ProctorConfig::default());
    let first_session = proctor.ledger().session_id();

    source.dispatch(Signal::Pasted);
    source.dispatch(Signal::PointerLeft);
    source.dispatch(Signal::VisibilityChanged { hidden: true });
    proctor.reset_proctor_data();

    let ledger = proctor.ledger();
    assert_ne!(ledger.session_id(), first_session);
    assert!(ledger.is_empty());
    assert_eq!(ledger.time_away_secs(), 0);
    assert_eq!(proctor.integrity_score(), 100);
    assert_eq!(proctor.integrity_level().label, "Excellent");
    assert_eq!(proctor.current_warning().message, "");
    assert_eq!(proctor.pending_timers(), 0);
    assert!(proctor.is_active());

    // The pending leave from before the reset never lands
    advance(2_000).await;
    assert_eq!(proctor.ledger().counts().mouse_leaves, 0);
}

#[tokio::test(start_paused = true)]
async fn test_attach_to_submission_snapshots_ledger() {
    let (source, proctor) = start(ProctorConfig::default());
    source.dispatch(copied("const answer = 42;"));
    source.dispatch(Signal::Pasted);

    let mut request = json!({
        "session_id": "interview-7",
        "answers": ["O(n log n)"],
    });
    let data = proctor.attach_to_submission(&mut request).unwrap();

    assert_eq!(data.suspicious_score, 11);
    assert_eq!(request["proctoring_data"]["copyEvents"], 1);
    assert_eq!(request["proctoring_data"]["warnings"][0]["text"], "const answer = 42;");

    let restored = ProctoringData::extract_from(&request).unwrap().unwrap();
    assert!(restored.verify_digest());
    assert_eq!(restored.session_id, proctor.ledger().session_id());

    // Later events do not leak into the already-built payload
    source.dispatch(Signal::Pasted);
    assert_eq!(data.counts.paste_events, 1);
    assert_eq!(proctor.proctoring_data().unwrap().counts.paste_events, 2);
}

// ============================================================================
// LISTENERS
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_listeners_can_read_back_from_proctor() {
    let (source, proctor) = start(ProctorConfig::default());
    let proctor = Arc::new(proctor);
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let seen = Arc::clone(&seen);
        let weak = Arc::downgrade(&proctor);
        proctor.add_listener(Arc::new(move |name: &str, payload: &serde_json::Value| {
            // Reading back must not deadlock
            let score = weak.upgrade().map(|p| p.integrity_score());
            seen.lock().push((name.to_string(), payload.clone(), score));
        }));
    }

    source.dispatch(Signal::Pasted);

    let seen = seen.lock();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, names::EVENT_RECORDED);
    assert_eq!(seen[0].1["event"]["type"], SuspicionCategory::Paste.as_str());
    assert_eq!(seen[0].1["integrityScore"], 92);
    assert_eq!(seen[0].2, Some(92));
    assert_eq!(seen[1].0, names::WARNING_CHANGED);
    assert_eq!(seen[1].1["visible"], true);
}

#[tokio::test(start_paused = true)]
async fn test_reset_and_auto_hide_are_announced() {
    let (source, proctor) = start(ProctorConfig::default());
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    {
        let seen = Arc::clone(&seen);
        proctor.add_listener(Arc::new(move |name: &str, _: &serde_json::Value| {
            seen.lock().push(name.to_string());
        }));
    }

    source.dispatch(Signal::FocusLost);
    advance(4_000).await;
    proctor.reset_proctor_data();

    assert_eq!(
        *seen.lock(),
        vec![
            names::EVENT_RECORDED,
            names::WARNING_CHANGED,
            names::WARNING_CHANGED,
            names::LEDGER_RESET,
            names::WARNING_CHANGED,
        ]
    );
}
