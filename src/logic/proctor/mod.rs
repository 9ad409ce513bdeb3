//! Proctor - Interview Integrity Engine
//!
//! Owns one session's ledger, the classifier, the warning banner and
//! their timers, and registers itself with the host's `SignalSource`.
//!
//! ## Pipeline
//! Signal → DebouncedClassifier → LedgerStore::append → WarningPresenter
//! Score and level are derived from the ledger on every read.
//!
//! ## Locks
//! `subscriptions` before `engine`, `engine` before the ledger store.
//! Listeners run after every lock is released.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use super::classifier::DebouncedClassifier;
use super::clock::{Clock, SystemClock};
use super::config::ProctorConfig;
use super::error::ProctorResult;
use super::events::{names, Emitter, Notification, ProctorListener};
use super::integrity::{assess, IntegrityAssessment, IntegrityLevel, SeverityTier};
use super::ledger::{LedgerStore, SuspicionCategory, SuspicionEvent, SuspicionLedger};
use super::session::{self, ProctoringData};
use super::signals::{Signal, SignalHandler, SignalKind, SignalResponse, SignalSource, SubscriptionId};
use super::timer::{Scheduler, TimerToken, TokioScheduler};
use super::warning::{WarningPresenter, WarningState};

#[cfg(test)]
mod tests;

// ============================================================================
// NOTIFICATION PAYLOADS
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRecorded<'a> {
    event: &'a SuspicionEvent,
    integrity_score: u32,
    tier: SeverityTier,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivationChanged {
    active: bool,
    subscribed: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerReset {
    session_id: uuid::Uuid,
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct ProctorBuilder {
    config: ProctorConfig,
    source: Arc<dyn SignalSource>,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl ProctorBuilder {
    pub fn config(mut self, config: ProctorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Defaults: `SystemClock` and a `TokioScheduler` on the current runtime
    pub fn build(self) -> ProctorResult<Proctor> {
        self.config.validate()?;

        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current()?),
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let inner = ProctorInner {
            classifier_and_banner: Mutex::new(EngineState {
                classifier: DebouncedClassifier::new(&self.config),
                presenter: WarningPresenter::new(Duration::from_millis(self.config.warning_dismiss_ms)),
            }),
            ledger: LedgerStore::new(SuspicionLedger::new(clock.now())),
            subscriptions: Mutex::new(Vec::new()),
            emitter: Emitter::default(),
            config: self.config,
            source: self.source,
            clock,
            scheduler,
        };

        Ok(Proctor {
            inner: Arc::new(inner),
        })
    }
}

// ============================================================================
// PROCTOR
// ============================================================================

/// Handle owned by the interview flow. Dropping it deactivates proctoring.
pub struct Proctor {
    inner: Arc<ProctorInner>,
}

struct EngineState {
    classifier: DebouncedClassifier,
    presenter: WarningPresenter,
}

struct ProctorInner {
    config: ProctorConfig,
    source: Arc<dyn SignalSource>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    ledger: LedgerStore,
    classifier_and_banner: Mutex<EngineState>,
    subscriptions: Mutex<Vec<SubscriptionId>>,
    emitter: Emitter,
}

impl Proctor {
    pub fn builder(source: Arc<dyn SignalSource>) -> ProctorBuilder {
        ProctorBuilder {
            config: ProctorConfig::default(),
            source,
            clock: None,
            scheduler: None,
        }
    }

    pub fn config(&self) -> &ProctorConfig {
        &self.inner.config
    }

    // --- Activation -------------------------------------------------------

    /// Start counting and register with the signal source
    pub fn activate(&self) {
        self.inner.activate();
    }

    /// Stop counting, deregister, cancel timers. Counts are kept.
    pub fn deactivate(&self) {
        self.inner.deactivate();
    }

    pub fn set_active(&self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.classifier_and_banner.lock().classifier.is_active()
    }

    /// Feed one signal directly (what registered handlers call)
    pub fn handle_signal(&self, signal: Signal) -> SignalResponse {
        self.inner.handle_signal(signal)
    }

    // --- Read API ---------------------------------------------------------

    pub fn integrity_score(&self) -> u32 {
        self.assessment().integrity_score
    }

    pub fn integrity_level(&self) -> IntegrityLevel {
        self.assessment().tier.level()
    }

    /// Recomputed from the current ledger on every call
    pub fn assessment(&self) -> IntegrityAssessment {
        assess(self.inner.ledger.snapshot().counts())
    }

    pub fn current_warning(&self) -> WarningState {
        self.inner.classifier_and_banner.lock().presenter.current().clone()
    }

    pub fn dismiss_warning(&self) {
        self.inner.dismiss_warning();
    }

    /// New interview: fresh ledger, no banner, no in-flight observations
    pub fn reset_proctor_data(&self) {
        self.inner.reset();
    }

    /// Immutable snapshot of the current ledger
    pub fn ledger(&self) -> Arc<SuspicionLedger> {
        self.inner.ledger.snapshot()
    }

    // --- Session binding --------------------------------------------------

    pub fn proctoring_data(&self) -> ProctorResult<ProctoringData> {
        ProctoringData::from_ledger(&self.inner.ledger.snapshot())
    }

    /// Attach `proctoring_data` to an outgoing answer-submission body
    pub fn attach_to_submission(&self, request: &mut serde_json::Value) -> ProctorResult<ProctoringData> {
        session::bind_submission(&self.inner.ledger.snapshot(), request)
    }

    pub fn add_listener(&self, listener: Arc<dyn ProctorListener>) {
        self.inner.emitter.add(listener);
    }

    /// Scheduled debounce / dismiss timers not yet fired
    pub fn pending_timers(&self) -> usize {
        self.inner.scheduler.pending()
    }
}

impl Drop for Proctor {
    fn drop(&mut self) {
        self.inner.deactivate();
    }
}

// ============================================================================
// ENGINE
// ============================================================================

impl ProctorInner {
    fn activate(self: &Arc<Self>) {
        let mut subscriptions = self.subscriptions.lock();
        {
            let mut engine = self.classifier_and_banner.lock();
            if engine.classifier.is_active() {
                return;
            }
            engine.classifier.set_active(true);
        }

        // A kind the host cannot provide must not block the others
        for kind in SignalKind::ALL {
            match self.source.subscribe(kind, self.handler()) {
                Ok(id) => subscriptions.push(id),
                Err(e) => log::warn!("Proctor: {} - continuing without it", e),
            }
        }

        let subscribed = subscriptions.len();
        drop(subscriptions);

        log::info!(
            "Proctoring activated ({}/{} signal kinds)",
            subscribed,
            SignalKind::ALL.len()
        );

        self.emitter.deliver(
            Notification::new(names::ACTIVATION_CHANGED, &ActivationChanged { active: true, subscribed })
                .into_iter()
                .collect(),
        );
    }

    fn handler(self: &Arc<Self>) -> SignalHandler {
        let weak: Weak<Self> = Arc::downgrade(self);
        Arc::new(move |signal: Signal| match weak.upgrade() {
            Some(inner) => inner.handle_signal(signal),
            None => SignalResponse::Proceed,
        })
    }

    fn deactivate(&self) {
        let mut subscriptions = self.subscriptions.lock();
        let was_active = {
            let mut engine = self.classifier_and_banner.lock();
            let was_active = engine.classifier.is_active();
            if let Some(token) = engine.classifier.set_active(false) {
                self.scheduler.cancel(token);
            }
            if let Some(token) = engine.presenter.dismiss() {
                self.scheduler.cancel(token);
            }
            was_active
        };

        for id in subscriptions.drain(..) {
            self.source.unsubscribe(id);
        }
        drop(subscriptions);

        if was_active {
            let counts = *self.ledger.snapshot().counts();
            log::info!("Proctoring deactivated ({} events kept)", counts.total());
            self.emitter.deliver(
                Notification::new(names::ACTIVATION_CHANGED, &ActivationChanged { active: false, subscribed: 0 })
                    .into_iter()
                    .collect(),
            );
        }
    }

    fn handle_signal(self: &Arc<Self>, signal: Signal) -> SignalResponse {
        let now = self.clock.now();
        let mut notes = Vec::new();
        let mut response = SignalResponse::Proceed;

        {
            let mut engine = self.classifier_and_banner.lock();
            if !engine.classifier.is_active() {
                return response;
            }

            let event = match signal {
                Signal::VisibilityChanged { hidden } => engine.classifier.on_visibility_change(hidden, now),
                Signal::PointerLeft => {
                    if let Some(ticket) = engine.classifier.on_pointer_leave(now) {
                        if let Some(stale) = ticket.superseded {
                            self.scheduler.cancel(stale);
                        }
                        self.schedule_pointer_check(ticket.token, ticket.delay);
                    }
                    None
                }
                Signal::PointerEntered => {
                    let outcome = engine.classifier.on_pointer_enter(now);
                    if let Some(token) = outcome.cancelled {
                        self.scheduler.cancel(token);
                    }
                    outcome.matured
                }
                Signal::Copied { field_value } => engine.classifier.on_copy(field_value.as_deref(), now),
                Signal::Pasted => engine.classifier.on_paste(now),
                Signal::FocusLost => engine.classifier.on_focus_loss(now),
                Signal::ContextMenu => {
                    if self.config.block_context_menu {
                        response = SignalResponse::PreventDefault;
                    }
                    engine.classifier.on_context_menu(now)
                }
            };

            if let Some(event) = event {
                self.record(&mut engine, event, &mut notes);
            }
        }

        self.emitter.deliver(notes);
        response
    }

    /// Append to the ledger and raise the banner. Caller holds the engine lock.
    fn record(self: &Arc<Self>, engine: &mut EngineState, event: SuspicionEvent, notes: &mut Vec<Notification>) {
        log::debug!(
            "Suspicion event: {} at {}{}",
            event.category,
            event.timestamp,
            event
                .duration_secs
                .map(|s| format!(" ({}s away)", s))
                .unwrap_or_default()
        );

        let message = event.warning_message();
        let show_banner = event.category != SuspicionCategory::ContextMenu || self.config.warn_on_context_menu;

        let ledger = self.ledger.append(event);

        if self.emitter.has_listeners() {
            if let Some(recorded) = ledger.events().last() {
                let assessment = assess(ledger.counts());
                notes.extend(Notification::new(
                    names::EVENT_RECORDED,
                    &EventRecorded {
                        event: recorded,
                        integrity_score: assessment.integrity_score,
                        tier: assessment.tier,
                    },
                ));
            }
        }

        if show_banner {
            let ticket = engine.presenter.show(message);
            if let Some(stale) = ticket.superseded {
                self.scheduler.cancel(stale);
            }
            self.schedule_auto_dismiss(ticket.token, ticket.delay);
            notes.extend(Notification::new(names::WARNING_CHANGED, engine.presenter.current()));
        }
    }

    fn schedule_pointer_check(self: &Arc<Self>, token: TimerToken, delay: Duration) {
        let weak = Arc::downgrade(self);
        self.scheduler.schedule(
            token,
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.on_pointer_timer(token);
                }
            }),
        );
    }

    fn schedule_auto_dismiss(self: &Arc<Self>, token: TimerToken, delay: Duration) {
        let weak = Arc::downgrade(self);
        self.scheduler.schedule(
            token,
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.on_dismiss_timer(token);
                }
            }),
        );
    }

    fn on_pointer_timer(self: &Arc<Self>, token: TimerToken) {
        let now = self.clock.now();
        let mut notes = Vec::new();
        {
            let mut engine = self.classifier_and_banner.lock();
            if let Some(event) = engine.classifier.on_pointer_timer(token, now) {
                self.record(&mut engine, event, &mut notes);
            }
        }
        self.emitter.deliver(notes);
    }

    fn on_dismiss_timer(&self, token: TimerToken) {
        let notes: Vec<Notification> = {
            let mut engine = self.classifier_and_banner.lock();
            if !engine.presenter.on_dismiss_timer(token) {
                return;
            }
            Notification::new(names::WARNING_CHANGED, engine.presenter.current())
                .into_iter()
                .collect()
        };
        self.emitter.deliver(notes);
    }

    fn dismiss_warning(&self) {
        let notes: Vec<Notification> = {
            let mut engine = self.classifier_and_banner.lock();
            if !engine.presenter.is_visible() {
                return;
            }
            if let Some(token) = engine.presenter.dismiss() {
                self.scheduler.cancel(token);
            }
            Notification::new(names::WARNING_CHANGED, engine.presenter.current())
                .into_iter()
                .collect()
        };
        self.emitter.deliver(notes);
    }

    fn reset(&self) {
        let now = self.clock.now();
        let mut notes = Vec::new();
        {
            let mut engine = self.classifier_and_banner.lock();
            if let Some(token) = engine.classifier.clear_pending() {
                self.scheduler.cancel(token);
            }
            if let Some(token) = engine.presenter.clear() {
                self.scheduler.cancel(token);
            }

            let ledger = self.ledger.reset(now);
            log::info!("Proctor data reset for new session {}", ledger.session_id());

            notes.extend(Notification::new(
                names::LEDGER_RESET,
                &LedgerReset {
                    session_id: ledger.session_id(),
                },
            ));
            notes.extend(Notification::new(names::WARNING_CHANGED, engine.presenter.current()));
        }
        self.emitter.deliver(notes);
    }
}
