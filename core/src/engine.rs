//! The desk engine — owns the dashboard state and everything that
//! mutates it.
//!
//! COMMANDS (each one is atomic relative to observers):
//!   - refresh:  replace transactions, alerts and metrics wholesale
//!   - tick:     maybe one simulated arrival, then truncation
//!   - review:   approve / reject / investigate one transaction
//!   - select:   a transaction directly, or via an alert's reference
//!
//! RULES:
//!   - All randomness flows through the RngBank, one stream per slot.
//!   - Synthesizers never see the live collections.
//!   - Every state change is recorded in the event log.

use crate::{
    alert_synthesizer::AlertSynthesizer,
    clock::{DeskClock, TimeSource},
    command::{DeskCommand, ReviewAction},
    config::DeskConfig,
    error::{DeskError, DeskResult},
    event::{DeskEvent, EventLogEntry},
    metrics_synthesizer::MetricsSynthesizer,
    query::DashboardSummary,
    rng::{RngBank, StreamSlot, SynthRng},
    snapshot::DashboardSnapshot,
    state::DashboardState,
    synthesizer::Synthesizer,
    transaction_synthesizer::TransactionSynthesizer,
    types::{RunId, Tick},
};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

pub struct DeskEngine {
    pub run_id:      RunId,
    pub clock:       DeskClock,
    pub config:      DeskConfig,
    seed:            u64,
    state:           DashboardState,
    transactions:    TransactionSynthesizer,
    alerts:          AlertSynthesizer,
    metrics:         MetricsSynthesizer,
    transaction_rng: SynthRng,
    alert_rng:       SynthRng,
    arrival_rng:     SynthRng,
    event_log:       Vec<EventLogEntry>,
}

impl DeskEngine {
    pub fn new(run_id: RunId, seed: u64, config: DeskConfig, source: TimeSource) -> DeskResult<Self> {
        config.validate()?;
        let bank = RngBank::new(seed);
        Ok(Self {
            clock:           DeskClock::new(source, config.tick_interval_secs),
            transaction_rng: bank.for_stream(StreamSlot::Transaction),
            alert_rng:       bank.for_stream(StreamSlot::Alert),
            arrival_rng:     bank.for_stream(StreamSlot::Arrival),
            transactions:    TransactionSynthesizer::new(),
            alerts:          AlertSynthesizer::new(),
            metrics:         MetricsSynthesizer::new(),
            state:           DashboardState::new(),
            event_log:       Vec::new(),
            config,
            seed,
            run_id,
        })
    }

    /// A wall-clock engine with a fresh run id.
    pub fn build(seed: u64, config: DeskConfig) -> DeskResult<Self> {
        let run_id = format!("run-{seed}-{}", Uuid::new_v4().simple());
        Self::new(run_id, seed, config, TimeSource::System)
    }

    /// Default config on a fixed clock: fully reproducible from `seed`.
    pub fn build_test(run_id: RunId, seed: u64) -> DeskResult<Self> {
        Self::new(run_id, seed, DeskConfig::default(), TimeSource::Fixed { start: test_epoch() })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_state(&self.state)
    }

    /// Dispatch one front-end command.
    pub fn handle(&mut self, command: DeskCommand) -> DeskResult<Vec<DeskEvent>> {
        match command {
            DeskCommand::Refresh => self.refresh(),
            DeskCommand::Tick { count } => self.run_ticks(count),
            DeskCommand::Review { transaction_id, action } => {
                self.apply_action(&transaction_id, action)
            }
            DeskCommand::SelectTransaction { transaction_id } => {
                self.select_transaction(&transaction_id)
            }
            DeskCommand::SelectAlert { alert_id } => self.select_alert(&alert_id),
        }
    }

    /// Replace all three collections via the synthesizers.
    pub fn refresh(&mut self) -> DeskResult<Vec<DeskEvent>> {
        let now = self.clock.now();
        let tick = self.clock.current_tick;

        let transactions = self.transactions.synthesize_many(
            self.config.initial_transactions,
            now,
            &mut self.transaction_rng,
        );
        let alerts = run_synthesizer(&self.alerts, now, &mut self.alert_rng);
        let metrics = self.metrics.synthesize_metrics();

        let event = DeskEvent::DataRefreshed {
            tick,
            transaction_count: transactions.len(),
            alert_count: alerts.len(),
        };
        self.state.replace(transactions, alerts, metrics);
        log::info!(
            "tick={tick} refresh: {} txns, {} alerts",
            self.state.transactions().len(),
            self.state.alerts().len()
        );

        let events = vec![event];
        self.record("refresh", &events)?;
        Ok(events)
    }

    /// Advance one tick. With `arrival_probability`, one fresh
    /// transaction is prepended and the collection truncated.
    pub fn tick(&mut self) -> DeskResult<Vec<DeskEvent>> {
        if self.clock.paused {
            return Err(DeskError::Paused);
        }
        let tick = self.clock.advance();
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.arrival_rng.chance(self.config.arrival_probability) {
            let txn = run_synthesizer(&self.transactions, now, &mut self.transaction_rng);
            let transaction_id = txn.id.clone();
            let risk_level = txn.risk_level;
            let high_risk = txn.is_high_risk();

            let evicted = self.state.push_arrival(txn, self.config.max_transactions);
            events.push(DeskEvent::TransactionArrived {
                tick,
                transaction_id: transaction_id.clone(),
                risk_level,
                evicted,
            });

            if high_risk {
                log::info!("tick={tick} high-risk arrival {transaction_id} ({})", risk_level.as_str());
                events.push(DeskEvent::HighRiskTransactionDetected {
                    tick,
                    transaction_id,
                    risk_level,
                });
            }
        }

        events.push(DeskEvent::TickCompleted { tick });
        log::debug!(
            "tick={tick} arrival: {} txns held",
            self.state.transactions().len()
        );

        self.record("arrival", &events)?;
        Ok(events)
    }

    /// Run n ticks in a loop. Used for testing and the runner.
    pub fn run_ticks(&mut self, n: u64) -> DeskResult<Vec<DeskEvent>> {
        self.clock.resume();
        let result = (0..n).try_fold(Vec::new(), |mut all, _| {
            all.extend(self.tick()?);
            Ok::<_, DeskError>(all)
        });
        self.clock.pause();
        result
    }

    pub fn apply_action(&mut self, id: &str, action: ReviewAction) -> DeskResult<Vec<DeskEvent>> {
        let previous_status = self.state.apply_action(id, action).map_err(|e| {
            log::warn!("review {} on unknown transaction {id}", action.as_str());
            e
        })?;
        let new_status = action.resulting_status();
        log::info!(
            "review: {id} {} -> {}",
            previous_status.as_str(),
            new_status.as_str()
        );

        let events = vec![DeskEvent::TransactionReviewed {
            tick: self.clock.current_tick,
            transaction_id: id.to_string(),
            action,
            previous_status,
            new_status,
        }];
        self.record("review", &events)?;
        Ok(events)
    }

    pub fn select_transaction(&mut self, id: &str) -> DeskResult<Vec<DeskEvent>> {
        self.state.select_transaction(id)?;
        let events = vec![DeskEvent::TransactionSelected {
            tick: self.clock.current_tick,
            transaction_id: id.to_string(),
        }];
        self.record("selection", &events)?;
        Ok(events)
    }

    /// Select the transaction an alert points at, when it is live.
    /// The alert is reported either way.
    pub fn select_alert(&mut self, alert_id: &str) -> DeskResult<Vec<DeskEvent>> {
        let (alert, transaction_found) = self.state.select_alert(alert_id)?;
        if !transaction_found {
            log::debug!(
                "alert {alert_id} references {} which is not in the live set",
                alert.transaction_id
            );
        }
        let events = vec![DeskEvent::AlertSelected {
            tick: self.clock.current_tick,
            alert_id: alert.id,
            title: alert.title,
            transaction_id: alert.transaction_id,
            transaction_found,
        }];
        self.record("selection", &events)?;
        Ok(events)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            run_id:       self.run_id.clone(),
            tick:         self.clock.current_tick,
            clock:        self.clock.clone(),
            transactions: self.state.transactions().to_vec(),
            alerts:       self.state.alerts().to_vec(),
            metrics:      self.state.metrics().cloned(),
            summary:      self.summary(),
            selected:     self.state.selected_id().map(str::to_string),
        }
    }

    /// Events logged at `tick`, in emission order.
    pub fn events_for_tick(&self, tick: Tick) -> impl Iterator<Item = &EventLogEntry> {
        self.event_log.iter().filter(move |e| e.tick == tick)
    }

    fn record(&mut self, component: &str, events: &[DeskEvent]) -> DeskResult<()> {
        for event in events {
            self.event_log.push(EventLogEntry {
                run_id:     self.run_id.clone(),
                tick:       self.clock.current_tick,
                component:  component.to_string(),
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            });
        }
        Ok(())
    }
}

/// Run one synthesizer against its stream.
fn run_synthesizer<S: Synthesizer>(synth: &S, now: DateTime<Utc>, rng: &mut SynthRng) -> S::Output {
    log::debug!("synthesize: {} (stream {})", synth.name(), rng.name);
    synth.synthesize(now, rng)
}

/// Fixed start instant for test engines: Monday 2024-01-01 12:00 UTC.
fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}
