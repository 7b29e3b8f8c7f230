//! src/tasks/scheduler.rs
//!
//! Drives the monitor: one-time setup, an immediate first cycle, then one
//! cycle per refresh interval until the shutdown signal fires.
//!
//! Cycles never overlap. They run one after another inside the loop, and the
//! interval skips any tick that elapsed while a cycle was still running.

use std::sync::Arc;

use chrono::Local;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::accounts::load_accounts;
use crate::config::MonitorConfig;
use crate::context::MonitorContext;
use crate::models::MonitorSummary;
use crate::scratch::ScratchDir;
use crate::shutdown::ShutdownSignal;
use crate::tasks::poll_cycle::run_poll_cycle;
use crate::traits::{CycleReporter, RecognizerFactory, SessionConnector};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Initializing,
    Running { cycle: u64 },
    Waiting,
    ShuttingDown,
    Stopped,
}

/// Environment lookup used to discover accounts.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct Monitor {
    config: MonitorConfig,
    connector: Arc<dyn SessionConnector>,
    recognizers: Arc<dyn RecognizerFactory>,
    reporter: Arc<dyn CycleReporter>,
    env: EnvLookup,
    state: MonitorState,
}

impl Monitor {
    pub fn new(
        config: MonitorConfig,
        connector: Arc<dyn SessionConnector>,
        recognizers: Arc<dyn RecognizerFactory>,
        reporter: Arc<dyn CycleReporter>,
    ) -> Self {
        Self {
            config,
            connector,
            recognizers,
            reporter,
            env: Arc::new(|name| std::env::var(name).ok()),
            state: MonitorState::Idle,
        }
    }

    /// Replaces the process environment as the source of account pairs.
    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    fn transition(&mut self, next: MonitorState) {
        debug!("Monitor state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Runs until `shutdown` fires, then releases everything and reports how
    /// many cycles completed.
    ///
    /// Only a failure to start the OCR worker is returned as an error.
    pub async fn run(&mut self, shutdown: ShutdownSignal) -> Result<MonitorSummary, Error> {
        self.transition(MonitorState::Initializing);
        self.reporter.on_starting();

        let recognizer = match self.recognizers.create_worker(&self.config.ocr_language).await {
            Ok(worker) => worker,
            Err(e) => {
                self.transition(MonitorState::Stopped);
                return Err(e);
            }
        };
        self.reporter.on_recognizer_ready();

        let env = Arc::clone(&self.env);
        let accounts = load_accounts(&self.config.env_prefix, self.config.start_index, |name| (*env)(name));
        if accounts.is_empty() {
            warn!(
                "No accounts found ({}_KEY_{} / {}_COMP_{} unset)",
                self.config.env_prefix,
                self.config.start_index,
                self.config.env_prefix,
                self.config.start_index
            );
        }
        info!("Loaded {} accounts starting at #{}", accounts.len(), self.config.start_index);
        self.reporter.on_accounts_loaded(&accounts, self.config.start_index);

        let ctx = MonitorContext::new(
            accounts,
            Arc::clone(&self.connector),
            recognizer,
            ScratchDir::new(self.config.scratch_dir.clone()),
        );

        let mut cycles_completed = 0u64;
        tokio::select! {
            biased;
            _ = shutdown.wait() => {}
            _ = self.drive(&ctx, &mut cycles_completed) => {}
        }

        info!("Shutdown requested after {} cycles", cycles_completed);
        self.transition(MonitorState::ShuttingDown);
        ctx.shutdown().await;

        let summary = MonitorSummary {
            cycles_completed,
            stopped_at: Local::now(),
        };
        self.transition(MonitorState::Stopped);
        self.reporter.on_stopped(&summary);
        Ok(summary)
    }

    /// Pre-warm, pause, then cycle forever. Only ends by being dropped.
    async fn drive(&mut self, ctx: &MonitorContext, cycles_completed: &mut u64) {
        self.prewarm(ctx).await;

        let delay = self.config.startup_delay;
        self.reporter.on_first_cycle_pending(delay.as_secs_f64());
        tokio::time::sleep(delay).await;

        let refresh = self.config.refresh_interval();
        let mut ticker: Option<Interval> = None;
        loop {
            let run = *cycles_completed + 1;
            self.transition(MonitorState::Running { cycle: run });
            let report = run_poll_cycle(ctx, run).await;
            *cycles_completed = run;
            self.reporter.on_cycle(&report);
            self.transition(MonitorState::Waiting);

            let Some(period) = refresh else {
                debug!("Refresh disabled; idling until shutdown");
                std::future::pending::<()>().await;
                continue;
            };
            let ticker = ticker.get_or_insert_with(|| {
                let mut t = interval_at(Instant::now() + period, period);
                t.set_missed_tick_behavior(MissedTickBehavior::Skip);
                t
            });
            ticker.tick().await;
        }
    }

    /// Opens a session for every account up front. Failures are only logged;
    /// the cycle retries them later.
    async fn prewarm(&self, ctx: &MonitorContext) {
        for account in ctx.accounts.iter() {
            let outcome = ctx.pool.acquire(account).await;
            if let Err(e) = &outcome {
                warn!("Failed to connect account #{}: {}", account.index, e);
            }
            self.reporter
                .on_session_warmed(account, outcome.as_ref().map(|_| ()));
        }
    }
}
