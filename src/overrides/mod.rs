//! Add/remove workday override commands.
//!
//! Producers push date strings into a bounded [`OverrideQueue`]; a single
//! [`OverrideWorker`] applies them to the ledger one at a time in receipt
//! order. A full queue makes producers wait at most `send_timeout`.

use crate::core::calendar::{format_day, parse_override_date};
use crate::errors::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::models::Day;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideAction {
    Add,
    Remove,
}

impl fmt::Display for OverrideAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideAction::Add => write!(f, "override_add"),
            OverrideAction::Remove => write!(f, "override_remove"),
        }
    }
}

#[derive(Debug)]
pub struct OverrideCommand {
    pub action: OverrideAction,
    /// `YYYY.MM.DD`
    pub date: String,
    reply: Option<oneshot::Sender<AppResult<Day>>>,
}

/// Producer side of the command queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OverrideQueue {
    tx: mpsc::Sender<OverrideCommand>,
    send_timeout: Duration,
}

impl OverrideQueue {
    pub fn channel(capacity: usize, send_timeout: Duration) -> (Self, mpsc::Receiver<OverrideCommand>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, send_timeout }, rx)
    }

    /// Queue an override for `date`; does not wait for it to be applied.
    pub async fn add(&self, date: &str) -> AppResult<()> {
        self.send(OverrideAction::Add, date, None).await
    }

    /// Queue the removal of the override for `date`.
    pub async fn remove(&self, date: &str) -> AppResult<()> {
        self.send(OverrideAction::Remove, date, None).await
    }

    /// Queue a command and wait until the worker has applied it.
    pub async fn submit(&self, action: OverrideAction, date: &str) -> AppResult<Day> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(action, date, Some(reply_tx)).await?;
        reply_rx.await.map_err(|_| AppError::QueueClosed)?
    }

    async fn send(
        &self,
        action: OverrideAction,
        date: &str,
        reply: Option<oneshot::Sender<AppResult<Day>>>,
    ) -> AppResult<()> {
        let cmd = OverrideCommand {
            action,
            date: date.to_string(),
            reply,
        };

        match tokio::time::timeout(self.send_timeout, self.tx.send(cmd)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(AppError::QueueClosed),
            Err(_) => Err(AppError::QueueFull(format!("{} {}", action, date))),
        }
    }
}

/// Apply one command to the ledger together with its internal log line.
/// On error nothing was changed.
pub fn apply_override(ledger: &dyn Ledger, action: OverrideAction, date: &str) -> AppResult<Day> {
    let day = parse_override_date(date)?;
    ledger.change_workday_override_logged(
        day,
        action == OverrideAction::Add,
        &action.to_string(),
        &format_day(day),
        &format!("Workday override {} applied for day {}", action, day),
    )?;
    Ok(day)
}

pub struct OverrideWorker {
    ledger: Arc<dyn Ledger>,
    rx: mpsc::Receiver<OverrideCommand>,
}

impl OverrideWorker {
    pub fn new(ledger: Arc<dyn Ledger>, rx: mpsc::Receiver<OverrideCommand>) -> Self {
        Self { ledger, rx }
    }

    /// Consume commands until shutdown or until every producer is gone.
    /// Returns the number of commands applied successfully.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!("override worker started");
        let mut applied = 0;

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let cmd = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                cmd = self.rx.recv() => match cmd {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            let result = apply_override(self.ledger.as_ref(), cmd.action, &cmd.date);
            match &result {
                Ok(day) => {
                    applied += 1;
                    info!(action = %cmd.action, day = *day, date = %cmd.date, "override applied");
                }
                Err(e) => warn!(action = %cmd.action, date = %cmd.date, "override rejected: {e}"),
            }

            if let Some(reply) = cmd.reply {
                // the producer may have stopped waiting
                let _ = reply.send(result);
            }
        }

        info!(applied, "override worker shutting down");
        applied
    }
}
