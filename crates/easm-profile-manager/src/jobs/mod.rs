use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::{mpsc, oneshot, watch, RwLock},
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{aggregate::aggregate, auth::Connection, models::Snapshot};

/// The current connection, if the operator has connected.
pub type Dashboard = Arc<RwLock<Option<Connection>>>;

#[derive(Debug)]
pub struct RefreshRequest {
    pub done: Option<oneshot::Sender<u64>>,
}

#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<RefreshRequest>,
}

impl RefreshHandle {
    pub fn new(tx: mpsc::Sender<RefreshRequest>) -> Self {
        Self { tx }
    }

    /// Requests a pass and waits for it. Returns the published generation,
    /// or `None` once the refresh loop has stopped.
    pub async fn refresh(&self) -> Option<u64> {
        let (done, rx) = oneshot::channel();
        self.tx
            .send(RefreshRequest { done: Some(done) })
            .await
            .ok()?;
        rx.await.ok()
    }
}

/// Re-aggregates on every tick and on every explicit request, publishing each
/// result on `snapshots`. Ends when all request senders are dropped.
pub async fn refresh_loop(
    dashboard: Dashboard,
    mut rx: mpsc::Receiver<RefreshRequest>,
    snapshots: watch::Sender<Snapshot>,
    every: Duration,
    concurrency: usize,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut generation = 0u64;

    loop {
        let (requested, done) = tokio::select! {
            _ = ticker.tick() => (false, None),
            req = rx.recv() => match req {
                Some(req) => (true, req.done),
                None => break,
            },
        };
        if requested {
            // next automatic pass is a full interval after this one
            ticker.reset();
        }

        generation += 1;
        let connection = dashboard.read().await.clone();
        let snapshot = match connection {
            Some(conn) => {
                let records = aggregate(&conn.gateway, &conn.sessions, concurrency).await;
                info!(
                    generation,
                    identities = conn.sessions.len(),
                    rows = records.len(),
                    "profile table refreshed"
                );
                Snapshot {
                    generation,
                    refreshed_at: Some(Utc::now()),
                    records,
                }
            }
            None => {
                debug!(generation, "not connected, publishing empty table");
                Snapshot {
                    generation,
                    ..Snapshot::default()
                }
            }
        };

        snapshots.send_replace(snapshot);
        if let Some(done) = done {
            let _ = done.send(generation);
        }
    }

    info!("refresh loop stopped");
}
