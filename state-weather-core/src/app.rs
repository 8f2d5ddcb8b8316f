//! Application context tying a weather source to a presenter.
//!
//! Fetches run on a tokio runtime; results come back to the owning (UI)
//! thread over an mpsc channel and are handed to the presenter from
//! [`WeatherApp::pump`] or [`WeatherApp::wait`].

use chrono::{DateTime, Local};
use std::{
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};
use tokio::{runtime::Handle, task::AbortHandle};

use crate::{
    WeatherRecord,
    client::WeatherSource,
    error::{FlowError, ValidationError},
    flow,
    presenter::Presenter,
};

/// Message sent from a finished fetch back to the UI thread.
#[derive(Debug)]
pub struct FetchCompleted {
    pub seq: u64,
    pub city: String,
    pub completed_at: DateTime<Local>,
    pub result: Result<WeatherRecord, FlowError>,
}

pub struct WeatherApp<P> {
    source: Arc<dyn WeatherSource>,
    presenter: P,
    runtime: Handle,
    tx: mpsc::Sender<FetchCompleted>,
    rx: mpsc::Receiver<FetchCompleted>,
    seq: u64,
    in_flight: Option<AbortHandle>,
}

impl<P: Presenter> WeatherApp<P> {
    pub fn new(source: Arc<dyn WeatherSource>, presenter: P, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            presenter,
            runtime,
            tx,
            rx,
            seq: 0,
            in_flight: None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start fetching weather for `city`, replacing any request in flight.
    ///
    /// An empty selection is reported to the presenter immediately and
    /// nothing is spawned. Returns the sequence number of the new request.
    pub fn submit(&mut self, city: &str) -> Option<u64> {
        let city = city.trim();
        if city.is_empty() {
            let err = FlowError::from(ValidationError::NoCitySelected);
            tracing::debug!("submit rejected: {err}");
            self.presenter.show_error(&err.user_message());
            return None;
        }

        self.cancel();
        self.seq += 1;

        let seq = self.seq;
        let tx = self.tx.clone();
        let source = Arc::clone(&self.source);
        let city = city.to_string();

        self.presenter.fetching(&city);

        let task = self.runtime.spawn(async move {
            let result = flow::fetch_record(source.as_ref(), &city).await;
            // Receiver gone means the app was dropped; nothing left to notify.
            let _ = tx.send(FetchCompleted {
                seq,
                city,
                completed_at: Local::now(),
                result,
            });
        });
        self.in_flight = Some(task.abort_handle());

        Some(seq)
    }

    /// Deliver every completed fetch without blocking. Returns how many
    /// results reached the presenter.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(msg) = self.rx.try_recv() {
            if self.deliver(msg) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Block until the current request is delivered or `timeout` passes.
    /// Returns `false` on timeout or when nothing is in flight.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        while self.in_flight.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    if self.deliver(msg) {
                        return true;
                    }
                }
                Err(_) => return false,
            }
        }

        false
    }

    /// Abort the request in flight, if any. Its result is never delivered.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            tracing::debug!(seq = self.seq, "cancelling weather request");
            task.abort();
        }
    }

    /// Tear down the context and hand back the presenter.
    pub fn dispose(mut self) -> P {
        self.cancel();
        self.presenter
    }

    fn deliver(&mut self, msg: FetchCompleted) -> bool {
        if msg.seq != self.seq || self.in_flight.is_none() {
            tracing::debug!(seq = msg.seq, city = %msg.city, "dropping superseded result");
            return false;
        }

        self.in_flight = None;
        match msg.result {
            Ok(record) => self.presenter.render(&msg.city, &record, msg.completed_at),
            Err(err) => self.presenter.show_error(&err.user_message()),
        }
        true
    }
}
