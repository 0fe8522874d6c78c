// Async host for the swipe engine: a background task owns the engine and
// turns removal deadlines into timer wake-ups.

use crate::domain::{EngineSnapshot, SwipeEngine, SwipeEvent, SwipeInput};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

/// Buffered events per subscriber before old ones are dropped
const EVENT_CAPACITY: usize = 64;

/// Message types for the engine worker
enum ServiceRequest {
    /// Apply an input and report the resulting event
    Input {
        input: SwipeInput,
        response_tx: oneshot::Sender<Option<SwipeEvent>>,
    },
    /// Copy out the current engine state
    Snapshot {
        response_tx: oneshot::Sender<EngineSnapshot>,
    },
    /// Stop the worker
    Shutdown,
}

/// Handle for sending inputs to a running engine
#[derive(Clone)]
pub struct SwipeService {
    request_tx: mpsc::Sender<ServiceRequest>,
    event_tx: broadcast::Sender<SwipeEvent>,
}

impl SwipeService {
    /// Moves `engine` onto a background task. Must be called within a tokio
    /// runtime.
    pub fn spawn(engine: SwipeEngine) -> Self {
        let (request_tx, request_rx) = mpsc::channel(32);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let worker_events = event_tx.clone();
        tokio::spawn(async move {
            Self::worker(engine, request_rx, worker_events).await;
        });

        Self {
            request_tx,
            event_tx,
        }
    }

    /// Processes requests in arrival order and wakes up for the next
    /// removal deadline in between.
    async fn worker(
        mut engine: SwipeEngine,
        mut request_rx: mpsc::Receiver<ServiceRequest>,
        event_tx: broadcast::Sender<SwipeEvent>,
    ) {
        loop {
            let deadline = engine.next_deadline();

            tokio::select! {
                request = request_rx.recv() => match request {
                    Some(ServiceRequest::Input { input, response_tx }) => {
                        // Removals that came due while the request waited go first
                        Self::flush_due(&mut engine, &event_tx);
                        let event = engine.handle(input);
                        if let Some(ref event) = event {
                            let _ = event_tx.send(event.clone());
                        }
                        let _ = response_tx.send(event);
                    }
                    Some(ServiceRequest::Snapshot { response_tx }) => {
                        Self::flush_due(&mut engine, &event_tx);
                        let _ = response_tx.send(engine.snapshot());
                    }
                    Some(ServiceRequest::Shutdown) | None => break,
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Self::flush_due(&mut engine, &event_tx);
                }
            }
        }

        tracing::debug!("swipe service stopped");
    }

    fn flush_due(engine: &mut SwipeEngine, event_tx: &broadcast::Sender<SwipeEvent>) {
        for event in engine.tick() {
            let _ = event_tx.send(event);
        }
    }

    /// Sends an input. Returns `None` if the input was absorbed or the
    /// service has shut down.
    pub async fn send(&self, input: SwipeInput) -> Option<SwipeEvent> {
        let (response_tx, response_rx) = oneshot::channel();
        let request = ServiceRequest::Input { input, response_tx };

        if self.request_tx.send(request).await.is_err() {
            return None;
        }

        response_rx.await.ok().flatten()
    }

    pub async fn snapshot(&self) -> Option<EngineSnapshot> {
        let (response_tx, response_rx) = oneshot::channel();

        if self
            .request_tx
            .send(ServiceRequest::Snapshot { response_tx })
            .await
            .is_err()
        {
            return None;
        }

        response_rx.await.ok()
    }

    /// Stream of every event, including removals fired by timers.
    pub fn subscribe(&self) -> broadcast::Receiver<SwipeEvent> {
        self.event_tx.subscribe()
    }

    pub async fn shutdown(&self) {
        let _ = self.request_tx.send(ServiceRequest::Shutdown).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, CandidateId, Directive, Displacement, Outcome};
    use std::time::Duration;

    fn trio() -> Vec<Candidate> {
        vec![
            Candidate::new("alice", "Alice"),
            Candidate::new("bob", "Bob"),
            Candidate::new("carla", "Carla"),
        ]
    }

    fn names(snapshot: &EngineSnapshot) -> Vec<&str> {
        snapshot.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_fires_after_grace_period() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));
        let mut events = service.subscribe();

        service
            .send(SwipeInput::DragChanged(Displacement::horizontal(200.0)))
            .await;
        let settled = service.send(SwipeInput::DragEnded).await;
        assert!(matches!(
            settled,
            Some(SwipeEvent::Settled {
                outcome: Outcome::Accepted,
                ..
            })
        ));

        let before = service.snapshot().await.unwrap();
        assert_eq!(names(&before), vec!["Alice", "Bob", "Carla"]);
        assert_eq!(before.pending_removals, 1);

        tokio::time::sleep(Duration::from_millis(350)).await;

        let after = service.snapshot().await.unwrap();
        assert_eq!(names(&after), vec!["Alice", "Bob"]);
        assert_eq!(after.top, Some(CandidateId::from("bob")));
        assert_eq!(after.pending_removals, 0);

        assert!(matches!(events.try_recv(), Ok(SwipeEvent::DragStarted { .. })));
        assert!(matches!(events.try_recv(), Ok(SwipeEvent::Settled { .. })));
        match events.try_recv() {
            Ok(SwipeEvent::Removed { id, .. }) => assert_eq!(id, CandidateId::from("carla")),
            other => panic!("expected removal, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_waits_for_full_delay() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));

        service
            .send(SwipeInput::Directive(Directive::ForceReject))
            .await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.candidates.len(), 3);
        assert_eq!(snapshot.pending_removals, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_force_schedules_one_removal() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));

        let first = service
            .send(SwipeInput::Directive(Directive::ForceReject))
            .await;
        let second = service
            .send(SwipeInput::Directive(Directive::ForceReject))
            .await;
        assert!(first.is_some());
        assert!(second.is_none());

        tokio::time::sleep(Duration::from_millis(350)).await;
        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(names(&snapshot), vec!["Alice", "Bob"]);
        assert_eq!(snapshot.statistics.rejected, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_after_deadline_acts_on_next_card() {
        for _ in 0..40 {
            let service = SwipeService::spawn(SwipeEngine::new(trio()));

            let first = service
                .send(SwipeInput::Directive(Directive::ForceReject))
                .await;
            assert!(first.is_some());

            tokio::time::advance(Duration::from_millis(350)).await;

            let second = service
                .send(SwipeInput::Directive(Directive::ForceReject))
                .await;
            match second {
                Some(SwipeEvent::Settled { id, outcome, .. }) => {
                    assert_eq!(id, CandidateId::from("bob"));
                    assert_eq!(outcome, Outcome::Rejected);
                }
                other => panic!("expected Bob to settle, got {:?}", other),
            }

            service.shutdown().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_after_deadline_reflects_removal() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));
        let mut events = service.subscribe();

        service
            .send(SwipeInput::Directive(Directive::ForceAccept))
            .await;
        tokio::time::advance(Duration::from_millis(300)).await;

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(names(&snapshot), vec!["Alice", "Bob"]);
        assert_eq!(snapshot.pending_removals, 0);

        assert!(matches!(events.try_recv(), Ok(SwipeEvent::Settled { .. })));
        assert!(matches!(events.try_recv(), Ok(SwipeEvent::Removed { .. })));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_during_grace_period() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));

        service
            .send(SwipeInput::Directive(Directive::ForceAccept))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        service.send(SwipeInput::Directive(Directive::Reload)).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(names(&snapshot), vec!["Alice", "Bob", "Carla"]);
        assert!(snapshot.session.is_none());
    }

    #[tokio::test]
    async fn test_requests_after_shutdown_resolve_to_none() {
        let service = SwipeService::spawn(SwipeEngine::new(trio()));
        service.shutdown().await;

        let event = service
            .send(SwipeInput::Directive(Directive::ForceReject))
            .await;
        assert!(event.is_none());
        assert!(service.snapshot().await.is_none());
    }
}
