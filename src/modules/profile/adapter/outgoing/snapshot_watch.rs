use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::modules::profile::application::ports::outgoing::{
    ProfileEvent, ProfileStoreError, ProfileSubscription,
};
use crate::modules::profile::domain::ProfileDocument;

const EVENT_BUFFER: usize = 16;

/// A document together with the backend's change token for it.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedDocument {
    pub version: String,
    pub document: ProfileDocument,
}

/// Something a watcher can re-read when it suspects a change.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    async fn read_versioned(&self) -> Result<VersionedDocument, ProfileStoreError>;
}

enum Trigger {
    Poll,
    Pushed(VersionedDocument),
}

struct WatchState {
    events: broadcast::Sender<ProfileEvent>,
    last: Option<ProfileEvent>,
    running: bool,
}

fn lock(state: &Mutex<WatchState>) -> MutexGuard<'_, WatchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One watcher per store, fanned out to every subscription.
///
/// The watcher emits a snapshot on its first read and on every version change. Changes
/// arrive either as documents pushed by the writer in this process, or are found by
/// re-reading the source every `poll_every`. Consecutive read failures are reported once
/// until a read succeeds again.
///
/// The first subscriber starts the watcher and later ones are seeded with its last event.
/// It stops on the first trigger after the last subscriber has gone.
pub struct SharedWatch<S: SnapshotSource> {
    source: Arc<S>,
    pushed: broadcast::Sender<VersionedDocument>,
    poll_every: Duration,
    state: Arc<Mutex<WatchState>>,
}

impl<S: SnapshotSource> SharedWatch<S> {
    pub fn new(
        source: Arc<S>,
        pushed: broadcast::Sender<VersionedDocument>,
        poll_every: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            source,
            pushed,
            poll_every,
            state: Arc::new(Mutex::new(WatchState {
                events,
                last: None,
                running: false,
            })),
        }
    }

    pub fn subscribe(&self) -> ProfileSubscription {
        let mut state = lock(&self.state);
        let live = state.events.subscribe();
        let seed = state.last.clone();

        if !state.running {
            state.running = true;
            debug!(observers = state.events.receiver_count(), "Starting profile watcher");
            tokio::spawn(run_watch(
                Arc::clone(&self.source),
                self.pushed.subscribe(),
                self.poll_every,
                Arc::clone(&self.state),
            ));
        }

        ProfileSubscription::new(seed, live)
    }

    pub fn observers(&self) -> usize {
        lock(&self.state).events.receiver_count()
    }
}

/// Marks the watcher stopped when nobody is listening. Returns whether it stopped.
fn stop_if_unobserved(state: &Mutex<WatchState>) -> bool {
    let mut state = lock(state);
    if state.events.receiver_count() > 0 {
        return false;
    }
    state.running = false;
    state.last = None;
    info!("Profile watcher stopped, no observers left");
    true
}

fn publish(state: &Mutex<WatchState>, event: ProfileEvent) {
    let mut state = lock(state);
    state.last = Some(event.clone());
    // No receivers is handled on the next trigger.
    let _ = state.events.send(event);
}

async fn run_watch<S: SnapshotSource>(
    source: Arc<S>,
    pushed: broadcast::Receiver<VersionedDocument>,
    poll_every: Duration,
    state: Arc<Mutex<WatchState>>,
) {
    let mut ticker = interval(poll_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let polls = IntervalStream::new(ticker).map(|_| Trigger::Poll);
    let pushes = BroadcastStream::new(pushed).map(|received| match received {
        Ok(doc) => Trigger::Pushed(doc),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            debug!(skipped, "Watcher lagged behind writes, re-reading");
            Trigger::Poll
        }
    });
    let mut triggers = polls.merge(pushes);

    let mut last_version: Option<String> = None;
    let mut failing = false;

    while let Some(trigger) = triggers.next().await {
        if stop_if_unobserved(&state) {
            return;
        }

        let read = match trigger {
            Trigger::Poll => source.read_versioned().await,
            Trigger::Pushed(doc) => Ok(doc),
        };

        let event = match read {
            Ok(current) => {
                failing = false;
                if last_version.as_deref() == Some(current.version.as_str()) {
                    continue;
                }
                last_version = Some(current.version);
                ProfileEvent::Snapshot(current.document)
            }
            Err(e) => {
                if failing {
                    continue;
                }
                warn!(error = %e, "Profile watcher read failed");
                failing = true;
                last_version = None;
                ProfileEvent::Error(e.to_string())
            }
        };

        publish(&state, event);
    }

    stop_if_unobserved(&state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedSource {
        reads: Mutex<VecDeque<Result<VersionedDocument, ProfileStoreError>>>,
        count: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(reads: Vec<Result<VersionedDocument, ProfileStoreError>>) -> Arc<Self> {
            Arc::new(Self {
                reads: Mutex::new(reads.into()),
                count: AtomicUsize::new(0),
            })
        }

        fn reads(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SnapshotSource for ScriptedSource {
        async fn read_versioned(&self) -> Result<VersionedDocument, ProfileStoreError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            let mut reads = self.reads.lock().unwrap();
            if reads.len() > 1 {
                reads.pop_front().unwrap()
            } else {
                reads.front().cloned().unwrap()
            }
        }
    }

    fn versioned(version: &str, name: &str) -> VersionedDocument {
        VersionedDocument {
            version: version.to_string(),
            document: ProfileDocument {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    fn watch(source: Arc<ScriptedSource>, poll_every: Duration) -> SharedWatch<ScriptedSource> {
        let (pushed, _) = broadcast::channel(4);
        SharedWatch::new(source, pushed, poll_every)
    }

    #[tokio::test]
    async fn emits_first_read_then_only_changes() {
        let source = ScriptedSource::new(vec![
            Ok(versioned("v1", "first")),
            Ok(versioned("v1", "first")),
            Ok(versioned("v2", "second")),
        ]);

        let mut sub = watch(source, Duration::from_millis(5)).subscribe();

        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "first").document))
        );
        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v2", "second").document))
        );
    }

    #[tokio::test]
    async fn read_failure_is_reported_once_then_recovers() {
        let source = ScriptedSource::new(vec![
            Err(ProfileStoreError::PermissionDenied("rules".to_string())),
            Err(ProfileStoreError::PermissionDenied("rules".to_string())),
            Ok(versioned("v1", "back")),
        ]);

        let mut sub = watch(source, Duration::from_millis(5)).subscribe();

        assert!(matches!(sub.next().await, Some(ProfileEvent::Error(msg)) if msg.contains("rules")));
        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "back").document))
        );
    }

    #[tokio::test]
    async fn pushed_writes_are_delivered_without_polling() {
        let source = ScriptedSource::new(vec![Ok(versioned("v1", "polled"))]);
        let (pushed, _) = broadcast::channel(4);
        let watch = SharedWatch::new(source.clone(), pushed.clone(), Duration::from_secs(3600));

        let mut sub = watch.subscribe();
        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "polled").document))
        );

        pushed.send(versioned("v2", "pushed")).unwrap();

        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v2", "pushed").document))
        );
        assert_eq!(source.reads(), 1);
    }

    #[tokio::test]
    async fn subscribers_share_one_upstream_read() {
        let source = ScriptedSource::new(vec![Ok(versioned("v1", "shared"))]);
        let (pushed, _) = broadcast::channel(4);
        let watch = SharedWatch::new(source.clone(), pushed.clone(), Duration::from_secs(3600));

        let mut first = watch.subscribe();
        assert_eq!(
            first.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "shared").document))
        );
        let mut second = watch.subscribe();
        assert_eq!(
            second.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "shared").document))
        );
        assert_eq!(watch.observers(), 2);

        pushed.send(versioned("v2", "written")).unwrap();
        for sub in [&mut first, &mut second] {
            assert_eq!(
                sub.next().await,
                Some(ProfileEvent::Snapshot(versioned("v2", "written").document))
            );
        }

        assert_eq!(source.reads(), 1);
    }

    #[tokio::test]
    async fn watcher_stops_polling_once_unobserved_and_restarts_on_demand() {
        let source = ScriptedSource::new(vec![Ok(versioned("v1", "doc"))]);
        let watch = watch(source.clone(), Duration::from_millis(10));

        let mut sub = watch.subscribe();
        assert!(matches!(sub.next().await, Some(ProfileEvent::Snapshot(_))));
        drop(sub);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let settled = source.reads();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(source.reads(), settled);

        let mut sub = watch.subscribe();
        assert_eq!(
            sub.next().await,
            Some(ProfileEvent::Snapshot(versioned("v1", "doc").document))
        );
        assert!(source.reads() > settled);
    }
}
