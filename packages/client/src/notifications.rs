//! # Notification cache
//!
//! [`NotificationCache`] keeps the logged-in user's notifications fresh by
//! polling a [`NotificationBackend`] on a fixed period (30 seconds by
//! default) and exposes the cached list and the unread count as observable
//! values.
//!
//! ## Staleness
//!
//! Every [`start`](NotificationCache::start) and
//! [`stop`](NotificationCache::stop) bumps a generation counter. A fetch
//! remembers the generation it started under and the user it fetched for; its
//! result is applied only if, at completion, the generation is unchanged and
//! the session still belongs to that user. Anything else is reported as
//! [`FetchOutcome::Discarded`] and leaves the cache untouched.
//!
//! While started, the cache also follows the [`SessionStore`]: when the
//! session ends or changes hands the previous user's records are dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use api::{ApiError, NotificationBackend, NotificationRecord};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::auth::SessionStore;
use crate::observable::{Observable, SubscriptionId};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Shorter periods are raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cached notifications of one user. The unread count is derived from the
/// records whenever they change, so the two never disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    owner: Option<i64>,
    records: Vec<NotificationRecord>,
    unread: usize,
}

impl NotificationState {
    fn for_user(owner: i64, records: Vec<NotificationRecord>) -> Self {
        let unread = records.iter().filter(|r| !r.is_read).count();
        Self {
            owner: Some(owner),
            records,
            unread,
        }
    }

    /// User the records were fetched for, `None` before the first fetch.
    pub fn owner(&self) -> Option<i64> {
        self.owner
    }

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    /// Flip `id` to read. Returns whether it was unread, or `None` if no
    /// cached record has that id.
    fn mark_read(&mut self, id: i64) -> Option<bool> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        let was_unread = !record.is_read;
        record.is_read = true;
        if was_unread {
            self.unread = self.unread.saturating_sub(1);
        }
        Some(was_unread)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetched list replaced the cache.
    Applied { unread: usize },
    /// Nobody is logged in; no request was made.
    Skipped,
    /// The result arrived after a stop, restart, logout or user switch.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    Marked { was_unread: bool },
    /// The server accepted the call but the id is not in the cache.
    NotFound,
}

#[derive(Default)]
struct Poller {
    task: Option<JoinHandle<()>>,
    session_subscription: Option<SubscriptionId>,
}

pub struct NotificationCache {
    backend: Arc<dyn NotificationBackend>,
    session: Arc<SessionStore>,
    period: Duration,
    state: Observable<NotificationState>,
    generation: AtomicU64,
    poller: Mutex<Poller>,
}

impl NotificationCache {
    /// A stopped cache polling every [`DEFAULT_POLL_INTERVAL`] once started.
    pub fn new(backend: Arc<dyn NotificationBackend>, session: Arc<SessionStore>) -> Arc<Self> {
        Self::with_period(backend, session, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_period(
        backend: Arc<dyn NotificationBackend>,
        session: Arc<SessionStore>,
        period: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            backend,
            session,
            period: period.max(MIN_POLL_INTERVAL),
            state: Observable::default(),
            generation: AtomicU64::new(0),
            poller: Mutex::new(Poller::default()),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn poller(&self) -> MutexGuard<'_, Poller> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bump the generation under the state lock, so no fetch can be applied
    /// between the bump and its check.
    fn next_generation(&self) -> u64 {
        self.state
            .with(|_| self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_running(&self) -> bool {
        self.poller().task.is_some()
    }

    /// Start polling: the first tick fires immediately, then once per period.
    /// Must be called inside a tokio runtime. Starting a running cache does
    /// nothing.
    pub fn start(self: &Arc<Self>) {
        let generation = {
            let mut poller = self.poller();
            if poller.task.is_some() {
                return;
            }
            let generation = self.next_generation();
            poller.task = Some(tokio::spawn(poll_loop(
                Arc::downgrade(self),
                generation,
                self.period,
            )));
            generation
        };
        tracing::debug!(generation, period = ?self.period, "notification polling started");

        // Subscribing delivers the current session at once, which may notify
        // state observers; the poller lock must not be held here.
        let weak = Arc::downgrade(self);
        let subscription = self.session.subscribe(move |session| {
            if let Some(cache) = weak.upgrade() {
                cache.follow_session(session.as_ref().map(|s| s.user_id));
            }
        });

        let mut poller = self.poller();
        if self.generation.load(Ordering::SeqCst) == generation
            && poller.session_subscription.is_none()
        {
            poller.session_subscription = Some(subscription);
        } else {
            // Stopped or restarted while subscribing.
            self.session.unsubscribe(subscription);
        }
    }

    /// Stop polling. Fetches still in flight finish but their results are
    /// discarded. The cached records are kept.
    pub fn stop(&self) {
        let mut poller = self.poller();
        let generation = self.next_generation();
        if let Some(task) = poller.task.take() {
            task.abort();
            tracing::debug!(generation, "notification polling stopped");
        }
        if let Some(id) = poller.session_subscription.take() {
            self.session.unsubscribe(id);
        }
    }

    /// One refresh outside the timer, with the same rules as a tick.
    pub async fn fetch_now(&self) -> Result<FetchOutcome, ApiError> {
        let generation = self.generation.load(Ordering::SeqCst);
        self.refresh(generation).await
    }

    async fn refresh(&self, generation: u64) -> Result<FetchOutcome, ApiError> {
        let Some(user_id) = self.session.user_id() else {
            return Ok(FetchOutcome::Skipped);
        };
        let records = self.backend.list_for_user(user_id).await?;
        Ok(self.apply(generation, user_id, records))
    }

    fn apply(&self, generation: u64, user_id: i64, records: Vec<NotificationRecord>) -> FetchOutcome {
        let applied = self.state.update_if(|state| {
            if self.generation.load(Ordering::SeqCst) != generation
                || self.session.user_id() != Some(user_id)
            {
                return None;
            }
            *state = NotificationState::for_user(user_id, records);
            Some(state.unread)
        });
        match applied {
            Some(unread) => FetchOutcome::Applied { unread },
            None => {
                tracing::debug!(user_id, generation, "discarding stale notification fetch");
                FetchOutcome::Discarded
            }
        }
    }

    fn follow_session(&self, user_id: Option<i64>) {
        let dropped = self.state.update_if(|state| {
            let owner = state.owner?;
            if Some(owner) == user_id {
                return None;
            }
            *state = NotificationState::default();
            Some(owner)
        });
        if let Some(owner) = dropped {
            tracing::debug!(owner, "session changed, dropped cached notifications");
        }
    }

    /// Mark one notification read on the server, then in the cache. Nothing
    /// changes locally until the server has accepted the call.
    pub async fn mark_read(&self, notification_id: i64) -> Result<MarkReadOutcome, ApiError> {
        self.backend.mark_read(notification_id).await?;
        let outcome = match self.state.update_if(|state| state.mark_read(notification_id)) {
            Some(was_unread) => MarkReadOutcome::Marked { was_unread },
            None => MarkReadOutcome::NotFound,
        };
        Ok(outcome)
    }

    pub fn notifications(&self) -> Vec<NotificationRecord> {
        self.state.with(|s| s.records.clone())
    }

    pub fn unread_count(&self) -> usize {
        self.state.with(|s| s.unread)
    }

    pub fn snapshot(&self) -> NotificationState {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        observer: impl Fn(&NotificationState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(observer)
    }

    pub fn subscribe_notifications(
        &self,
        observer: impl Fn(&[NotificationRecord]) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(move |s| observer(&s.records))
    }

    pub fn subscribe_unread_count(
        &self,
        observer: impl Fn(usize) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(move |s| observer(s.unread))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

async fn poll_loop(cache: Weak<NotificationCache>, generation: u64, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        let Some(cache) = cache.upgrade() else {
            break;
        };
        if cache.generation.load(Ordering::SeqCst) != generation {
            break;
        }
        match cache.refresh(generation).await {
            Ok(outcome) => tracing::debug!(?outcome, "notification tick"),
            Err(e) => tracing::warn!(error = %e, "notification refresh failed"),
        }
    }
}

impl Drop for NotificationCache {
    fn drop(&mut self) {
        let poller = self.poller.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = poller.task.take() {
            task.abort();
        }
        if let Some(id) = poller.session_subscription.take() {
            self.session.unsubscribe(id);
        }
    }
}

impl fmt::Debug for NotificationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCache")
            .field("period", &self.period)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use api::{ApiResult, Role, Session};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use store::MemoryStore;
    use tokio::sync::oneshot;

    fn record(id: i64, is_read: bool) -> NotificationRecord {
        NotificationRecord {
            id,
            user_id: 7,
            kind: "BOOKING_CONFIRMED".into(),
            message: format!("notification {id}"),
            is_read,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn session(user_id: i64) -> Session {
        Session {
            token: format!("token-{user_id}"),
            user_id,
            email: format!("user{user_id}@example.com"),
            role: Role::Traveler,
        }
    }

    #[derive(Default)]
    struct FakeNotifications {
        records: Mutex<Vec<NotificationRecord>>,
        fail_list: Mutex<bool>,
        fail_mark: Mutex<bool>,
        hold: Mutex<Option<oneshot::Receiver<()>>>,
        list_calls: AtomicUsize,
        marked: Mutex<Vec<i64>>,
    }

    impl FakeNotifications {
        fn with(records: Vec<NotificationRecord>) -> Arc<Self> {
            let fake = Self::default();
            *fake.records.lock().unwrap() = records;
            Arc::new(fake)
        }

        /// The next list call blocks until the returned sender fires.
        fn hold_next(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.hold.lock().unwrap() = Some(rx);
            tx
        }

        fn calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationBackend for FakeNotifications {
        async fn list_for_user(&self, _user_id: i64) -> ApiResult<Vec<NotificationRecord>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let hold = self.hold.lock().unwrap().take();
            if let Some(rx) = hold {
                let _ = rx.await;
            }
            if *self.fail_list.lock().unwrap() {
                return Err(ApiError::Network("connection refused".into()));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn mark_read(&self, notification_id: i64) -> ApiResult<()> {
            if *self.fail_mark.lock().unwrap() {
                return Err(ApiError::Network("connection reset".into()));
            }
            self.marked.lock().unwrap().push(notification_id);
            Ok(())
        }
    }

    fn logged_in(user_id: i64) -> Arc<SessionStore> {
        let session_store = Arc::new(SessionStore::new(Arc::new(MemoryStore::new())));
        session_store.set_session(session(user_id)).unwrap();
        session_store
    }

    async fn wait_for_calls(fake: &FakeNotifications, calls: usize) {
        for _ in 0..100 {
            if fake.calls() >= calls {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {calls} list calls, saw {}", fake.calls());
    }

    /// Let spawned tasks run to their next suspension point.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_fetch_counts_unread() {
        let fake = FakeNotifications::with(vec![record(1, false), record(2, true), record(3, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));

        let outcome = cache.fetch_now().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { unread: 2 });
        assert_eq!(cache.unread_count(), 2);
        assert_eq!(cache.notifications().len(), 3);
        assert_eq!(cache.snapshot().owner(), Some(7));
    }

    #[tokio::test]
    async fn test_fetch_skipped_when_logged_out() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = Arc::new(SessionStore::new(Arc::new(MemoryStore::new())));
        let cache = NotificationCache::new(fake.clone(), session_store);

        assert_eq!(cache.fetch_now().await.unwrap(), FetchOutcome::Skipped);
        assert_eq!(fake.calls(), 0);
        assert!(cache.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_state() {
        let fake = FakeNotifications::with(vec![record(1, false), record(2, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();
        let before = cache.snapshot();

        *fake.fail_list.lock().unwrap() = true;
        *fake.records.lock().unwrap() = vec![];
        let err = cache.fetch_now().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(cache.snapshot(), before);
        assert_eq!(cache.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_unread_record() {
        let fake = FakeNotifications::with(vec![record(1, false), record(2, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();

        let outcome = cache.mark_read(1).await.unwrap();
        assert_eq!(outcome, MarkReadOutcome::Marked { was_unread: true });
        assert_eq!(cache.unread_count(), 1);
        assert!(cache.notifications().iter().find(|r| r.id == 1).unwrap().is_read);
        assert_eq!(*fake.marked.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_mark_read_already_read_record() {
        let fake = FakeNotifications::with(vec![record(1, true), record(2, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();

        let outcome = cache.mark_read(1).await.unwrap();
        assert_eq!(outcome, MarkReadOutcome::Marked { was_unread: false });
        assert_eq!(cache.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_is_noop() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();
        let before = cache.snapshot();

        assert_eq!(cache.mark_read(42).await.unwrap(), MarkReadOutcome::NotFound);
        assert_eq!(cache.snapshot(), before);
    }

    #[tokio::test]
    async fn test_mark_read_failure_leaves_cache() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();

        *fake.fail_mark.lock().unwrap() = true;
        assert!(cache.mark_read(1).await.is_err());
        assert_eq!(cache.unread_count(), 1);
        assert!(!cache.notifications()[0].is_read);
    }

    #[tokio::test]
    async fn test_unread_subscribers_see_consistent_values() {
        let fake = FakeNotifications::with(vec![record(1, false), record(2, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = counts.clone();
        cache.subscribe_unread_count(move |n| sink.lock().unwrap().push(n));
        let lists = Arc::new(Mutex::new(Vec::new()));
        let sink = lists.clone();
        cache.subscribe_notifications(move |records| sink.lock().unwrap().push(records.len()));

        cache.fetch_now().await.unwrap();
        cache.mark_read(2).await.unwrap();

        assert_eq!(*counts.lock().unwrap(), vec![0, 2, 1]);
        assert_eq!(*lists.lock().unwrap(), vec![0, 2, 2]);
    }

    #[tokio::test]
    async fn test_stop_discards_in_flight_fetch() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        let release = fake.hold_next();

        let pending = tokio::spawn({
            let cache = cache.clone();
            async move { cache.fetch_now().await }
        });
        wait_for_calls(&fake, 1).await;
        cache.stop();
        release.send(()).unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), FetchOutcome::Discarded);
        assert!(cache.notifications().is_empty());
        assert_eq!(cache.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_during_fetch_does_not_repopulate() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake.clone(), session_store.clone());
        let release = fake.hold_next();

        let pending = tokio::spawn({
            let cache = cache.clone();
            async move { cache.fetch_now().await }
        });
        wait_for_calls(&fake, 1).await;
        session_store.clear().unwrap();
        release.send(()).unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), FetchOutcome::Discarded);
        assert!(cache.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_user_switch_during_fetch_is_discarded() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake.clone(), session_store.clone());
        let release = fake.hold_next();

        let pending = tokio::spawn({
            let cache = cache.clone();
            async move { cache.fetch_now().await }
        });
        wait_for_calls(&fake, 1).await;
        session_store.set_session(session(8)).unwrap();
        release.send(()).unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), FetchOutcome::Discarded);
        assert!(cache.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately_then_every_period() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));

        cache.start();
        assert!(cache.is_running());
        wait_for_calls(&fake, 1).await;
        settle().await;
        assert_eq!(cache.unread_count(), 1);

        *fake.records.lock().unwrap() = vec![record(1, false), record(2, false)];
        tokio::time::advance(DEFAULT_POLL_INTERVAL).await;
        wait_for_calls(&fake, 2).await;
        settle().await;
        assert_eq!(cache.unread_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_skip_without_session() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = Arc::new(SessionStore::new(Arc::new(MemoryStore::new())));
        let cache = NotificationCache::new(fake.clone(), session_store);

        cache.start();
        settle().await;
        tokio::time::advance(DEFAULT_POLL_INTERVAL * 2).await;
        settle().await;
        assert_eq!(fake.calls(), 0);
        assert!(cache.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_keeps_polling() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));

        cache.start();
        wait_for_calls(&fake, 1).await;
        settle().await;
        assert_eq!(cache.unread_count(), 1);

        *fake.fail_list.lock().unwrap() = true;
        tokio::time::advance(DEFAULT_POLL_INTERVAL).await;
        wait_for_calls(&fake, 2).await;
        settle().await;
        assert_eq!(cache.unread_count(), 1);

        *fake.fail_list.lock().unwrap() = false;
        *fake.records.lock().unwrap() = vec![];
        tokio::time::advance(DEFAULT_POLL_INTERVAL).await;
        wait_for_calls(&fake, 3).await;
        settle().await;
        assert_eq!(cache.unread_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_polling() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));

        cache.start();
        wait_for_calls(&fake, 1).await;
        cache.stop();
        assert!(!cache.is_running());

        tokio::time::advance(DEFAULT_POLL_INTERVAL * 3).await;
        settle().await;
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_started_cache() {
        let fake = FakeNotifications::with(vec![record(1, false), record(2, false)]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake.clone(), session_store.clone());

        cache.start();
        wait_for_calls(&fake, 1).await;
        settle().await;
        assert_eq!(cache.unread_count(), 2);

        session_store.clear().unwrap();
        assert!(cache.notifications().is_empty());
        assert_eq!(cache.unread_count(), 0);
        assert_eq!(cache.snapshot().owner(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_discards_in_flight_tick() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let cache = NotificationCache::new(fake.clone(), logged_in(7));
        cache.fetch_now().await.unwrap();
        let before = cache.snapshot();

        *fake.records.lock().unwrap() = vec![record(1, false), record(2, false)];
        let release = fake.hold_next();
        cache.start();
        wait_for_calls(&fake, 2).await;
        cache.stop();
        // The aborted tick may already have dropped its receiver.
        let _ = release.send(());
        settle().await;
        assert_eq!(cache.snapshot(), before);

        tokio::time::advance(DEFAULT_POLL_INTERVAL * 2).await;
        settle().await;
        assert_eq!(fake.calls(), 2);
        assert_eq!(cache.snapshot(), before);
    }

    #[tokio::test]
    async fn test_start_lets_state_observers_query_the_cache() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake.clone(), session_store.clone());
        cache.fetch_now().await.unwrap();
        session_store.set_session(session(8)).unwrap();

        let running = Arc::new(Mutex::new(Vec::new()));
        let sink = running.clone();
        let weak = Arc::downgrade(&cache);
        cache.subscribe(move |_| {
            if let Some(cache) = weak.upgrade() {
                sink.lock().unwrap().push(cache.is_running());
            }
        });

        cache.start();
        assert!(cache.is_running());
        assert!(cache.notifications().is_empty());
        assert_eq!(cache.snapshot().owner(), None);
        // Subscription delivery, then the drop of user 7's records.
        assert_eq!(*running.lock().unwrap(), vec![false, true]);
        assert_eq!(session_store.observer_count(), 1);
        cache.stop();
    }

    #[tokio::test]
    async fn test_stop_from_observer_during_start_unsubscribes() {
        let fake = FakeNotifications::with(vec![record(1, false)]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake.clone(), session_store.clone());
        cache.fetch_now().await.unwrap();
        session_store.set_session(session(8)).unwrap();

        let weak = Arc::downgrade(&cache);
        cache.subscribe(move |state| {
            if state.owner().is_none() {
                if let Some(cache) = weak.upgrade() {
                    cache.stop();
                }
            }
        });

        cache.start();
        assert!(!cache.is_running());
        assert_eq!(session_store.observer_count(), 0);
    }

    #[tokio::test]
    async fn test_period_is_clamped() {
        let fake = FakeNotifications::with(vec![]);
        let cache = NotificationCache::with_period(fake, logged_in(7), Duration::ZERO);
        assert_eq!(cache.period(), MIN_POLL_INTERVAL);
    }

    #[tokio::test]
    async fn test_drop_unsubscribes_from_session() {
        let fake = FakeNotifications::with(vec![]);
        let session_store = logged_in(7);
        let cache = NotificationCache::new(fake, session_store.clone());
        let before = session_store.observer_count();

        cache.start();
        assert_eq!(session_store.observer_count(), before + 1);
        drop(cache);
        assert_eq!(session_store.observer_count(), before);
    }
}
