//! Capacity-bounded toast queue with per-message expiry timers.

use crate::message::{Severity, ToastId, ToastMessage, ToastRequest};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Toasts kept on screen at once.
pub const DEFAULT_CAPACITY: usize = 5;

/// Time on screen for toasts without an explicit duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Queue settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of visible toasts (at least 1).
    pub capacity: usize,
    /// Duration applied when a request does not set one. `None` makes such
    /// toasts sticky.
    pub default_duration: Option<Duration>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_duration: Some(DEFAULT_DURATION),
        }
    }
}

impl QueueConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_default_duration(mut self, duration: Option<Duration>) -> Self {
        self.default_duration = duration.filter(|d| !d.is_zero());
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Removal {
    Dismissed,
    Expired,
    Evicted,
    Cleared,
}

struct QueueState {
    next_id: u64,
    messages: VecDeque<ToastMessage>,
    timers: HashMap<ToastId, JoinHandle<()>>,
    visible: watch::Sender<Vec<ToastMessage>>,
}

impl QueueState {
    fn remove(&mut self, id: ToastId, reason: Removal) -> bool {
        let Some(index) = self.messages.iter().position(|m| m.id == id) else {
            return false;
        };
        self.messages.remove(index);
        self.cancel_timer(id, reason);
        debug!(%id, ?reason, "toast removed");
        true
    }

    fn cancel_timer(&mut self, id: ToastId, reason: Removal) {
        if let Some(timer) = self.timers.remove(&id) {
            // An expiring timer removes itself and must not abort its own task.
            if !matches!(reason, Removal::Expired) {
                timer.abort();
            }
        }
    }

    fn publish(&self) {
        self.visible.send_replace(self.messages.iter().cloned().collect());
    }
}

impl Drop for QueueState {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

/// The toasts currently on screen, oldest first.
///
/// Cloning gives another handle to the same queue. All operations are
/// synchronous and serialized by an internal lock; expiry runs on tokio
/// tasks spawned from the runtime `push` is called in.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<QueueState>>,
    config: QueueConfig,
}

impl ToastQueue {
    pub fn new(config: QueueConfig) -> Self {
        let config = QueueConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        let (visible, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Mutex::new(QueueState {
                next_id: 0,
                messages: VecDeque::with_capacity(config.capacity + 1),
                timers: HashMap::new(),
                visible,
            })),
            config,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Show a toast and return its id.
    ///
    /// When the queue is full the oldest toast is evicted. Toasts with a
    /// duration need a tokio runtime to expire; outside one they stay until
    /// dismissed.
    pub fn push(&self, request: ToastRequest) -> ToastId {
        let duration = if request.sticky {
            None
        } else {
            request
                .duration
                .or(self.config.default_duration)
                .filter(|d| !d.is_zero())
        };

        let mut state = self.lock();
        state.next_id += 1;
        let id = ToastId(state.next_id);

        state.messages.push_back(ToastMessage {
            id,
            severity: request.severity,
            text: request.text,
            duration,
            created_at: Utc::now(),
        });
        debug!(%id, severity = request.severity.as_str(), ?duration, "toast pushed");

        while state.messages.len() > self.config.capacity {
            if let Some(oldest) = state.messages.front().map(|m| m.id) {
                state.remove(oldest, Removal::Evicted);
            }
        }

        if let Some(duration) = duration {
            match Handle::try_current() {
                Ok(runtime) => {
                    let queue = Arc::downgrade(&self.inner);
                    let timer = runtime.spawn(async move {
                        tokio::time::sleep(duration).await;
                        expire(&queue, id);
                    });
                    state.timers.insert(id, timer);
                }
                Err(_) => {
                    warn!(%id, "no tokio runtime, toast will not expire on its own");
                }
            }
        }

        state.publish();
        id
    }

    pub fn success(&self, text: impl Into<String>) -> ToastId {
        self.push(ToastRequest::new(Severity::Success, text))
    }

    pub fn error(&self, text: impl Into<String>) -> ToastId {
        self.push(ToastRequest::new(Severity::Error, text))
    }

    pub fn warning(&self, text: impl Into<String>) -> ToastId {
        self.push(ToastRequest::new(Severity::Warning, text))
    }

    pub fn info(&self, text: impl Into<String>) -> ToastId {
        self.push(ToastRequest::new(Severity::Info, text))
    }

    /// Remove a toast and cancel its timer. Returns false if it was not on
    /// screen.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut state = self.lock();
        let removed = state.remove(id, Removal::Dismissed);
        if removed {
            state.publish();
        }
        removed
    }

    /// Remove every toast.
    pub fn clear(&self) {
        let mut state = self.lock();
        let ids: Vec<ToastId> = state.messages.iter().map(|m| m.id).collect();
        for id in ids {
            state.remove(id, Removal::Cleared);
        }
        state.publish();
    }

    /// Snapshot of the visible toasts, oldest first.
    pub fn visible(&self) -> Vec<ToastMessage> {
        self.lock().messages.iter().cloned().collect()
    }

    pub fn get(&self, id: ToastId) -> Option<ToastMessage> {
        self.lock().messages.iter().find(|m| m.id == id).cloned()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.lock().messages.iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().messages.is_empty()
    }

    /// Number of expiry timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    /// Watch the visible toasts.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastMessage>> {
        self.lock().visible.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("config", &self.config)
            .field("visible", &self.len())
            .finish()
    }
}

/// Timer callback. The toast may already be gone; ids are never reused, so
/// a stale timer cannot remove a newer toast.
fn expire(queue: &Weak<Mutex<QueueState>>, id: ToastId) {
    let Some(inner) = queue.upgrade() else {
        return;
    };
    let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
    if state.remove(id, Removal::Expired) {
        state.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(capacity: usize) -> ToastQueue {
        ToastQueue::new(QueueConfig::default().with_capacity(capacity))
    }

    fn texts(queue: &ToastQueue) -> Vec<String> {
        queue.visible().into_iter().map(|m| m.text).collect()
    }

    #[test]
    fn test_ids_increase() {
        let toasts = queue(5);
        let a = toasts.push(ToastRequest::new(Severity::Info, "a").sticky());
        let b = toasts.push(ToastRequest::new(Severity::Info, "b").sticky());
        assert!(b > a);
        assert_eq!(texts(&toasts), vec!["a", "b"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let toasts = queue(3);
        for text in ["1", "2", "3", "4", "5"] {
            toasts.push(ToastRequest::new(Severity::Info, text).sticky());
            assert!(toasts.len() <= 3);
        }
        assert_eq!(texts(&toasts), vec!["3", "4", "5"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let toasts = queue(0);
        toasts.push(ToastRequest::new(Severity::Info, "a").sticky());
        toasts.push(ToastRequest::new(Severity::Info, "b").sticky());
        assert_eq!(texts(&toasts), vec!["b"]);
    }

    #[test]
    fn test_dismiss() {
        let toasts = queue(5);
        let id = toasts.push(ToastRequest::new(Severity::Error, "oops").sticky());
        assert!(toasts.dismiss(id));
        assert!(!toasts.contains(id));
        // Second dismissal is a no-op.
        assert!(!toasts.dismiss(id));
    }

    #[test]
    fn test_push_without_runtime_keeps_toast() {
        let toasts = queue(5);
        let id = toasts.push(ToastRequest::new(Severity::Success, "ok").with_duration_ms(3000));
        assert!(toasts.contains(id));
        assert_eq!(toasts.pending_timers(), 0);
    }

    #[test]
    fn test_subscribe_tracks_visible() {
        let toasts = queue(5);
        let rx = toasts.subscribe();
        let id = toasts.push(ToastRequest::new(Severity::Info, "hi").sticky());
        assert_eq!(rx.borrow().len(), 1);
        toasts.dismiss(id);
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_duration() {
        let toasts = queue(5);
        let id = toasts.push(ToastRequest::new(Severity::Success, "Ajouté").with_duration_ms(3000));
        assert_eq!(toasts.pending_timers(), 1);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(toasts.contains(id));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!toasts.contains(id));
        assert_eq!(toasts.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_duration_applies() {
        let toasts = queue(5);
        let id = toasts.info("Bienvenue");
        assert_eq!(toasts.get(id).unwrap().duration, Some(DEFAULT_DURATION));

        tokio::time::sleep(DEFAULT_DURATION + Duration::from_millis(1)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sticky_toast_never_expires() {
        let toasts = queue(5);
        let sticky = toasts.push(ToastRequest::new(Severity::Warning, "Hors ligne").sticky());
        let zero = toasts.push(ToastRequest::new(Severity::Info, "zero").with_duration_ms(0));
        assert_eq!(toasts.pending_timers(), 0);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(toasts.contains(sticky));
        assert!(toasts.contains(zero));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timer() {
        let toasts = queue(5);
        let id = toasts.success("ok");
        assert!(toasts.dismiss(id));
        assert_eq!(toasts.pending_timers(), 0);

        let rx = toasts.subscribe();
        tokio::time::sleep(DEFAULT_DURATION * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_cancels_timer() {
        let toasts = queue(1);
        toasts.success("first");
        let second = toasts.push(ToastRequest::new(Severity::Info, "second").sticky());
        assert_eq!(toasts.pending_timers(), 0);

        tokio::time::sleep(DEFAULT_DURATION * 2).await;
        assert_eq!(texts(&toasts), vec!["second"]);
        assert!(toasts.contains(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_are_independent() {
        let toasts = queue(5);
        let short = toasts.push(ToastRequest::new(Severity::Info, "short").with_duration_ms(1000));
        let long = toasts.push(ToastRequest::new(Severity::Info, "long").with_duration_ms(5000));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!toasts.contains(short));
        assert!(toasts.contains(long));

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_everything() {
        let toasts = queue(5);
        toasts.success("a");
        toasts.error("b");
        toasts.clear();
        assert!(toasts.is_empty());
        assert_eq!(toasts.pending_timers(), 0);
    }
}
