use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Latest-call-wins delay for keystroke-driven work.
///
/// Each call waits out the quiet period and then runs only if no newer call
/// arrived meanwhile. Superseded calls resolve to `None` without running
/// their work. [`cancel`](Self::cancel) drops everything pending, which is
/// what a page does on teardown.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn run<F, Fut, T>(&self, work: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return None;
        }
        Some(work().await)
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// One [`Debouncer`] per typing session, so keystrokes from different
/// search boxes never cancel each other.
///
/// A session lives only while a call on it is pending: the last caller to
/// finish, or to be dropped mid-wait, removes the entry.
#[derive(Debug)]
pub struct DebounceRegistry {
    delay: Duration,
    sessions: Mutex<HashMap<String, Arc<Debouncer>>>,
}

impl DebounceRegistry {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Debounces `work` against every other pending call on `key`.
    pub async fn run<F, Fut, T>(&self, key: &str, work: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let handle = self.session(key);
        match handle.debouncer.as_deref() {
            Some(debouncer) => debouncer.run(work).await,
            None => None,
        }
    }

    /// Cancels and forgets every session whose key starts with `prefix`,
    /// e.g. all fields of a page that was closed. Returns how many went.
    pub fn close(&self, prefix: &str) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|key, debouncer| {
            let keep = !key.starts_with(prefix);
            if !keep {
                debouncer.cancel();
            }
            keep
        });
        before - sessions.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.lock().len()
    }

    fn session(&self, key: &str) -> SessionHandle<'_> {
        let debouncer = self
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Debouncer::new(self.delay)))
            .clone();
        SessionHandle {
            registry: self,
            key: key.to_string(),
            debouncer: Some(debouncer),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Debouncer>>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// A pending caller's hold on a session.
struct SessionHandle<'a> {
    registry: &'a DebounceRegistry,
    key: String,
    /// Taken in `drop` so the last reference goes while the map is locked.
    debouncer: Option<Arc<Debouncer>>,
}

impl Drop for SessionHandle<'_> {
    fn drop(&mut self) {
        let Some(debouncer) = self.debouncer.take() else {
            return;
        };
        let mut sessions = self.registry.lock();
        // Only the map and this handle left: nobody else is waiting.
        let last = Arc::strong_count(&debouncer) == 2
            && sessions
                .get(&self.key)
                .is_some_and(|entry| Arc::ptr_eq(entry, &debouncer));
        if last {
            sessions.remove(&self.key);
        }
        // Released under the lock so a concurrent handle sees the final count.
        drop(debouncer);
    }
}
