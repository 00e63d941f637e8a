//! Thread identity query for the linear-search strategy.

/// Returns a value that uniquely and stably identifies the calling thread for
/// the lifetime of the process.
///
/// The linear-search strategy calls this on every loop iteration, deliberately:
/// the benchmark models a thread that cannot cheaply remember "who am I" and
/// must re-resolve its identity on every access.
#[must_use]
#[inline]
pub fn current_thread_id() -> u64 {
    #[cfg(unix)]
    {
        // SAFETY: pthread_self has no preconditions; it only reads the calling
        // thread's own handle.
        let handle = unsafe { libc::pthread_self() };

        handle as u64
    }

    #[cfg(not(unix))]
    {
        use std::hash::{Hash, Hasher};

        // ThreadId is unique for the process lifetime; a deterministic hash of
        // it is therefore unique too (modulo a collision chance that is
        // irrelevant at benchmark thread counts).
        let mut hasher = std::hash::DefaultHasher::new();
        std::thread::current().id().hash(&mut hasher);
        hasher.finish()
    }
}
