//! Completion callbacks for non-blocking operations

/// Receives the store result of a non-blocking operation, exactly once,
/// on a worker thread.
pub type Callback<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Replace an absent callback with one that ignores the result.
pub fn check_callback<T: 'static>(callback: Option<Callback<T>>) -> Callback<T> {
    callback.unwrap_or_else(|| Box::new(|_: T| {}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_present_callback_is_kept() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let callback: Callback<bool> = Box::new(move |ok: bool| {
            assert!(ok);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        check_callback(Some(callback))(true);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_absent_callback_is_noop() {
        check_callback::<bool>(None)(false);
    }
}
