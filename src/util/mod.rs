use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod export;
pub mod persistence;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Time-based id: unix milliseconds plus a process-local counter to break
/// ties within the same millisecond. Monotonic enough for the single-user,
/// single-process scope; not a coordination-safe id scheme.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{value}")
}

/// Current time as unix seconds, the resolution `lastModified` is stored at.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
