//! Animation-frame scheduling for listen polls
//!
//! Stands in for `requestAnimationFrame`: a callback requested now runs on
//! the next [`crate::Gui::frame`] tick, exactly once, unless cancelled first.

use hashbrown::HashMap;

use crate::gui::ControllerId;

/// Handle for one pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Pending per-frame callbacks keyed by handle
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next: u64,
    pending: HashMap<FrameHandle, ControllerId>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a poll of `controller` on the next frame
    pub fn request(&mut self, controller: ControllerId) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.insert(handle, controller);
        handle
    }

    /// Cancel a pending callback. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Drain everything scheduled for this frame.
    ///
    /// Callbacks requested while the returned batch is processed land in the
    /// next frame. No ordering between entries is guaranteed.
    pub fn take_due(&mut self) -> Vec<(FrameHandle, ControllerId)> {
        self.pending.drain().collect()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_cancel() {
        let mut s = FrameScheduler::new();
        let a = s.request(ControllerId(0));
        let b = s.request(ControllerId(1));
        assert_ne!(a, b);
        assert_eq!(s.len(), 2);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(!s.is_pending(a));
        assert!(s.is_pending(b));
    }

    #[test]
    fn test_take_due_runs_once() {
        let mut s = FrameScheduler::new();
        let h = s.request(ControllerId(3));
        let due = s.take_due();
        assert_eq!(due, vec![(h, ControllerId(3))]);
        assert!(s.is_empty());
        assert!(s.take_due().is_empty());
    }
}
