//! Terminal implementation of the background [`Host`].

use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use lumen_background::{FrameHandle, Host, HostEvent};

/// Schedules frame callbacks against a deadline and toggles terminal mouse
/// reporting for pointer subscriptions.
#[derive(Debug)]
pub struct TerminalHost {
    /// Time between a frame request and its callback.
    frame_interval: Duration,
    next_handle: u64,
    /// The one outstanding frame request and when it is due.
    scheduled: Option<(FrameHandle, Instant)>,
    subscriptions: HashSet<HostEvent>,
    /// Whether to write mouse capture sequences to stdout.
    attached: bool,
}

impl TerminalHost {
    /// Host bound to the real terminal.
    pub fn new(fps: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / fps.max(1),
            next_handle: 0,
            scheduled: None,
            subscriptions: HashSet::new(),
            attached: true,
        }
    }

    /// Host that never writes to the terminal.
    #[cfg(test)]
    pub(crate) fn detached(fps: u32) -> Self {
        Self {
            attached: false,
            ..Self::new(fps)
        }
    }

    pub fn is_subscribed(&self, event: HostEvent) -> bool {
        self.subscriptions.contains(&event)
    }

    /// Time left until the scheduled frame is due, if one is scheduled.
    pub fn time_until_frame(&self) -> Option<Duration> {
        self.scheduled
            .map(|(_, due)| due.saturating_duration_since(Instant::now()))
    }

    /// Take the scheduled frame if its deadline has passed.
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        match self.scheduled {
            Some((handle, due)) if due <= Instant::now() => {
                self.scheduled = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn set_mouse_capture(&self, enabled: bool) {
        if !self.attached {
            return;
        }
        let result = if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        };
        if let Err(err) = result {
            log::warn!("failed to toggle mouse capture: {err}");
        }
    }
}

impl Host for TerminalHost {
    fn subscribe(&mut self, event: HostEvent) {
        if self.subscriptions.insert(event) && event == HostEvent::PointerMove {
            self.set_mouse_capture(true);
        }
    }

    fn unsubscribe(&mut self, event: HostEvent) {
        if self.subscriptions.remove(&event) && event == HostEvent::PointerMove {
            self.set_mouse_capture(false);
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.scheduled = Some((handle, Instant::now() + self.frame_interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.scheduled, Some((scheduled, _)) if scheduled == handle) {
            self.scheduled = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_from_fps() {
        let host = TerminalHost::detached(50);
        assert_eq!(host.frame_interval, Duration::from_millis(20));
        assert_eq!(TerminalHost::detached(0).frame_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_request_then_take() {
        let mut host = TerminalHost::detached(240);
        assert!(host.time_until_frame().is_none());

        let handle = host.request_frame();
        assert!(host.time_until_frame().unwrap() <= Duration::from_secs(1) / 240);

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(host.take_due_frame(), Some(handle));
        assert_eq!(host.take_due_frame(), None);
    }

    #[test]
    fn test_not_due_yet() {
        let mut host = TerminalHost::detached(1);
        host.request_frame();
        assert_eq!(host.take_due_frame(), None);
    }

    #[test]
    fn test_cancel() {
        let mut host = TerminalHost::detached(240);
        let first = host.request_frame();
        let second = host.request_frame();
        assert_ne!(first, second);

        // cancelling a superseded handle leaves the live one alone
        host.cancel_frame(first);
        assert!(host.time_until_frame().is_some());

        host.cancel_frame(second);
        assert!(host.time_until_frame().is_none());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(host.take_due_frame(), None);
    }

    #[test]
    fn test_subscriptions() {
        let mut host = TerminalHost::detached(60);
        host.subscribe(HostEvent::PointerMove);
        host.subscribe(HostEvent::Resize);
        assert!(host.is_subscribed(HostEvent::PointerMove));
        host.unsubscribe(HostEvent::PointerMove);
        assert!(!host.is_subscribed(HostEvent::PointerMove));
        assert!(host.is_subscribed(HostEvent::Resize));
    }
}
