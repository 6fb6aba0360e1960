//! Notifications
//!
//! Transient, dismissible messages shown over every page.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

const MAX_VISIBLE: usize = 5;
const AUTO_DISMISS: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Info => "toast info",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered toast list, oldest first, capped at [`MAX_VISIBLE`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_VISIBLE {
            let overflow = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Handle to the app-wide toast queue, provided via context
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self { queue: RwSignal::new(ToastQueue::default()) }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u32) {
        self.queue.update(|q| q.dismiss(id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|q| q.toasts().to_vec())
    }

    fn show(&self, kind: ToastKind, message: String) {
        let Some(id) = self.queue.try_update(|q| q.push(kind, message)) else {
            return;
        };
        let queue = self.queue;
        spawn_local(async move {
            gloo_timers::future::sleep(AUTO_DISMISS).await;
            queue.try_update(|q| q.dismiss(id));
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_caps_and_dismisses() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Info, "one");
        for i in 0..MAX_VISIBLE {
            queue.push(ToastKind::Error, format!("err {}", i));
        }
        assert_eq!(queue.toasts().len(), MAX_VISIBLE);
        assert!(queue.toasts().iter().all(|t| t.id != first));

        let last = queue.toasts().last().unwrap().id;
        queue.dismiss(last);
        assert_eq!(queue.toasts().len(), MAX_VISIBLE - 1);
        queue.dismiss(9999);
        assert_eq!(queue.toasts().len(), MAX_VISIBLE - 1);
    }
}
