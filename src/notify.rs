// src/notify.rs - Toast notifications reporting operation outcomes

use log::{info, warn};
use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_TOAST_HISTORY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Fire-and-forget receiver of toasts.
pub trait NotificationSink {
    fn notify(&mut self, toast: Toast);
}

/// Bounded toast history. Toasts are also forwarded to the log.
///
/// `pending` holds toasts not yet shown; `recent` keeps the last
/// `capacity` toasts regardless of whether they were shown.
pub struct ToastQueue {
    capacity: usize,
    pending: VecDeque<Toast>,
    recent: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            pending: VecDeque::new(),
            recent: VecDeque::new(),
        }
    }

    /// Take all toasts not yet shown, oldest first.
    pub fn drain_pending(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn recent(&self) -> impl Iterator<Item = &Toast> {
        self.recent.iter()
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_HISTORY)
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Info => info!("{}", toast.message),
            ToastLevel::Error => warn!("{}", toast.message),
        }

        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(toast.clone());

        if self.pending.len() == self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(toast);
    }
}
