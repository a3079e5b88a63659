// src/window.rs - Window capabilities composed from a text surface and a toast sink

use crate::buffer::{Buffer, TextSurface};
use crate::config::WindowSettings;
use crate::notify::{NotificationSink, ToastQueue};

/// What the document controller may do to the window hosting a document.
pub trait Window {
    type Surface: TextSurface;
    type Toasts: NotificationSink;

    fn set_title(&mut self, title: &str);
    fn close(&mut self);
    fn surface(&self) -> &Self::Surface;
    fn surface_mut(&mut self) -> &mut Self::Surface;
    fn toasts(&mut self) -> &mut Self::Toasts;
}

pub const UNTITLED: &str = "Text Viewer";

/// Window of the terminal shell.
pub struct ShellWindow {
    pub buffer: Buffer,
    pub toast_queue: ToastQueue,
    pub settings: WindowSettings,
    title: String,
    closed: bool,
}

impl ShellWindow {
    pub fn new(settings: WindowSettings, toast_history: usize) -> Self {
        Self {
            buffer: Buffer::new(),
            toast_queue: ToastQueue::new(toast_history),
            settings,
            title: UNTITLED.to_string(),
            closed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Window for ShellWindow {
    type Surface = Buffer;
    type Toasts = ToastQueue;

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn surface(&self) -> &Buffer {
        &self.buffer
    }

    fn surface_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn toasts(&mut self) -> &mut ToastQueue {
        &mut self.toast_queue
    }
}
