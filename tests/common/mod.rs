// Common test doubles for the document controller collaborators

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use textviewer::buffer::Buffer;
use textviewer::location::Location;
use textviewer::notify::{NotificationSink, Toast};
use textviewer::picker::FilePicker;
use textviewer::storage::StorageBackend;
use textviewer::window::Window;
use textviewer::DocumentController;
use tokio::sync::Notify;

/// In-memory storage with injectable failures.
#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<Location, Vec<u8>>>,
    friendly_names: HashMap<Location, String>,
    failing_reads: HashSet<Location>,
    failing_writes: HashSet<Location>,
    gate: Option<Arc<Notify>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, location: &Location, contents: &[u8]) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(location.clone(), contents.to_vec());
        self
    }

    pub fn with_friendly_name(mut self, location: &Location, name: &str) -> Self {
        self.friendly_names.insert(location.clone(), name.to_string());
        self
    }

    pub fn failing_read(mut self, location: &Location) -> Self {
        self.failing_reads.insert(location.clone());
        self
    }

    pub fn failing_write(mut self, location: &Location) -> Self {
        self.failing_writes.insert(location.clone());
        self
    }

    /// Every read and write waits for a permit on `gate` before completing.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn contents(&self, location: &Location) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(location).cloned()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn read_all(&self, location: &Location) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        if self.failing_reads.contains(location) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read refused"));
        }
        self.files
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn replace_all(&self, location: &Location, contents: Vec<u8>) -> io::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        if self.failing_writes.contains(location) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk is read-only"));
        }
        self.files.lock().unwrap().insert(location.clone(), contents);
        Ok(())
    }

    fn display_name(&self, location: &Location) -> Option<String> {
        self.friendly_names.get(location).cloned()
    }
}

#[derive(Default)]
pub struct ToastLog {
    pub toasts: Vec<Toast>,
}

impl NotificationSink for ToastLog {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

/// Window that records everything done to it.
#[derive(Default)]
pub struct RecordingWindow {
    pub buffer: Buffer,
    pub title: Option<String>,
    pub log: ToastLog,
    pub closed: bool,
}

#[allow(dead_code)]
impl RecordingWindow {
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Buffer::from_text(text),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.log.toasts.iter().map(|t| t.message.clone()).collect()
    }
}

impl Window for RecordingWindow {
    type Surface = Buffer;
    type Toasts = ToastLog;

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
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

    fn toasts(&mut self) -> &mut ToastLog {
        &mut self.log
    }
}

/// Picker answering from a fixed script; an exhausted script cancels.
#[derive(Default)]
pub struct ScriptedPicker {
    answers: Mutex<VecDeque<Option<Location>>>,
}

#[allow(dead_code)]
impl ScriptedPicker {
    pub fn new(answers: Vec<Option<Location>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
        }
    }

    fn next(&self) -> Option<Location> {
        self.answers.lock().unwrap().pop_front().flatten()
    }
}

#[async_trait]
impl FilePicker for ScriptedPicker {
    async fn pick_open_location(&self) -> Option<Location> {
        self.next()
    }

    async fn pick_save_location(&self) -> Option<Location> {
        self.next()
    }
}

pub type TestController = DocumentController<MemoryStorage, RecordingWindow>;

#[allow(dead_code)]
pub fn controller(storage: MemoryStorage, window: RecordingWindow) -> TestController {
    DocumentController::new(storage, window)
}

#[allow(dead_code)]
pub fn text_of(controller: &TestController) -> String {
    use textviewer::buffer::TextSurface;
    controller.with_window(|w| w.buffer.full_text())
}

#[allow(dead_code)]
pub fn messages_of(controller: &TestController) -> Vec<String> {
    controller.with_window(|w| w.messages())
}
