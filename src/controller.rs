// src/controller.rs - Open/save coordination for a single document window

use crate::buffer::TextSurface;
use crate::cursor::CursorPosition;
use crate::location::Location;
use crate::notify::{NotificationSink, Toast};
use crate::outcome::{DocumentError, FailureReason, Operation, OperationResult};
use crate::picker::FilePicker;
use crate::storage::StorageBackend;
use crate::window::Window;
use log::{debug, error, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The location a document was last opened from or saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedFile {
    pub location: Location,
    pub display_name: String,
}

#[derive(Debug, Default)]
struct ControllerState {
    associated: Option<AssociatedFile>,
    in_flight: Option<Operation>,
}

/// Mediates all storage access for the document shown in one window.
///
/// Every completed operation is reported as exactly one toast. Cancelled
/// pickers and saves of an empty document report nothing. Only one operation
/// may be pending at a time; a second one is rejected with
/// [`DocumentError::Busy`] while the first carries on.
pub struct DocumentController<S, W> {
    storage: S,
    window: Mutex<W>,
    state: Mutex<ControllerState>,
}

/// Clears the in-flight marker when the operation finishes or its future is dropped.
struct InFlight<'a> {
    state: &'a Mutex<ControllerState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S, W> DocumentController<S, W>
where
    S: StorageBackend,
    W: Window,
{
    pub fn new(storage: S, window: W) -> Self {
        Self {
            storage,
            window: Mutex::new(window),
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Run `f` with exclusive access to the window.
    pub fn with_window<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut *lock(&self.window))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_window(self) -> W {
        self.window
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn associated_file(&self) -> Option<AssociatedFile> {
        lock(&self.state).associated.clone()
    }

    /// Whether quick save has somewhere to write.
    pub fn can_save(&self) -> bool {
        lock(&self.state).associated.is_some()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).in_flight.is_some()
    }

    /// Load `location` into the window. `None` means the picker was cancelled.
    pub async fn open(
        &self,
        location: Option<Location>,
    ) -> Result<Option<OperationResult>, DocumentError> {
        let Some(location) = location else {
            debug!("Open cancelled");
            return Ok(None);
        };
        let _in_flight = self.begin(Operation::Open)?;

        let loaded = self.read_text(&location).await;
        let display_name = self.display_name(&location);

        let result = match loaded {
            Ok(text) => {
                self.with_window(|window| {
                    let surface = window.surface_mut();
                    surface.set_full_text(&text);
                    surface.set_cursor(0);
                    window.set_title(&display_name);
                });
                self.associate(location, &display_name);
                OperationResult::Success {
                    operation: Operation::Open,
                    display_name,
                }
            }
            Err(err) => {
                error!("Unable to open “{}”: {}", display_name, err);
                let reason = match err {
                    DocumentError::Encoding { .. } => FailureReason::InvalidEncoding,
                    _ => FailureReason::Unreadable,
                };
                OperationResult::Failure {
                    operation: Operation::Open,
                    display_name,
                    reason,
                }
            }
        };

        self.report(&result);
        Ok(Some(result))
    }

    /// Write the document to `location` and associate with it on success.
    pub async fn save_as(
        &self,
        location: Option<Location>,
    ) -> Result<Option<OperationResult>, DocumentError> {
        let Some(location) = location else {
            debug!("Save as cancelled");
            return Ok(None);
        };
        let _in_flight = self.begin(Operation::SaveAs)?;
        Ok(self.write_document(Operation::SaveAs, location).await)
    }

    /// Write the document back to its associated file.
    pub async fn save(&self) -> Result<Option<OperationResult>, DocumentError> {
        let _in_flight = self.begin(Operation::Save)?;
        let Some(associated) = self.associated_file() else {
            return Err(self.reject(DocumentError::NoAssociatedFile));
        };
        Ok(self.write_document(Operation::Save, associated.location).await)
    }

    pub async fn pick_and_open(
        &self,
        picker: &dyn FilePicker,
    ) -> Result<Option<OperationResult>, DocumentError> {
        let location = picker.pick_open_location().await;
        self.open(location).await
    }

    pub async fn pick_and_save_as(
        &self,
        picker: &dyn FilePicker,
    ) -> Result<Option<OperationResult>, DocumentError> {
        let location = picker.pick_save_location().await;
        self.save_as(location).await
    }

    /// Display position for a 0-based char offset in the current text.
    pub fn cursor_moved(&self, offset: usize) -> CursorPosition {
        let text = self.with_window(|window| window.surface().full_text());
        CursorPosition::from_text(&text, offset)
    }

    fn begin(&self, operation: Operation) -> Result<InFlight<'_>, DocumentError> {
        let pending = {
            let mut state = lock(&self.state);
            match state.in_flight {
                Some(pending) => Some(pending),
                None => {
                    state.in_flight = Some(operation);
                    None
                }
            }
        };
        match pending {
            Some(pending) => Err(self.reject(DocumentError::Busy { pending })),
            None => Ok(InFlight { state: &self.state }),
        }
    }

    fn reject(&self, err: DocumentError) -> DocumentError {
        warn!("{}", err);
        self.with_window(|window| window.toasts().notify(Toast::error(err.to_string())));
        err
    }

    async fn read_text(&self, location: &Location) -> Result<String, DocumentError> {
        let bytes = self
            .storage
            .read_all(location)
            .await
            .map_err(|source| DocumentError::Io {
                location: location.clone(),
                source,
            })?;
        String::from_utf8(bytes).map_err(|source| DocumentError::Encoding {
            location: location.clone(),
            source,
        })
    }

    async fn write_document(
        &self,
        operation: Operation,
        location: Location,
    ) -> Option<OperationResult> {
        let text = self.with_window(|window| window.surface().full_text());
        if text.is_empty() {
            debug!("Nothing to {}, skipping write to {}", operation, location);
            return None;
        }

        let written = self.storage.replace_all(&location, text.into_bytes()).await;
        let display_name = self.display_name(&location);

        let result = match written {
            Ok(()) => {
                self.associate(location, &display_name);
                OperationResult::Success {
                    operation,
                    display_name,
                }
            }
            Err(source) => {
                let reason = FailureReason::Unwritable(source.to_string());
                let err = DocumentError::Io { location, source };
                error!("Unable to save “{}”: {}", display_name, err);
                OperationResult::Failure {
                    operation,
                    display_name,
                    reason,
                }
            }
        };

        self.report(&result);
        Some(result)
    }

    fn display_name(&self, location: &Location) -> String {
        self.storage
            .display_name(location)
            .unwrap_or_else(|| location.base_name())
    }

    fn associate(&self, location: Location, display_name: &str) {
        info!("Document associated with {}", location);
        lock(&self.state).associated = Some(AssociatedFile {
            location,
            display_name: display_name.to_string(),
        });
    }

    fn report(&self, result: &OperationResult) {
        let toast = result.toast();
        self.with_window(|window| window.toasts().notify(toast));
    }
}
