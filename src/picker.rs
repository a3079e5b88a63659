// src/picker.rs - File pickers choosing locations for open and save-as

use crate::location::Location;
use async_trait::async_trait;
use log::warn;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::Mutex;

/// Asks the user for a location. `None` means the user cancelled.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick_open_location(&self) -> Option<Location>;
    async fn pick_save_location(&self) -> Option<Location>;
}

/// Line input shared between the shell's command loop and the picker.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

/// Terminal picker: prints a prompt and reads a path from the shared input.
/// An empty answer or end of input cancels.
pub struct PromptPicker<R> {
    input: SharedLines<R>,
}

impl<R> PromptPicker<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(input: SharedLines<R>) -> Self {
        Self { input }
    }

    async fn ask(&self, prompt: &str) -> Option<Location> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        let line = match self.input.lock().await.next_line().await {
            Ok(line) => line?,
            Err(e) => {
                warn!("Failed to read file name: {}", e);
                return None;
            }
        };
        let answer = line.trim();
        if answer.is_empty() {
            None
        } else {
            Some(Location::new(answer))
        }
    }
}

#[async_trait]
impl<R> FilePicker for PromptPicker<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn pick_open_location(&self) -> Option<Location> {
        self.ask("Open file: ").await
    }

    async fn pick_save_location(&self) -> Option<Location> {
        self.ask("Save as: ").await
    }
}
