// src/shell.rs - Executes shell commands against the document controller

use crate::buffer::TextSurface;
use crate::command::Command;
use crate::controller::DocumentController;
use crate::location::Location;
use crate::picker::FilePicker;
use crate::storage::StorageBackend;
use crate::window::{ShellWindow, Window};
use log::debug;

pub type ShellController<S> = DocumentController<S, ShellWindow>;

/// Run one command. Returns true if the shell should quit.
pub async fn execute<S: StorageBackend>(
    controller: &ShellController<S>,
    picker: &dyn FilePicker,
    command: Command,
) -> bool {
    let outcome = match command {
        Command::Quit => {
            controller.with_window(|window| window.close());
            return true;
        }
        Command::Open(Some(path)) => controller.open(Some(Location::new(path))).await,
        Command::Open(None) => controller.pick_and_open(picker).await,
        Command::SaveAs(Some(path)) => controller.save_as(Some(Location::new(path))).await,
        Command::SaveAs(None) => controller.pick_and_save_as(picker).await,
        Command::Save => controller.save().await,
        Command::Goto(offset) => {
            controller.with_window(|window| window.buffer.set_cursor(offset));
            return false;
        }
        Command::Print => {
            print!("{}", render_buffer(controller));
            return false;
        }
        Command::Append(text) => {
            controller.with_window(|window| {
                window.buffer.append(&text);
                window.buffer.append("\n");
            });
            return false;
        }
    };

    // Rejections were already reported as toasts
    if let Err(err) = outcome {
        debug!("Command rejected: {}", err);
    }
    false
}

/// Buffer contents with 1-based line numbers, one line per row.
pub fn render_buffer<S: StorageBackend>(controller: &ShellController<S>) -> String {
    controller.with_window(|window| {
        let mut out = String::new();
        for (idx, line) in window.surface().full_text().lines().enumerate() {
            out.push_str(&format!("{:>4} {}\n", idx + 1, line));
        }
        out
    })
}

/// Toasts raised since the last call, formatted for the terminal.
pub fn take_toasts<S: StorageBackend>(controller: &ShellController<S>) -> Vec<String> {
    controller.with_window(|window| {
        window
            .toast_queue
            .drain_pending()
            .into_iter()
            .map(|toast| format!("[{}] {}", window.title(), toast))
            .collect()
    })
}
