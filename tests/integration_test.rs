// tests/integration_test.rs - Shell and controller against the real filesystem

mod common;

use common::ScriptedPicker;
use std::fs;
use tempfile::TempDir;
use textviewer::DocumentController;
use textviewer::buffer::TextSurface;
use textviewer::command::Command;
use textviewer::config::WindowSettings;
use textviewer::location::Location;
use textviewer::shell::{self, ShellController};
use textviewer::storage::FsStorage;
use textviewer::window::ShellWindow;

fn shell_controller() -> ShellController<FsStorage> {
    DocumentController::new(FsStorage::new(), ShellWindow::new(WindowSettings::default(), 16))
}

#[tokio::test]
async fn test_load_edit_save_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    fs::write(&file_path, "Hello\nWorld\n").unwrap();

    let controller = shell_controller();
    let picker = ScriptedPicker::default();

    shell::execute(&controller, &picker, Command::Open(Some(file_path.clone()))).await;
    assert_eq!(controller.with_window(|w| w.title().to_string()), "test.txt");
    assert_eq!(controller.with_window(|w| w.buffer.line_count()), 3);

    shell::execute(&controller, &picker, Command::Append("Again".into())).await;
    shell::execute(&controller, &picker, Command::Save).await;

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello\nWorld\nAgain\n");
    assert_eq!(
        shell::take_toasts(&controller),
        vec![
            "[test.txt] Opened “test.txt”".to_string(),
            "[test.txt] Saved “test.txt”".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_open_through_picker() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("picked.md");
    fs::write(&file_path, "# Title\n").unwrap();

    let controller = shell_controller();
    let picker = ScriptedPicker::new(vec![Some(Location::new(&file_path))]);

    shell::execute(&controller, &picker, Command::Open(None)).await;

    assert_eq!(
        controller.with_window(|w| w.buffer.full_text()),
        "# Title\n"
    );
    assert_eq!(
        controller.associated_file().unwrap().location,
        Location::new(&file_path)
    );
}

#[tokio::test]
async fn test_non_utf8_file_is_not_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("latin1.txt");
    fs::write(&file_path, [b'c', b'a', b'f', 0xe9]).unwrap();

    let controller = shell_controller();
    shell::execute(&controller, &ScriptedPicker::default(), Command::Append("mine".into())).await;
    shell::execute(
        &controller,
        &ScriptedPicker::default(),
        Command::Open(Some(file_path)),
    )
    .await;

    assert_eq!(controller.with_window(|w| w.buffer.full_text()), "mine\n");
    assert!(!controller.can_save());
    assert_eq!(
        shell::take_toasts(&controller),
        vec!["[Text Viewer] Invalid text encoding for “latin1.txt”".to_string()]
    );
}

#[tokio::test]
async fn test_save_as_into_missing_directory_reports_failure() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("missing").join("out.txt");

    let controller = shell_controller();
    let picker = ScriptedPicker::default();
    shell::execute(&controller, &picker, Command::Append("text".into())).await;
    shell::execute(&controller, &picker, Command::SaveAs(Some(target.clone()))).await;

    assert!(!target.exists());
    assert!(!controller.can_save());
    assert_eq!(
        shell::take_toasts(&controller),
        vec!["[Text Viewer] Unable to save as “out.txt”".to_string()]
    );
}

#[tokio::test]
async fn test_goto_moves_cursor() {
    let controller = shell_controller();
    let picker = ScriptedPicker::default();
    shell::execute(&controller, &picker, Command::Append("ab".into())).await;
    shell::execute(&controller, &picker, Command::Append("cd".into())).await;
    shell::execute(&controller, &picker, Command::Goto(3)).await;

    let offset = controller.with_window(|w| w.buffer.cursor());
    assert_eq!(offset, 3);
    assert_eq!(controller.cursor_moved(offset).to_string(), "Ln 2, Col 1");
}

#[cfg(unix)]
#[tokio::test]
async fn test_save_through_symlink_updates_target() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real.txt");
    let link = temp_dir.path().join("link.txt");
    fs::write(&real, "v1\n").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let controller = shell_controller();
    let picker = ScriptedPicker::default();
    shell::execute(&controller, &picker, Command::Open(Some(link.clone()))).await;
    shell::execute(&controller, &picker, Command::Append("v2".into())).await;
    shell::execute(&controller, &picker, Command::Save).await;

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real).unwrap(), "v1\nv2\n");
    assert_eq!(controller.with_window(|w| w.title().to_string()), "link.txt");
    assert_eq!(
        shell::take_toasts(&controller),
        vec![
            "[link.txt] Opened “link.txt”".to_string(),
            "[link.txt] Saved “link.txt”".to_string(),
        ]
    );
}
