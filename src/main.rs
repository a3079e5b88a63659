use log::warn;
use std::io::Write;
use std::sync::Arc;
use textviewer::buffer::TextSurface;
use textviewer::command::Command;
use textviewer::config::ViewerConfig;
use textviewer::location::Location;
use textviewer::picker::PromptPicker;
use textviewer::shell::{self, ShellController};
use textviewer::storage::FsStorage;
use textviewer::window::ShellWindow;
use textviewer::{DocumentController, cli};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};

/// Application entry point: parse arguments, load the configuration, open the file given on the
/// command line and run the shell loop until `:q` or end of input. The window geometry is written
/// back to the configuration file on exit.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing arguments: {}", e);
            std::process::exit(1);
        }
    };

    // Set RUST_LOG to control verbosity; toasts are printed directly
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = cli_args.config_path();
    let mut config = match &config_path {
        Some(path) => ViewerConfig::load_or_default(path).unwrap_or_else(|e| {
            warn!("Ignoring config {}: {}", path.display(), e);
            ViewerConfig::default()
        }),
        None => ViewerConfig::default(),
    };

    let mut window = ShellWindow::new(config.window, config.toast_history);
    let (cursor_tx, mut cursor_rx) = mpsc::unbounded_channel();
    window.buffer.on_cursor_changed(Box::new(move |offset| {
        let _ = cursor_tx.send(offset);
    }));
    let controller = DocumentController::new(FsStorage::new(), window);

    let input = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let picker = PromptPicker::new(Arc::clone(&input));

    if let Some(path) = &cli_args.file {
        // Failures are reported as toasts; continue with an empty buffer
        let _ = controller.open(Some(Location::new(path))).await;
    }

    loop {
        report_status(&controller, &mut cursor_rx);

        print!("> ");
        std::io::stdout().flush()?;
        let line = input.lock().await.next_line().await?;
        let Some(line) = line else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        if shell::execute(&controller, &picker, command).await {
            break;
        }
    }
    report_status(&controller, &mut cursor_rx);

    let window = controller.into_window();
    config.window = window.settings;
    if let Some(path) = &config_path
        && let Err(e) = config.save(path)
    {
        warn!("Failed to save config {}: {}", path.display(), e);
    }
    Ok(())
}

/// Print pending toasts and, if the cursor moved, its new line and column.
fn report_status(
    controller: &ShellController<FsStorage>,
    cursor_rx: &mut mpsc::UnboundedReceiver<usize>,
) {
    for toast in shell::take_toasts(controller) {
        println!("{}", toast);
    }

    let mut last = None;
    while let Ok(offset) = cursor_rx.try_recv() {
        last = Some(offset);
    }
    if let Some(offset) = last {
        println!("{}", controller.cursor_moved(offset));
    }
}
