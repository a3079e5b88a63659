use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "textviewer")]
#[command(version = "0.1.0")]
#[command(about = "A minimal text viewer and editor")]
pub struct CliArgs {
    /// File to open at startup
    pub file: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(crate::config::ViewerConfig::default_path)
    }
}

pub fn parse_args() -> Result<CliArgs, Box<dyn std::error::Error>> {
    Ok(CliArgs::parse())
}
