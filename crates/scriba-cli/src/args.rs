//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "scriba",
    about = "Transcribe an audio file and derive an AI analysis via Azure OpenAI",
    version
)]
pub struct Args {
    /// Audio file to transcribe (wav, mp3, m4a, flac, ogg, webm, ...)
    #[arg(required_unless_present = "init")]
    pub input: Option<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Language hint for transcription (e.g. "ja", "en"); overrides settings
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Write a starter settings file to the default location and exit
    #[arg(long)]
    pub init: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
