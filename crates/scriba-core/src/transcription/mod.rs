//! Transcription pipeline and transcript analysis.
//!
//! This module contains:
//! - The size-based dispatcher between whole-file and split transcription
//! - Ordered, failure-isolating aggregation of per-segment results
//! - The chat-completion analysis of the finished transcript

mod analysis;
mod transcribe;

pub use analysis::analyze_transcript;
pub use transcribe::{MAX_WHOLE_FILE_BYTES, transcribe_file};
