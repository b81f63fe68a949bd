pub mod asset;
pub mod ffmpeg;
pub mod http;
pub mod provider;
pub mod settings;
pub mod split;
pub mod transcription;
pub mod verbose;

pub use asset::AudioAsset;
pub use provider::{
    AzureOpenAiBackend, DEFAULT_TIMEOUT_SECS, TranscriptionBackend, TranscriptionRequest,
    TranscriptionResult,
};
pub use settings::Settings;
pub use split::{SegmentAsset, SplitError, SplitPlan, SplitSegments, split_audio};
pub use transcription::{MAX_WHOLE_FILE_BYTES, analyze_transcript, transcribe_file};
pub use verbose::set_verbose;
