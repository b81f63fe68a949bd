mod args;
mod output;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use scriba_core::{AudioAsset, AzureOpenAiBackend, MAX_WHOLE_FILE_BYTES, Settings};

#[tokio::main]
async fn main() {
    // .env is optional; settings values can come from it
    dotenvy::dotenv().ok();

    let args = args::Args::parse();
    scriba_core::set_verbose(args.verbose);

    if let Err(err) = run(args).await {
        ui::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(args: args::Args) -> Result<()> {
    if args.init {
        return init_settings();
    }

    let settings = Settings::load(args.config.as_deref())?;
    settings.validate().with_context(|| {
        match Settings::default_config_path() {
            Some(path) => format!(
                "Configuration incomplete. Run `scriba --init` and edit {}",
                path.display()
            ),
            None => "Configuration incomplete. Run `scriba --init`".to_string(),
        }
    })?;

    // input is required by clap unless --init was given
    let input = args.input.as_deref().expect("input argument is required");
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }

    let asset = AudioAsset::from_path(input)?;
    let size_mb = asset.size_bytes as f64 / (1024.0 * 1024.0);
    if asset.size_bytes > MAX_WHOLE_FILE_BYTES {
        ui::info(&format!(
            "File is {size_mb:.1} MB, over the 25 MB upload limit; splitting into segments"
        ));
    } else {
        ui::info(&format!("File size: {size_mb:.1} MB"));
    }

    let endpoint = settings
        .service
        .endpoint()
        .context("Azure OpenAI endpoint not configured")?;
    let api_key = settings
        .service
        .api_key()
        .context("Azure OpenAI API key not configured")?;
    let backend = AzureOpenAiBackend::new(
        endpoint,
        api_key,
        settings.service.transcription_deployment.clone(),
    );

    let language = args
        .language
        .as_deref()
        .or(settings.transcription.language.as_deref());

    ui::status("Transcribing...");
    let transcript = scriba_core::transcribe_file(&backend, &asset, language).await?;

    let transcript_file = output::transcript_path(input);
    output::write_text(&transcript_file, &transcript)?;
    ui::success(&format!("Transcript written to {}", transcript_file.display()));

    ui::status("Analyzing transcript...");
    let analysis = scriba_core::analyze_transcript(&transcript, &settings).await?;

    let analysis_file = output::analysis_path(input);
    output::write_text(&analysis_file, &analysis)?;
    ui::success(&format!("Analysis written to {}", analysis_file.display()));

    Ok(())
}

fn init_settings() -> Result<()> {
    let path = Settings::default_config_path()
        .context("Could not determine the configuration directory")?;
    if path.exists() {
        anyhow::bail!("Settings file already exists: {}", path.display());
    }
    Settings::write_template(&path)?;
    ui::success(&format!("Wrote starter settings to {}", path.display()));
    ui::info("Fill in service.endpoint, service.api_key and the deployment names.");
    Ok(())
}
