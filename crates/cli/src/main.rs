mod settings;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use wordlens_core::analysis::domain::pos_summary::PosSummary;
use wordlens_core::analysis::domain::speech_analysis::analyze_speakers;
use wordlens_core::pipeline::generate_report_use_case::{GenerateReportUseCase, SpeakerCloud};
use wordlens_core::pipeline::report_logger::StdoutReportLogger;
use wordlens_core::report::domain::image_metadata::ImageMetadata;
use wordlens_core::report::domain::report_request::ReportRequest;
use wordlens_core::report::domain::transcript_source::TranscriptSource;
use wordlens_core::report::infrastructure::json_lines_metadata_sink::JsonLinesMetadataSink;
use wordlens_core::report::infrastructure::json_transcript_source::JsonTranscriptSource;
use wordlens_core::tagging::infrastructure::mecab_command_tagger::MecabCommandTagger;
use wordlens_core::wordcloud::infrastructure::masked_cloud_renderer::MaskedCloudRenderer;

use settings::Settings;

/// Per-speaker part-of-speech reports and word clouds from transcripts.
#[derive(Parser)]
#[command(name = "wordlens")]
struct Cli {
    /// JSON array of transcript rows (user_id, date, speaker, speaker_label, text_edited).
    rows: PathBuf,

    /// User whose transcripts are analyzed.
    #[arg(long)]
    user_id: String,

    /// First day of the window (YYYY-MM-DD, inclusive).
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the window (YYYY-MM-DD, inclusive).
    #[arg(long)]
    end: NaiveDate,

    /// What to produce: all, summary or clouds.
    #[arg(long, default_value = "all")]
    mode: String,

    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType font with Hangul coverage.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory for rendered PNG files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON-lines file receiving image metadata records.
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// MeCab executable.
    #[arg(long)]
    mecab: Option<String>,

    /// Maximum number of words per cloud.
    #[arg(long)]
    max_words: Option<usize>,

    /// Largest font size in the cloud.
    #[arg(long)]
    max_font_size: Option<u32>,

    /// Side length of the square circular mask; the radius is half of it.
    #[arg(long)]
    mask_size: Option<u32>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = apply_overrides(Settings::load(cli.config.as_deref())?, &cli);
    let request = ReportRequest::new(cli.user_id.clone(), cli.start, cli.end);

    let summaries;
    let clouds;
    let outcome;
    let report = match cli.mode.as_str() {
        "summary" => {
            // Text reports need no font, so skip renderer construction.
            let source = JsonTranscriptSource::new(&cli.rows);
            let rows = source.fetch(&request)?;
            summaries = analyze_speakers(&build_tagger(&settings), &rows)?;
            Report::new(Some(&summaries), None)
        }
        "clouds" => {
            clouds = build_use_case(&cli, &settings)?.word_clouds(&request)?;
            report_failures(&clouds);
            Report::new(None, Some(clouds.as_slice()))
        }
        _ => {
            outcome = build_use_case(&cli, &settings)?.execute(&request)?;
            report_failures(&outcome.clouds);
            Report::new(Some(&outcome.summaries), Some(outcome.clouds.as_slice()))
        }
    };

    println!("{}", report.to_json()?);
    Ok(())
}

fn build_use_case(
    cli: &Cli,
    settings: &Settings,
) -> Result<GenerateReportUseCase, Box<dyn std::error::Error>> {
    let tagger = build_tagger(settings);
    let renderer = MaskedCloudRenderer::from_font_file(&settings.font_path, settings.cloud.clone())?;

    Ok(GenerateReportUseCase::new(
        Box::new(JsonTranscriptSource::new(&cli.rows)),
        Box::new(tagger),
        Box::new(renderer),
        Box::new(JsonLinesMetadataSink::new(&settings.metadata_path)),
        settings.output_dir.clone(),
        settings.cloud.clone(),
        Box::new(StdoutReportLogger::new()),
    ))
}

fn build_tagger(settings: &Settings) -> MecabCommandTagger {
    MecabCommandTagger::new(settings.mecab_command.clone()).with_args(settings.mecab_args.clone())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(font) = &cli.font {
        settings.font_path = font.clone();
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = dir.clone();
    }
    if let Some(metadata) = &cli.metadata {
        settings.metadata_path = metadata.clone();
    }
    if let Some(mecab) = &cli.mecab {
        settings.mecab_command = mecab.clone();
    }
    if let Some(max_words) = cli.max_words {
        settings.cloud.max_words = max_words;
    }
    if let Some(max_font_size) = cli.max_font_size {
        settings.cloud.max_font_size = max_font_size;
    }
    if let Some(size) = cli.mask_size {
        settings.cloud.mask_size = size;
        settings.cloud.mask_radius = size / 2;
    }
    settings
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.rows.exists() {
        return Err(format!("Rows file not found: {}", cli.rows.display()).into());
    }
    if cli.start > cli.end {
        return Err(format!("Start date {} is after end date {}", cli.start, cli.end).into());
    }
    let valid_modes = ["all", "summary", "clouds"];
    if !valid_modes.contains(&cli.mode.as_str()) {
        return Err(format!(
            "Mode must be one of: all, summary, clouds, got '{}'",
            cli.mode
        )
        .into());
    }
    if cli.max_words == Some(0) {
        return Err("Max words must be at least 1".into());
    }
    if let Some(size) = cli.max_font_size {
        if size < 4 {
            return Err(format!("Max font size must be at least 4, got {size}").into());
        }
    }
    if cli.mask_size == Some(0) {
        return Err("Mask size must be positive".into());
    }
    Ok(())
}

fn report_failures(clouds: &[SpeakerCloud]) {
    for cloud in clouds {
        if let Err(e) = &cloud.outcome {
            log::warn!("No word cloud for {}: {e}", cloud.speaker_label);
        }
    }
}

/// JSON document printed on stdout.
///
/// Serialized straight from the core types so each summary keeps its
/// fixed category order.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    summaries: Option<&'a BTreeMap<String, PosSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<ImageReport<'a>>>,
}

#[derive(Serialize)]
struct ImageReport<'a> {
    speaker_label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> Report<'a> {
    fn new(
        summaries: Option<&'a BTreeMap<String, PosSummary>>,
        clouds: Option<&'a [SpeakerCloud]>,
    ) -> Self {
        let images = clouds.map(|clouds| clouds.iter().map(ImageReport::from_cloud).collect());
        Self { summaries, images }
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> ImageReport<'a> {
    fn from_cloud(cloud: &'a SpeakerCloud) -> Self {
        match &cloud.outcome {
            Ok(rendered) => Self {
                speaker_label: &cloud.speaker_label,
                metadata: Some(&rendered.metadata),
                bytes: Some(rendered.image.png.len()),
                words: Some(rendered.image.word_count),
                error: None,
            },
            Err(e) => Self {
                speaker_label: &cloud.speaker_label,
                metadata: None,
                bytes: None,
                words: None,
                error: Some(e.to_string()),
            },
        }
    }
}
