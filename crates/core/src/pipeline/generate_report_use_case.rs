use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;

use crate::analysis::domain::pos_summary::PosSummary;
use crate::analysis::domain::speaker_aggregator::aggregate_by_label;
use crate::analysis::domain::speech_analysis::{analyze_speakers, noun_frequencies};
use crate::analysis::domain::transcript_row::TranscriptRow;
use crate::report::domain::image_metadata::ImageMetadata;
use crate::report::domain::metadata_sink::MetadataSink;
use crate::report::domain::report_request::ReportRequest;
use crate::report::domain::transcript_source::TranscriptSource;
use crate::tagging::domain::tagger::Tagger;
use crate::wordcloud::domain::circular_mask::CircularMask;
use crate::wordcloud::domain::cloud_options::CloudOptions;
use crate::wordcloud::domain::cloud_renderer::{CloudRenderer, RenderError, WordCloudImage};

use super::report_logger::ReportLogger;

/// Produces the image id for a speaker's cloud within a request.
pub type ImageIdFn = Box<dyn Fn(&ReportRequest, &str) -> String + Send>;

/// `{user_id}_{speaker_label}_{start}_{end}`. Letters and digits of any
/// script are kept (Hangul labels stay distinct); everything else,
/// including path separators, becomes `_`.
pub fn default_image_id(request: &ReportRequest, speaker_label: &str) -> String {
    let raw = format!(
        "{}_{}_{}_{}",
        request.user_id, speaker_label, request.start_date, request.end_date
    );
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A successfully rendered and recorded cloud.
#[derive(Clone, Debug)]
pub struct RenderedCloud {
    pub image: WordCloudImage,
    pub metadata: ImageMetadata,
}

/// Outcome of one speaker's cloud render.
#[derive(Debug)]
pub struct SpeakerCloud {
    pub speaker_label: String,
    pub outcome: Result<RenderedCloud, RenderError>,
}

#[derive(Debug)]
pub struct ReportOutcome {
    /// Part-of-speech summaries keyed by `speaker`.
    pub summaries: BTreeMap<String, PosSummary>,
    /// One entry per distinct `speaker_label`, in first-appearance order.
    pub clouds: Vec<SpeakerCloud>,
}

impl ReportOutcome {
    pub fn failed_clouds(&self) -> impl Iterator<Item = &SpeakerCloud> {
        self.clouds.iter().filter(|c| c.outcome.is_err())
    }
}

/// Appends the speaker's 1-based position to an id already taken in this
/// request, so no two speakers share an output path.
fn unique_image_id(candidate: String, position: usize, taken: &HashSet<String>) -> String {
    if !taken.contains(&candidate) {
        return candidate;
    }
    let mut suffix = position;
    loop {
        let id = format!("{candidate}_{suffix}");
        if !taken.contains(&id) {
            return id;
        }
        suffix += 1;
    }
}

/// Report pipeline: fetch → aggregate → {classify → summarize} and
/// {extract nouns → render → record metadata}.
///
/// Fetch, tagging and metadata failures abort the request. Render failures
/// are kept per speaker and the remaining speakers still render.
pub struct GenerateReportUseCase {
    source: Box<dyn TranscriptSource>,
    tagger: Box<dyn Tagger>,
    renderer: Box<dyn CloudRenderer>,
    sink: Box<dyn MetadataSink>,
    output_dir: PathBuf,
    options: CloudOptions,
    image_id: ImageIdFn,
    logger: Box<dyn ReportLogger>,
}

impl GenerateReportUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn TranscriptSource>,
        tagger: Box<dyn Tagger>,
        renderer: Box<dyn CloudRenderer>,
        sink: Box<dyn MetadataSink>,
        output_dir: PathBuf,
        options: CloudOptions,
        logger: Box<dyn ReportLogger>,
    ) -> Self {
        Self {
            source,
            tagger,
            renderer,
            sink,
            output_dir,
            options,
            image_id: Box::new(default_image_id),
            logger,
        }
    }

    pub fn with_image_id(mut self, image_id: ImageIdFn) -> Self {
        self.image_id = image_id;
        self
    }

    /// Word clouds only.
    pub fn word_clouds(
        &mut self,
        request: &ReportRequest,
    ) -> Result<Vec<SpeakerCloud>, Box<dyn std::error::Error>> {
        let rows = self.source.fetch(request)?;
        let clouds = self.render_rows(request, &rows)?;
        self.logger.summary();
        Ok(clouds)
    }

    /// Text report and word clouds from a single fetch.
    pub fn execute(
        &mut self,
        request: &ReportRequest,
    ) -> Result<ReportOutcome, Box<dyn std::error::Error>> {
        let rows = self.source.fetch(request)?;
        let summaries = self.summarize_rows(&rows)?;
        let clouds = self.render_rows(request, &rows)?;
        self.logger.summary();
        Ok(ReportOutcome { summaries, clouds })
    }

    fn summarize_rows(
        &mut self,
        rows: &[TranscriptRow],
    ) -> Result<BTreeMap<String, PosSummary>, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let summaries = analyze_speakers(self.tagger.as_ref(), rows)?;
        self.logger
            .timing("analyze", t0.elapsed().as_secs_f64() * 1000.0);
        self.logger.info(&format!(
            "Summarized {} speakers from {} rows",
            summaries.len(),
            rows.len()
        ));
        Ok(summaries)
    }

    fn render_rows(
        &mut self,
        request: &ReportRequest,
        rows: &[TranscriptRow],
    ) -> Result<Vec<SpeakerCloud>, Box<dyn std::error::Error>> {
        let groups = aggregate_by_label(rows);
        let total = groups.len();
        let mut clouds = Vec::with_capacity(total);
        let mut taken = HashSet::with_capacity(total);

        for (i, (label, text)) in groups.into_iter().enumerate() {
            self.logger.progress(i + 1, total, &label);

            let t0 = Instant::now();
            let frequencies = noun_frequencies(self.tagger.as_ref(), &text)?;
            self.logger.timing("tag", t0.elapsed().as_secs_f64() * 1000.0);

            let mask = CircularMask::new(self.options.mask_size, self.options.mask_radius);
            let image_id = unique_image_id((self.image_id)(request, &label), i + 1, &taken);
            taken.insert(image_id.clone());
            let path = self.output_dir.join(format!("{image_id}.png"));

            let t1 = Instant::now();
            let rendered = self
                .renderer
                .render(&frequencies, &mask, &label, Some(&path));
            self.logger
                .timing("render", t1.elapsed().as_secs_f64() * 1000.0);

            let outcome = match rendered {
                Ok(image) => {
                    let metadata = ImageMetadata::wordcloud(image_id, label.as_str(), request, &path);
                    self.sink.insert(&metadata)?;
                    Ok(RenderedCloud { image, metadata })
                }
                Err(e) => {
                    self.logger.failure(&label, &e.to_string());
                    Err(e)
                }
            };
            clouds.push(SpeakerCloud {
                speaker_label: label,
                outcome,
            });
        }

        Ok(clouds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::noun_frequency::WordFrequency;
    use crate::pipeline::report_logger::NullReportLogger;
    use crate::tagging::domain::pos_category::PosCategory;
    use crate::tagging::domain::tagged_token::TaggedToken;
    use chrono::NaiveDate;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        rows: Vec<TranscriptRow>,
        calls: Arc<Mutex<usize>>,
    }

    impl StubSource {
        fn new(rows: Vec<TranscriptRow>) -> Self {
            Self {
                rows,
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl TranscriptSource for StubSource {
        fn fetch(
            &self,
            _request: &ReportRequest,
        ) -> Result<Vec<TranscriptRow>, Box<dyn std::error::Error>> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    impl TranscriptSource for FailingSource {
        fn fetch(
            &self,
            _request: &ReportRequest,
        ) -> Result<Vec<TranscriptRow>, Box<dyn std::error::Error>> {
            Err("database unavailable".into())
        }
    }

    /// Tags each whitespace-separated word by a trailing `/TAG` suffix.
    struct SuffixTagger;

    impl Tagger for SuffixTagger {
        fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, Box<dyn std::error::Error>> {
            Ok(text
                .split_whitespace()
                .filter_map(|w| w.split_once('/'))
                .map(|(s, t)| TaggedToken::new(s, t))
                .collect())
        }
    }

    /// Records every call; fails for labels listed in `fail_for`.
    struct StubRenderer {
        calls: Arc<Mutex<Vec<(String, WordFrequency, u32)>>>,
        fail_for: Vec<String>,
    }

    impl StubRenderer {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_for: Vec::new(),
            }
        }
    }

    impl CloudRenderer for StubRenderer {
        fn render(
            &self,
            frequencies: &WordFrequency,
            mask: &CircularMask,
            speaker_label: &str,
            output_path: Option<&Path>,
        ) -> Result<WordCloudImage, RenderError> {
            self.calls.lock().unwrap().push((
                speaker_label.to_string(),
                frequencies.clone(),
                mask.size(),
            ));
            if self.fail_for.iter().any(|l| l == speaker_label) {
                return Err(RenderError::Write {
                    path: output_path.unwrap().to_path_buf(),
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(WordCloudImage {
                png: vec![1, 2, 3],
                path: output_path.map(Path::to_path_buf),
                width: mask.size(),
                height: mask.size(),
                word_count: frequencies.len(),
            })
        }
    }

    struct RecordingSink {
        records: Arc<Mutex<Vec<ImageMetadata>>>,
    }

    impl MetadataSink for RecordingSink {
        fn insert(&mut self, metadata: &ImageMetadata) -> Result<(), Box<dyn std::error::Error>> {
            self.records.lock().unwrap().push(metadata.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl MetadataSink for FailingSink {
        fn insert(&mut self, _metadata: &ImageMetadata) -> Result<(), Box<dyn std::error::Error>> {
            Err("insert failed".into())
        }
    }

    // --- Helpers ---

    fn request() -> ReportRequest {
        ReportRequest::new(
            "u1",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    fn rows() -> Vec<TranscriptRow> {
        vec![
            TranscriptRow::new("1", "상담사", "오늘/MAG 기분/NNG 어떠/VA"),
            TranscriptRow::new("0", "내담자", "학교/NNG 친구/NNG 집/NNG"),
            TranscriptRow::new("1", "상담사", "기분/NNG 서울/NNP 가/VV"),
        ]
    }

    fn use_case(
        source: Box<dyn TranscriptSource>,
        renderer: StubRenderer,
        sink: Box<dyn MetadataSink>,
    ) -> GenerateReportUseCase {
        GenerateReportUseCase::new(
            source,
            Box::new(SuffixTagger),
            Box::new(renderer),
            sink,
            PathBuf::from("out"),
            CloudOptions::default(),
            Box::new(NullReportLogger),
        )
    }

    fn recording_sink() -> (Box<dyn MetadataSink>, Arc<Mutex<Vec<ImageMetadata>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(RecordingSink {
                records: records.clone(),
            }),
            records,
        )
    }

    // --- Tests ---

    #[test]
    fn test_default_image_id_is_file_safe() {
        let id = default_image_id(&request(), "상담사 A/B");
        assert_eq!(id, "u1_상담사_A_B_2024-03-01_2024-03-31");
    }

    #[test]
    fn test_hangul_labels_of_equal_length_get_distinct_files() {
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), StubRenderer::new(), sink);
        let clouds = uc.word_clouds(&request()).unwrap();

        let paths: Vec<_> = clouds
            .iter()
            .map(|c| c.outcome.as_ref().unwrap().image.path.clone().unwrap())
            .collect();
        assert_ne!(paths[0], paths[1]);

        let records = records.lock().unwrap();
        assert_eq!(records[0].image_id, "u1_상담사_2024-03-01_2024-03-31");
        assert_eq!(records[1].image_id, "u1_내담자_2024-03-01_2024-03-31");
    }

    #[test]
    fn test_labels_sanitized_to_same_id_are_disambiguated() {
        let rows = vec![
            TranscriptRow::new("0", "A B", "학교/NNG"),
            TranscriptRow::new("1", "A/B", "친구/NNG"),
        ];
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows)), StubRenderer::new(), sink);
        uc.word_clouds(&request()).unwrap();

        let records = records.lock().unwrap();
        assert_eq!(records[0].image_id, "u1_A_B_2024-03-01_2024-03-31");
        assert_eq!(records[1].image_id, "u1_A_B_2024-03-01_2024-03-31_2");
        assert_ne!(records[0].image_path, records[1].image_path);
    }

    #[test]
    fn test_unique_image_id_skips_taken_suffixes() {
        let taken: HashSet<String> = ["x".to_string(), "x_2".to_string()].into();
        assert_eq!(unique_image_id("y".to_string(), 2, &taken), "y");
        assert_eq!(unique_image_id("x".to_string(), 2, &taken), "x_3");
    }

    #[test]
    fn test_execute_summarizes_per_speaker() {
        let (sink, _) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), StubRenderer::new(), sink);
        let summaries = uc.execute(&request()).unwrap().summaries;

        assert_eq!(summaries.len(), 2);
        let counselor = &summaries["1"];
        assert_eq!(counselor.total(), 6);
        assert_eq!(counselor.get(PosCategory::Noun).unwrap().count, 2);
        assert_eq!(counselor.get(PosCategory::Noun).unwrap().unique_count, 1);
        assert_eq!(summaries["0"].get(PosCategory::Noun).unwrap().count, 3);
    }

    #[test]
    fn test_every_speaker_label_gets_a_cloud() {
        let renderer = StubRenderer::new();
        let calls = renderer.calls.clone();
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), renderer, sink);

        let clouds = uc.word_clouds(&request()).unwrap();

        let labels: Vec<_> = clouds.iter().map(|c| c.speaker_label.as_str()).collect();
        assert_eq!(labels, vec!["상담사", "내담자"]);
        assert!(clouds.iter().all(|c| c.outcome.is_ok()));
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(records.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_cloud_frequencies_use_nouns_only() {
        let renderer = StubRenderer::new();
        let calls = renderer.calls.clone();
        let (sink, _) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), renderer, sink);
        uc.word_clouds(&request()).unwrap();

        let calls = calls.lock().unwrap();
        let (_, counselor, mask_size) = &calls[0];
        assert_eq!(counselor.get("기분"), Some(&2));
        assert_eq!(counselor.get("서울"), Some(&1));
        assert!(!counselor.contains_key("오늘"));
        assert_eq!(*mask_size, 600);

        let (_, client, _) = &calls[1];
        assert!(!client.contains_key("집"));
        assert_eq!(client.len(), 2);
    }

    #[test]
    fn test_metadata_matches_rendered_path() {
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), StubRenderer::new(), sink);
        let clouds = uc.word_clouds(&request()).unwrap();

        let rendered = clouds[0].outcome.as_ref().unwrap();
        let expected_path = PathBuf::from("out").join("u1_상담사_2024-03-01_2024-03-31.png");
        assert_eq!(rendered.image.path.as_deref(), Some(expected_path.as_path()));
        assert_eq!(rendered.metadata.speaker, "상담사");
        assert_eq!(rendered.metadata.image_type, "wordcloud");
        assert_eq!(records.lock().unwrap()[0], rendered.metadata);
    }

    #[test]
    fn test_render_failure_does_not_stop_batch() {
        let mut renderer = StubRenderer::new();
        renderer.fail_for = vec!["상담사".to_string()];
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), renderer, sink);

        let clouds = uc.word_clouds(&request()).unwrap();

        assert_eq!(clouds.len(), 2);
        let err = clouds[0].outcome.as_ref().unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(clouds[1].outcome.is_ok());
        // Only the successful render is recorded.
        assert_eq!(records.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_execute_fetches_once() {
        let source = StubSource::new(rows());
        let calls = source.calls.clone();
        let mut renderer = StubRenderer::new();
        renderer.fail_for = vec!["내담자".to_string()];
        let (sink, _) = recording_sink();
        let mut uc = use_case(Box::new(source), renderer, sink);

        let outcome = uc.execute(&request()).unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(outcome.summaries.len(), 2);
        assert_eq!(outcome.clouds.len(), 2);
        assert_eq!(outcome.failed_clouds().count(), 1);
    }

    #[test]
    fn test_fetch_failure_surfaces() {
        let (sink, _) = recording_sink();
        let mut uc = use_case(Box::new(FailingSource), StubRenderer::new(), sink);
        let err = uc.execute(&request()).unwrap_err();
        assert!(err.to_string().contains("database unavailable"));
    }

    #[test]
    fn test_sink_failure_surfaces() {
        let mut uc = use_case(
            Box::new(StubSource::new(rows())),
            StubRenderer::new(),
            Box::new(FailingSink),
        );
        assert!(uc.word_clouds(&request()).is_err());
    }

    #[test]
    fn test_no_rows_yields_empty_report() {
        let (sink, _) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(Vec::new())), StubRenderer::new(), sink);
        let outcome = uc.execute(&request()).unwrap();
        assert!(outcome.summaries.is_empty());
        assert!(outcome.clouds.is_empty());
    }

    #[test]
    fn test_custom_image_id() {
        let (sink, records) = recording_sink();
        let mut uc = use_case(Box::new(StubSource::new(rows())), StubRenderer::new(), sink)
            .with_image_id(Box::new(|req: &ReportRequest, label: &str| {
                format!("{}-{}", req.user_id, label.len())
            }));
        uc.word_clouds(&request()).unwrap();
        let records = records.lock().unwrap();
        assert_eq!(records[0].image_id, "u1-9");
        assert!(records[0].image_path.ends_with("u1-9.png"));
    }
}
