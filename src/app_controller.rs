use anyhow::{anyhow, Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, SYNCED_SUFFIX};
use crate::overlap::resolve_overlaps;
use crate::pipeline::{SyncPipeline, SyncReport};
use crate::timeline::{clean_segments, ReferenceTimeline, TimelineStats};
use crate::timeline_file::{load_segments, save_segments};
use crate::validation::{check_sequence, SequenceIssue};

// @module: Application controller for timeline processing

/// What happened to one input file
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Output written to the path, with the run's figures
    Written(PathBuf, SyncReport),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for timeline synchronization
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Synchronize one timeline file.
    ///
    /// The transcript is read from `transcript` when given, else from a
    /// `.txt` file with the same stem, else rebuilt from the timeline text.
    pub fn sync_file(
        &self,
        input_file: &Path,
        transcript: Option<&Path>,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_file.unwrap_or_else(|| Self::default_output_path(input_file));
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, output already exists (use -f to force overwrite)",
                input_file
            );
            return Ok(FileOutcome::Skipped(output_path));
        }

        let segments = load_segments(input_file)?;
        let transcript = match transcript
            .map(Path::to_path_buf)
            .or_else(|| FileManager::companion_transcript(input_file))
        {
            Some(path) => {
                debug!("Reading transcript from {:?}", path);
                FileManager::read_to_string(&path)?
            }
            None => {
                debug!("No transcript given for {:?}, rebuilding from timeline text", input_file);
                ReferenceTimeline::new(segments.clone()).transcript()
            }
        };

        let pipeline = SyncPipeline::from_config(&self.config)?;
        let outcome = pipeline
            .run(&transcript, &segments)
            .with_context(|| format!("Failed to synchronize {:?}", input_file))?;

        for issue in &outcome.report.remaining_issues {
            warn!("{}", issue);
        }

        save_segments(&output_path, &outcome.segments)?;
        info!("Success: {}", output_path.display());

        Ok(FileOutcome::Written(output_path, outcome.report))
    }

    /// Synchronize one timeline file on the blocking pool
    pub async fn run(
        &self,
        input_file: PathBuf,
        transcript: Option<PathBuf>,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let controller = self.clone();
        tokio::task::spawn_blocking(move || {
            controller.sync_file(&input_file, transcript.as_deref(), output_file, force_overwrite)
        })
        .await?
    }

    /// Run the workflow in folder mode, synchronizing every timeline in a
    /// directory. Files are independent and processed concurrently.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let timeline_files: Vec<PathBuf> = FileManager::find_files(&input_dir, "json")?
            .into_iter()
            .filter(|path| !FileManager::is_generated(path))
            .collect();

        if timeline_files.is_empty() {
            return Err(anyhow!("No timeline files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(timeline_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Synchronizing");

        let tasks = timeline_files.into_iter().map(|path| {
            let controller = self.clone();
            let pb = folder_pb.clone();
            async move {
                let file = path.clone();
                let result = tokio::task::spawn_blocking(move || {
                    controller.sync_file(&file, None, None, force_overwrite)
                })
                .await;
                pb.inc(1);
                (path, result)
            }
        });

        let mut summary = FolderSummary::default();
        for (path, result) in join_all(tasks).await {
            match result {
                Ok(Ok(FileOutcome::Written(..))) => summary.processed += 1,
                Ok(Ok(FileOutcome::Skipped(_))) => summary.skipped += 1,
                Ok(Err(e)) => {
                    error!("Error processing file {:?}: {:#}", path, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("Task for {:?} did not complete: {}", path, e);
                    summary.failed += 1;
                }
            }
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Resolve adjacent overlaps in a timeline file.
    /// Rewrites the input unless `output_file` is given.
    pub fn resolve_file(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        buffer_ms: Option<u64>,
    ) -> Result<PathBuf> {
        let segments = load_segments(input_file)?;
        let buffer_ms = buffer_ms.unwrap_or(self.config.overlap.buffer_ms);
        let resolved = resolve_overlaps(&segments, buffer_ms);

        let output_path = output_file.unwrap_or_else(|| input_file.to_path_buf());
        save_segments(&output_path, &resolved)?;
        info!("Success: {}", output_path.display());

        Ok(output_path)
    }

    /// Check a timeline file's sequence. With `fix`, text lines are trimmed
    /// and the file is renumbered, de-overlapped and rewritten first.
    /// Returns the issues left.
    pub fn check_file(&self, input_file: &Path, fix: bool, buffer_ms: Option<u64>) -> Result<Vec<SequenceIssue>> {
        let segments = load_segments(input_file)?;
        let issues = check_sequence(&segments);

        if !fix {
            return Ok(issues);
        }

        let mut fixed = clean_segments(&segments);
        let cleaned = fixed
            .iter()
            .zip(&segments)
            .filter(|(after, before)| after.text != before.text)
            .count();
        if issues.is_empty() && cleaned == 0 {
            return Ok(issues);
        }

        for (i, segment) in fixed.iter_mut().enumerate() {
            segment.sequence_index = i + 1;
        }
        let fixed = resolve_overlaps(&fixed, buffer_ms.unwrap_or(self.config.overlap.buffer_ms));
        save_segments(input_file, &fixed)?;
        info!(
            "Corrected {} issue(s) and cleaned {} block(s) in {}",
            issues.len(),
            cleaned,
            input_file.display()
        );

        Ok(check_sequence(&fixed))
    }

    /// Statistics and per-segment character weights of a timeline file
    pub fn stats_file(&self, input_file: &Path) -> Result<(TimelineStats, Vec<f64>)> {
        let timeline = ReferenceTimeline::new(load_segments(input_file)?);
        Ok((timeline.stats(), timeline.character_weights().to_vec()))
    }

    /// Default output path for a synced timeline, next to its input
    pub fn default_output_path(input_file: &Path) -> PathBuf {
        let output_dir = input_file.parent().unwrap_or(Path::new("."));
        FileManager::generate_output_path(input_file, output_dir, SYNCED_SUFFIX, "json")
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
