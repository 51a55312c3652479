//! Directory batch driver: enumerate, vignette and write numbered outputs.

use crate::{
    Effect, VignetteResult,
    convert::{load_image, save_image},
    vignette::Vignette,
};
use derivative::Derivative;
use derive_setters::Setters;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Batch configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BatchConfig {
    /// Directory scanned for input images
    #[derivative(Default(value = "PathBuf::new()"))]
    pub input_dir: PathBuf,

    /// Where outputs are written, `<input_dir>/output` when unset
    #[setters(strip_option)]
    pub output_dir: Option<PathBuf>,

    /// Input file extension, matched case-insensitively
    #[derivative(Default(value = "\"png\".to_string()"))]
    pub extension: String,

    #[derivative(Default(value = "\"output \".to_string()"))]
    pub output_prefix: String,

    /// Zero-padded width of the output index
    #[derivative(Default(value = "3"))]
    pub index_width: usize,

    #[derivative(Default(value = "\"png\".to_string()"))]
    pub output_extension: String,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_input_dir(input_dir.into())
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("output"))
    }

    pub fn output_file_name(&self, index: usize) -> String {
        output_file_name(
            &self.output_prefix,
            index,
            self.index_width,
            &self.output_extension,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// `(input, output)` pairs in processing order
    pub processed: Vec<(PathBuf, PathBuf)>,
    /// Skipped inputs with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// List the regular files directly inside `dir` whose extension matches,
/// sorted by file name.
pub fn discover_images(dir: impl AsRef<Path>, extension: &str) -> VignetteResult<Vec<PathBuf>> {
    let mut files = vec![];

    for entry in WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if matches && path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// `output_file_name("output ", 7, 3, "png") == "output 007.png"`
pub fn output_file_name(prefix: &str, index: usize, width: usize, extension: &str) -> String {
    format!("{prefix}{index:0width$}.{extension}")
}

/// Create `dir` and its parents if absent.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> VignetteResult<()> {
    fs::create_dir_all(dir.as_ref())?;
    Ok(())
}

/// Vignette a single file from `input` to `output`.
pub fn process_image(input: impl AsRef<Path>, output: impl AsRef<Path>) -> VignetteResult<()> {
    let samples = load_image(input.as_ref())?;
    log::debug!(
        "Vignetting {} with shape {:?}",
        input.as_ref().display(),
        samples.dim()
    );

    let result = Vignette::new().apply(samples.view())?;
    save_image(&result, output.as_ref())?;

    log::debug!("Saved {}", output.as_ref().display());
    Ok(())
}

/// Process every matching file of `config.input_dir` in sorted order.
///
/// The output index is the file's position in the sorted listing. A file
/// that fails is logged, recorded in the report and skipped; its index is
/// not reused.
pub fn run_batch(config: &BatchConfig) -> VignetteResult<BatchReport> {
    let inputs = discover_images(&config.input_dir, &config.extension)?;

    let output_dir = config.resolved_output_dir();
    ensure_output_dir(&output_dir)?;
    log::info!(
        "Found {} .{} file(s) in {}, writing to {}",
        inputs.len(),
        config.extension,
        config.input_dir.display(),
        output_dir.display()
    );

    let mut report = BatchReport::default();

    for (index, input) in inputs.into_iter().enumerate() {
        let output = output_dir.join(config.output_file_name(index));

        match process_image(&input, &output) {
            Ok(_) => report.processed.push((input, output)),
            Err(e) => {
                log::warn!("Skipping {}: {e}", input.display());
                report.failed.push((input, e.to_string()));
            }
        }
    }

    log::info!(
        "Batch complete: {} processed, {} skipped",
        report.processed.len(),
        report.failed.len()
    );

    Ok(report)
}
