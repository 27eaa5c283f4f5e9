//! Command-line interface for painting images with a stroke library

use crate::io::configuration::{
    Bounds, DEFAULT_GENERATIONS, DEFAULT_MAX_STROKE_SEGMENTS, DEFAULT_STROKE_LENGTH,
    DEFAULT_STROKE_WIDTH, MODEL_SUFFIX, PaintSettings, PainterOptions, RENDER_SUFFIX,
    SHAPES_SUFFIX, SKELETON_SUFFIX,
};
use crate::io::error::{PainterError, Result, invalid_parameter};
use crate::io::image::{load_canvas, save_canvas};
use crate::io::progress::ProgressManager;
use crate::painter::scheduler::Painter;
use crate::stroke::instance::ResizeMode;
use crate::stroke::library::StrokeLibrary;
use crate::trace::gradient::DerivativeKernel;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Image extensions picked up when the target is a directory
const INPUT_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Derivative operator choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KernelArg {
    /// 3×3 Sobel operator
    Sobel,
    /// Symmetric 3×3 operator
    Symmetric,
}

impl From<KernelArg> for DerivativeKernel {
    fn from(kernel: KernelArg) -> Self {
        match kernel {
            KernelArg::Sobel => Self::Sobel,
            KernelArg::Symmetric => Self::Symmetric,
        }
    }
}

/// Template scaling choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResizeArg {
    /// Scale to the traced width
    Width,
    /// Scale to the traced length
    Length,
    /// Scale by the mean of both
    Middle,
}

impl From<ResizeArg> for ResizeMode {
    fn from(mode: ResizeArg) -> Self {
        match mode {
            ResizeArg::Width => Self::Width,
            ResizeArg::Length => Self::Length,
            ResizeArg::Middle => Self::Middle,
        }
    }
}

#[derive(Parser)]
#[command(name = "strokepaint")]
#[command(
    author,
    version,
    about = "Repaint images with textured brush strokes"
)]
/// Command-line arguments for the painter
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Stroke library directory
    #[arg(short, long, value_name = "DIR")]
    pub library: PathBuf,

    /// Output directory; defaults to next to each input
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible painting
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of coarse-to-fine generations
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Maximum straight segments per stroke
    #[arg(long, default_value_t = DEFAULT_MAX_STROKE_SEGMENTS)]
    pub segments: usize,

    /// Minimum stroke width in pixels
    #[arg(long, default_value_t = DEFAULT_STROKE_WIDTH.0)]
    pub min_width: u32,

    /// Maximum stroke width in pixels
    #[arg(long, default_value_t = DEFAULT_STROKE_WIDTH.1)]
    pub max_width: u32,

    /// Minimum stroke length in pixels
    #[arg(long, default_value_t = DEFAULT_STROKE_LENGTH.0)]
    pub min_length: u32,

    /// Maximum stroke length in pixels
    #[arg(long, default_value_t = DEFAULT_STROKE_LENGTH.1)]
    pub max_length: u32,

    /// Derivative kernel for the gradient field
    #[arg(short, long, value_enum, default_value_t = KernelArg::Sobel)]
    pub kernel: KernelArg,

    /// Traced dimension templates are scaled to
    #[arg(short, long, value_enum, default_value_t = ResizeArg::Width)]
    pub resize: ResizeArg,

    /// Disable normal-map shading
    #[arg(long)]
    pub no_shading: bool,

    /// Keep paths that turn sharply
    #[arg(long)]
    pub no_turn_check: bool,

    /// Track stroke occupancy and export shapes and skeletons
    #[arg(long)]
    pub occupancy: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Settings for a `width × height` source
    pub fn settings(&self, width: u32, height: u32) -> PaintSettings {
        PaintSettings {
            generations: self.generations,
            max_stroke_segments: self.segments,
            stroke_width: Bounds::new(self.min_width, self.max_width),
            stroke_length: Bounds::new(self.min_length, self.max_length),
            ..PaintSettings::for_canvas(width, height)
        }
    }

    /// Algorithm switches selected on the command line
    pub fn options(&self) -> PainterOptions {
        PainterOptions {
            kernel: self.kernel.into(),
            resize_mode: self.resize.into(),
            shading: !self.no_shading,
            validate_turn_angle: !self.no_turn_check,
            track_occupancy: self.occupancy,
            seed: self.seed,
        }
    }
}

/// Orchestrates batch painting of image files with progress tracking
pub struct PaintProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PaintProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Paint every target image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is neither an image nor a directory
    /// - The stroke library cannot be loaded or is empty
    /// - An image cannot be read, painted or written
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        // Library normalization only depends on the stroke bounds
        let library = StrokeLibrary::load(&self.cli.library, &self.cli.settings(1, 1))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, &library)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_input_image(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG, JPEG or BMP image",
                ));
            }
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            });
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ));
        }

        let entries = std::fs::read_dir(target).map_err(|e| PainterError::FileSystem {
            path: target.clone(),
            operation: "read directory",
            source: e,
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| PainterError::FileSystem {
                    path: target.clone(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if path.is_file()
                && is_input_image(&path)
                && !is_output(&path)
                && self.should_process_file(&path)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path, RENDER_SUFFIX);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, library: &StrokeLibrary) -> Result<()> {
        let start_time = Instant::now();
        let source = load_canvas(input_path)?;
        let settings = self.cli.settings(source.width() as u32, source.height() as u32);
        let generations = settings.generations;

        let mut painter = Painter::new(source, library.clone(), settings, self.cli.options())?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, generations);
            painter = painter.with_observer(Box::new(pm.clone()));
        }

        while let Some(step) = painter.step() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.record_step(&step);
            }
        }

        save_canvas(painter.render(), &self.output_path(input_path, RENDER_SUFFIX))?;
        save_canvas(painter.model(), &self.output_path(input_path, MODEL_SUFFIX))?;
        if let Some((shapes, skeleton)) = painter.occupancy_canvases() {
            save_canvas(&shapes, &self.output_path(input_path, SHAPES_SUFFIX))?;
            save_canvas(&skeleton, &self.output_path(input_path, SKELETON_SUFFIX))?;
        }

        info!(
            "Painted {} in {:.2?} ({} placements)",
            input_path.display(),
            start_time.elapsed(),
            painter.placements()
        );
        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn output_path(&self, input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{suffix}.png", stem.to_string_lossy());

        match (&self.cli.output, input_path.parent()) {
            (Some(dir), _) => dir.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }
}

fn is_input_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            INPUT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| {
            [RENDER_SUFFIX, MODEL_SUFFIX, SHAPES_SUFFIX, SKELETON_SUFFIX]
                .iter()
                .any(|suffix| stem.ends_with(suffix))
        })
}
