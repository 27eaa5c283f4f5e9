//! Generation scheduler
//!
//! The painter is a pull-based state machine. Each `step` performs one
//! stroke placement attempt or closes a generation:
//!
//! 1. A generation starts by building its gradient field and refilling the
//!    seed pool.
//! 2. The first generation draws seeds until less than `FIRST_LAYER_FILL` of
//!    the pool remains; later ones make `iterations` attempts.
//! 3. Each attempt traces the seed in both directions concurrently,
//!    classifies and prepares a stroke for each, and keeps the candidate with
//!    the lower reconstruction error.
//! 4. The winner is painted unless its error exceeds the generation's reject
//!    bound; painted pixels leave the seed pool.
//!
//! Cancellation is checked before every attempt, never during one.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::Point;
use crate::io::configuration::{PaintSettings, PainterOptions};
use crate::io::error::{Result, invalid_parameter};
use crate::painter::compositing::{
    Placement, composite, fill_model, placement_origin, reconstruction_error,
};
use crate::painter::events::{CancellationToken, NoopObserver, PaintObserver, PaintPhase};
use crate::painter::occupancy::{OccupancyTracker, pixel_role};
use crate::painter::profile::{GenerationProfile, derive_profiles};
use crate::stroke::instance::{InstanceRequest, StrokeInstance};
use crate::stroke::library::StrokeLibrary;
use crate::trace::decider::{PointDecider, RandomPointDecider};
use crate::trace::disk::DiskMasks;
use crate::trace::gradient::{GradientField, GradientOptions};
use crate::trace::path::{PathAssembler, TraceDirection, TracePath};
use log::{debug, info};

/// What a placement attempt did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// The winning stroke was painted
    Painted {
        /// Seed of the stroke
        seed: Point,
        /// Reconstruction error of the stroke
        error: f64,
        /// Canvas pixels painted
        pixels: usize,
    },
    /// The best candidate exceeded the reject bound
    Rejected {
        /// Seed of the attempt
        seed: Point,
        /// Error of the best candidate
        error: f64,
    },
    /// No candidate found a stroke template
    Skipped {
        /// Seed of the attempt
        seed: Point,
    },
}

impl PlacementOutcome {
    /// Whether the render changed
    pub const fn is_painted(&self) -> bool {
        matches!(self, Self::Painted { .. })
    }
}

/// One unit of painter progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintStep {
    /// A placement attempt finished
    Placement {
        /// Generation index, 0 = coarsest
        generation: usize,
        /// Result of the attempt
        outcome: PlacementOutcome,
    },
    /// A generation finished
    GenerationEnd {
        /// Generation index, 0 = coarsest
        generation: usize,
    },
}

/// Owned snapshot of the canvases after a step
#[derive(Clone, Debug)]
pub struct Frame {
    /// Step that produced the snapshot
    pub step: PaintStep,
    /// Render canvas
    pub render: Canvas,
    /// Flat model canvas
    pub model: Canvas,
}

/// Traced, classified and prepared stroke for one direction
#[derive(Clone, Debug)]
struct Candidate {
    path: TracePath,
    instance: StrokeInstance,
    origin: Point,
    color: Rgb,
    error: f64,
}

impl Candidate {
    const fn placement(&self) -> Placement<'_> {
        Placement {
            instance: &self.instance,
            origin: self.origin,
            color: self.color,
        }
    }
}

// Read-only view shared by both trace directions of an attempt
struct AttemptContext<'a> {
    source: &'a Canvas,
    render: &'a Canvas,
    library: &'a StrokeLibrary,
    assembler: PathAssembler<'a>,
    options: PainterOptions,
}

impl AttemptContext<'_> {
    fn evaluate(&self, seed: Point, direction: TraceDirection) -> Option<Candidate> {
        let path = self.assembler.assemble(seed, direction);
        let template = match self.library.classify(&path.descriptor) {
            Ok(template) => template,
            Err(error) => {
                debug!("{direction:?} trace from ({}, {}) skipped: {error}", seed.x, seed.y);
                return None;
            }
        };

        let color = path.mean_color();
        let request = InstanceRequest {
            traced: path.descriptor,
            color,
            main_angle: path.main_angle,
            resize_mode: self.options.resize_mode,
            shading: self.options.shading,
        };
        let instance = StrokeInstance::prepare(template, &request);
        let origin = placement_origin(seed, path.main_angle, path.width(), self.render);
        let error = reconstruction_error(
            self.source,
            self.render,
            &Placement {
                instance: &instance,
                origin,
                color,
            },
        );

        Some(Candidate {
            path,
            instance,
            origin,
            color,
            error,
        })
    }
}

#[derive(Debug)]
enum Stage {
    Pending,
    Running {
        generation: usize,
        gradient: GradientField,
        attempts: usize,
    },
    Finished,
    Cancelled,
}

/// Stroke-based painter over a source canvas
pub struct Painter<D: PointDecider = RandomPointDecider> {
    source: Canvas,
    render: Canvas,
    model: Canvas,
    library: StrokeLibrary,
    settings: PaintSettings,
    options: PainterOptions,
    profiles: Vec<GenerationProfile>,
    masks: DiskMasks,
    decider: D,
    observer: Box<dyn PaintObserver>,
    token: CancellationToken,
    occupancy: Option<OccupancyTracker>,
    stage: Stage,
    placements: usize,
}

impl Painter<RandomPointDecider> {
    /// Painter drawing seeds uniformly at random
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `settings` fail validation or do not
    /// match the source size.
    pub fn new(
        source: Canvas,
        library: StrokeLibrary,
        settings: PaintSettings,
        options: PainterOptions,
    ) -> Result<Self> {
        let decider = RandomPointDecider::new(source.width(), source.height(), options.seed);
        Self::with_decider(source, library, settings, options, decider)
    }
}

impl<D: PointDecider> Painter<D> {
    /// Painter using a custom seed strategy
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `settings` fail validation or do not
    /// match the source size.
    pub fn with_decider(
        source: Canvas,
        library: StrokeLibrary,
        settings: PaintSettings,
        options: PainterOptions,
        decider: D,
    ) -> Result<Self> {
        settings.validate()?;
        check_source_size(&source, &settings)?;

        let profiles = derive_profiles(&settings);
        let max_radius = profiles
            .iter()
            .map(|profile| profile.stroke_width.max / 2)
            .max()
            .unwrap_or(0);
        let (width, height) = (source.width(), source.height());

        Ok(Self {
            render: Canvas::new(width, height, Rgb::WHITE),
            model: Canvas::new(width, height, Rgb::WHITE),
            source,
            library,
            settings,
            options,
            profiles,
            masks: DiskMasks::new(max_radius),
            decider,
            observer: Box::new(NoopObserver),
            token: CancellationToken::new(),
            occupancy: options
                .track_occupancy
                .then(|| OccupancyTracker::new(width, height)),
            stage: Stage::Pending,
            placements: 0,
        })
    }

    /// Replace the progress observer
    pub fn with_observer(mut self, observer: Box<dyn PaintObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Handle that cancels this painter
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Source canvas
    pub const fn source(&self) -> &Canvas {
        &self.source
    }

    /// Render canvas in progress
    pub const fn render(&self) -> &Canvas {
        &self.render
    }

    /// Flat model canvas in progress
    pub const fn model(&self) -> &Canvas {
        &self.model
    }

    /// Per-generation profiles, coarsest first
    pub fn profiles(&self) -> &[GenerationProfile] {
        &self.profiles
    }

    /// Run settings
    pub const fn settings(&self) -> &PaintSettings {
        &self.settings
    }

    /// Seed strategy
    pub const fn decider(&self) -> &D {
        &self.decider
    }

    /// Occupancy tracker, when enabled
    pub const fn occupancy(&self) -> Option<&OccupancyTracker> {
        self.occupancy.as_ref()
    }

    /// Placement attempts made so far
    pub const fn placements(&self) -> usize {
        self.placements
    }

    /// Whether the run was cancelled
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.stage, Stage::Cancelled)
    }

    /// Whether every generation has been painted
    pub const fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Advance by one placement attempt or generation boundary
    ///
    /// Returns `None` once the run is finished or cancelled.
    pub fn step(&mut self) -> Option<PaintStep> {
        if matches!(self.stage, Stage::Pending) {
            self.observer.on_status(PaintPhase::Preparing, 0);
            self.begin_generation(0);
        }

        let (generation, attempts) = match &self.stage {
            Stage::Running {
                generation,
                attempts,
                ..
            } => (*generation, *attempts),
            Stage::Pending | Stage::Finished | Stage::Cancelled => return None,
        };

        // Phase 1: Check whether the generation has seeds left
        let continues = if generation == 0 {
            self.decider.is_available()
        } else {
            self.profiles
                .get(generation)
                .is_some_and(|profile| attempts < profile.iterations)
        };
        if !continues {
            return Some(self.end_generation(generation));
        }

        // Phase 2: Honor cancellation before starting a placement
        if self.token.is_cancelled() {
            info!("Painting cancelled in generation {generation}");
            self.observer.on_status(PaintPhase::Cancelled, generation);
            self.stage = Stage::Cancelled;
            return None;
        }

        // Phase 3: Draw a seed
        let Some(seed) = self.decider.next_point() else {
            return Some(self.end_generation(generation));
        };
        if let Stage::Running { attempts, .. } = &mut self.stage {
            *attempts += 1;
        }

        // Phase 4: Trace, score and commit
        let outcome = self.attempt(generation, seed);
        self.decider.post_stroke();
        self.placements += 1;

        Some(PaintStep::Placement {
            generation,
            outcome,
        })
    }

    /// Iterator of owned canvas snapshots, one per step
    pub const fn frames(&mut self) -> Frames<'_, D> {
        Frames { painter: self }
    }

    /// Step until the run finishes or is cancelled; returns the step count
    pub fn run(&mut self) -> usize {
        let mut steps = 0;
        while self.step().is_some() {
            steps += 1;
        }
        steps
    }

    /// Export the occupancy boundary and skeleton canvases
    pub fn occupancy_canvases(&mut self) -> Option<(Canvas, Canvas)> {
        let generation = self.profiles.len().saturating_sub(1);
        let tracker = self.occupancy.as_ref()?;
        self.observer.on_status(PaintPhase::Shapes, generation);
        Some((tracker.shapes_canvas(), tracker.skeleton_canvas()))
    }

    fn begin_generation(&mut self, generation: usize) {
        let Some(profile) = self.profiles.get(generation).copied() else {
            self.stage = Stage::Finished;
            return;
        };

        info!(
            "Generation {generation}: width {}..{}, length {}, sigma {:.2}, tolerance {:.1}",
            profile.stroke_width.min,
            profile.stroke_width.max,
            profile.max_length,
            profile.blur_sigma,
            profile.stroke_tolerance
        );
        self.observer.on_generation(generation);
        self.observer.on_status(PaintPhase::Blurring, generation);

        let gradient = GradientField::build(
            &self.source,
            GradientOptions {
                blur_sigma: profile.blur_sigma,
                kernel: self.options.kernel,
                window: profile.averaging_window(),
            },
        );
        self.decider.reset();

        self.observer.on_status(PaintPhase::Tracing, generation);
        self.stage = Stage::Running {
            generation,
            gradient,
            attempts: 0,
        };
    }

    fn end_generation(&mut self, generation: usize) -> PaintStep {
        debug!("Generation {generation} finished after {} placements", self.placements);
        self.begin_generation(generation + 1);
        PaintStep::GenerationEnd { generation }
    }

    fn attempt(&mut self, generation: usize, seed: Point) -> PlacementOutcome {
        let Some(best) = self.best_candidate(generation, seed) else {
            debug!("No stroke template for seed ({}, {})", seed.x, seed.y);
            return PlacementOutcome::Skipped { seed };
        };

        let reject = self
            .profiles
            .get(generation)
            .map_or(f64::INFINITY, |profile| profile.reject_tolerance);
        if best.error > reject {
            debug!(
                "Rejected stroke at ({}, {}): error {:.1} > {reject:.1}",
                seed.x, seed.y, best.error
            );
            return PlacementOutcome::Rejected {
                seed,
                error: best.error,
            };
        }

        let pixels = self.commit(&best);
        PlacementOutcome::Painted {
            seed,
            error: best.error,
            pixels,
        }
    }

    fn best_candidate(&self, generation: usize, seed: Point) -> Option<Candidate> {
        let Stage::Running { gradient, .. } = &self.stage else {
            return None;
        };
        let profile = self.profiles.get(generation)?;
        let limits = profile.trace_limits(
            self.settings.max_stroke_segments,
            self.options.validate_turn_angle,
        );

        let context = AttemptContext {
            source: &self.source,
            render: &self.render,
            library: &self.library,
            assembler: PathAssembler::new(&self.source, gradient, &self.masks, limits),
            options: self.options,
        };

        let (forward, backward) = rayon::join(
            || context.evaluate(seed, TraceDirection::Forward),
            || context.evaluate(seed, TraceDirection::Backward),
        );

        [forward, backward]
            .into_iter()
            .flatten()
            .min_by(|a, b| a.error.total_cmp(&b.error))
    }

    fn commit(&mut self, candidate: &Candidate) -> usize {
        let placement = candidate.placement();

        if let Some(tracker) = self.occupancy.as_mut() {
            tracker.open_stroke(candidate.color, candidate.path.skeleton.clone());
            for (point, local, _) in placement.pixels() {
                if self.render.contains(point) {
                    tracker.add_pixel(point, pixel_role(candidate.instance.texture(), local));
                }
            }
        }

        let painted = composite(&mut self.render, &placement);
        fill_model(&mut self.model, &candidate.path.points, candidate.color);
        for &point in &painted {
            self.decider.point_callback(point);
        }
        painted.len()
    }
}

fn check_source_size(source: &Canvas, settings: &PaintSettings) -> Result<()> {
    if source.width() != settings.width as usize || source.height() != settings.height as usize {
        return Err(invalid_parameter(
            "width",
            &format!("{}x{}", settings.width, settings.height),
            &format!(
                "settings must match the {}x{} source canvas",
                source.width(),
                source.height()
            ),
        ));
    }
    Ok(())
}

/// Iterator of canvas snapshots driving a painter
pub struct Frames<'a, D: PointDecider> {
    painter: &'a mut Painter<D>,
}

impl<D: PointDecider> Iterator for Frames<'_, D> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let step = self.painter.step()?;
        Some(Frame {
            step,
            render: self.painter.render.clone(),
            model: self.painter.model.clone(),
        })
    }
}
