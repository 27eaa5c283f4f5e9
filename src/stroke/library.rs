//! Stroke template library and nearest-neighbour classification
//!
//! Templates are grouped by skeleton point count. Each group carries
//! normalization ranges fixed at construction, so classification only reads
//! shared state and can run from several traces at once.

use crate::io::configuration::{MAX_STROKE_POINTS, MM_TO_PX, PaintSettings, WIDTH_FEATURE_WEIGHT};
use crate::io::error::{PainterError, Result};
use crate::stroke::descriptor::StrokeDescriptor;
use crate::stroke::normalization::{Feature, Normalizer};
use crate::stroke::reader::read_templates;
use crate::stroke::template::StrokeTemplate;
use log::{info, warn};
use std::path::Path;

/// Physical width range (mm) assumed for two-point strokes
const TWO_POINT_WIDTH_MM: (f64, f64) = (1.0, 9.0);
/// Physical width range (mm) assumed for three-point strokes
const THREE_POINT_WIDTH_MM: (f64, f64) = (1.0, 6.0);
/// Interior angle range (degrees) assumed for three-point strokes
const THREE_POINT_ANGLE: (f64, f64) = (90.0, 180.0);
/// First segment share range (percent) assumed for three-point strokes
const THREE_POINT_FRACTION: (f64, f64) = (0.0, 100.0);

/// Read-only set of stroke templates grouped by point count
#[derive(Clone, Debug, Default)]
pub struct StrokeLibrary {
    groups: [Vec<StrokeTemplate>; MAX_STROKE_POINTS],
    normalizers: [Normalizer; MAX_STROKE_POINTS],
}

impl StrokeLibrary {
    /// Load every template under `root`
    ///
    /// Unusable files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be listed or holds no usable
    /// template.
    pub fn load(root: &Path, settings: &PaintSettings) -> Result<Self> {
        let templates = read_templates(root)?;
        if templates.is_empty() {
            return Err(PainterError::EmptyLibrary {
                path: root.to_path_buf(),
            });
        }
        let library = Self::from_templates(templates, settings);
        info!(
            "Loaded stroke library from {}: {} / {} / {} templates with 1 / 2 / 3 points",
            root.display(),
            library.group(1).len(),
            library.group(2).len(),
            library.group(3).len()
        );
        Ok(library)
    }

    /// Build a library from in-memory templates
    ///
    /// Templates whose point count is outside `1..=3` are dropped.
    pub fn from_templates(templates: Vec<StrokeTemplate>, settings: &PaintSettings) -> Self {
        let mut library = Self {
            groups: Default::default(),
            normalizers: synthetic_normalizers(settings),
        };

        for template in templates {
            let points = template.descriptor.points;
            let Some(slot) = points.checked_sub(1) else {
                warn!("Dropping stroke template with zero points");
                continue;
            };
            let (Some(group), Some(normalizer)) =
                (library.groups.get_mut(slot), library.normalizers.get_mut(slot))
            else {
                warn!("Dropping stroke template with {points} points");
                continue;
            };
            normalizer.observe_descriptor(&template.descriptor);
            group.push(template);
        }

        library
    }

    /// Templates with `points` skeleton points
    pub fn group(&self, points: usize) -> &[StrokeTemplate] {
        points
            .checked_sub(1)
            .and_then(|slot| self.groups.get(slot))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Normalization ranges of the `points` group
    pub fn normalizer(&self, points: usize) -> Option<&Normalizer> {
        points
            .checked_sub(1)
            .and_then(|slot| self.normalizers.get(slot))
    }

    /// Total number of templates
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Whether the library holds no template
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closest template to `target`, as an owned copy
    ///
    /// One-point strokes match on width alone. Longer strokes use a
    /// normalized weighted Euclidean distance; three-point matches are
    /// mirrored when their bend turns the other way than the target's.
    ///
    /// # Errors
    ///
    /// Returns `NoStrokeAvailable` when the target's group is empty.
    pub fn classify(&self, target: &StrokeDescriptor) -> Result<StrokeTemplate> {
        let points = target.points;
        let unavailable = || PainterError::NoStrokeAvailable { points };
        let group = self.group(points);
        let normalizer = self.normalizer(points).ok_or_else(unavailable)?;

        let features: &[(Feature, f64)] = match points {
            1 => &[],
            2 => &[
                (Feature::LengthToWidth, 1.0),
                (Feature::Width, WIDTH_FEATURE_WEIGHT),
            ],
            _ => &[
                (Feature::LengthToWidth, 1.0),
                (Feature::Angle, 1.0),
                (Feature::Fraction, 1.0),
                (Feature::Width, WIDTH_FEATURE_WEIGHT),
            ],
        };

        let distance = |template: &StrokeTemplate| {
            if features.is_empty() {
                return (template.descriptor.width - target.width).abs();
            }
            features
                .iter()
                .map(|&(feature, weight)| {
                    let delta = normalizer.normalize(feature, target)
                        - normalizer.normalize(feature, &template.descriptor);
                    weight * delta * delta
                })
                .sum::<f64>()
                .sqrt()
        };

        let best = group
            .iter()
            .map(|template| (distance(template), template))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, template)| template)
            .ok_or_else(unavailable)?;

        if points >= MAX_STROKE_POINTS && best.descriptor.is_mirrored_against(target) {
            Ok(best.mirrored())
        } else {
            Ok(best.clone())
        }
    }
}

// Bounds the library may not cover on its own: physical widths and the
// length-to-width span reachable with the user's stroke bounds
fn synthetic_normalizers(settings: &PaintSettings) -> [Normalizer; MAX_STROKE_POINTS] {
    let length = settings.stroke_length;
    let width = settings.stroke_width;
    let ratio_high = f64::from(length.max) / f64::from(width.min.max(1));
    let ratio_low = f64::from(length.min) / f64::from(width.max.max(1));

    let mut two = Normalizer::new();
    two.observe(Feature::Width, TWO_POINT_WIDTH_MM.0 * MM_TO_PX);
    two.observe(Feature::Width, TWO_POINT_WIDTH_MM.1 * MM_TO_PX);
    two.observe(Feature::LengthToWidth, ratio_high);
    two.observe(Feature::LengthToWidth, ratio_low);

    let mut three = Normalizer::new();
    three.observe(Feature::Width, THREE_POINT_WIDTH_MM.0 * MM_TO_PX);
    three.observe(Feature::Width, THREE_POINT_WIDTH_MM.1 * MM_TO_PX);
    three.observe(Feature::Angle, THREE_POINT_ANGLE.0);
    three.observe(Feature::Angle, THREE_POINT_ANGLE.1);
    three.observe(Feature::Fraction, THREE_POINT_FRACTION.0);
    three.observe(Feature::Fraction, THREE_POINT_FRACTION.1);
    three.observe(Feature::LengthToWidth, ratio_high);
    three.observe(Feature::LengthToWidth, ratio_low);

    [Normalizer::new(), two, three]
}
