//! Per-feature ranges used to rescale descriptors before comparison

use crate::stroke::descriptor::StrokeDescriptor;

/// Observed `[min, max]` range of one feature
///
/// `max >= min` always holds; the range starts collapsed on the first
/// observed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizationRange {
    min: f64,
    max: f64,
}

impl NormalizationRange {
    /// Range holding a single value
    pub const fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Widen the range to include `value`; non-finite values are ignored
    pub fn observe(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Lower bound
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Map `value` onto `[0, 1]`: `min → 0`, `max → 1`, clamped outside
    ///
    /// A collapsed range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let interval = self.max - self.min;
        if interval <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / interval).clamp(0.0, 1.0)
    }
}

/// Feature of a `StrokeDescriptor` that takes part in normalized distances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Stroke width
    Width,
    /// Length-to-width ratio
    LengthToWidth,
    /// Absolute bend angle
    Angle,
    /// First segment share
    Fraction,
}

impl Feature {
    /// Value of this feature in `descriptor`; the angle is taken unsigned
    pub const fn value(self, descriptor: &StrokeDescriptor) -> f64 {
        match self {
            Self::Width => descriptor.width,
            Self::LengthToWidth => descriptor.length_to_width,
            Self::Angle => descriptor.angle.abs(),
            Self::Fraction => descriptor.fraction,
        }
    }
}

/// Normalization ranges for the features of one template group
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalizer {
    width: Option<NormalizationRange>,
    length_to_width: Option<NormalizationRange>,
    angle: Option<NormalizationRange>,
    fraction: Option<NormalizationRange>,
}

impl Normalizer {
    /// Empty normalizer; every feature normalizes to 0 until observed
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, feature: Feature) -> &mut Option<NormalizationRange> {
        match feature {
            Feature::Width => &mut self.width,
            Feature::LengthToWidth => &mut self.length_to_width,
            Feature::Angle => &mut self.angle,
            Feature::Fraction => &mut self.fraction,
        }
    }

    /// Range of `feature`, if any value was observed
    pub const fn range(&self, feature: Feature) -> Option<NormalizationRange> {
        match feature {
            Feature::Width => self.width,
            Feature::LengthToWidth => self.length_to_width,
            Feature::Angle => self.angle,
            Feature::Fraction => self.fraction,
        }
    }

    /// Include `value` in the range of `feature`
    pub fn observe(&mut self, feature: Feature, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.slot(feature)
            .get_or_insert(NormalizationRange::new(value))
            .observe(value);
    }

    /// Include every feature of `descriptor`
    pub fn observe_descriptor(&mut self, descriptor: &StrokeDescriptor) {
        for feature in [
            Feature::Width,
            Feature::LengthToWidth,
            Feature::Angle,
            Feature::Fraction,
        ] {
            self.observe(feature, feature.value(descriptor));
        }
    }

    /// Normalized value of `feature` taken from `descriptor`
    pub fn normalize(&self, feature: Feature, descriptor: &StrokeDescriptor) -> f64 {
        self.range(feature)
            .map_or(0.0, |range| range.normalize(feature.value(descriptor)))
    }
}
