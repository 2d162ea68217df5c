use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TumorType {
    Glioma,
    Meningioma,
    Pituitary,
}

impl fmt::Display for TumorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TumorType::Glioma => write!(f, "Glioma"),
            TumorType::Meningioma => write!(f, "Meningioma"),
            TumorType::Pituitary => write!(f, "Pituitary"),
        }
    }
}

/// Normalized detection outcome. `tumor_type` is present exactly when a
/// tumor was detected; the constructors are the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    tumor_type: Option<TumorType>,
    confidence: u8,
}

impl ClassificationResult {
    pub fn tumor(tumor_type: TumorType, confidence: u8) -> Self {
        Self {
            tumor_type: Some(tumor_type),
            confidence: confidence.min(100),
        }
    }

    pub fn no_tumor(confidence: u8) -> Self {
        Self {
            tumor_type: None,
            confidence: confidence.min(100),
        }
    }

    pub fn detected(&self) -> bool {
        self.tumor_type.is_some()
    }

    pub fn tumor_type(&self) -> Option<TumorType> {
        self.tumor_type
    }

    /// Integer percentage in `0..=100`.
    pub fn confidence(&self) -> u8 {
        self.confidence
    }
}

/// Scale the backend reports confidence on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidenceScale {
    /// Already a percentage in `[0, 100]`.
    #[default]
    Percent,
    /// A probability in `[0, 1]`.
    Fraction,
}

impl ConfidenceScale {
    fn upper_bound(self) -> f64 {
        match self {
            ConfidenceScale::Percent => 100.0,
            ConfidenceScale::Fraction => 1.0,
        }
    }

    fn to_percent(self, value: f64) -> f64 {
        match self {
            ConfidenceScale::Percent => value,
            ConfidenceScale::Fraction => value * 100.0,
        }
    }
}

impl FromStr for ConfidenceScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "percentage" | "100" => Ok(ConfidenceScale::Percent),
            "fraction" | "probability" | "1" => Ok(ConfidenceScale::Fraction),
            other => Err(format!("unknown confidence scale '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("unknown tumour type '{0}'")]
    UnknownTumourType(String),
    #[error("tumour_detected={detected} contradicts tumour_type '{tumour_type}'")]
    Contradiction { detected: bool, tumour_type: String },
    #[error("confidence {value} outside [0, {max}]")]
    ConfidenceOutOfRange { value: f64, max: f64 },
}

/// Turns the backend's raw prediction fields into a [`ClassificationResult`].
///
/// Backend labels are `glioma`, `meningioma`, `pituitary` and `notumour`.
pub fn normalize_prediction(
    tumour_detected: bool,
    tumour_type: &str,
    confidence: f64,
    scale: ConfidenceScale,
) -> Result<ClassificationResult, NormalizeError> {
    let max = scale.upper_bound();
    if !confidence.is_finite() || !(0.0..=max).contains(&confidence) {
        return Err(NormalizeError::ConfidenceOutOfRange {
            value: confidence,
            max,
        });
    }
    // f64::round rounds half away from zero; the range check keeps this in 0..=100.
    let percent = scale.to_percent(confidence).round().clamp(0.0, 100.0) as u8;

    let parsed = match tumour_type.trim() {
        "glioma" => Some(TumorType::Glioma),
        "meningioma" => Some(TumorType::Meningioma),
        "pituitary" => Some(TumorType::Pituitary),
        "notumour" => None,
        other => return Err(NormalizeError::UnknownTumourType(other.to_string())),
    };

    match parsed {
        Some(kind) if tumour_detected => Ok(ClassificationResult::tumor(kind, percent)),
        None if !tumour_detected => Ok(ClassificationResult::no_tumor(percent)),
        _ => Err(NormalizeError::Contradiction {
            detected: tumour_detected,
            tumour_type: tumour_type.to_string(),
        }),
    }
}
