//! Measurement of the container, the ellipsis and the full text.

use tracing::debug;

use crate::core::error::MeasureError;
use crate::core::text::width::{grapheme_count, visible_width};

/// Width/height pair in pixel-equivalent units. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// One measurement pass. Produced fresh on every pass and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub container: Dimensions,
    pub ellipsis: Dimensions,
    pub text: Dimensions,
}

/// Measures text with the same metrics that the final render uses.
///
/// The style context (font, terminal, probe elements) belongs to the implementation.
pub trait Measurer {
    fn measure(&mut self, text: &str, ellipsis: &str) -> Result<Measurement, MeasureError>;

    /// Width of an arbitrary fragment of the measured text.
    fn width_of(&self, fragment: &str) -> f64;
}

/// Terminal-cell measurer: one column is one unit, every line is one row high.
#[derive(Debug, Clone, Default)]
pub struct TerminalMeasurer {
    columns: Option<usize>,
}

impl TerminalMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns: Some(columns),
        }
    }

    /// Assign the number of columns the label may occupy.
    pub fn set_container(&mut self, columns: usize) {
        self.columns = Some(columns);
    }

    pub fn container(&self) -> Option<usize> {
        self.columns
    }
}

impl Measurer for TerminalMeasurer {
    fn measure(&mut self, text: &str, ellipsis: &str) -> Result<Measurement, MeasureError> {
        let columns = match self.columns {
            Some(0) => return Err(MeasureError::unavailable("container has zero columns")),
            Some(columns) => columns,
            None => return Err(MeasureError::unavailable("no container assigned")),
        };

        let measurement = Measurement {
            container: Dimensions::new(columns as f64, 1.0),
            ellipsis: Dimensions::new(visible_width(ellipsis) as f64, 1.0),
            text: Dimensions::new(visible_width(text) as f64, 1.0),
        };
        debug!(
            container = measurement.container.width,
            ellipsis = measurement.ellipsis.width,
            text = measurement.text.width,
            "terminal measurement"
        );
        Ok(measurement)
    }

    fn width_of(&self, fragment: &str) -> f64 {
        visible_width(fragment) as f64
    }
}

/// Measurer fed by a host that measures elsewhere (a GUI toolkit, a layout snapshot, a test).
///
/// Fragment widths are the measured text width spread evenly over its graphemes.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasurer {
    measurement: Option<Measurement>,
    per_grapheme: f64,
}

impl FixedMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurement(measurement: Measurement) -> Self {
        Self {
            measurement: Some(measurement),
            per_grapheme: 0.0,
        }
    }

    pub fn set_measurement(&mut self, measurement: Measurement) {
        self.measurement = Some(measurement);
    }

    pub fn clear(&mut self) {
        self.measurement = None;
    }
}

impl Measurer for FixedMeasurer {
    fn measure(&mut self, text: &str, _ellipsis: &str) -> Result<Measurement, MeasureError> {
        let measurement = self
            .measurement
            .ok_or_else(|| MeasureError::unavailable("no measurement supplied"))?;
        let count = grapheme_count(text);
        self.per_grapheme = if count == 0 {
            0.0
        } else {
            measurement.text.width / count as f64
        };
        Ok(measurement)
    }

    fn width_of(&self, fragment: &str) -> f64 {
        grapheme_count(fragment) as f64 * self.per_grapheme
    }
}
