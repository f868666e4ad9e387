//! Widget configuration
//!
//! [`DotMatrixConfig`] replaces a property-bag builder with plain typed
//! fields. It deserializes from JSON with every field optional, and the
//! chained setters cover the in-code case:
//!
//! ```
//! use dotmatrix::{DotMatrixConfig, DotShape};
//!
//! let config = DotMatrixConfig::default()
//!     .cols_and_rows(128, 16)
//!     .pref_size(264.0, 33.0)
//!     .dot_shape(DotShape::Round);
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::color::DotColors;
use crate::error::{DotMatrixError, Result};
use crate::geometry::{clamp_spacer_factor, Spacing, DEFAULT_SPACER_SIZE_FACTOR};
use crate::render::DotShape;

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotMatrixConfig {
    pub cols: usize,
    pub rows: usize,
    #[serde(with = "hex_color")]
    pub active_color: u32,
    #[serde(with = "hex_color")]
    pub inactive_color: u32,
    pub dot_shape: DotShape,
    pub use_spacer: bool,
    /// Fraction of the dot size left empty on each side, `0.0..=0.2`.
    pub spacer_size_factor: f32,
    pub square_dots: bool,
    pub pref_size: Size,
    pub min_size: Option<Size>,
    pub max_size: Option<Size>,
    /// Inset on every side between the widget bounds and the dots.
    pub padding: f32,
    /// Take all available space instead of the preferred size.
    pub fill_available: bool,
}

impl Default for DotMatrixConfig {
    fn default() -> Self {
        Self {
            cols: 32,
            rows: 32,
            active_color: DotColors::ACTIVE,
            inactive_color: DotColors::INACTIVE,
            dot_shape: DotShape::Square,
            use_spacer: true,
            spacer_size_factor: DEFAULT_SPACER_SIZE_FACTOR,
            square_dots: true,
            pref_size: Size::new(250.0, 250.0),
            min_size: None,
            max_size: None,
            padding: 0.0,
            fill_available: false,
        }
    }
}

impl DotMatrixConfig {
    pub fn cols_and_rows(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn active_color(mut self, color: u32) -> Self {
        self.active_color = color;
        self
    }

    pub fn inactive_color(mut self, color: u32) -> Self {
        self.inactive_color = color;
        self
    }

    pub fn dot_shape(mut self, shape: DotShape) -> Self {
        self.dot_shape = shape;
        self
    }

    pub fn use_spacer(mut self, use_spacer: bool) -> Self {
        self.use_spacer = use_spacer;
        self
    }

    /// Stored clamped to `0.0..=0.2`.
    pub fn spacer_size_factor(mut self, factor: f32) -> Self {
        self.spacer_size_factor = clamp_spacer_factor(factor);
        self
    }

    pub fn square_dots(mut self, square_dots: bool) -> Self {
        self.square_dots = square_dots;
        self
    }

    pub fn pref_size(mut self, width: f32, height: f32) -> Self {
        self.pref_size = Size::new(width, height);
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_size = Some(Size::new(width, height));
        self
    }

    pub fn max_size(mut self, width: f32, height: f32) -> Self {
        self.max_size = Some(Size::new(width, height));
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn fill_available(mut self, fill: bool) -> Self {
        self.fill_available = fill;
        self
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            use_spacer: self.use_spacer,
            spacer_size_factor: clamp_spacer_factor(self.spacer_size_factor),
            square_dots: self.square_dots,
        }
    }

    /// Reject configurations the widget cannot lay out.
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(DotMatrixError::InvalidConfig(format!(
                "matrix needs at least one column and row, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !self.pref_size.is_valid() {
            return Err(DotMatrixError::InvalidConfig("preferred size must be finite and non-negative".into()));
        }
        for (name, size) in [("minimum", self.min_size), ("maximum", self.max_size)] {
            if size.is_some_and(|s| !s.is_valid()) {
                return Err(DotMatrixError::InvalidConfig(format!("{name} size must be finite and non-negative")));
            }
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min.width > max.width || min.height > max.height {
                return Err(DotMatrixError::InvalidConfig("minimum size exceeds maximum size".into()));
            }
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(DotMatrixError::InvalidConfig("padding must be finite and non-negative".into()));
        }
        Ok(())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Per-application config directory, e.g. `~/.config/dotmatrix`.
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(app_name))
}

/// Read a JSON settings file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Read a JSON settings file, falling back to `T::default()` when it is
/// missing or unreadable.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(DotMatrixError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default settings");
            T::default()
        }
    }
}

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Colors as `"#AARRGGBB"` strings (`"#RRGGBB"` accepted on input).
pub mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{color:08X}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let text = String::deserialize(deserializer)?;
        crate::color::from_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {text:?}")))
    }
}
