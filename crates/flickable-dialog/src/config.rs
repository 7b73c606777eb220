use std::fmt;

use flickable_core::Color;

use crate::constants::{DISMISS_THRESHOLD, ROTATION_EXPONENT};

/// Names the content the host inflates inside the draggable surface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentDescriptor(String);

impl ContentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Construction-time settings. Immutable once the dialog exists.
#[derive(Clone, Debug, PartialEq)]
pub struct FlickableConfig {
    pub content: ContentDescriptor,
    /// Per-axis release distance that triggers a throw. With zero, any
    /// non-zero displacement throws.
    pub dismiss_threshold: f32,
    pub rotation_exponent: f32,
    pub background_color: Color,
    /// Whether the back key cancels the dialog.
    pub cancelable: bool,
    /// Whether a tap on the backdrop cancels the dialog.
    pub dismiss_on_outside_touch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingContent,
    NonFinite { field: &'static str, value: f32 },
    ZeroRotationExponent,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingContent => write!(f, "dialog content descriptor is required"),
            ConfigError::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::ZeroRotationExponent => write!(f, "rotation exponent must not be zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Builder for [`FlickableConfig`].
#[derive(Clone, Debug)]
pub struct FlickableConfigBuilder {
    content: Option<ContentDescriptor>,
    dismiss_threshold: f32,
    rotation_exponent: f32,
    background_color: Option<Color>,
    cancelable: bool,
    dismiss_on_outside_touch: bool,
}

impl Default for FlickableConfigBuilder {
    fn default() -> Self {
        Self {
            content: None,
            dismiss_threshold: DISMISS_THRESHOLD,
            rotation_exponent: ROTATION_EXPONENT,
            background_color: None,
            cancelable: false,
            dismiss_on_outside_touch: true,
        }
    }
}

impl FlickableConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: ContentDescriptor) -> Self {
        self.content = Some(content);
        self
    }

    pub fn dismiss_threshold(mut self, threshold: f32) -> Self {
        self.dismiss_threshold = threshold;
        self
    }

    pub fn rotation_exponent(mut self, exponent: f32) -> Self {
        self.rotation_exponent = exponent;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn dismiss_on_outside_touch(mut self, dismiss: bool) -> Self {
        self.dismiss_on_outside_touch = dismiss;
        self
    }

    pub fn build(self) -> Result<FlickableConfig, ConfigError> {
        let content = self
            .content
            .filter(|content| !content.as_str().is_empty())
            .ok_or(ConfigError::MissingContent)?;
        if !self.dismiss_threshold.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "dismiss_threshold",
                value: self.dismiss_threshold,
            });
        }
        if !self.rotation_exponent.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "rotation_exponent",
                value: self.rotation_exponent,
            });
        }
        if self.rotation_exponent == 0.0 {
            return Err(ConfigError::ZeroRotationExponent);
        }
        if self.dismiss_threshold <= 0.0 {
            log::warn!(
                "dismiss threshold {} is not positive; any non-zero displacement will dismiss",
                self.dismiss_threshold
            );
        }

        Ok(FlickableConfig {
            content,
            dismiss_threshold: self.dismiss_threshold,
            rotation_exponent: self.rotation_exponent,
            background_color: self.background_color.unwrap_or(Color::TRANSLUCENT_BLACK),
            cancelable: self.cancelable,
            dismiss_on_outside_touch: self.dismiss_on_outside_touch,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
