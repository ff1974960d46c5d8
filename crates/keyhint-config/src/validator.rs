//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, HARD_HINT_LIMIT};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError::InvalidValue`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_hints(config, &mut result);
        Self::validate_label_style(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_hints(config: &Config, result: &mut ValidationResult) {
        let max = config.hints.max_hints;
        if max == 0 || max > HARD_HINT_LIMIT {
            result.add_error(ValidationError::new(
                "hints.max_hints",
                format!("max_hints must be between 1 and {}", HARD_HINT_LIMIT),
            ));
        } else if max < 10 {
            result.add_warning(ValidationWarning::new(
                "hints.max_hints",
                "max_hints is very low (<10), most elements will not be labelled",
            ));
        }
    }

    fn validate_label_style(config: &Config, result: &mut ValidationResult) {
        let style = &config.hints.label_style;
        let required = [
            ("background", &style.background),
            ("foreground", &style.foreground),
            ("font_family", &style.font_family),
            ("font_size", &style.font_size),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("hints.label_style.{}", field),
                    format!("{} cannot be empty", field),
                ));
            }
        }

        if style.background == style.foreground {
            result.add_warning(ValidationWarning::new(
                "hints.label_style",
                "background and foreground are identical, labels will be unreadable",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        // Directives like "keyhint_core=trace" are passed through to the filter as-is.
        let level = config.logging.level.as_str();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !level.contains('=') && !valid_levels.contains(&level) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
