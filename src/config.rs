use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RatError, Result};
use crate::plot::PLOT_CLIP_THRESHOLD;
use crate::roots::ROOT_TOLERANCE;
use crate::scores::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Read from TOML. Missing sections and fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub plot: PlotSettings,
    pub analysis: AnalysisSettings,
    pub quiz: QuizSettings,
    pub scores: ScoreSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub x_min: f64,
    pub x_max: f64,
    pub point_count: usize,
    pub clip_threshold: f64,
    /// Vertical window for renderers; sampling ignores it.
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            point_count: 300,
            clip_threshold: PLOT_CLIP_THRESHOLD,
            y_min: -8.0,
            y_max: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub root_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            root_tolerance: ROOT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Difficulty rises by one after this many questions.
    pub questions_per_level: usize,
    pub max_difficulty: u32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_level: 5,
            max_difficulty: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    pub path: PathBuf,
    pub capacity: usize,
    pub top_limit: usize,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scores.json"),
            capacity: DEFAULT_CAPACITY,
            top_limit: 10,
        }
    }
}

impl Settings {
    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| RatError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RatError::Config(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.plot.x_min.is_finite() && self.plot.x_max.is_finite()) {
            return Err(RatError::Config("plot range must be finite".to_string()));
        }
        if self.plot.clip_threshold <= 0.0 {
            return Err(RatError::Config("clip_threshold must be positive".to_string()));
        }
        if self.analysis.root_tolerance <= 0.0 {
            return Err(RatError::Config("root_tolerance must be positive".to_string()));
        }
        if self.quiz.questions_per_level == 0 || self.quiz.max_difficulty == 0 {
            return Err(RatError::Config(
                "quiz pacing values must be at least 1".to_string(),
            ));
        }
        if self.scores.capacity == 0 {
            return Err(RatError::Config("score capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
