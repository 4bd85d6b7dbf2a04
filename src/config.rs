use std::{path::Path, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::LetterCatalog,
    pose::PoseThresholds,
    recognizer::{LetterRecognizer, UntrackedHand},
    types::{Finger, HandPose, Letter},
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    pub thresholds: PoseThresholds,
    pub hold: HoldConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HoldConfig {
    #[serde(default = "default_dwell_ms")]
    pub dwell_ms: u64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            dwell_ms: default_dwell_ms(),
        }
    }
}

fn default_dwell_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    #[default]
    Standard,
    Basic,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub alphabet: Alphabet,
    #[serde(default)]
    pub untracked: UntrackedHand,
    /// Replaces the alphabet preset when non-empty.
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TemplateConfig {
    pub letter: Letter,
    #[serde(default)]
    pub extended: Vec<Finger>,
    #[serde(default)]
    pub thumb_touching_index: bool,
}

impl TemplateConfig {
    fn pose(&self) -> HandPose {
        let pose = self
            .extended
            .iter()
            .fold(HandPose::flexed(), |pose, &finger| pose.with_extended(finger));
        if self.thumb_touching_index {
            pose.with_thumb_touching_index()
        } else {
            pose
        }
    }
}

impl RecognizerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("loaded recognizer config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(t.extension_margin.is_finite() && t.extension_margin >= 0.0) {
            bail!(
                "extension_margin must be a non-negative distance, got {}",
                t.extension_margin
            );
        }
        if !(t.touch_distance.is_finite() && t.touch_distance > 0.0) {
            bail!("touch_distance must be positive, got {}", t.touch_distance);
        }
        if !(t.thumb_alignment > -1.0 && t.thumb_alignment <= 1.0) {
            bail!(
                "thumb_alignment must lie in (-1, 1], got {}",
                t.thumb_alignment
            );
        }
        if self.hold.dwell_ms == 0 {
            bail!("hold.dwell_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.hold.dwell_ms)
    }

    pub fn build_catalog(&self) -> Result<LetterCatalog> {
        if self.catalog.templates.is_empty() {
            let catalog = match self.catalog.alphabet {
                Alphabet::Standard => LetterCatalog::standard(),
                Alphabet::Basic => LetterCatalog::basic(),
            };
            return catalog.context("invalid built-in alphabet");
        }
        let catalog = LetterCatalog::new(
            self.catalog
                .templates
                .iter()
                .map(|template| (template.letter, template.pose())),
        )
        .context("invalid letter templates")?;
        Ok(catalog)
    }

    pub fn build_recognizer(&self) -> Result<LetterRecognizer> {
        self.validate()?;
        let catalog = self.build_catalog()?;
        Ok(
            LetterRecognizer::new(Arc::new(catalog), self.thresholds, self.dwell())
                .with_untracked(self.catalog.untracked),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::catalog::CatalogError;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RecognizerConfig::from_toml_str("").expect("defaults");
        assert_eq!(config, RecognizerConfig::default());
        assert_eq!(config.thresholds, PoseThresholds::default());
        assert_eq!(config.dwell(), Duration::from_secs(1));
        assert_eq!(config.build_catalog().expect("catalog").len(), 10);
    }

    #[test]
    fn parses_every_section() {
        let config = RecognizerConfig::from_toml_str(
            r#"
            [thresholds]
            extension_margin = 0.02
            touch_distance = 0.03

            [hold]
            dwell_ms = 750

            [catalog]
            alphabet = "basic"
            untracked = "no-candidate"
            "#,
        )
        .expect("config");

        assert_eq!(config.thresholds.extension_margin, 0.02);
        assert_eq!(config.thresholds.thumb_alignment, 0.85);
        assert_eq!(config.thresholds.touch_distance, 0.03);
        assert_eq!(config.dwell(), Duration::from_millis(750));
        assert_eq!(config.catalog.untracked, UntrackedHand::NoCandidate);
        assert_eq!(config.build_catalog().expect("catalog").len(), 3);
    }

    #[test]
    fn custom_templates_replace_alphabet() {
        let config = RecognizerConfig::from_toml_str(
            r#"
            [[catalog.templates]]
            letter = "L"
            extended = ["thumb", "index"]

            [[catalog.templates]]
            letter = "F"
            extended = ["middle", "ring", "little"]
            thumb_touching_index = true
            "#,
        )
        .expect("config");

        let catalog = config.build_catalog().expect("catalog");
        assert_eq!(catalog.len(), 2);
        let standard = LetterCatalog::standard().expect("standard catalog");
        assert_eq!(catalog.template(Letter::L), standard.template(Letter::L));
        assert_eq!(catalog.template(Letter::F), standard.template(Letter::F));
    }

    #[test]
    fn duplicate_custom_templates_are_rejected() {
        let config = RecognizerConfig::from_toml_str(
            r#"
            [[catalog.templates]]
            letter = "U"
            extended = ["index", "middle"]

            [[catalog.templates]]
            letter = "W"
            extended = ["middle", "index"]
            "#,
        )
        .expect("config parses");

        let err = config.build_recognizer().err().expect("rejected");
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::DuplicateTemplate {
                first: Letter::U,
                second: Letter::W,
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_thresholds() {
        assert!(RecognizerConfig::from_toml_str("[thresholds]\ntouch_distance = 0.0").is_err());
        assert!(RecognizerConfig::from_toml_str("[thresholds]\nthumb_alignment = 1.5").is_err());
        assert!(RecognizerConfig::from_toml_str("[thresholds]\nextension_margin = -0.1").is_err());
        assert!(RecognizerConfig::from_toml_str("[hold]\ndwell_ms = 0").is_err());
        assert!(RecognizerConfig::from_toml_str("[catalog]\nalphabet = \"greek\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[hold]\ndwell_ms = 400").expect("write");

        let config = RecognizerConfig::load(file.path()).expect("load");
        assert_eq!(config.dwell(), Duration::from_millis(400));

        let recognizer = config.build_recognizer().expect("recognizer");
        assert_eq!(recognizer.catalog().len(), 10);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(RecognizerConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
