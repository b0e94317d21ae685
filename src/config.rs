use serde::Deserialize;

use crate::celebration::CelebrationConfig;
use crate::error::{FxError, Result};
use crate::field::{AnchoredConfig, FieldConfig};
use crate::typewriter::TypewriterTiming;

/// Tuning for every effect on the page. Any table or key left out of the
/// TOML text keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub field: FieldConfig,
    pub anchored_field: AnchoredConfig,
    pub typewriter: TypewriterTiming,
    pub celebration: CelebrationConfig,
}

impl FxConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: FxConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `text` when given, otherwise fall back to the defaults.
    pub fn from_optional_toml(text: Option<&str>) -> Result<Self> {
        match text {
            Some(text) if !text.trim().is_empty() => FxConfig::from_toml_str(text),
            _ => Ok(FxConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let field = &self.field;
        if field.palette.is_empty() {
            return Err(FxError::InvalidConfig("field.palette is empty".into()));
        }
        if !(field.relaxation > 0.0 && field.relaxation <= 1.0) {
            return Err(FxError::InvalidConfig(format!(
                "field.relaxation must be in (0, 1], got {}",
                field.relaxation
            )));
        }
        if field.interaction_radius <= 0.0 || field.connection_radius <= 0.0 {
            return Err(FxError::InvalidConfig("field radii must be positive".into()));
        }
        if field.max_drift_speed < 0.0 || field.size_min < 0.0 || field.size_range < 0.0 {
            return Err(FxError::InvalidConfig(
                "field drift and size bands must not be negative".into(),
            ));
        }
        if field.opacity_min < 0.0 || field.opacity_range < 0.0 {
            return Err(FxError::InvalidConfig(
                "field opacity band must not be negative".into(),
            ));
        }
        if field.mobile_particle_count == 0 || field.desktop_particle_count == 0 {
            return Err(FxError::InvalidConfig(
                "field particle counts must be at least 1".into(),
            ));
        }

        let anchored = &self.anchored_field;
        if anchored.palette.is_empty() {
            return Err(FxError::InvalidConfig("anchored_field.palette is empty".into()));
        }
        if anchored.mobile_particle_count == 0 || anchored.desktop_particle_count == 0 {
            return Err(FxError::InvalidConfig(
                "anchored_field particle counts must be at least 1".into(),
            ));
        }
        if anchored.interaction_radius <= 0.0 {
            return Err(FxError::InvalidConfig(
                "anchored_field.interaction_radius must be positive".into(),
            ));
        }
        if !(anchored.home_pull > 0.0 && anchored.home_pull <= 1.0) {
            return Err(FxError::InvalidConfig(format!(
                "anchored_field.home_pull must be in (0, 1], got {}",
                anchored.home_pull
            )));
        }
        if anchored.size_min < 0.0
            || anchored.size_range < 0.0
            || anchored.density_min < 0.0
            || anchored.density_range < 0.0
        {
            return Err(FxError::InvalidConfig(
                "anchored_field size and density bands must not be negative".into(),
            ));
        }

        for (name, ms) in self.typewriter.delays().iter() {
            if *ms > TypewriterTiming::MAX_DELAY_MS {
                return Err(FxError::InvalidConfig(format!(
                    "typewriter.{} must be at most {} ms, got {}",
                    name,
                    TypewriterTiming::MAX_DELAY_MS,
                    ms
                )));
            }
        }

        let c = &self.celebration;
        if !(c.show_fireworks_ms <= c.fade_out_ms && c.fade_out_ms <= c.stop_ms) {
            return Err(FxError::InvalidConfig(
                "celebration cues must be ordered show <= fade_out <= stop".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn empty_text_yields_defaults() {
        let config = FxConfig::from_optional_toml(Some("  ")).unwrap();
        assert_eq!(config.field.desktop_particle_count, 200);
        assert_eq!(config.typewriter.pause_after_type_ms, 2500);
        assert_eq!(config.celebration.stop_ms, 5500);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = FxConfig::from_toml_str(
            r#"
            [field]
            desktop_particle_count = 80
            palette = [[255, 255, 255], [204, 204, 204]]

            [typewriter]
            type_base_ms = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.field.desktop_particle_count, 80);
        assert_eq!(config.field.mobile_particle_count, 100);
        assert_eq!(config.field.palette, vec![Color::WHITE, Color::SILVER]);
        assert_eq!(config.typewriter.type_base_ms, 60);
        assert_eq!(config.typewriter.delete_base_ms, 40);
    }

    #[test]
    fn rejects_empty_palette() {
        let err = FxConfig::from_toml_str("[field]\npalette = []\n").unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_relaxation() {
        let err = FxConfig::from_toml_str("[field]\nrelaxation = 0.0\n").unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(_)));
    }

    #[test]
    fn anchored_table_keeps_its_own_defaults() {
        let text = "[anchored_field]\ndesktop_particle_count = 70\n";
        let config = FxConfig::from_toml_str(text).unwrap();
        assert_eq!(config.anchored_field.desktop_particle_count, 70);
        assert_eq!(config.anchored_field.mobile_particle_count, 30);
        assert_eq!(config.anchored_field.interaction_radius, 50.0);
        assert_eq!(config.field.interaction_radius, 100.0);
    }

    #[test]
    fn rejects_out_of_range_timings() {
        let err = FxConfig::from_toml_str("[typewriter]\ntype_base_ms = 4294967290\n").unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(ref msg) if msg.contains("type_base_ms")));
        assert!(FxConfig::from_toml_str("[typewriter]\njitter_ms = 60000\n").is_ok());
        assert!(FxConfig::from_toml_str("[typewriter]\njitter_ms = 60001\n").is_err());
    }

    #[test]
    fn rejects_negative_opacity_and_empty_populations() {
        for text in [
            "[field]\nopacity_min = -0.2\n",
            "[field]\nopacity_range = -0.1\n",
            "[field]\nmobile_particle_count = 0\n",
            "[anchored_field]\ndesktop_particle_count = 0\n",
            "[anchored_field]\nhome_pull = 0.0\n",
            "[anchored_field]\npalette = []\n",
        ]
        .iter()
        {
            let err = FxConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, FxError::InvalidConfig(_)), "accepted {:?}", text);
        }
    }

    #[test]
    fn reports_parse_errors() {
        let err = FxConfig::from_toml_str("[field\n").unwrap_err();
        assert!(matches!(err, FxError::Config(_)));
    }
}
