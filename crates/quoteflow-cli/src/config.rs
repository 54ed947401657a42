// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use quoteflow_app::{DEFAULT_FABRIC_TYPE_SEQUENCE, DEFAULT_HD_WINDER_THRESHOLD_AREA, LogicConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "quoteflow";
pub const CONFIG_PATH_ENV: &str = "QUOTEFLOW_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub logic: Logic,
    #[serde(default)]
    pub fabric: Fabric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            logic: Logic::default(),
            fabric: Fabric::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Logic {
    pub hd_winder_threshold_area: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fabric {
    pub type_sequence: Option<Vec<String>>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [logic] and [fabric]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(area) = self.logic.hd_winder_threshold_area
            && area <= 0
        {
            bail!(
                "logic.hd_winder_threshold_area in {} must be positive, got {}",
                path.display(),
                area
            );
        }

        self.logic_config()
            .validate()
            .with_context(|| format!("invalid [fabric] section in {}", path.display()))
    }

    pub fn hd_winder_threshold_area(&self) -> u64 {
        self.logic
            .hd_winder_threshold_area
            .and_then(|area| u64::try_from(area).ok())
            .unwrap_or(DEFAULT_HD_WINDER_THRESHOLD_AREA)
    }

    pub fn fabric_type_sequence(&self) -> Vec<String> {
        match &self.fabric.type_sequence {
            Some(codes) => codes.clone(),
            None => DEFAULT_FABRIC_TYPE_SEQUENCE.map(str::to_owned).to_vec(),
        }
    }

    pub fn logic_config(&self) -> LogicConfig {
        LogicConfig {
            hd_winder_threshold_area: self.hd_winder_threshold_area(),
            fabric_type_sequence: self.fabric_type_sequence(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        let codes = DEFAULT_FABRIC_TYPE_SEQUENCE
            .map(|code| format!("\"{code}\""))
            .join(", ");
        format!(
            "# quoteflow config\n# Place this file at: {}\n\nversion = 1\n\n[logic]\n# Rows larger than this (mm^2) get an HD winder unless motorised.\nhd_winder_threshold_area = {}\n\n[fabric]\n# Order the TYPE column cycles through.\ntype_sequence = [{}]\n",
            path.display(),
            DEFAULT_HD_WINDER_THRESHOLD_AREA,
            codes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.hd_winder_threshold_area(), 2_000_000);
        assert_eq!(config.fabric_type_sequence(), vec!["BO", "BO1", "SN"]);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[logic]\nhd_winder_threshold_area = 10\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[logic] and [fabric]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[logic]\nhd_winder_threshold_area = 1500000\n[fabric]\ntype_sequence = [\"SN\", \"BO\"]\n",
        )?;
        let logic = Config::load(&path)?.logic_config();
        assert_eq!(logic.hd_winder_threshold_area, 1_500_000);
        assert_eq!(logic.fabric_type_sequence, vec!["SN", "BO"]);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_positive_threshold_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[logic]\nhd_winder_threshold_area = 0\n")?;
        let error = Config::load(&path).expect_err("zero threshold should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn bad_type_sequences_are_rejected() -> Result<()> {
        for sequence in ["[]", "[\"BO\", \"BO\"]", "[\"\"]"] {
            let (_temp, path) =
                write_config(&format!("version = 1\n[fabric]\ntype_sequence = {sequence}\n"))?;
            let error = Config::load(&path).expect_err("bad sequence should fail");
            assert!(
                format!("{error:#}").contains("fabric type"),
                "unexpected message for {sequence}: {error:#}"
            );
        }
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("quoteflow/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[logic]"));
        assert!(example.contains("[fabric]"));

        std::fs::write(&path, &example)?;
        let logic = Config::load(&path)?.logic_config();
        assert_eq!(logic, Config::default().logic_config());
        Ok(())
    }
}
