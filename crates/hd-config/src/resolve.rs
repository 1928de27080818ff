//! Model file resolution.
//!
//! Precedence: explicit CLI path → `HEREDITY_MODEL` → XDG config dir →
//! embedded defaults. An explicitly named file that fails to load is an
//! error; only the XDG location is optional.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::model::ProbabilityModel;
use crate::validate::ValidationResult;

/// Environment variable naming a model file.
pub const MODEL_ENV_VAR: &str = "HEREDITY_MODEL";

/// Directory under the user config dir.
pub const APP_DIR: &str = "heredity";

/// Model file name inside [`APP_DIR`].
pub const MODEL_FILE: &str = "model.json";

/// Candidate locations for the model file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Gather candidates from the process environment.
    pub fn from_environment(cli: Option<PathBuf>) -> Self {
        let env = std::env::var_os(MODEL_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            cli,
            env,
            config_dir: dirs::config_dir(),
        }
    }

    fn xdg_model_path(&self) -> Option<PathBuf> {
        self.config_dir
            .as_ref()
            .map(|dir| dir.join(APP_DIR).join(MODEL_FILE))
    }
}

/// Where the active model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Default,
}

impl ModelSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ModelSource::Cli(p) | ModelSource::Env(p) | ModelSource::Xdg(p) => Some(p),
            ModelSource::Default => None,
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Cli(p) => write!(f, "cli:{}", p.display()),
            ModelSource::Env(p) => write!(f, "env:{}", p.display()),
            ModelSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            ModelSource::Default => write!(f, "default"),
        }
    }
}

/// A loaded, validated model and its origin.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub model: ProbabilityModel,
    pub source: ModelSource,
}

/// Pick the model source without reading it.
pub fn resolve_model_source(paths: &ConfigPaths) -> ModelSource {
    if let Some(cli) = &paths.cli {
        return ModelSource::Cli(cli.clone());
    }
    if let Some(env) = &paths.env {
        return ModelSource::Env(env.clone());
    }
    match paths.xdg_model_path() {
        Some(xdg) if xdg.is_file() => ModelSource::Xdg(xdg),
        _ => ModelSource::Default,
    }
}

/// Resolve, load, and validate the probability model.
pub fn resolve_config(paths: &ConfigPaths) -> ValidationResult<ResolvedModel> {
    let source = resolve_model_source(paths);
    let model = match source.path() {
        Some(path) => ProbabilityModel::from_file(path)?,
        None => ProbabilityModel::default(),
    };
    model.validate()?;
    Ok(ResolvedModel { model, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn write_model(dir: &Path, mutation_rate: f64) -> PathBuf {
        let mut model = ProbabilityModel::default();
        model.mutation_rate = mutation_rate;
        let path = dir.join("custom.json");
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();
        path
    }

    #[test]
    fn falls_back_to_default() {
        let paths = ConfigPaths::default();
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.source, ModelSource::Default);
        assert_eq!(resolved.model, ProbabilityModel::default());
    }

    #[test]
    fn cli_beats_env() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_model(dir.path(), 0.02);
        let paths = ConfigPaths {
            cli: Some(cli.clone()),
            env: Some(PathBuf::from("/nonexistent/env.json")),
            config_dir: None,
        };
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.source, ModelSource::Cli(cli));
        assert!((resolved.model.mutation_rate - 0.02).abs() < 1e-12);
    }

    #[test]
    fn env_path_must_exist() {
        let paths = ConfigPaths {
            cli: None,
            env: Some(PathBuf::from("/nonexistent/env.json")),
            config_dir: None,
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::IoError(_))
        ));
    }

    #[test]
    fn xdg_used_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths {
            cli: None,
            env: None,
            config_dir: Some(dir.path().to_path_buf()),
        };
        assert_eq!(resolve_model_source(&paths), ModelSource::Default);

        let app_dir = dir.path().join(APP_DIR);
        std::fs::create_dir_all(&app_dir).unwrap();
        let model_path = app_dir.join(MODEL_FILE);
        std::fs::write(
            &model_path,
            serde_json::to_string(&ProbabilityModel::default()).unwrap(),
        )
        .unwrap();
        assert_eq!(resolve_model_source(&paths), ModelSource::Xdg(model_path));
    }

    #[test]
    fn invalid_model_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_model(dir.path(), 3.0);
        let paths = ConfigPaths {
            cli: Some(cli),
            ..ConfigPaths::default()
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
