//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "askboard";
const PROJECT_FILES: [&str; 2] = ["askboard.toml", ".askboard.toml"];
const ENV_PREFIX: &str = "ASKBOARD_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `ASKBOARD_<SECTION>__<KEY>` (e.g. `ASKBOARD_STORE__APP_ID`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./askboard.toml` or `./.askboard.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/askboard/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File sources only, lowest priority first. Missing optional files are
    /// skipped; a missing explicit file is an error.
    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// `$XDG_CONFIG_HOME/askboard/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// The project-level config file, if one exists in the working directory
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default location of data files (session, snapshot, history)
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR))
    }

    /// Expand a leading `~/` to the home directory.
    pub fn expand_path(path: &str) -> PathBuf {
        match path.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => PathBuf::from(path),
            },
            None => PathBuf::from(path),
        }
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] --config: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::StoreBackend;
    use askboard_domain::BoardVariant;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.board.variant, BoardVariant::Open);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_global_config_path_names_app_dir() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("askboard"));
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(
            &global,
            "[board]\nvariant = \"authenticated\"\ntitle = \"Global\"\n",
        )
        .unwrap();
        fs::write(&project, "[board]\ntitle = \"Project\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), None)
            .unwrap()
            .extract()
            .unwrap();

        // Project wins for title, global still supplies variant
        assert_eq!(config.board.title, "Project");
        assert_eq!(config.board.variant, BoardVariant::Authenticated);
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&project, "[store]\npoll_interval_ms = 100\n").unwrap();
        fs::write(&explicit, "[store]\npoll_interval_ms = 900\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(config.store.poll_interval_ms, 900);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, None)
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::figment(None, None, Some(&missing)).is_err());
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(ConfigLoader::expand_path("data/q.json"), PathBuf::from("data/q.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(ConfigLoader::expand_path("~/q.json"), home.join("q.json"));
        }
    }
}
