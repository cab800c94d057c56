use crate::cli::Cli;
use crate::config::{CONFIG_FILE_NAME, ENV_PREFIX, ElmBundleConfig, Format};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json},
};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings from one source; unset keys leave lower layers alone.
///
/// Keys are camelCase, as written in `elmbundle.config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct SettingsLayer {
    /// A single string is accepted too
    #[serde(deserialize_with = "one_or_many")]
    entry: Option<Vec<String>>,
    outdir: Option<PathBuf>,
    outfile: Option<PathBuf>,
    format: Option<Format>,
    path_to_elm: Option<PathBuf>,
    cwd: Option<PathBuf>,
    allow_overwrite: Option<bool>,
}

/// Settings from `ELMBUNDLE_*` variables.
///
/// figment lowercases variable names after stripping the prefix, so
/// `ELMBUNDLE_PATH_TO_ELM` arrives as `path_to_elm`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
struct EnvLayer {
    #[serde(deserialize_with = "one_or_many")]
    entry: Option<Vec<String>>,
    outdir: Option<PathBuf>,
    outfile: Option<PathBuf>,
    format: Option<Format>,
    path_to_elm: Option<PathBuf>,
    cwd: Option<PathBuf>,
    allow_overwrite: Option<bool>,
}

impl From<EnvLayer> for SettingsLayer {
    fn from(env: EnvLayer) -> Self {
        Self {
            entry: env.entry,
            outdir: env.outdir,
            outfile: env.outfile,
            format: env.format,
            path_to_elm: env.path_to_elm,
            cwd: env.cwd,
            allow_overwrite: env.allow_overwrite,
        }
    }
}

impl From<&Cli> for SettingsLayer {
    fn from(args: &Cli) -> Self {
        Self {
            entry: (!args.entry.is_empty()).then(|| args.entry.clone()),
            outdir: args.outdir.clone(),
            outfile: args.outfile.clone(),
            format: args.format,
            path_to_elm: args.path_to_elm.clone(),
            cwd: args.cwd.clone(),
            allow_overwrite: args.allow_overwrite.then_some(true),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Some(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(entry) => vec![entry],
        OneOrMany::Many(entries) => entries,
    }))
}

impl ElmBundleConfig {
    /// Load settings from every source.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// The config file is `--config` if given, otherwise
    /// `elmbundle.config.json` in `--cwd` (or the process directory) when
    /// present. Each source is read on its own and applied in priority
    /// order, so a higher source setting `outdir` or `outfile` replaces the
    /// output target of the sources below it.
    pub fn load(args: &Cli) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file(args)? {
            debug!("Loading settings from {}", path.display());
            let file: SettingsLayer = Figment::from(Json::file(&path))
                .extract()
                .map_err(|e| ConfigError::InvalidValue {
                    field: path.display().to_string(),
                    value: e.to_string(),
                    hint: "Check the file for unknown keys or wrong types".to_string(),
                })?;
            config.apply(file);
        }

        // ELMBUNDLE_OUTFILE, ELMBUNDLE_PATH_TO_ELM, ...
        let env: EnvLayer = Figment::from(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: format!("{ENV_PREFIX}*"),
                value: e.to_string(),
                hint: format!("Unset unknown {ENV_PREFIX} variables or fix their values"),
            })?;
        config.apply(env.into());

        config.apply(SettingsLayer::from(args));

        Ok(config)
    }

    fn apply(&mut self, layer: SettingsLayer) {
        if let Some(entry) = layer.entry {
            self.entry = entry;
        }

        // Both set in one layer is kept so `validate` can report it
        match (layer.outdir, layer.outfile) {
            (Some(dir), Some(file)) => {
                self.outdir = Some(dir);
                self.outfile = Some(file);
            }
            (Some(dir), None) => {
                self.outdir = Some(dir);
                self.outfile = None;
            }
            (None, Some(file)) => {
                self.outdir = None;
                self.outfile = Some(file);
            }
            (None, None) => {}
        }

        if let Some(format) = layer.format {
            self.format = format;
        }
        if let Some(path) = layer.path_to_elm {
            self.path_to_elm = Some(path);
        }
        if let Some(cwd) = layer.cwd {
            self.cwd = Some(cwd);
        }
        if let Some(allowed) = layer.allow_overwrite {
            self.allow_overwrite = allowed;
        }
    }
}

fn config_file(args: &Cli) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.config {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.clone()).into());
        }
        return Ok(Some(path.clone()));
    }

    let dir = args.cwd.as_deref().unwrap_or(Path::new("."));
    let default_path = dir.join(CONFIG_FILE_NAME);
    Ok(default_path.is_file().then_some(default_path))
}
