use crate::config::{ElmBundleConfig, default_outfile};
use crate::error::{ConfigError, Result};
use elmbundle_bundler::OutputTarget;

impl ElmBundleConfig {
    /// Validate settings for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide at least one entry point".to_string(),
            }
            .into());
        }

        if let Some(entry) = self.entry.iter().find(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "entry".to_string(),
                value: format!("{entry:?}"),
                hint: "Entry points must be non-empty paths".to_string(),
            }
            .into());
        }

        if self
            .path_to_elm
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "pathToElm".to_string(),
                value: "\"\"".to_string(),
                hint: "Remove the key to look the compiler up automatically".to_string(),
            }
            .into());
        }

        self.output_target().map(|_| ())
    }

    /// Where the build writes its output.
    ///
    /// Falls back to `index.js` when neither `outdir` nor `outfile` is set.
    pub fn output_target(&self) -> Result<OutputTarget> {
        match (&self.outdir, &self.outfile) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingOptions(
                "'outdir' and 'outfile' are both set".to_string(),
            )
            .into()),
            (Some(dir), None) => Ok(OutputTarget::Dir(dir.clone())),
            (None, Some(file)) => Ok(OutputTarget::File(file.clone())),
            (None, None) => Ok(OutputTarget::File(default_outfile())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = ElmBundleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.output_target().unwrap(),
            OutputTarget::File(PathBuf::from("index.js"))
        );
    }

    #[test]
    fn test_outdir_target() {
        let config = ElmBundleConfig {
            outdir: Some(PathBuf::from(".")),
            ..Default::default()
        };
        assert_eq!(
            config.output_target().unwrap(),
            OutputTarget::Dir(PathBuf::from("."))
        );
    }

    #[test]
    fn test_outdir_and_outfile_conflict() {
        let config = ElmBundleConfig {
            outdir: Some(PathBuf::from("dist")),
            outfile: Some(PathBuf::from("index.js")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::ConflictingOptions(_)))
        ));
    }

    #[test]
    fn test_empty_entry_list_rejected() {
        let config = ElmBundleConfig {
            entry: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_blank_entry_rejected() {
        let config = ElmBundleConfig {
            entry: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_empty_path_to_elm_rejected() {
        let config = ElmBundleConfig {
            path_to_elm: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
