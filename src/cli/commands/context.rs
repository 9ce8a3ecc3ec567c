use std::path::PathBuf;

use anyhow::{Result, bail};

use super::super::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config};

/// Everything a command needs before touching source files: the source root
/// and the effective configuration with CLI overrides applied.
#[derive(Debug)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let root = source_root(common);
        if !root.is_dir() {
            bail!("Source root is not a directory: {}", root.display());
        }

        let ConfigLoadResult { mut config, path } = load_config(&root)?;
        apply_overrides(common, &mut config);
        config.validate()?;

        if common.verbose {
            match &path {
                Some(path) => eprintln!("Using config: {}", path.display()),
                None => eprintln!("No {} found, using defaults", CONFIG_FILE_NAME),
            }
        }

        Ok(Self {
            root,
            config,
            verbose: common.verbose,
        })
    }
}

/// Source root named by `--source-root`, the current directory otherwise.
pub fn source_root(common: &CommonArgs) -> PathBuf {
    common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Apply the language flags on top of file values.
pub fn apply_overrides(common: &CommonArgs, config: &mut Config) {
    if let Some(language) = &common.source_language {
        config.source_language = language.clone();
    }
    if !common.target_languages.is_empty() {
        config.target_languages = common.target_languages.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "sourceLanguage": "ja", "targetLanguages": ["fr"] }"#,
        )
        .unwrap();

        let ctx = CommandContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            target_languages: vec!["en".to_string(), "ko".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(ctx.config.source_language, "ja");
        assert_eq!(ctx.config.target_languages, vec!["en", "ko"]);
        assert!(!ctx.verbose);
    }

    #[test]
    fn test_missing_source_root() {
        let dir = tempdir().unwrap();
        let err = CommandContext::new(&CommonArgs {
            source_root: Some(dir.path().join("missing")),
            ..Default::default()
        })
        .unwrap_err();

        assert!(err.to_string().contains("not a directory"));
    }
}
