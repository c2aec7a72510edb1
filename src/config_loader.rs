use crate::config::AnalysisConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Parse and validate the analysis configuration without logging.
///
/// The CLI reads its log level from this configuration, so it parses the
/// file before the logger exists and reports it with [`log_config`] after.
pub fn parse_config(config_path: &Path) -> Result<AnalysisConfig> {
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: AnalysisConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;
    Ok(config)
}

/// Parse the configuration if a path is given, otherwise use defaults
pub fn parse_config_or_default(config_path: Option<&Path>) -> Result<AnalysisConfig> {
    match config_path {
        Some(path) => parse_config(path),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Log where a configuration came from and what it holds
pub fn log_config(config_path: Option<&Path>, config: &AnalysisConfig) {
    match config_path {
        Some(path) => info!("Loaded configuration from: {:?}", path),
        None => info!("No configuration file given, using defaults"),
    }
    info!(
        "Configuration: {} metrics, round length {:?}",
        config.metrics.len(),
        config.general.round_length
    );
}

/// Load and parse the analysis configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalysisConfig> {
    let config = parse_config(config_path)?;
    log_config(Some(config_path), &config);
    Ok(config)
}

/// Load the configuration if a path is given, otherwise use defaults
pub fn load_config_or_default(config_path: Option<&Path>) -> Result<AnalysisConfig> {
    let config = parse_config_or_default(config_path)?;
    log_config(config_path, &config);
    Ok(config)
}
