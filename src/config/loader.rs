//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    LintSettings,
};

/// Name of the settings file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".po-lint.json";

/// ディレクトリから設定を読み込む
///
/// `.po-lint.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<LintSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたファイルから設定を読み込む
pub(super) fn load_from_file(config_path: &Path) -> Result<LintSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: LintSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
