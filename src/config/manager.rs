//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LintSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: LintSettings,

    /// 読み込んだ設定ファイルのパス
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: LintSettings::default(), config_path: None }
    }

    /// ディレクトリの `.po-lint.json` から設定を読み込む
    ///
    /// # Arguments
    /// * `dir` - 設定ファイルを探すディレクトリ。`None` ならデフォルト値
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, dir: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from directory: {:?}", dir);

        let settings = match dir {
            Some(dir) => loader::load_from_dir(dir)?,
            None => None,
        };
        let config_path =
            settings.as_ref().and(dir).map(|dir| dir.join(loader::CONFIG_FILE_NAME));

        self.store(settings.unwrap_or_default(), config_path)
    }

    /// 明示的に指定された設定ファイルを読み込む
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(path)?;
        self.store(settings, Some(path.to_path_buf()))
    }

    fn store(
        &mut self,
        settings: LintSettings,
        config_path: Option<PathBuf>,
    ) -> Result<(), ConfigError> {
        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（コマンドライン引数による上書き用）
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: LintSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        // バリデーション
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を更新
        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &LintSettings {
        &self.current_settings
    }

    /// 読み込んだ設定ファイルのパスを取得
    #[must_use]
    pub const fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }
}
