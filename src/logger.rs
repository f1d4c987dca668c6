// src/logger.rs
use env_logger::Builder;
use log::LevelFilter;

use crate::error::Result;

pub struct LoggerConfig {
    /// "viewport" ターゲット（変換の再計算）のログレベル
    pub viewport_level: LevelFilter,
    /// デフォルトのログレベル
    pub default_level: LevelFilter,
    /// ログをファイルに出力する場合のファイルパス（None なら標準エラー出力のみ）
    pub file_output: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            viewport_level: LevelFilter::Debug,
            default_level: LevelFilter::Info,
            file_output: None,
        }
    }
}

/// LoggerConfig を用いたロガーの初期化
pub fn init_logger_with_config(config: LoggerConfig) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter(Some("viewport"), config.viewport_level)
        .filter(None, config.default_level)
        // wgpu 内部のログは警告以上のみ
        .filter(Some("wgpu_core"), LevelFilter::Warn)
        .filter(Some("wgpu_hal"), LevelFilter::Warn)
        .filter(Some("naga"), LevelFilter::Warn);
    if let Some(file_path) = config.file_output {
        let file = std::fs::File::create(file_path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
