use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::input::KeyBindings;
use crate::viewport::{DisplayStrategy, LogicalResolution};

/// デモ全体の設定情報をまとめた構造体。
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// ウィンドウの幅（windowed 時の物理サイズ）
    pub window_width: u32,
    /// ウィンドウの高さ（windowed 時の物理サイズ）
    pub window_height: u32,
    /// true の場合、モニターの解像度でボーダーレスのフルスクリーンにする
    pub fullscreen: bool,
    /// ウィンドウのタイトル（状態表示の前に付く）
    pub title: String,
    /// 目標とするFPS
    pub target_fps: u32,
    /// 背景色 (r, g, b)
    pub clear_color: [f64; 3],
    /// 起動時の論理解像度
    pub resolution: LogicalResolution,
    /// 起動時の表示方式
    pub strategy: DisplayStrategy,
    pub key_bindings: KeyBindings,
    /// ゲーム画像（1024x768.png, 1920x1080.png）を探すディレクトリ
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fullscreen: true,
            title: "Scale To Screen".to_string(),
            target_fps: 60,
            // cornflower blue
            clear_color: [100.0 / 255.0, 149.0 / 255.0, 237.0 / 255.0],
            resolution: LogicalResolution::FourByThree,
            strategy: DisplayStrategy::CoverFill,
            key_bindings: KeyBindings::default(),
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    /// コマンドライン引数から設定を組み立てる（プログラム名は含めない）。
    ///
    /// `--windowed`, `--size WxH`, `--fps N`, `--assets DIR`
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--windowed" => config.fullscreen = false,
                "--fullscreen" => config.fullscreen = true,
                "--size" => {
                    let value = required(&mut args, "--size")?;
                    let (width, height) = parse_size(&value)?;
                    config.window_width = width;
                    config.window_height = height;
                    config.fullscreen = false;
                }
                "--fps" => {
                    let value = required(&mut args, "--fps")?;
                    config.target_fps = match value.parse::<u32>() {
                        Ok(fps) if fps > 0 => fps,
                        _ => return Err(Error::Config(format!("invalid fps: {}", value))),
                    };
                }
                "--assets" => config.asset_dir = PathBuf::from(required(&mut args, "--assets")?),
                other => return Err(Error::Config(format!("unknown argument: {}", other))),
            }
        }
        Ok(config)
    }
}

fn required<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::Config(format!("{} needs a value", flag)))
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let invalid = || Error::Config(format!("invalid size: {} (expected WxH)", value));
    let (w, h) = value.split_once('x').ok_or_else(invalid)?;
    let width = w.parse::<u32>().map_err(|_| invalid())?;
    let height = h.parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_match_the_demo() {
        let config = GameConfig::from_args(Vec::new()).unwrap();
        assert!(config.fullscreen);
        assert_eq!(config.resolution, LogicalResolution::FourByThree);
        assert_eq!(config.strategy, DisplayStrategy::CoverFill);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn size_implies_windowed() {
        let config = GameConfig::from_args(args(&["--size", "800x600", "--fps", "30"])).unwrap();
        assert!(!config.fullscreen);
        assert_eq!((config.window_width, config.window_height), (800, 600));
        assert_eq!(config.target_fps, 30);
    }

    #[test]
    fn rejects_bad_arguments() {
        for bad in [
            args(&["--size", "800"]),
            args(&["--size", "0x600"]),
            args(&["--size"]),
            args(&["--fps", "0"]),
            args(&["--bogus"]),
        ] {
            assert!(matches!(GameConfig::from_args(bad), Err(Error::Config(_))));
        }
    }
}
