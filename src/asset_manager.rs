// src/asset_manager.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::renderer::{Renderer, TextureHandle};
use crate::viewport::{Cycle, LogicalResolution, Size};

/// アセット管理用の構造体。
/// 論理解像度ごとのゲーム画像をキャッシュして、重複読み込みを防ぎます。
pub struct AssetManager {
    asset_dir: PathBuf,
    textures: HashMap<PathBuf, Rc<TextureHandle>>,
}

impl AssetManager {
    /// 新しい AssetManager を生成する
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            textures: HashMap::new(),
        }
    }

    /// 論理解像度に対応する画像のパス（例: assets/1024x768.png）
    pub fn game_texture_path(&self, resolution: LogicalResolution) -> PathBuf {
        self.asset_dir.join(format!("{}.png", resolution.file_stem()))
    }

    /// 論理解像度に対応するゲーム画像を取得する。
    /// ファイルがなければ同じ大きさのテストカードを生成して使う。
    pub fn game_texture(
        &mut self,
        renderer: &Renderer,
        resolution: LogicalResolution,
    ) -> Result<Rc<TextureHandle>> {
        let path = self.game_texture_path(resolution);
        if let Some(texture) = self.textures.get(&path) {
            return Ok(Rc::clone(texture));
        }

        let img = if path.exists() {
            log::info!("loading {}", path.display());
            load_image(&path)?
        } else {
            log::info!("{} not found, generating test card", path.display());
            test_card(resolution.size())
        };

        let handle = Rc::new(renderer.create_texture(&img, resolution.file_stem()));
        self.textures.insert(path, Rc::clone(&handle));
        Ok(handle)
    }

    /// すべての論理解像度の画像を先に読み込んでおく
    pub fn preload(&mut self, renderer: &Renderer) -> Result<()> {
        for &resolution in LogicalResolution::ALL {
            self.game_texture(renderer, resolution)?;
        }
        Ok(())
    }
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

const CARD_BACKGROUND: Rgba<u8> = Rgba([32, 32, 48, 255]);
const CARD_GRID: Rgba<u8> = Rgba([80, 80, 110, 255]);
const CARD_BORDER: Rgba<u8> = Rgba([230, 60, 60, 255]);
const CARD_CROSS: Rgba<u8> = Rgba([250, 220, 80, 255]);

/// 指定サイズのテストカード画像を生成する。
///
/// 外周の枠・格子・中央の十字を描くので、切り取りや帯の入り方が目で確認できる。
pub fn test_card(size: Size) -> RgbaImage {
    let width = size.width.max(1.0) as u32;
    let height = size.height.max(1.0) as u32;
    let border = (width.min(height) / 64).max(1);
    let grid = 64;
    let (cx, cy) = (width / 2, height / 2);
    let arm = width.min(height) / 8;

    RgbaImage::from_fn(width, height, |x, y| {
        let on_border =
            x < border || y < border || x >= width - border || y >= height - border;
        let on_cross = (x.abs_diff(cx) < border && y.abs_diff(cy) < arm)
            || (y.abs_diff(cy) < border && x.abs_diff(cx) < arm);
        if on_border {
            CARD_BORDER
        } else if on_cross {
            CARD_CROSS
        } else if x % grid == 0 || y % grid == 0 {
            CARD_GRID
        } else {
            CARD_BACKGROUND
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_has_logical_size() {
        for &resolution in LogicalResolution::ALL {
            let size = resolution.size();
            let img = test_card(size);
            assert_eq!(img.dimensions(), (size.width as u32, size.height as u32));
        }
    }

    #[test]
    fn test_card_marks_edges_and_centre() {
        let img = test_card(Size::new(1024.0, 768.0));
        assert_eq!(*img.get_pixel(0, 0), CARD_BORDER);
        assert_eq!(*img.get_pixel(1023, 767), CARD_BORDER);
        assert_eq!(*img.get_pixel(512, 384), CARD_CROSS);
        assert_eq!(*img.get_pixel(100, 100), CARD_BACKGROUND);
    }

    #[test]
    fn texture_paths_follow_resolution() {
        let assets = AssetManager::new("data");
        assert_eq!(
            assets.game_texture_path(LogicalResolution::SixteenByNine),
            Path::new("data").join("1920x1080.png")
        );
    }
}
