//! 論理解像度（ゲーム側）を物理解像度（画面側）へ写すスケールとオフセットの計算。
//!
//! 計算は副作用のない純粋関数 [`compute`] にまとめてあり、描画コンテキストなしでテストできる。

use std::fmt;

use cgmath::{Matrix4, Vector2, Vector3};

use crate::error::{Error, Result};

/// 幅と高さの組。物理ビューポートとゲームキャンバスの両方に使う。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// アスペクト比（幅 / 高さ）
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// 幅・高さがともに正の値か。NaN は false。
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    fn validate(self) -> Result<Self> {
        if self.is_positive() {
            Ok(self)
        } else {
            Err(Error::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 固定長の選択肢を順番に巡回する列挙型。
///
/// 値の個数は `ALL` の長さだけで決まるので、巡回の折り返し位置がずれることはない。
pub trait Cycle: Copy + PartialEq + 'static {
    /// すべての値（巡回順）
    const ALL: &'static [Self];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }

    /// 次の値。最後の値の次は最初の値に戻る。
    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// ゲーム画面を物理画面へどう収めるか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStrategy {
    /// 全体が見えるように収める（余った軸には帯が入る）
    FitInside,
    /// 画面全体を覆うように拡大する（はみ出した部分は切り取られる）
    #[default]
    CoverFill,
}

impl Cycle for DisplayStrategy {
    const ALL: &'static [Self] = &[DisplayStrategy::FitInside, DisplayStrategy::CoverFill];
}

impl fmt::Display for DisplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayStrategy::FitInside => "ScaleToFit",
            DisplayStrategy::CoverFill => "ScaleToCover",
        })
    }
}

/// ゲームの論理解像度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalResolution {
    /// 1024x768
    #[default]
    FourByThree,
    /// 1920x1080
    SixteenByNine,
}

impl LogicalResolution {
    pub fn size(self) -> Size {
        match self {
            LogicalResolution::FourByThree => Size::new(1024.0, 768.0),
            LogicalResolution::SixteenByNine => Size::new(1920.0, 1080.0),
        }
    }

    /// テクスチャのファイル名などに使う "WxH" 形式の名前
    pub fn file_stem(self) -> &'static str {
        match self {
            LogicalResolution::FourByThree => "1024x768",
            LogicalResolution::SixteenByNine => "1920x1080",
        }
    }
}

impl Cycle for LogicalResolution {
    const ALL: &'static [Self] = &[
        LogicalResolution::FourByThree,
        LogicalResolution::SixteenByNine,
    ];
}

impl fmt::Display for LogicalResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalResolution::FourByThree => "FourToThree",
            LogicalResolution::SixteenByNine => "SixteenToNine",
        })
    }
}

/// 一様スケールと平行移動の組。ゲーム座標（左上原点）を画面座標へ写す。
///
/// 部分的に書き換えることはなく、再計算のたびに丸ごと置き換える。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset: Vector2<f32>,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        offset: Vector2 { x: 0.0, y: 0.0 },
    };

    /// ゲーム座標の点を画面座標へ変換する
    pub fn apply(&self, point: Vector2<f32>) -> Vector2<f32> {
        point * self.scale + self.offset
    }

    /// 拡大後のゲームキャンバスの大きさ
    pub fn scaled_size(&self, game: Size) -> Size {
        Size::new(game.width * self.scale, game.height * self.scale)
    }

    /// スケールの後に平行移動する 4x4 行列
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(self.offset.x, self.offset.y, 0.0))
            * Matrix4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 画面サイズ・ゲームサイズ・表示方式からスケールとオフセットを求める。
///
/// どちらかのサイズが正でない場合は [`Error::InvalidSize`] を返す。
pub fn compute(screen: Size, game: Size, strategy: DisplayStrategy) -> Result<Transform> {
    let screen = screen.validate()?;
    let game = game.validate()?;

    // 画面の方がゲームより縦長か
    let screen_is_taller = screen.aspect_ratio() < game.aspect_ratio();

    // FitInside は余る軸、CoverFill ははみ出す軸をセンタリングする
    let scale_to_width = match strategy {
        DisplayStrategy::FitInside => screen_is_taller,
        DisplayStrategy::CoverFill => !screen_is_taller,
    };

    let transform = if scale_to_width {
        let scale = screen.width / game.width;
        Transform {
            scale,
            offset: Vector2::new(0.0, (screen.height - game.height * scale) / 2.0),
        }
    } else {
        let scale = screen.height / game.height;
        Transform {
            scale,
            offset: Vector2::new((screen.width - game.width * scale) / 2.0, 0.0),
        }
    };

    log::debug!(
        target: "viewport",
        "{} on {} ({}): scale {}, offset ({}, {})",
        game,
        screen,
        strategy,
        transform.scale,
        transform.offset.x,
        transform.offset.y
    );
    Ok(transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-3;

    const SCREEN_1080P: Size = Size::new(1920.0, 1080.0);
    const GAME_4_3: Size = Size::new(1024.0, 768.0);

    fn sample_sizes() -> Vec<Size> {
        vec![
            Size::new(1920.0, 1080.0),
            Size::new(1024.0, 768.0),
            Size::new(800.0, 600.0),
            Size::new(2560.0, 1080.0),
            Size::new(1080.0, 1920.0),
            Size::new(1366.0, 768.0),
            Size::new(1.0, 1.0),
            Size::new(333.0, 777.0),
            Size::new(3840.0, 2160.0),
        ]
    }

    #[test]
    fn fit_inside_letterboxes_4_3_on_16_9() {
        let t = compute(SCREEN_1080P, GAME_4_3, DisplayStrategy::FitInside).unwrap();
        assert_relative_eq!(t.scale, 1.40625);
        assert_relative_eq!(t.offset.x, 384.0);
        assert_relative_eq!(t.offset.y, 0.0);
    }

    #[test]
    fn cover_fill_crops_4_3_on_16_9() {
        let t = compute(SCREEN_1080P, GAME_4_3, DisplayStrategy::CoverFill).unwrap();
        assert_relative_eq!(t.scale, 1.875);
        assert_relative_eq!(t.offset.x, 0.0);
        assert_relative_eq!(t.offset.y, -180.0);
    }

    #[test]
    fn matching_sizes_give_identity() {
        for &strategy in DisplayStrategy::ALL {
            let t = compute(GAME_4_3, GAME_4_3, strategy).unwrap();
            assert_eq!(t, Transform::IDENTITY);
        }
    }

    #[test]
    fn fit_inside_never_overflows_and_touches_one_axis() {
        for screen in sample_sizes() {
            for game in sample_sizes() {
                let t = compute(screen, game, DisplayStrategy::FitInside).unwrap();
                let scaled = t.scaled_size(game);
                assert!(scaled.width <= screen.width + EPSILON, "{} in {}", game, screen);
                assert!(scaled.height <= screen.height + EPSILON, "{} in {}", game, screen);
                let touches = (scaled.width - screen.width).abs() <= EPSILON
                    || (scaled.height - screen.height).abs() <= EPSILON;
                assert!(touches, "{} in {}", game, screen);
            }
        }
    }

    #[test]
    fn cover_fill_never_underflows() {
        for screen in sample_sizes() {
            for game in sample_sizes() {
                let t = compute(screen, game, DisplayStrategy::CoverFill).unwrap();
                let scaled = t.scaled_size(game);
                assert!(scaled.width >= screen.width - EPSILON, "{} over {}", game, screen);
                assert!(scaled.height >= screen.height - EPSILON, "{} over {}", game, screen);
            }
        }
    }

    #[test]
    fn margin_is_split_evenly() {
        for &strategy in DisplayStrategy::ALL {
            for screen in sample_sizes() {
                let t = compute(screen, GAME_4_3, strategy).unwrap();
                let scaled = t.scaled_size(GAME_4_3);
                assert_relative_eq!(
                    t.offset.x,
                    (screen.width - scaled.width) / 2.0,
                    epsilon = EPSILON
                );
                assert_relative_eq!(
                    t.offset.y,
                    (screen.height - scaled.height) / 2.0,
                    epsilon = EPSILON
                );
            }
        }
    }

    #[test]
    fn same_inputs_same_result() {
        let screen = Size::new(1366.0, 768.0);
        let game = LogicalResolution::SixteenByNine.size();
        for &strategy in DisplayStrategy::ALL {
            assert_eq!(
                compute(screen, game, strategy).unwrap(),
                compute(screen, game, strategy).unwrap()
            );
        }
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let bad = [
            Size::new(0.0, 768.0),
            Size::new(1024.0, 0.0),
            Size::new(-1.0, 768.0),
            Size::new(f32::NAN, 768.0),
        ];
        for size in bad {
            assert!(matches!(
                compute(size, GAME_4_3, DisplayStrategy::FitInside),
                Err(Error::InvalidSize { .. })
            ));
            assert!(matches!(
                compute(SCREEN_1080P, size, DisplayStrategy::CoverFill),
                Err(Error::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn selectors_wrap() {
        let strategy = DisplayStrategy::CoverFill;
        assert_eq!(strategy.next(), DisplayStrategy::FitInside);
        assert_eq!(strategy.next().next(), DisplayStrategy::CoverFill);

        let resolution = LogicalResolution::FourByThree;
        assert_eq!(resolution.next(), LogicalResolution::SixteenByNine);
        assert_eq!(resolution.next().next(), LogicalResolution::FourByThree);
    }

    #[test]
    fn matrix_matches_apply() {
        let t = compute(SCREEN_1080P, GAME_4_3, DisplayStrategy::FitInside).unwrap();
        let corner = t.matrix() * cgmath::Vector4::new(1024.0, 768.0, 0.0, 1.0);
        let expected = t.apply(Vector2::new(1024.0, 768.0));
        assert_relative_eq!(corner.x, expected.x);
        assert_relative_eq!(corner.y, expected.y);
        assert_relative_eq!(expected.x, 1824.0);
        assert_relative_eq!(expected.y, 1080.0);
    }
}
