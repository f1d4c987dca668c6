//! 表示方式・論理解像度の選択状態と、そこから導かれる変換のキャッシュ。

use crate::error::Result;
use crate::input::{Command, KeyBindings};
use crate::viewport::{self, Cycle, DisplayStrategy, LogicalResolution, Size, Transform};

/// ユーザーが切り替える選択状態。
///
/// `transform` は常に最後に有効だった入力から計算された値を保持する。
#[derive(Debug, Clone)]
pub struct DisplayState {
    resolution: LogicalResolution,
    strategy: DisplayStrategy,
    /// 最後に受け取った有効な画面サイズ
    screen: Option<Size>,
    transform: Transform,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(LogicalResolution::default(), DisplayStrategy::default())
    }
}

impl DisplayState {
    pub fn new(resolution: LogicalResolution, strategy: DisplayStrategy) -> Self {
        Self {
            resolution,
            strategy,
            screen: None,
            transform: Transform::IDENTITY,
        }
    }

    pub fn resolution(&self) -> LogicalResolution {
        self.resolution
    }

    pub fn strategy(&self) -> DisplayStrategy {
        self.strategy
    }

    pub fn screen(&self) -> Option<Size> {
        self.screen
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn game_size(&self) -> Size {
        self.resolution.size()
    }

    /// 画面サイズの変更を反映する。
    ///
    /// サイズが不正な場合はエラーを返し、以前の画面サイズと変換をそのまま残す。
    pub fn resize(&mut self, screen: Size) -> Result<Transform> {
        let transform = viewport::compute(screen, self.game_size(), self.strategy)?;
        self.screen = Some(screen);
        self.transform = transform;
        Ok(transform)
    }

    /// 論理解像度を次へ切り替える
    pub fn toggle_resolution(&mut self) -> Result<Transform> {
        self.resolution = self.resolution.next();
        log::info!("game resolution: {}", self.resolution);
        self.recompute()
    }

    /// 表示方式を次へ切り替える
    pub fn toggle_strategy(&mut self) -> Result<Transform> {
        self.strategy = self.strategy.next();
        log::info!("display strategy: {}", self.strategy);
        self.recompute()
    }

    /// コマンドを適用する。変換が更新され得る場合は true。
    pub fn apply(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::CycleResolution => self.toggle_resolution().map(|_| true),
            Command::CycleStrategy => self.toggle_strategy().map(|_| true),
            Command::Quit => Ok(false),
        }
    }

    fn recompute(&mut self) -> Result<Transform> {
        // まだ有効な画面サイズを受け取っていなければ選択だけ変える
        if let Some(screen) = self.screen {
            self.transform = viewport::compute(screen, self.game_size(), self.strategy)?;
        }
        Ok(self.transform)
    }

    /// 画面に表示する情報文字列
    pub fn status_lines(&self, keys: &KeyBindings) -> [String; 3] {
        let monitor = match self.screen {
            Some(size) => size.to_string(),
            None => "unknown".to_string(),
        };
        [
            format!("Monitor Resolution: {}", monitor),
            format!(
                "Current Display Strategy: {} (Press {:?} to change)",
                self.strategy, keys.cycle_strategy
            ),
            format!(
                "Current Game Aspect Ratio: {} (Press {:?} to change)",
                self.resolution, keys.cycle_resolution
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_to_cover_and_4_3() {
        let state = DisplayState::default();
        assert_eq!(state.strategy(), DisplayStrategy::CoverFill);
        assert_eq!(state.resolution(), LogicalResolution::FourByThree);
        assert_eq!(state.transform(), Transform::IDENTITY);
        assert_eq!(state.screen(), None);
    }

    #[test]
    fn resize_computes_cover_transform() {
        let mut state = DisplayState::default();
        let t = state.resize(Size::new(1920.0, 1080.0)).unwrap();
        assert_relative_eq!(t.scale, 1.875);
        assert_relative_eq!(t.offset.y, -180.0);
        assert_eq!(state.transform(), t);
    }

    #[test]
    fn toggles_recompute_against_last_screen() {
        let mut state = DisplayState::default();
        state.resize(Size::new(1920.0, 1080.0)).unwrap();

        let t = state.toggle_strategy().unwrap();
        assert_eq!(state.strategy(), DisplayStrategy::FitInside);
        assert_relative_eq!(t.scale, 1.40625);
        assert_relative_eq!(t.offset.x, 384.0);

        let t = state.toggle_resolution().unwrap();
        assert_eq!(state.resolution(), LogicalResolution::SixteenByNine);
        assert_relative_eq!(t.scale, 1.0);
        assert_relative_eq!(t.offset.x, 0.0);
        assert_relative_eq!(t.offset.y, 0.0);
    }

    #[test]
    fn toggles_twice_return_to_start() {
        let mut state = DisplayState::default();
        state.toggle_strategy().unwrap();
        state.toggle_strategy().unwrap();
        state.toggle_resolution().unwrap();
        state.toggle_resolution().unwrap();
        assert_eq!(state.strategy(), DisplayStrategy::CoverFill);
        assert_eq!(state.resolution(), LogicalResolution::FourByThree);
    }

    #[test]
    fn invalid_resize_keeps_previous_transform() {
        let mut state = DisplayState::default();
        let before = state.resize(Size::new(1920.0, 1080.0)).unwrap();

        let result = state.resize(Size::new(0.0, 0.0));
        assert!(matches!(result, Err(Error::InvalidSize { .. })));
        assert_eq!(state.transform(), before);
        assert_eq!(state.screen(), Some(Size::new(1920.0, 1080.0)));

        // 後続の切り替えは最後の有効な画面サイズで計算される
        let t = state.toggle_strategy().unwrap();
        assert_relative_eq!(t.scale, 1.40625);
    }

    #[test]
    fn toggle_without_screen_only_changes_selection() {
        let mut state = DisplayState::default();
        let t = state.toggle_resolution().unwrap();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(state.resolution(), LogicalResolution::SixteenByNine);
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut state = DisplayState::default();
        assert!(state.apply(Command::CycleStrategy).unwrap());
        assert_eq!(state.strategy(), DisplayStrategy::FitInside);
        assert!(state.apply(Command::CycleResolution).unwrap());
        assert_eq!(state.resolution(), LogicalResolution::SixteenByNine);
        assert!(!state.apply(Command::Quit).unwrap());
    }

    #[test]
    fn status_lines_describe_selection() {
        let mut state = DisplayState::default();
        state.resize(Size::new(1920.0, 1080.0)).unwrap();
        let lines = state.status_lines(&KeyBindings::default());
        assert_eq!(lines[0], "Monitor Resolution: 1920x1080");
        assert_eq!(lines[1], "Current Display Strategy: ScaleToCover (Press S to change)");
        assert_eq!(lines[2], "Current Game Aspect Ratio: FourToThree (Press R to change)");
    }
}
