//! 表示方式と論理解像度を切り替えながらゲーム画像を画面へ収めるデモ。

use std::rc::Rc;

use winit::dpi::PhysicalSize;

use crate::asset_manager::AssetManager;
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{Flow, Game};
use crate::input::{Command, InputState, KeyBindings};
use crate::renderer::{Renderer, TextureHandle};
use crate::state::DisplayState;

pub struct ScaleToScreen {
    state: DisplayState,
    assets: AssetManager,
    key_bindings: KeyBindings,
    /// 選択中の論理解像度のゲーム画像
    texture: Rc<TextureHandle>,
}

impl ScaleToScreen {
    pub fn new(renderer: &mut Renderer, config: &GameConfig) -> Result<Self> {
        let state = DisplayState::new(config.resolution, config.strategy);
        let mut assets = AssetManager::new(config.asset_dir.clone());
        assets.preload(renderer)?;
        let texture = assets.game_texture(renderer, state.resolution())?;
        Ok(Self {
            state,
            assets,
            key_bindings: config.key_bindings.clone(),
            texture,
        })
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }
}

impl Game for ScaleToScreen {
    fn resized(&mut self, renderer: &mut Renderer, size: PhysicalSize<u32>) {
        match self.state.resize(size.into()) {
            Ok(transform) => renderer.set_transform(&transform),
            Err(e) => log::warn!("{}; keeping previous transform", e),
        }
    }

    fn update(&mut self, renderer: &mut Renderer, input: &InputState) -> Flow {
        for command in self.key_bindings.commands(input) {
            if command == Command::Quit {
                return Flow::Exit;
            }
            match self.state.apply(command) {
                Ok(true) => renderer.set_transform(&self.state.transform()),
                Ok(false) => {}
                Err(e) => log::warn!("{}; keeping previous transform", e),
            }
            if command == Command::CycleResolution {
                match self.assets.game_texture(renderer, self.state.resolution()) {
                    Ok(texture) => self.texture = texture,
                    Err(e) => log::error!("failed to load game texture: {}", e),
                }
            }
        }
        Flow::Continue
    }

    fn render(&mut self, renderer: &Renderer, view: &wgpu::TextureView, encoder: &mut wgpu::CommandEncoder) {
        let game = self.state.game_size();
        renderer.draw_texture(encoder, view, &self.texture, 0.0, 0.0, game.width, game.height);
    }

    fn status(&self) -> Vec<String> {
        self.state.status_lines(&self.key_bindings).to_vec()
    }
}
