use winit::event::{ElementState, VirtualKeyCode, WindowEvent};

/// キー入力から得られる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CycleResolution,
    CycleStrategy,
    Quit,
}

/// 操作とキーの対応表
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub cycle_resolution: VirtualKeyCode,
    pub cycle_strategy: VirtualKeyCode,
    pub quit: VirtualKeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            cycle_resolution: VirtualKeyCode::R,
            cycle_strategy: VirtualKeyCode::S,
            quit: VirtualKeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// このフレームで押されたキーに対応する操作を返す（終了が最優先）
    pub fn commands(&self, input: &InputState) -> Vec<Command> {
        [
            (self.quit, Command::Quit),
            (self.cycle_resolution, Command::CycleResolution),
            (self.cycle_strategy, Command::CycleStrategy),
        ]
        .into_iter()
        .filter(|(key, _)| input.just_pressed(*key))
        .map(|(_, command)| command)
        .collect()
    }
}

/// 入力状態を保持する構造体
#[derive(Default, Debug)]
pub struct InputState {
    /// 現在押されているキー
    pub keys_pressed: Vec<VirtualKeyCode>,
    /// 前フレームの終了時に押されていたキー
    previous_keys: Vec<VirtualKeyCode>,
}

impl InputState {
    /// 与えられたウィンドウイベントに基づき入力状態を更新する
    pub fn update(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { input, .. } = event {
            if let Some(key) = input.virtual_keycode {
                match input.state {
                    ElementState::Pressed => self.press(key),
                    ElementState::Released => self.release(key),
                }
            }
        }
    }

    pub fn press(&mut self, key: VirtualKeyCode) {
        if !self.keys_pressed.contains(&key) {
            self.keys_pressed.push(key);
        }
    }

    pub fn release(&mut self, key: VirtualKeyCode) {
        self.keys_pressed.retain(|&k| k != key);
    }

    pub fn is_down(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// このフレームで押され始めたか。押し続けている間は最初のフレームだけ true。
    pub fn just_pressed(&self, key: VirtualKeyCode) -> bool {
        self.is_down(key) && !self.previous_keys.contains(&key)
    }

    /// フレームの終わりに呼び、現在の状態を前フレームの状態として記録する
    pub fn end_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys_pressed);
    }
}
