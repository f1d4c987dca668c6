use crate::config::GameConfig;
use crate::error::Result;
use crate::input::InputState;
use crate::renderer::Renderer;

use std::time::{Duration, Instant};
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

/// update の結果。ループを続けるかどうか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// ゲームのメインロジックを定義するトレイト。
pub trait Game {
    /// ウィンドウの物理サイズが変わったとき（起動直後にも一度）呼ばれる。
    fn resized(&mut self, renderer: &mut Renderer, size: PhysicalSize<u32>);
    /// 毎フレームの更新処理。
    fn update(&mut self, renderer: &mut Renderer, input: &InputState) -> Flow;
    /// 毎フレームの描画処理。`view` と `encoder` を使って描画コマンドを記録する。
    fn render(&mut self, renderer: &Renderer, view: &wgpu::TextureView, encoder: &mut wgpu::CommandEncoder);
    /// 変換をかけずに表示する状態文字列（ウィンドウタイトルに出す）
    fn status(&self) -> Vec<String> {
        Vec::new()
    }
}

/// run_game 関数
///
/// ウィンドウ生成と Renderer の初期化を行い、`init` でゲームを作ってから
/// FPS制御付きイベントループを回す。起動に失敗した場合だけ戻る。
pub fn run_game<G, F>(config: GameConfig, init: F) -> Result<()>
where
    G: 'static + Game,
    F: FnOnce(&mut Renderer, &GameConfig) -> Result<G>,
{
    let event_loop = EventLoop::new();
    let mut builder = WindowBuilder::new().with_title(config.title.clone());
    builder = if config.fullscreen {
        // モニターの解像度でフルスクリーン
        builder.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        builder.with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
    };
    let window = builder.build(&event_loop)?;

    let mut renderer = pollster::block_on(Renderer::new(&window))?;
    renderer.set_clear_color(config.clear_color);
    let mut game = init(&mut renderer, &config)?;
    let mut input = InputState::default();

    game.resized(&mut renderer, window.inner_size());
    let mut title = String::new();

    let target_frame_duration = Duration::from_millis(1000 / config.target_fps.max(1) as u64);
    let mut last_frame_time = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent { ref event, .. } => {
                input.update(event);
                match event {
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(*new_size);
                        game.resized(&mut renderer, *new_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(**new_inner_size);
                        game.resized(&mut renderer, **new_inner_size);
                    }
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => {
                let now = Instant::now();
                let elapsed = now - last_frame_time;
                if elapsed < target_frame_duration {
                    *control_flow = ControlFlow::WaitUntil(now + target_frame_duration - elapsed);
                } else {
                    last_frame_time = now;
                    let flow = game.update(&mut renderer, &input);
                    input.end_frame();
                    if flow == Flow::Exit {
                        log::info!("exit requested");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }

                    let status = game.status();
                    let next_title = if status.is_empty() {
                        config.title.clone()
                    } else {
                        format!("{} | {}", config.title, status.join(" | "))
                    };
                    if next_title != title {
                        for line in &status {
                            log::info!("{}", line);
                        }
                        window.set_title(&next_title);
                        title = next_title;
                    }
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                // 最小化中は描画しない
                let size = window.inner_size();
                if size.width == 0 || size.height == 0 {
                    return;
                }
                let output = match renderer.surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.reconfigure();
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    Err(e) => {
                        log::warn!("skipping frame: {}", e);
                        return;
                    }
                };
                let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder = renderer
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
                game.render(&renderer, &view, &mut encoder);
                renderer.queue.submit(Some(encoder.finish()));
                output.present();
            }
            _ => {}
        }
    })
}
