//! エラー型の定義。

use err_derive::Error;
use std::io;

/// このクレート共通の Result 型。
pub type Result<T> = std::result::Result<T, Error>;

/// 起動時・計算時に起こり得るエラーをまとめた列挙型。
#[derive(Debug, Error)]
#[error(no_from)]
pub enum Error {
    /// 幅または高さが正でないサイズが渡された（最小化されたウィンドウなど）
    #[error(display = "invalid size {}x{}: width and height must be positive", width, height)]
    InvalidSize { width: f32, height: f32 },
    #[error(display = "failed to create window")]
    Window(#[cause] winit::error::OsError),
    #[error(display = "failed to create surface")]
    CreateSurface(#[cause] wgpu::CreateSurfaceError),
    #[error(display = "no compatible graphics adapter found")]
    NoAdapter,
    #[error(display = "failed to request device")]
    RequestDevice(#[cause] wgpu::RequestDeviceError),
    #[error(display = "failed to load image")]
    Image(#[cause] image::ImageError),
    #[error(display = "IO error occurred")]
    Io(#[cause] io::Error),
    /// 設定（コマンドライン引数）の誤り
    #[error(display = "invalid configuration: {}", _0)]
    Config(String),
}

impl From<winit::error::OsError> for Error {
    fn from(e: winit::error::OsError) -> Error {
        Error::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for Error {
    fn from(e: wgpu::CreateSurfaceError) -> Error {
        Error::CreateSurface(e)
    }
}

impl From<wgpu::RequestDeviceError> for Error {
    fn from(e: wgpu::RequestDeviceError) -> Error {
        Error::RequestDevice(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Error {
        Error::Image(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}
