use scale_to_screen::{init_logger_with_config, run_game, GameConfig, LoggerConfig, ScaleToScreen};

fn main() {
    if let Err(e) = init_logger_with_config(LoggerConfig::default()) {
        eprintln!("failed to initialise logger: {}", e);
    }

    let result = GameConfig::from_args(std::env::args().skip(1))
        .and_then(|config| run_game(config, ScaleToScreen::new));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
