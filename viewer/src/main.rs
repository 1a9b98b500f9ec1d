use std::path::PathBuf;

use easel::ren::Settings;

fn main() {
    env_logger::init();

    // optional path to the image to display; falls back to a checkerboard
    let texture_path = std::env::args().nth(1).map(PathBuf::from);

    easel::app::new(String::from("Easel"), Settings::default(), texture_path)
        .run()
        .expect("viewer - event loop terminated with an error");
}
