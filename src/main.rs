use cuberender::{abs::App, logging, renderer};

fn main() {
    if let Err(e) = logging::init(logging::default_level()) {
        eprintln!("failed to initialize logging: {e}");
    }

    let options = renderer::RenderOptions::default();
    let result = App::new(&options.window).and_then(|app| renderer::run(app, &options));

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
