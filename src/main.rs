//! Gravita entry point
//!
//! Native: runs one level headless at a fixed frame rate and logs the result.
//! Web: sets up logging and loads the level library; the page drives the
//! session through the library API.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use gravita::persistence::LocalStorageStore;
    use gravita::{LevelLibrary, Tuning};

    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Gravita starting...");

    let library = LevelLibrary::load(&LocalStorageStore::default(), &Tuning::default());
    log::info!("{} levels available", library.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args = native::Args::parse(std::env::args().skip(1));
    if let Err(e) = native::run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use glam::Vec2;
    use gravita::persistence::{FileStore, StoreError};
    use gravita::platform::ManualTicker;
    use gravita::sim::{Scene, Viewport};
    use gravita::{LevelLibrary, Session, Tuning};

    /// Headless run options
    ///
    /// `gravita [--tuning FILE] [--levels FILE] [--level N] [--launch VX VY]
    /// [--size W H] [--seconds S]`
    #[derive(Debug)]
    pub struct Args {
        pub tuning: Option<PathBuf>,
        pub levels: Option<PathBuf>,
        pub level: usize,
        pub launch: Vec2,
        pub size: Vec2,
        pub seconds: f64,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                tuning: None,
                levels: None,
                level: 0,
                launch: Vec2::ZERO,
                size: Vec2::new(1080.0, 1920.0),
                seconds: 60.0,
            }
        }
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Self {
            let mut parsed = Self::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--tuning" => parsed.tuning = args.next().map(PathBuf::from),
                    "--levels" => parsed.levels = args.next().map(PathBuf::from),
                    "--level" => {
                        parsed.level = args.next().and_then(|v| v.parse().ok()).unwrap_or(0)
                    }
                    "--launch" => {
                        let x = next_f32(&mut args).unwrap_or(0.0);
                        let y = next_f32(&mut args).unwrap_or(0.0);
                        parsed.launch = Vec2::new(x, y);
                    }
                    "--size" => {
                        let w = next_f32(&mut args).unwrap_or(parsed.size.x);
                        let h = next_f32(&mut args).unwrap_or(parsed.size.y);
                        parsed.size = Vec2::new(w, h);
                    }
                    "--seconds" => {
                        parsed.seconds = next_f32(&mut args).map_or(parsed.seconds, f64::from)
                    }
                    other => log::warn!("Ignoring argument {}", other),
                }
            }
            parsed
        }
    }

    fn next_f32(args: &mut impl Iterator<Item = String>) -> Option<f32> {
        args.next().and_then(|v| v.parse().ok())
    }

    pub fn run(args: &Args) -> Result<(), StoreError> {
        log::info!("Gravita (native) starting...");
        let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();

        let scene = match &args.levels {
            Some(path) => {
                let store = FileStore::new(path);
                let library = LevelLibrary::try_load(&store, &tuning)?;
                log::info!("Playing level {} from {}", args.level, store.path().display());
                library.get(args.level, &tuning).ok_or_else(|| StoreError::InvalidLevel {
                    index: args.level,
                    reason: format!("library has {} levels", library.len()),
                })?
            }
            None => Scene::default_layout(&tuning),
        };

        let mut session = Session::new(tuning, ManualTicker::new());
        session.set_scene(scene, Viewport::new(args.size.x, args.size.y));
        session.launch(args.launch);

        match session.run_headless(60.0, args.seconds) {
            Some(outcome) if outcome.is_success() => log::info!("Aim reached"),
            Some(outcome) => log::info!("Run failed: {:?}", outcome),
            None => log::info!("No result after {} s", args.seconds),
        }
        Ok(())
    }
}
