//! # Deck Replay
//!
//! Drives the page controller through a scripted session and prints every
//! command it emits.
//!
//! ```text
//! deck_replay <page.toml> [script.toml] [config.toml]
//! ```
//!
//! Set `RUST_LOG=debug` to see controller decisions on stderr.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::process::ExitCode;

    use deck::core::DeckResult;
    use deck::ui::{PageConfig, PageController, PageModel};
    use deck::{Replay, Script};

    fn init_tracing() {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn run(page: &str, script: Option<&String>, config: Option<&String>) -> DeckResult<()> {
        let page = PageModel::load(page)?;
        let script = match script {
            Some(path) => Script::load(path)?,
            None => Script::default(),
        };
        let config = match config {
            Some(path) => PageConfig::load(path)?,
            None => PageConfig::default(),
        };

        let controller = PageController::new(config, page)?;
        for recorded in Replay::new(controller).run(&script) {
            println!("{:>9.1} ms  {}", recorded.at_ms, recorded.command);
        }
        Ok(())
    }

    pub fn main() -> ExitCode {
        init_tracing();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let Some(page) = args.first().filter(|_| args.len() <= 3) else {
            eprintln!("usage: deck_replay <page.toml> [script.toml] [config.toml]");
            return ExitCode::from(2);
        };

        match run(page, args.get(1), args.get(2)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(%err, "replay failed");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
