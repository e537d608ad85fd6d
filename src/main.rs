use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use retro_desk::cli::{Cli, Config};
use retro_desk::content::{ContentLoader, SiteDirectory};
use retro_desk::desktop::Desktop;
use retro_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use retro_desk::drivers::{InputDriver, OutputDriver};
use retro_desk::event_loop::{ControlFlow, EventLoop};
use retro_desk::panel::format_clock;
use retro_desk::tracing_sub;

fn main() -> io::Result<()> {
    let config = Config::try_from(Cli::parse()).map_err(io::Error::other)?;
    let log_buffer = tracing_sub::init(config.log_level, config.log_file.as_deref())?;
    tracing::info!(site = %config.site.display(), "starting retro-desk");

    let source = Arc::new(SiteDirectory::new(&config.site));
    let mut desktop = Desktop::new(ContentLoader::threaded(source));

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let result = EventLoop::new(&mut input, config.tick).run(|_, event| {
        match event {
            Some(event) => Ok(desktop.handle_event(&event, Instant::now())),
            None => {
                desktop.tick();
                for url in desktop.take_url_requests() {
                    if let Err(err) = webbrowser::open(&url) {
                        tracing::warn!(%url, error = %err, "could not open system browser");
                    }
                }
                let clock = format_clock(&chrono::Local::now());
                output.draw(|mut frame| desktop.render(&mut frame, &clock))?;
                Ok(ControlFlow::Continue)
            }
        }
    });

    output.exit()?;
    if let Some(buffer) = log_buffer {
        buffer.drain_to(&mut io::stderr())?;
    }
    result
}
