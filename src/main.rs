use ouro::game::{Overlay, OverlayButton};
use ouro::{CliRenderer, Game, Input, Renderer};
use std::io;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// Simulation runs at 10 ticks/sec during play; overlays poll at a faster
// cadence so menu input feels immediate.
const PLAY_TICK_RATE: Duration = Duration::from_millis(100);
const OVERLAY_TICK_RATE: Duration = Duration::from_millis(33);

fn main() -> io::Result<()> {
    // Logs go to stderr; stdout belongs to the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut game = Game::new();
    let mut renderer = CliRenderer::new();

    renderer.init()?;

    let mut last_tick = Instant::now();

    loop {
        // Poll for input
        if let Some(input) = renderer.poll_input()? {
            match input {
                Input::Direction(direction) => {
                    game.steer(direction);
                }
                Input::Escape => {
                    game.open_menu();
                }
                Input::Click { x, y } => {
                    if game.handle_click(x, y) == Some(OverlayButton::Exit) {
                        break;
                    }
                }
                Input::Quit => {
                    break;
                }
            }
        }

        // Advance the simulation at a fixed rate
        let tick_rate = if game.overlay == Overlay::None {
            PLAY_TICK_RATE
        } else {
            OVERLAY_TICK_RATE
        };
        if last_tick.elapsed() >= tick_rate {
            game.tick();
            last_tick = Instant::now();
        }

        // Let renderer decide when to actually render
        // (it manages its own frame rate internally)
        renderer.render(&game)?;
    }

    renderer.cleanup()?;
    Ok(())
}
