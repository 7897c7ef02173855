use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use rand::Rng;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rgol::camera::Camera;
use rgol::catalog;
use rgol::rle;
use rgol::rule_set::RuleSet;
use rgol::world::World;

use events::AppEvent;
use events::EngineEvent;
use events::Event;

mod events;
mod io;

const DEFAULT_DELAY: Duration = Duration::from_millis(200);
const DELAY_STEP: Duration = Duration::from_millis(50);
const IDLE_DELAY: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut rule = None;
    let mut source = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rule" => rule = Some(args.next().context("--rule requires a value")?),
            _ => source = Some(arg),
        }
    }

    // One braille character covers 2x4 cells; the bottom line is kept for status.
    let (term_columns, term_rows) = terminal::size().context("Failed to query terminal size")?;
    let rows = (term_rows.max(2) - 1) as usize * 4;
    let columns = term_columns.max(1) as usize * 2;

    let mut set = RuleSet::default();
    let mut pattern = None;

    if let Some(source) = &source {
        if let Some(text) = catalog::lookup(source) {
            pattern = Some(rle::decode(text)?);
        } else {
            let data = std::fs::read_to_string(source)
                .with_context(|| format!("\"{source}\" is neither a pattern name nor a file"))?;
            let file = rle::read_rle(&data)
                .with_context(|| format!("Failed to parse \"{source}\""))?;

            if let Some(name) = file.name {
                info!("loaded pattern \"{name}\"");
            }

            if let Some(s) = file.set {
                set = s;
            }

            pattern = Some(file.pattern);
        }
    }

    if let Some(rule) = &rule {
        set = rule
            .parse()
            .with_context(|| format!("Invalid rule \"{rule}\""))?;
    }

    let mut world = match &pattern {
        Some(pattern) => World::from_pattern(pattern, rows, columns, set)
            .context("Pattern does not fit the terminal")?,
        None => World::random(rows, columns, set),
    };

    terminal::enable_raw_mode()?;
    execute!(
        std::io::stdout(),
        terminal::EnterAlternateScreen,
        cursor::Hide
    )?;

    let res = run(&mut world);

    execute!(
        std::io::stdout(),
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(world: &mut World) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    let mut cam = Camera::new(world.rows(), world.columns());
    let mut rng = rand::rng();

    let mut delay = DEFAULT_DELAY;
    let mut paused = false;
    let mut last_step = Instant::now();

    loop {
        let frame = cam.render(world.grid());

        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            style::Print(frame),
            style::Print(format!(
                "gen {:<12} {} {:>4}ms {}",
                world.generation(),
                world.rule_set(),
                delay.as_millis(),
                if paused { "paused " } else { "running" },
            )),
        )?;

        let timeout = if paused {
            IDLE_DELAY
        } else {
            delay.saturating_sub(last_step.elapsed())
        };

        if event::poll(timeout)? {
            match io::convert_event(event::read()?) {
                Some(Event::App(AppEvent::Exit)) => break,

                Some(Event::App(AppEvent::TogglePause)) => paused = !paused,

                Some(Event::App(AppEvent::SpeedUp)) => {
                    delay = delay.saturating_sub(DELAY_STEP).max(DELAY_STEP);
                }

                Some(Event::App(AppEvent::SlowDown)) => delay += DELAY_STEP,

                Some(Event::App(AppEvent::Save)) => {
                    let path = save(world)?;

                    info!("saved grid to {path}");
                }

                Some(Event::Engine(EngineEvent::Step)) => world.advance(),

                Some(Event::Engine(EngineEvent::SeedCatalog)) => {
                    let (name, text) = catalog::PATTERNS[rng.random_range(0..catalog::PATTERNS.len())];
                    let pattern = rle::decode(text)?;

                    // A tiny terminal can make even catalog patterns oversized; keep the
                    // current grid in that case.
                    if let Err(e) = world.reset(Some(&pattern)) {
                        warn!("cannot place \"{name}\": {e}");
                    }
                }

                Some(Event::Engine(EngineEvent::SeedNoise)) => world.reset(None)?,

                None => {}
            }
        }

        if !paused && last_step.elapsed() >= delay {
            world.advance();
            last_step = Instant::now();
        }
    }

    Ok(())
}

/// Write the grid to a timestamped `.rle` file in the working directory.
fn save(world: &World) -> anyhow::Result<String> {
    let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let path = format!("rgol-{stamp}.rle");

    let contents = format!(
        "x = {}, y = {}, rule = {}\n{}!\n",
        world.columns(),
        world.rows(),
        world.rule_set(),
        world.serialize(),
    );

    std::fs::write(&path, contents).with_context(|| format!("Failed to write {path}"))?;

    Ok(path)
}
