use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Converts a crossterm event into a driver event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        _ => None,
    }
}

fn convert_key(event: KeyEvent) -> Option<Event> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Event::App(AppEvent::Exit))
        }
        KeyCode::Char('q') => Some(Event::App(AppEvent::Exit)),

        KeyCode::Char(' ') => Some(Event::App(AppEvent::TogglePause)),
        KeyCode::Char('.') => Some(Event::Engine(EngineEvent::Step)),

        KeyCode::Char('r') => Some(Event::Engine(EngineEvent::SeedCatalog)),
        KeyCode::Char('c') => Some(Event::Engine(EngineEvent::SeedNoise)),
        KeyCode::Char('s') => Some(Event::App(AppEvent::Save)),

        KeyCode::Char('+' | '=') => Some(Event::App(AppEvent::SpeedUp)),
        KeyCode::Char('-') => Some(Event::App(AppEvent::SlowDown)),

        _ => None,
    }
}
