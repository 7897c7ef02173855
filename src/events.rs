pub enum Event {
    Engine(EngineEvent),
    App(AppEvent),
}

/// Operations forwarded to the world.
pub enum EngineEvent {
    /// Advance by a single generation
    Step,

    /// Reseed the grid with a random catalog pattern
    SeedCatalog,

    /// Reseed the grid with random noise
    SeedNoise,
}

/// Operations the driver loop handles itself.
pub enum AppEvent {
    /// Stop or resume the timer
    TogglePause,

    /// Shorten the delay between generations
    SpeedUp,

    /// Lengthen the delay between generations
    SlowDown,

    /// Write the current grid to an `.rle` file
    Save,

    /// Exit the application
    Exit,
}
