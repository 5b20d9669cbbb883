// Shared test fixtures, compiled into the crate only for tests (see `tests` in src/lib.rs).

pub mod commands {
    pub mod increment_counter;
    pub mod open_example;
}

pub mod events {
    pub mod example_events;
}
