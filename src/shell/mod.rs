// Composition root and HTTP surface.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the configured persistence, the publisher and the conflict rules.
// - Wire them into the example application service and the service host.

pub mod composition;
pub mod config;
pub mod http;
pub mod state;
