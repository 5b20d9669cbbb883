// Command data types accepted by application services.
//
// Responsibilities
// - Say which aggregate kind handles the command, so a host can route it by tag.
// - Carry the version the caller decided against, if any. A command without one is decided
//   against the latest state.

use std::fmt;

pub trait Command: fmt::Debug + Send + Sync + 'static {
    fn aggregate_tag(&self) -> &'static str;

    fn expected_version(&self) -> Option<u64>;
}
