// Library crate: the editor core plus the in-memory host used by the script
// runner and the integration tests.

pub mod command;
pub mod edit;
pub mod fixtures;
pub mod harness;
pub mod host;
pub mod input;
pub mod navigation;
pub mod state;
pub mod track;
pub mod viewport;
