pub mod backend;
pub mod card;
pub mod client;
pub mod form;
pub mod memory;
mod record;
pub mod session;
pub mod ui;
pub mod workflow;
