mod handler;
mod manager;
mod replacements;

pub use handler::VfsHandler;
pub use manager::{HandlerRef, VfsManager};
pub use replacements::{ReplacementStore, Replacements};
