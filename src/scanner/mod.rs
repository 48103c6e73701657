//! Filesystem probes: directory sizes and executable lookup.

mod resolve;
mod size;

pub use resolve::{find_executable, is_executable, resolve_symlinks};
pub use size::{dir_size, expand_home, size};
