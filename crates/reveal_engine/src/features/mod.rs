//! Page features wired up by the runtime's `init`. Each one degrades to a
//! logged no-op when the markup does not have the shape it expects.

pub mod counter;
pub mod styles;
pub mod tabs;
pub mod ticker;
pub mod touchups;
