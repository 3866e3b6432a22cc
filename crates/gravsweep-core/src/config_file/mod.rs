//! Simulator configuration file editing.
//!
//! The configuration document is treated as opaque text: a sweep copies it
//! aside, rewrites one attribute in place, and copies it back afterwards.
//! No XML parsing happens here.

mod backup;
mod gravity_attr;

pub use backup::{BACKUP_SUFFIX, ConfigBackup, backup, backup_path_for};
pub use gravity_attr::{GravityRewrite, current_gravity, rewrite_gravity, set_gravity};
