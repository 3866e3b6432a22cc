//! Core domain for gravsweep.
//!
//! Holds the gravity sweep domain types, the textual editing of the
//! simulator configuration file, the port traits implemented by
//! `gravsweep-runtime`, and the sweep service that ties them together.
//! Nothing in this crate spawns processes or probes hardware.

#![deny(unused_crate_dependencies)]

pub mod config_file;
pub mod domain;
pub mod ports;
pub mod services;

pub use config_file::{
    BACKUP_SUFFIX, ConfigBackup, GravityRewrite, backup, backup_path_for, current_gravity,
    rewrite_gravity, set_gravity,
};
pub use domain::{GravityEntry, GravityVector, SweepSet};
pub use ports::{
    AcceleratorBackend, AcceleratorInfo, AcceleratorProbePort, CoreError, DEFAULT_DATASET_PATH,
    DEFAULT_TRAIN_SCRIPT, NoopSweepEmitter, ProcessError, SweepEvent, SweepEventEmitter,
    SystemProbeError, TrainingCommand, TrainingOutcome, TrainingRunner,
};
pub use services::{SweepOptions, SweepReport, SweepRequest, SweepService, SweepState};
