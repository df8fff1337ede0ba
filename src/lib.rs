#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod changes;
pub mod error;
pub mod flake;
pub mod lockfile;
pub mod reference;
pub mod report;
