//! # Sample Data Model
//!
//! Plain data structures exchanged with the collaborator layer: a [`Sample`]
//! owns its ordered [`Peak`]s, its instrument conditions and a frozen copy of
//! the [`Configuration`](crate::config::Configuration) that was active when it
//! was created.
//!
//! Records are exchanged as camelCase JSON. Derived peak fields
//! (`percentArea`, `uspPlateCount`, `uspTailing`) are never trusted as input
//! when absent; [`Sample::fill_derived`] recomputes them.

mod error;
mod peak;
mod sample;
mod settings;

#[cfg(test)]
mod tests;

pub use error::ModelError;
pub use peak::Peak;
pub use sample::{ExportKind, Sample, SampleBuilder, MAX_PEAKS};
pub use settings::{InstrumentSettings, ReportMetadata, SystemSuitability};
