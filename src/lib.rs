//! bethyw
//!
//! A Rust library for importing Welsh Government statistics (StatsWales
//! exports and the local authority reference table) into one in-memory
//! store, then printing it as tables or exporting it as JSON or CSV.
//! Pairs with the `bethyw` CLI.
//!
//! ### Features
//! - Read three source formats: a code/name reference CSV, StatsWales JSON
//!   (one record per area/measure/year), and per-year column CSVs
//! - Filter imports by area code, measure code, and inclusive year range
//! - Merge repeated imports field by field; later imports overwrite matching
//!   values and never delete anything
//! - Per-measure average, difference, and percentage difference
//! - Render fixed-width text tables, JSON, or tidy CSV
//!
//! ### Example
//! ```no_run
//! use bethyw::{Areas, Filters, InputFile, datasets};
//!
//! let mut areas = Areas::new();
//! let filters = Filters::all().with_measures(["pop"]);
//!
//! let src = &datasets::AREAS;
//! areas.populate(InputFile::in_dir("datasets", src).open()?, src.parser, &src.cols(), &filters)?;
//! let src = datasets::find("complete-pop").unwrap();
//! areas.populate(InputFile::in_dir("datasets", src).open()?, src.parser, &src.cols(), &filters)?;
//!
//! print!("{areas}");
//! println!("{}", bethyw::storage::to_json(&areas)?);
//! # Ok::<(), bethyw::Error>(())
//! ```

pub mod area;
pub mod areas;
pub mod datasets;
pub mod error;
pub mod filters;
pub mod ingest;
pub mod input;
pub mod measure;
pub mod report;
pub mod stats;
pub mod storage;

pub use area::Area;
pub use areas::Areas;
pub use datasets::{InputFileSource, SourceColumn, SourceColumnMapping, SourceDataType};
pub use error::{Error, ErrorKind, Result};
pub use filters::{Filters, YearRange};
pub use input::InputFile;
pub use measure::Measure;
