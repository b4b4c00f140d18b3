//! CVOps Core - classic image processing operations
//!
//! This crate provides a fixed catalog of point, neighbourhood, and
//! contrast-stretching operations over 8-bit BGR images, the dispatch layer
//! that maps a (category, operation) selection plus loosely typed form
//! parameters onto them, and the PNG/JPEG codec boundary.

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod io;
pub mod luminance;
pub mod ops;
pub mod params;
pub mod processor;
pub mod registry;

pub use buffer::{Image, ImageError, CHANNELS};
pub use config::{load_config, ConfigError, ProcessorConfig};
pub use dispatch::{apply_params, dispatch, DispatchError, Request};
pub use io::{decode_image, encode_png, is_allowed_file, read_image, write_image, ImageIoError};
pub use ops::{Category, Operation, OperationError};
pub use params::{coerce_params, ParamValue, Params};
pub use processor::{ProcessError, ProcessOutcome, Processor};
pub use registry::{catalog, lookup, Catalog, CatalogEntry};
