//! End-to-end handling of one upload: check the file type and the
//! selection, decode the stored input, run the operation, and persist the
//! PNG result.
//!
//! The order matches what a user sees: a disallowed file or a bad selection
//! is reported before the upload is even decoded, and nothing is written
//! unless the operation succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ProcessorConfig;
use crate::dispatch::{DispatchError, Request};
use crate::io::{read_image, write_image, ImageIoError};
use crate::params::Params;

/// Failures of a single request, one variant per error class.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The upload's extension is not in the configured allow-list.
    #[error("Allowed file types: {}", allowed.join(", "))]
    Rejected {
        filename: String,
        allowed: Vec<String>,
    },

    /// Missing or unregistered (category, operation).
    #[error(transparent)]
    Selection(DispatchError),

    /// The uploaded file could not be decoded.
    #[error(transparent)]
    Decode(ImageIoError),

    /// The operation failed while computing.
    #[error(transparent)]
    Computation(DispatchError),

    /// The result could not be written.
    #[error(transparent)]
    Persist(ImageIoError),
}

impl From<DispatchError> for ProcessError {
    fn from(err: DispatchError) -> Self {
        if err.is_selection() {
            ProcessError::Selection(err)
        } else {
            ProcessError::Computation(err)
        }
    }
}

/// What a successful request produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub category: String,
    pub operation: String,
    /// Parameters as coerced and handed to the operation.
    pub params: Params,
    /// Location of the written PNG.
    pub output_path: PathBuf,
}

/// Runs requests against the directories of a [`ProcessorConfig`].
#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Store uploaded bytes as `<upload_dir>/<filename>`.
    ///
    /// Only the final path component of `filename` is used. Disallowed
    /// extensions are rejected before anything touches the disk.
    pub fn store_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ProcessError> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.check_allowed(name)?;

        let path = self.config.upload_dir.join(name);
        let write_err = |source| {
            ProcessError::Persist(ImageIoError::Write {
                path: path.clone(),
                source,
            })
        };
        fs::create_dir_all(&self.config.upload_dir).map_err(write_err)?;
        fs::write(&path, bytes).map_err(write_err)?;
        log::debug!("stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    fn check_allowed(&self, filename: &str) -> Result<(), ProcessError> {
        if self.config.accepts(filename) {
            return Ok(());
        }
        log::warn!("rejected upload {:?}", filename);
        Err(ProcessError::Rejected {
            filename: filename.to_string(),
            allowed: self.config.allowed_extensions.clone(),
        })
    }

    /// Handle one submission.
    ///
    /// `form` holds every raw field including `category` and `operation`.
    /// The result is written as `<result_dir>/<output_name>`; choosing a
    /// unique name is the caller's job.
    pub fn process<I, K, V>(
        &self,
        input: &Path,
        output_name: &str,
        form: I,
    ) -> Result<ProcessOutcome, ProcessError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let filename = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.check_allowed(filename)?;

        let request = Request::from_form(form);
        let (category, operation) = request.selection()?;
        if crate::registry::lookup(category, operation).is_none() {
            return Err(ProcessError::Selection(DispatchError::UnknownOperation {
                category: category.to_string(),
                operation: operation.to_string(),
            }));
        }

        let image = read_image(input).map_err(ProcessError::Decode)?;
        let output = request.run(&image)?;

        let output_path = self.config.result_dir.join(output_name);
        write_image(&output_path, &output).map_err(ProcessError::Persist)?;

        log::info!(
            "{} / {} on {} -> {}",
            category,
            operation,
            input.display(),
            output_path.display()
        );
        Ok(ProcessOutcome {
            category: category.to_string(),
            operation: operation.to_string(),
            params: request.params.clone(),
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Image;

    const NO_SELECTION: [(&str, &str); 0] = [];

    fn setup() -> (tempfile::TempDir, Processor, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let config = ProcessorConfig {
            upload_dir: dir.path().join("uploads"),
            result_dir: dir.path().join("results"),
            ..ProcessorConfig::default()
        };
        let input = config.upload_dir.join("input.png");
        let pixels: Vec<u8> = (0..3 * 16u32).map(|i| (i * 5) as u8).collect();
        write_image(&input, &Image::from_bgr(4, 4, pixels).unwrap()).unwrap();
        (dir, Processor::new(config), input)
    }

    #[test]
    fn test_process_writes_result() {
        let (_dir, processor, input) = setup();
        let outcome = processor
            .process(
                &input,
                "out.png",
                [
                    ("category", "Point Operations"),
                    ("operation", "Negative transformation"),
                ],
            )
            .unwrap();
        assert_eq!(outcome.operation, "Negative transformation");
        assert_eq!(outcome.output_path, processor.config().result_dir.join("out.png"));
        let written = read_image(&outcome.output_path).unwrap();
        let original = read_image(&input).unwrap();
        assert_eq!(written.pixels()[0], 255 - original.pixels()[0]);
    }

    #[test]
    fn test_selection_checked_before_decode() {
        let (dir, processor, _input) = setup();
        let missing = dir.path().join("nope.png");
        let err = processor
            .process(&missing, "out.png", [("category", "Point Operations")])
            .unwrap_err();
        assert!(matches!(err, ProcessError::Selection(DispatchError::MissingSelection)));

        let err = processor
            .process(
                &missing,
                "out.png",
                [("category", "Point Operations"), ("operation", "Blur")],
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::Selection(_)));
    }

    #[test]
    fn test_undecodable_upload() {
        let (dir, processor, _input) = setup();
        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"not an image").unwrap();
        let err = processor
            .process(
                &bogus,
                "out.png",
                [
                    ("category", "Point Operations"),
                    ("operation", "Negative transformation"),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
    }

    #[test]
    fn test_computation_failure_writes_nothing() {
        let (_dir, processor, input) = setup();
        let err = processor
            .process(
                &input,
                "out.png",
                [
                    ("category", "Neighbourhood Operations"),
                    ("operation", "Sobel Filter"),
                    ("dx", "0"),
                    ("dy", "0"),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::Computation(_)));
        assert!(!processor.config().result_dir.join("out.png").exists());
    }

    #[test]
    fn test_disallowed_extension_is_rejected_first() {
        let (dir, processor, _input) = setup();
        let gif = dir.path().join("anim.gif");
        std::fs::write(&gif, b"GIF89a").unwrap();
        let err = processor.process(&gif, "out.png", NO_SELECTION).unwrap_err();
        assert!(matches!(err, ProcessError::Rejected { .. }));
        assert_eq!(err.to_string(), "Allowed file types: png, jpg, jpeg");
    }

    #[test]
    fn test_store_upload_writes_into_upload_dir() {
        let (_dir, processor, input) = setup();
        let bytes = std::fs::read(&input).unwrap();
        let stored = processor.store_upload("../elsewhere/photo.PNG", &bytes).unwrap();
        assert_eq!(stored, processor.config().upload_dir.join("photo.PNG"));
        assert_eq!(read_image(&stored).unwrap(), read_image(&input).unwrap());

        let err = processor.store_upload("notes.txt", b"hello").unwrap_err();
        assert!(matches!(err, ProcessError::Rejected { .. }));
        assert!(!processor.config().upload_dir.join("notes.txt").exists());
    }
}
