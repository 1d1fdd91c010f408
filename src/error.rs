use std::io;
use thiserror::Error;

use crate::PathBuf;

#[derive(Debug, Error)]
pub enum ConvertError {
	#[error("Unsupported image mode '{0}', source must be an 8-bit palettized image")]
	UnsupportedImageMode(String),

	#[error("Could not decode '{}': {reason}", path.display())]
	ImageDecode {
		path: PathBuf,
		reason: String,
	},

	#[error("Could not write '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		source: io::Error,
	},
}

impl ConvertError {
	pub fn decode(path: &PathBuf, reason: impl ToString) -> ConvertError {
		return ConvertError::ImageDecode {
			path: path.clone(),
			reason: reason.to_string(),
		}
	}
}
