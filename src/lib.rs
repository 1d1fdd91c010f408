use std::fmt::Display;
use std::path::PathBuf;

pub mod shared_types;
pub mod error;
pub mod param_validator;
pub mod bit_depth;
pub mod image_get;
pub mod cell_codec;
pub mod metatile;
pub mod image_walker;
pub mod output_make;

use crate::shared_types::{
	Parameters,
	CellLayout,
	ConversionConfig,
	EncodedData,
	SourceImage,
};
use crate::error::ConvertError;


/// Progress printing, muted by `--silence`. Errors bypass this.
pub struct Reporter {
	silent: bool,
}

impl Reporter {
	pub fn new(silent: bool) -> Reporter {
		Reporter { silent: silent }
	}

	pub fn stats(&self, message: impl Display) {
		if self.silent {
			return;
		}
		println!("{}", message);
	}
}


fn processing_message(layout: CellLayout) -> &'static str {
	match layout {
		CellLayout::Sprite16 => "Processing for sprites.",
		CellLayout::Tile8 => "Processing for tile size 8x8.",
		CellLayout::Tile16Meta => "Processing for tile size 16x16.",
	}
}


/// Decodes, encodes and writes one image. Returns the number of cells converted.
/// Nothing is written unless every cell has been encoded.
pub fn process_file(parameters: &Parameters, reporter: &Reporter) -> Result<usize, ConvertError> {
	let config: ConversionConfig = parameters.config();

	reporter.stats(format!("Source Image: {}", parameters.source_path.display()));

	let image: SourceImage = image_get::get_image(&parameters.source_path)?;

	reporter.stats(format!("Image type: {}", image.mode));
	reporter.stats(format!("Image width: {}", image.grid.width()));
	reporter.stats(format!("Image height: {}", image.grid.height()));
	reporter.stats(format!("Palette colors: {}", image.color_count));
	reporter.stats(format!("Transparent entries: {}", image.transparent_count));

	reporter.stats(format!("Conversion type: {}", config.layout.type_name()));
	reporter.stats(processing_message(config.layout));

	let data: EncodedData = image_walker::walk_threaded(&image.grid, config.layout, parameters.jobs);
	let cells: usize = image_walker::cell_count(&image.grid, config.layout);

	let planar_path: PathBuf = output_make::planar_name(&parameters.file_out, config.layout);
	reporter.stats(format!("Saving planar file: {}.", planar_path.display()));
	output_make::write_binary(&planar_path, &data.planar)?;

	if config.emit_linear {
		let linear_path: PathBuf = output_make::linear_name(&parameters.file_out, config.layout);
		reporter.stats(format!("Saving linear file: {}.", linear_path.display()));
		output_make::write_binary(&linear_path, &data.linear)?;
	}

	reporter.stats("\nDone.\n");
	return Ok(cells);
}
