use std::fs;
use std::fs::File;
use bmp_rust::bmp::{BMP, BITMAPFILEHEADER, DIBHEADER};

use crate::{
	PathBuf,
	bit_depth,
	error::ConvertError,
	shared_types::{PixelGrid, SourceImage},
};

const BMP_FILE_HEADER_SIZE: usize = 14;
// BITMAPCOREHEADER, the smallest DIB header
const BMP_CORE_HEADER_SIZE: usize = 12;


/// Picks a decoder by file extension.
pub fn get_image(source_file: &PathBuf) -> Result<SourceImage, ConvertError> {
	let extension: String = source_file
		.extension()
		.and_then(|os_str| os_str.to_str())
		.unwrap_or("")
		.to_lowercase();

	match &extension as &str {
		"png" => get_png(source_file),
		"bmp" => get_bmp(source_file),
		"" => Err(ConvertError::decode(source_file, "file has no extension, expected '.png' or '.bmp'")),
		other => Err(ConvertError::decode(source_file, format!("unsupported file type '.{}', expected '.png' or '.bmp'", other))),
	}
}


pub fn get_png(source_file: &PathBuf) -> Result<SourceImage, ConvertError> {
	let file: File = File::open(source_file).map_err(|error| ConvertError::decode(source_file, error))?;

	// Keep raw indices, no palette expansion
	let mut decoder = png::Decoder::new(file);
	decoder.set_transformations(png::Transformations::IDENTITY);
	let mut reader = decoder.read_info().map_err(|error| ConvertError::decode(source_file, error))?;

	let color_count: usize;
	let transparent_count: usize;

	match reader.info().color_type {
		png::ColorType::Indexed => {
			color_count = match &reader.info().palette {
				Some(pal_data) => pal_data.len() / 3,
				None => 0,
			};

			// One alpha byte per leading palette entry
			transparent_count = match &reader.info().trns {
				Some(alpha) => alpha.len(),
				None => 0,
			};
		},

		png::ColorType::Grayscale => return Err(ConvertError::UnsupportedImageMode("grayscale".to_string())),
		png::ColorType::GrayscaleAlpha => return Err(ConvertError::UnsupportedImageMode("grayscale with alpha".to_string())),
		png::ColorType::Rgb => return Err(ConvertError::UnsupportedImageMode("RGB".to_string())),
		png::ColorType::Rgba => return Err(ConvertError::UnsupportedImageMode("RGBA".to_string())),
	}

	let mut buffer: Vec<u8> = vec![0; reader.output_buffer_size()];
	let frame = reader.next_frame(&mut buffer).map_err(|error| ConvertError::decode(source_file, error))?;

	let width: usize = frame.width as usize;
	let height: usize = frame.height as usize;

	let pixels: Vec<u8> = bit_depth::bpp_to_8(&buffer[..frame.buffer_size()], frame.bit_depth as u8, width, height, frame.line_size)
		.map_err(|error| ConvertError::decode(source_file, error))?;

	return Ok(SourceImage {
		grid: pixel_grid(source_file, width, height, pixels)?,
		mode: format!("P ({}-bit indexed PNG)", frame.bit_depth as u8),
		color_count: color_count,
		transparent_count: transparent_count,
	})
}


pub fn get_bmp(source_file: &PathBuf) -> Result<SourceImage, ConvertError> {
	// Not using BMP::new_from_file as it panics when the file can't be read
	let bytes: Vec<u8> = fs::read(source_file).map_err(|error| ConvertError::decode(source_file, error))?;

	if bytes.len() < BMP_FILE_HEADER_SIZE + 4 || &bytes[0..2] != b"BM" {
		return Err(ConvertError::decode(source_file, "not a BMP file"));
	}

	// The whole DIB header must be present before bmp-rust slices into it
	let dib_size: usize = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]) as usize;

	if dib_size < BMP_CORE_HEADER_SIZE || bytes.len() < BMP_FILE_HEADER_SIZE + dib_size {
		return Err(ConvertError::decode(source_file, "truncated DIB header"));
	}

	let mut bmp: BMP = BMP::new(1i32, 1u32, Some([0u8, 0u8, 0u8, 0u8]));
	bmp.contents = bytes;

	let file_header: BITMAPFILEHEADER = BMP::get_header(&bmp);

	let dib_header: DIBHEADER = match BMP::get_dib_header(&bmp) {
		Ok(header) => header,
		_ => return Err(ConvertError::decode(source_file, "could not read DIB header")),
	};

	let bit_count: u16 = dib_header.bitcount as u16;

	match bit_count {
		1 | 2 | 4 | 8 => (),
		_ => return Err(ConvertError::UnsupportedImageMode(format!("{}-bit BMP", bit_count))),
	}

	match dib_header.compression {
		Some(ref value) if value != "BI_RGB" => {
			return Err(ConvertError::decode(source_file, format!("compressed BMP ({}) is not supported", value)));
		},
		_ => (),
	}

	let width: usize = dib_header.width as usize;
	let signed_height: i64 = dib_header.height as i64;
	let height: usize = signed_height.unsigned_abs() as usize;

	// Rows are padded to 4 bytes
	let row_size: usize = ((bit_count as usize * width + 31) / 32) * 4;
	let start: usize = file_header.bfOffBits as usize;

	let pixel_array: &[u8] = match bmp.contents.get(start..start + row_size * height) {
		Some(slice) => slice,
		None => return Err(ConvertError::decode(source_file, "pixel data is shorter than the header claims")),
	};

	// Positive height means the bottom row comes first
	let mut top_down_rows: Vec<u8> = Vec::with_capacity(pixel_array.len());

	for y in 0..height {
		let source_row: usize = if signed_height < 0 { y } else { height - 1 - y };
		top_down_rows.extend_from_slice(&pixel_array[source_row * row_size..(source_row + 1) * row_size]);
	}

	let pixels: Vec<u8> = bit_depth::bpp_to_8(&top_down_rows, bit_count as u8, width, height, row_size)
		.map_err(|error| ConvertError::decode(source_file, error))?;

	// How many colors the color table holds
	let color_count: usize = match dib_header.ClrUsed {
		Some(0) | None => 1usize << bit_count,
		Some(value) => value as usize,
	};

	return Ok(SourceImage {
		grid: pixel_grid(source_file, width, height, pixels)?,
		mode: format!("P ({}-bit indexed BMP)", bit_count),
		color_count: color_count,
		transparent_count: 0,
	})
}


fn pixel_grid(source_file: &PathBuf, width: usize, height: usize, pixels: Vec<u8>) -> Result<PixelGrid, ConvertError> {
	match PixelGrid::new(width, height, pixels) {
		Some(grid) => Ok(grid),
		None => Err(ConvertError::decode(source_file, "pixel count does not match image dimensions")),
	}
}
