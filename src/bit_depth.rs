use std::io;
use std::io::Cursor;
use bitstream_io::{BitReader, BitRead, BitWriter, BitWrite, BigEndian};


/// Unpacks rows of 1, 2, 4 or 8 bpp indices into one byte per pixel.
/// Both PNG and BMP store sub-byte pixels leftmost-first in the high bits,
/// and pad every row to `row_stride` bytes.
pub fn bpp_to_8(input_rows: &[u8], bit_depth: u8, width: usize, height: usize, row_stride: usize) -> io::Result<Vec<u8>> {
	let mut output_pixels: Vec<u8> = Vec::with_capacity(width * height);

	if bit_depth == 8 {
		for y in 0..height {
			let row_start: usize = y * row_stride;
			match input_rows.get(row_start..row_start + width) {
				Some(row) => output_pixels.extend_from_slice(row),
				None => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
			}
		}

		return Ok(output_pixels);
	}

	if !matches!(bit_depth, 1 | 2 | 4) {
		return Err(io::Error::new(
			io::ErrorKind::InvalidData,
			format!("unsupported index depth {}", bit_depth),
		));
	}

	for y in 0..height {
		let row_start: usize = y * row_stride;
		let row: &[u8] = input_rows.get(row_start..).unwrap_or(&[]);
		let mut bit_reader = BitReader::endian(Cursor::new(row), BigEndian);

		for _ in 0..width {
			output_pixels.push(bit_reader.read::<u8>(bit_depth as u32)?);
		}
	}

	return Ok(output_pixels);
}


/// Packs adjacent pixels two to a byte, first pixel in the high nibble.
/// Only the low 4 bits of each index are kept.
pub fn pack_nibble_pairs(input_pixels: &[u8]) -> Vec<u8> {
	let mut output_bytes: Vec<u8> = Vec::with_capacity((input_pixels.len() + 1) / 2);
	let mut bit_writer = BitWriter::endian(&mut output_bytes, BigEndian);

	for pixel in input_pixels {
		let _ = bit_writer.write(4, pixel & 0xF);
	}

	// Odd pixel count, pad the last low nibble
	if input_pixels.len() % 2 == 1 {
		let _ = bit_writer.write(4, 0u8);
	}

	drop(bit_writer);
	return output_bytes;
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn packs_pair_high_nibble_first() {
		assert_eq!(pack_nibble_pairs(&[0x3, 0xA]), vec![0x3A]);
		assert_eq!(pack_nibble_pairs(&[0xF, 0x0, 0x0, 0xF]), vec![0xF0, 0x0F]);
	}

	#[test]
	fn packs_every_pair() {
		for a in 0..16u8 {
			for b in 0..16u8 {
				assert_eq!(pack_nibble_pairs(&[a, b]), vec![(a << 4) | b], "pair ({a}, {b})");
			}
		}
	}

	#[test]
	fn pack_ignores_high_bits() {
		assert_eq!(pack_nibble_pairs(&[0x13, 0xFA]), vec![0x3A]);
	}

	#[test]
	fn pack_pads_odd_count() {
		assert_eq!(pack_nibble_pairs(&[0x1, 0x2, 0x3]), vec![0x12, 0x30]);
	}

	#[test]
	fn unpacks_4bpp_with_row_padding() {
		// 3 pixels per row, 2 bytes per row, 2 rows
		let rows: [u8; 4] = [0x12, 0x3F, 0x45, 0x6F];
		assert_eq!(bpp_to_8(&rows, 4, 3, 2, 2).unwrap(), vec![1, 2, 3, 4, 5, 6]);
	}

	#[test]
	fn unpacks_1bpp_and_2bpp() {
		assert_eq!(bpp_to_8(&[0b1010_0000], 1, 4, 1, 1).unwrap(), vec![1, 0, 1, 0]);
		assert_eq!(bpp_to_8(&[0b11_10_01_00], 2, 4, 1, 1).unwrap(), vec![3, 2, 1, 0]);
	}

	#[test]
	fn unpack_8bpp_skips_stride_padding() {
		let rows: [u8; 8] = [1, 2, 3, 0, 4, 5, 6, 0];
		assert_eq!(bpp_to_8(&rows, 8, 3, 2, 4).unwrap(), vec![1, 2, 3, 4, 5, 6]);
	}

	#[test]
	fn unpack_short_input_fails() {
		assert!(bpp_to_8(&[0x12], 4, 4, 1, 2).is_err());
		assert!(bpp_to_8(&[1, 2], 8, 3, 1, 3).is_err());
	}
}
