use bitstream_io::{BitWriter, BitWrite, BigEndian};

use crate::{
	bit_depth,
	shared_types::{EncodedData, PixelGrid},
};

pub const TILE_SIZE: usize = 8;
pub const SPRITE_SIZE: usize = 16;
pub const TILE_PLANAR_SIZE: usize = 32;
pub const SPRITE_PLANAR_SIZE: usize = 128;

// 4 bpp only, bits above plane 3 are never read
const PLANE_COUNT: usize = 4;

// Where each plane's row byte lands within an 8x8 tile, relative to row * 2.
// Planes 0/1 share the first 16 bytes, planes 2/3 the second.
const TILE_PLANE_OFFSETS: [usize; PLANE_COUNT] = [0x00, 0x01, 0x10, 0x11];


/// Folds one bit plane of a pixel row into bytes, leftmost pixel in the
/// most significant bit. 8 pixels make one byte, 16 make a big-endian word.
fn plane_row(row: &[u8], plane: usize) -> Vec<u8> {
	let mut plane_bytes: Vec<u8> = Vec::with_capacity(row.len() / 8);
	let mut bit_writer = BitWriter::endian(&mut plane_bytes, BigEndian);

	for pixel in row {
		let _ = bit_writer.write_bit((pixel >> plane) & 1 == 1);
	}

	drop(bit_writer);
	return plane_bytes;
}


fn linear_cell(grid: &PixelGrid, col_offset: usize, row_offset: usize, size: usize) -> Vec<u8> {
	let mut linear: Vec<u8> = Vec::with_capacity(size * size / 2);

	for row in 0..size {
		let pixels: &[u8] = grid.row_slice(col_offset, row_offset + row, size);
		linear.append(&mut bit_depth::pack_nibble_pairs(pixels));
	}

	return linear;
}


/// Encodes the 8x8 cell whose top-left pixel is (`col_offset`, `row_offset`).
///
/// Planar output is 32 bytes: for row `r`, bytes `2r` and `2r + 1` hold planes
/// 0 and 1, bytes `2r + 16` and `2r + 17` hold planes 2 and 3. Linear output is
/// 32 bytes of nibble pairs, row by row.
pub fn encode_tile_8x8(grid: &PixelGrid, col_offset: usize, row_offset: usize) -> EncodedData {
	let mut planar: Vec<u8> = vec![0; TILE_PLANAR_SIZE];

	for row in 0..TILE_SIZE {
		let pixels: &[u8] = grid.row_slice(col_offset, row_offset + row, TILE_SIZE);

		for plane in 0..PLANE_COUNT {
			planar[row * 2 + TILE_PLANE_OFFSETS[plane]] = plane_row(pixels, plane)[0];
		}
	}

	return EncodedData {
		planar: planar,
		linear: linear_cell(grid, col_offset, row_offset, TILE_SIZE),
	}
}


/// Encodes the 16x16 sprite cell whose top-left pixel is (`col_offset`, `row_offset`).
///
/// Each plane row is a 16-bit word, leftmost pixel in bit 15. Words are ordered
/// plane 0 rows 0-15, then plane 1, 2 and 3, and each is stored low byte first,
/// giving 128 bytes. Linear output is 128 bytes of nibble pairs.
pub fn encode_sprite_16x16(grid: &PixelGrid, col_offset: usize, row_offset: usize) -> EncodedData {
	let mut planar: Vec<u8> = vec![0; SPRITE_PLANAR_SIZE];

	for row in 0..SPRITE_SIZE {
		let pixels: &[u8] = grid.row_slice(col_offset, row_offset + row, SPRITE_SIZE);

		for plane in 0..PLANE_COUNT {
			let word_bytes: Vec<u8> = plane_row(pixels, plane);
			let word: u16 = u16::from_be_bytes([word_bytes[0], word_bytes[1]]);
			let index: usize = (plane * SPRITE_SIZE + row) * 2;

			planar[index..index + 2].copy_from_slice(&word.to_le_bytes());
		}
	}

	return EncodedData {
		planar: planar,
		linear: linear_cell(grid, col_offset, row_offset, SPRITE_SIZE),
	}
}


/// Rebuilds the 64 colour indices of an 8x8 planar tile, row-major.
pub fn decode_tile_8x8(planar: &[u8; TILE_PLANAR_SIZE]) -> [u8; TILE_SIZE * TILE_SIZE] {
	let mut pixels: [u8; TILE_SIZE * TILE_SIZE] = [0; TILE_SIZE * TILE_SIZE];

	for row in 0..TILE_SIZE {
		for col in 0..TILE_SIZE {
			let mut value: u8 = 0;

			for plane in 0..PLANE_COUNT {
				let bit: u8 = (planar[row * 2 + TILE_PLANE_OFFSETS[plane]] >> (7 - col)) & 1;
				value |= bit << plane;
			}

			pixels[row * TILE_SIZE + col] = value;
		}
	}

	return pixels;
}


/// Rebuilds the 256 colour indices of a 16x16 planar sprite, row-major.
pub fn decode_sprite_16x16(planar: &[u8; SPRITE_PLANAR_SIZE]) -> [u8; SPRITE_SIZE * SPRITE_SIZE] {
	let mut pixels: [u8; SPRITE_SIZE * SPRITE_SIZE] = [0; SPRITE_SIZE * SPRITE_SIZE];

	for plane in 0..PLANE_COUNT {
		for row in 0..SPRITE_SIZE {
			let index: usize = (plane * SPRITE_SIZE + row) * 2;
			let word: u16 = u16::from_le_bytes([planar[index], planar[index + 1]]);

			for col in 0..SPRITE_SIZE {
				let bit: u8 = ((word >> (15 - col)) & 1) as u8;
				pixels[row * SPRITE_SIZE + col] |= bit << plane;
			}
		}
	}

	return pixels;
}
