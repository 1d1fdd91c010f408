use crate::{
	cell_codec,
	shared_types::{EncodedData, PixelGrid},
};

// (column, row) of each 8x8 tile inside a metatile: top-left, top-right,
// bottom-left, bottom-right.
const SUB_TILE_OFFSETS: [(usize, usize); 4] = [
	(0, 0),
	(8, 0),
	(0, 8),
	(8, 8),
];


/// Builds a HuC 16x16 metatile out of four independent 8x8 tiles.
/// Planar and linear outputs are each the four 32-byte tile blocks back to back.
pub fn compose_16x16(grid: &PixelGrid, col_offset: usize, row_offset: usize) -> EncodedData {
	let mut metatile: EncodedData = EncodedData::default();

	for (sub_col, sub_row) in SUB_TILE_OFFSETS {
		metatile.append(cell_codec::encode_tile_8x8(grid, col_offset + sub_col, row_offset + sub_row));
	}

	return metatile;
}


#[cfg(test)]
mod tests {
	use super::*;

	fn quadrant_grid() -> PixelGrid {
		let mut pixels: Vec<u8> = Vec::with_capacity(256);

		for y in 0..16 {
			for x in 0..16 {
				let value: u8 = match (x < 8, y < 8) {
					(true, true) => 1,
					(false, true) => 2,
					(true, false) => 3,
					(false, false) => 4,
				};
				pixels.push(value);
			}
		}

		PixelGrid::new(16, 16, pixels).unwrap()
	}

	#[test]
	fn quadrants_in_fixed_order() {
		let grid: PixelGrid = quadrant_grid();
		let metatile: EncodedData = compose_16x16(&grid, 0, 0);

		let mut expected: EncodedData = EncodedData::default();
		for (col, row) in [(0, 0), (8, 0), (0, 8), (8, 8)] {
			expected.append(cell_codec::encode_tile_8x8(&grid, col, row));
		}

		assert_eq!(metatile.planar.len(), 128);
		assert_eq!(metatile.linear.len(), 128);
		assert_eq!(metatile, expected);
	}

	#[test]
	fn quadrant_values_land_in_their_blocks() {
		let metatile: EncodedData = compose_16x16(&quadrant_grid(), 0, 0);

		// Index 1, plane 0 only
		assert!(metatile.planar[0..32].iter().step_by(2).take(8).all(|&byte| byte == 0xFF));
		// Index 4, plane 2 only
		assert!(metatile.planar[96 + 16..96 + 32].iter().step_by(2).all(|&byte| byte == 0xFF));
		assert!(metatile.planar[96..96 + 16].iter().all(|&byte| byte == 0x00));

		assert!(metatile.linear[0..32].iter().all(|&byte| byte == 0x11));
		assert!(metatile.linear[32..64].iter().all(|&byte| byte == 0x22));
		assert!(metatile.linear[64..96].iter().all(|&byte| byte == 0x33));
		assert!(metatile.linear[96..128].iter().all(|&byte| byte == 0x44));
	}

	#[test]
	fn differs_from_sprite_layout() {
		let grid: PixelGrid = quadrant_grid();
		assert_ne!(compose_16x16(&grid, 0, 0).planar, cell_codec::encode_sprite_16x16(&grid, 0, 0).planar);
	}
}
