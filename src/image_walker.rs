use std::thread;

use crate::{
	cell_codec,
	metatile,
	shared_types::{CellLayout, EncodedData, PixelGrid},
};


fn encode_cell(grid: &PixelGrid, layout: CellLayout, col_offset: usize, row_offset: usize) -> EncodedData {
	match layout {
		CellLayout::Sprite16 => cell_codec::encode_sprite_16x16(grid, col_offset, row_offset),
		CellLayout::Tile8 => cell_codec::encode_tile_8x8(grid, col_offset, row_offset),
		CellLayout::Tile16Meta => metatile::compose_16x16(grid, col_offset, row_offset),
	}
}


/// Cells per row and cell rows, ignoring any partial trailing cells.
pub fn cell_extent(grid: &PixelGrid, layout: CellLayout) -> (usize, usize) {
	let size: usize = layout.cell_size();
	return (grid.width() / size, grid.height() / size);
}


pub fn cell_count(grid: &PixelGrid, layout: CellLayout) -> usize {
	let (columns, rows) = cell_extent(grid, layout);
	return columns * rows;
}


// Encodes cell rows `first_row..end_row`, left to right, top to bottom.
fn walk_rows(grid: &PixelGrid, layout: CellLayout, first_row: usize, end_row: usize) -> EncodedData {
	let size: usize = layout.cell_size();
	let (columns, _) = cell_extent(grid, layout);
	let mut output: EncodedData = EncodedData::with_capacity((end_row - first_row) * columns, layout);

	for cell_row in first_row..end_row {
		for cell_col in 0..columns {
			output.append(encode_cell(grid, layout, cell_col * size, cell_row * size));
		}
	}

	return output;
}


/// Encodes every whole cell of the image in row-major cell order.
pub fn walk(grid: &PixelGrid, layout: CellLayout) -> EncodedData {
	let (_, rows) = cell_extent(grid, layout);
	return walk_rows(grid, layout, 0, rows);
}


/// Same output as [`walk`], with cell rows split into contiguous bands
/// encoded on up to `jobs` threads and joined back in order.
pub fn walk_threaded(grid: &PixelGrid, layout: CellLayout, jobs: usize) -> EncodedData {
	let (_, rows) = cell_extent(grid, layout);
	let jobs: usize = jobs.clamp(1, rows.max(1));

	if jobs == 1 {
		return walk(grid, layout);
	}

	let band_rows: usize = (rows + jobs - 1) / jobs;

	let bands: Vec<EncodedData> = thread::scope(|scope| {
		let handles: Vec<_> = (0..rows)
			.step_by(band_rows)
			.map(|first_row| {
				let end_row: usize = (first_row + band_rows).min(rows);
				scope.spawn(move || walk_rows(grid, layout, first_row, end_row))
			})
			.collect();

		// Re-raise band panics on the calling thread
		handles
			.into_iter()
			.map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
			.collect()
	});

	let mut output: EncodedData = EncodedData::with_capacity(cell_count(grid, layout), layout);

	for band in bands {
		output.append(band);
	}

	return output;
}
