use crate::PathBuf;

#[derive(Clone, Debug)]
pub struct Parameters {
	pub source_path: PathBuf,
	pub file_out: String,
	pub layout: CellLayout,
	pub emit_linear: bool,
	pub silent: bool,
	pub jobs: usize,
}

impl Parameters {
	pub fn config(&self) -> ConversionConfig {
		return ConversionConfig {
			layout: self.layout,
			emit_linear: self.emit_linear,
		}
	}
}


/// Hardware cell layout selected by `--type`.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum CellLayout {
	/// 16x16 sprite, one 16-bit word per plane row.
	Sprite16,
	/// 8x8 background tile.
	Tile8,
	/// HuC metatile: four 8x8 tiles covering a 16x16 area.
	Tile16Meta,
}

impl CellLayout {
	pub fn from_type_name(name: &str) -> Option<CellLayout> {
		match name {
			"Sprite" | "sprite" => Some(CellLayout::Sprite16),
			"tile_8x8" => Some(CellLayout::Tile8),
			"tile_16x16" => Some(CellLayout::Tile16Meta),
			_ => None,
		}
	}

	pub fn type_name(self) -> &'static str {
		match self {
			CellLayout::Sprite16 => "Sprite",
			CellLayout::Tile8 => "tile_8x8",
			CellLayout::Tile16Meta => "tile_16x16",
		}
	}

	/// Output file name suffix, placed before `.bin`.
	pub fn suffix(self) -> &'static str {
		match self {
			CellLayout::Sprite16 => "_spr16",
			CellLayout::Tile8 => "_tle8",
			CellLayout::Tile16Meta => "_tle16",
		}
	}

	/// Side length in pixels of one visited cell.
	pub fn cell_size(self) -> usize {
		match self {
			CellLayout::Tile8 => 8,
			CellLayout::Sprite16 | CellLayout::Tile16Meta => 16,
		}
	}

	pub fn planar_size(self) -> usize {
		match self {
			CellLayout::Tile8 => 32,
			CellLayout::Sprite16 | CellLayout::Tile16Meta => 128,
		}
	}

	// Two pixels per byte
	pub fn linear_size(self) -> usize {
		let size: usize = self.cell_size();
		return size * size / 2;
	}
}


#[derive(Copy, Clone, Debug)]
pub struct ConversionConfig {
	pub layout: CellLayout,
	pub emit_linear: bool,
}


/// Decoded image, one palette index per pixel, row-major from the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
	width: usize,
	height: usize,
	pixels: Vec<u8>,
}

impl PixelGrid {
	/// Returns `None` if `pixels` does not hold exactly `width * height` entries.
	pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<PixelGrid> {
		if pixels.len() != width * height {
			return None;
		}

		return Some(PixelGrid {
			width: width,
			height: height,
			pixels: pixels,
		})
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	pub fn pixel(&self, x: usize, y: usize) -> u8 {
		self.pixels[y * self.width + x]
	}

	/// `count` pixels of row `y`, starting at column `x`.
	pub fn row_slice(&self, x: usize, y: usize, count: usize) -> &[u8] {
		let start: usize = y * self.width + x;
		&self.pixels[start..start + count]
	}
}


/// What the image decoder hands to the driver.
#[derive(Debug)]
pub struct SourceImage {
	pub grid: PixelGrid,
	pub mode: String,
	pub color_count: usize,
	pub transparent_count: usize,
}


/// Planar and linear buffers for a whole image, in cell visiting order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodedData {
	pub planar: Vec<u8>,
	pub linear: Vec<u8>,
}

impl EncodedData {
	pub fn with_capacity(cells: usize, layout: CellLayout) -> EncodedData {
		return EncodedData {
			planar: Vec::with_capacity(cells * layout.planar_size()),
			linear: Vec::with_capacity(cells * layout.linear_size()),
		}
	}

	pub fn append(&mut self, mut other: EncodedData) {
		self.planar.append(&mut other.planar);
		self.linear.append(&mut other.linear);
	}
}
