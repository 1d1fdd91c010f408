use std::fs;
use std::fs::File;
use std::io::{Write, BufWriter};

use crate::{
	PathBuf,
	error::ConvertError,
	shared_types::CellLayout,
};

const PLANAR_PREFIX: &str = "planar";
const LINEAR_PREFIX: &str = "linear";


fn output_name(prefix: &str, file_out: &str, layout: CellLayout) -> PathBuf {
	let base: &str = if file_out.is_empty() { prefix } else { file_out };
	return PathBuf::from(format!("{}{}.bin", base, layout.suffix()));
}


pub fn planar_name(file_out: &str, layout: CellLayout) -> PathBuf {
	output_name(PLANAR_PREFIX, file_out, layout)
}


pub fn linear_name(file_out: &str, layout: CellLayout) -> PathBuf {
	output_name(LINEAR_PREFIX, file_out, layout)
}


/// Writes `bytes` to `<target>.tmp` and renames it over `target` once complete,
/// so an interrupted write never leaves a finished-looking file behind.
pub fn write_binary(target_path: &PathBuf, bytes: &[u8]) -> Result<(), ConvertError> {
	let mut temp_path: PathBuf = target_path.clone();
	temp_path.as_mut_os_string().push(".tmp");

	let io_error = |source| ConvertError::Io {
		path: target_path.clone(),
		source: source,
	};

	let write_result = File::create(&temp_path).and_then(|file| {
		let mut buffer = BufWriter::new(file);
		buffer.write_all(bytes)?;
		buffer.flush()
	});

	if let Err(source) = write_result {
		let _ = fs::remove_file(&temp_path);
		return Err(io_error(source));
	}

	fs::rename(&temp_path, target_path).map_err(|source| {
		let _ = fs::remove_file(&temp_path);
		io_error(source)
	})
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_names() {
		assert_eq!(planar_name("", CellLayout::Sprite16), PathBuf::from("planar_spr16.bin"));
		assert_eq!(planar_name("", CellLayout::Tile8), PathBuf::from("planar_tle8.bin"));
		assert_eq!(linear_name("", CellLayout::Tile16Meta), PathBuf::from("linear_tle16.bin"));
	}

	#[test]
	fn file_out_replaces_both_prefixes() {
		assert_eq!(planar_name("level1", CellLayout::Tile8), PathBuf::from("level1_tle8.bin"));
		assert_eq!(linear_name("level1", CellLayout::Tile8), PathBuf::from("level1_tle8.bin"));
		assert_eq!(planar_name("out/hero", CellLayout::Sprite16), PathBuf::from("out/hero_spr16.bin"));
	}

	#[test]
	fn writes_and_overwrites() {
		let mut path: PathBuf = std::env::temp_dir();
		path.push(format!("pce_planar_{}_write.bin", std::process::id()));

		write_binary(&path, &[1, 2, 3]).unwrap();
		write_binary(&path, &[4, 5]).unwrap();

		assert_eq!(fs::read(&path).unwrap(), vec![4, 5]);

		let mut temp_path: PathBuf = path.clone();
		temp_path.as_mut_os_string().push(".tmp");
		assert!(!temp_path.exists());

		let _ = fs::remove_file(&path);
	}

	#[test]
	fn unwritable_target_is_io_error() {
		let mut path: PathBuf = std::env::temp_dir();
		path.push(format!("pce_planar_{}_missing_dir", std::process::id()));
		path.push("out.bin");

		let result = write_binary(&path, &[0]);
		assert!(matches!(result, Err(ConvertError::Io { .. })));
		assert!(!path.exists());
	}
}
