use crate::{
	PathBuf,
	Parameters,
	CellLayout,
};

enum ArgumentType {
	NONE,
	INPUT,
	OUTPUT,
	TYPE,
	JOBS,
}


fn value_argument(option: &str) -> ArgumentType {
	match &option.to_lowercase() as &str {
		"--filein" | "-in" => ArgumentType::INPUT,
		"--fileout" | "-out" => ArgumentType::OUTPUT,
		"--type" | "-t" => ArgumentType::TYPE,
		"--jobs" | "-j" => ArgumentType::JOBS,
		_ => ArgumentType::NONE,
	}
}


// Splits '--option=value' into two arguments so both forms parse the same way.
// Only known value options are split, and never a token sitting in a value slot.
fn expand_arguments(args: &[String]) -> Vec<String> {
	let mut expanded: Vec<String> = Vec::with_capacity(args.len());
	let mut value_slot: bool = false;

	for argument in args {
		if value_slot {
			expanded.push(argument.clone());
			value_slot = false;
			continue;
		}

		match argument.split_once('=') {
			Some((option, value)) if !matches!(value_argument(option), ArgumentType::NONE) => {
				expanded.push(option.to_string());
				expanded.push(value.to_string());
			},
			_ => {
				value_slot = !matches!(value_argument(argument), ArgumentType::NONE);
				expanded.push(argument.clone());
			},
		}
	}

	return expanded;
}


/// True when `-h` or `--help` appears in an option position.
/// A value such as `-out -h` does not count.
pub fn wants_help(args: &[String]) -> bool {
	let mut value_slot: bool = false;

	for argument in expand_arguments(args) {
		if value_slot {
			value_slot = false;
			continue;
		}

		match &argument.to_lowercase() as &str {
			"-h" | "--help" => return true,
			option => value_slot = !matches!(value_argument(option), ArgumentType::NONE),
		}
	}

	return false;
}


/// Parses everything after the executable name.
/// Prints the reason and returns `None` on bad or missing arguments.
pub fn validate(args: &[String]) -> Option<Parameters> {
	let mut source_file_name: String = String::new();
	let mut file_out: String = String::new();
	let mut layout: Option<CellLayout> = None;
	let mut emit_linear: bool = false;
	let mut silent: bool = false;
	let mut jobs: usize = 1;

	let mut next_arg: ArgumentType = ArgumentType::NONE;

	for argument in expand_arguments(args) {
		let this_argument: &str = argument.as_str();

		match next_arg {
			ArgumentType::INPUT => {
				source_file_name = this_argument.to_string();
				next_arg = ArgumentType::NONE;
				continue;
			},

			ArgumentType::OUTPUT => {
				file_out = this_argument.to_string();
				next_arg = ArgumentType::NONE;
				continue;
			},

			ArgumentType::TYPE => {
				match CellLayout::from_type_name(this_argument) {
					Some(value) => layout = Some(value),
					None => {
						println!("Unsupported type '{}'. Supported types: 'Sprite', 'tile_8x8', 'tile_16x16'.", this_argument);
						return None;
					},
				}

				next_arg = ArgumentType::NONE;
				continue;
			},

			ArgumentType::JOBS => {
				match this_argument.parse::<usize>() {
					Ok(value) if value > 0 => jobs = value,
					_ => {
						println!("Invalid job count '{}', expected a number above 0.", this_argument);
						return None;
					},
				}

				next_arg = ArgumentType::NONE;
				continue;
			},

			ArgumentType::NONE => (),
		}

		next_arg = value_argument(this_argument);

		if !matches!(next_arg, ArgumentType::NONE) {
			continue;
		}

		match &this_argument.to_lowercase() as &str {
			"--linear" | "-lin" => emit_linear = true,
			"--silence" | "-s" => silent = true,
			_ => {
				println!("Unrecognized argument '{}'.", this_argument);
				return None;
			},
		}
	}

	match next_arg {
		ArgumentType::NONE => (),
		_ => {
			println!("The last argument is missing its value.");
			return None;
		},
	}

	// Insufficient parameters
	if source_file_name.is_empty() {
		println!("No source image was specified. Use '--filein <source image>'.");
		return None;
	}

	let final_layout: CellLayout = match layout {
		Some(value) => value,
		None => {
			println!("No conversion type was specified. Use '--type <Sprite|tile_8x8|tile_16x16>'.");
			return None;
		},
	};

	// Final output
	return Some(Parameters {
		source_path: PathBuf::from(source_file_name),
		file_out: file_out,
		layout: final_layout,
		emit_linear: emit_linear,
		silent: silent,
		jobs: jobs,
	});
}


#[cfg(test)]
mod tests {
	use super::*;

	fn args(list: &[&str]) -> Vec<String> {
		list.iter().map(|item| item.to_string()).collect()
	}

	#[test]
	fn short_and_long_forms() {
		let long: Parameters = validate(&args(&["--filein", "map.png", "--type", "tile_16x16", "--linear"])).unwrap();
		assert_eq!(long.source_path, PathBuf::from("map.png"));
		assert_eq!(long.layout, CellLayout::Tile16Meta);
		assert!(long.emit_linear);
		assert!(!long.silent);
		assert_eq!(long.file_out, "");
		assert_eq!(long.jobs, 1);

		let short: Parameters = validate(&args(&["-in", "hero.bmp", "-t", "Sprite", "-out", "hero", "-s", "-lin"])).unwrap();
		assert_eq!(short.source_path, PathBuf::from("hero.bmp"));
		assert_eq!(short.layout, CellLayout::Sprite16);
		assert_eq!(short.file_out, "hero");
		assert!(short.silent);
		assert!(short.emit_linear);
	}

	#[test]
	fn equals_form() {
		let parameters: Parameters = validate(&args(&["--filein=a.png", "--type=tile_8x8", "--jobs=4"])).unwrap();
		assert_eq!(parameters.source_path, PathBuf::from("a.png"));
		assert_eq!(parameters.layout, CellLayout::Tile8);
		assert_eq!(parameters.jobs, 4);
	}

	#[test]
	fn value_may_start_with_dash_and_contain_equals() {
		let parameters: Parameters = validate(&args(&["-in", "-x=y.png", "-t", "tile_8x8"])).unwrap();
		assert_eq!(parameters.source_path, PathBuf::from("-x=y.png"));

		let parameters: Parameters = validate(&args(&["-in", "a.png", "-t", "Sprite", "-out", "--fileout=b"])).unwrap();
		assert_eq!(parameters.file_out, "--fileout=b");
	}

	#[test]
	fn unknown_option_with_equals_is_rejected() {
		assert!(validate(&args(&["-in", "a.png", "-t", "Sprite", "--linear=yes"])).is_none());
		assert!(validate(&args(&["-in", "a.png", "-t", "Sprite", "--bogus=1"])).is_none());
	}

	#[test]
	fn help_only_in_option_position() {
		assert!(wants_help(&args(&["-h"])));
		assert!(wants_help(&args(&["-in", "a.png", "--help"])));
		assert!(!wants_help(&args(&["-in", "a.png", "-t", "Sprite", "-out", "-h"])));
		assert!(!wants_help(&args(&["-in", "--help", "-t", "Sprite"])));
		assert!(!wants_help(&args(&["--fileout=-h", "-in", "a.png"])));

		let parameters: Parameters = validate(&args(&["-in", "a.png", "-t", "Sprite", "-out", "-h"])).unwrap();
		assert_eq!(parameters.file_out, "-h");
	}

	#[test]
	fn required_arguments() {
		assert!(validate(&args(&["--type", "tile_8x8"])).is_none());
		assert!(validate(&args(&["--filein", "a.png"])).is_none());
		assert!(validate(&args(&["--filein", "a.png", "--type"])).is_none());
	}

	#[test]
	fn rejects_bad_values() {
		assert!(validate(&args(&["-in", "a.png", "-t", "tile_32x32"])).is_none());
		assert!(validate(&args(&["-in", "a.png", "-t", "Sprite", "-j", "0"])).is_none());
		assert!(validate(&args(&["-in", "a.png", "-t", "Sprite", "--bogus"])).is_none());
	}

	#[test]
	fn config_follows_parameters() {
		let parameters: Parameters = validate(&args(&["-in", "a.png", "-t", "tile_8x8", "-lin"])).unwrap();
		let config = parameters.config();
		assert_eq!(config.layout, CellLayout::Tile8);
		assert!(config.emit_linear);
	}
}
