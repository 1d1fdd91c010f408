use std::env;
use std::process::ExitCode;
use std::time::Instant;

use pce_planar::{
	Reporter,
	param_validator,
	process_file,
	shared_types::Parameters,
};


pub fn main() -> ExitCode {
	let args: Vec<String> = env::args().skip(1).collect();

	if args.is_empty() {
		help_message();
		return ExitCode::FAILURE;
	}

	if param_validator::wants_help(&args) {
		help_message();
		return ExitCode::SUCCESS;
	}

	let parameters: Parameters = match param_validator::validate(&args) {
		Some(value) => value,
		None => {
			println!("Call 'pce_planar --help' for usage.");
			return ExitCode::FAILURE;
		},
	};

	let reporter: Reporter = Reporter::new(parameters.silent);
	let instant = Instant::now();

	match process_file(&parameters, &reporter) {
		Ok(cells) => {
			reporter.stats(format!("Converted {} cells in {}ms.", cells, instant.elapsed().as_millis()));
			return ExitCode::SUCCESS;
		},

		Err(error) => {
			eprintln!("{}", error);
			return ExitCode::FAILURE;
		},
	}
}


pub fn help_message() {
	println!();
	println!("8-bit palettized image to PC Engine planar converter.");
	println!("Reads indexed PNG and BMP images, writes raw VDC tile/sprite bitplane data.");
	println!();
	println!("Usage:");
	println!("    pce_planar -in <source image> -t <type> [-out <name>] [-lin] [-s] [-j <jobs>]");
	println!();
	println!("Available parameters:");
	println!("    -in  or --filein  <path>   Source image, must be an 8-bit palettized image (required)");
	println!("    -t   or --type    <type>   Conversion type: 'Sprite', 'tile_8x8' or 'tile_16x16' (required)");
	println!("                               tile_16x16 is the HuC metatile format");
	println!("    -out or --fileout <name>   Override the default output name ('planar' / 'linear')");
	println!("    -lin or --linear           Also output a linear 4-bit binary file");
	println!("    -s   or --silence          Silent mode");
	println!("    -j   or --jobs    <count>  Worker threads for encoding, defaults to 1");
	println!("    -h   or --help             Show this message");
	println!();
	println!("Output files are named '<name><suffix>.bin', suffix being '_spr16', '_tle8' or '_tle16'.");
	println!();
}
