// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Command line access to point cloud files.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use geocloud_core::PointCloudConfig;
use geocloud_persistence::FileFormat;
use geocloud_sub_tracing::Format;
use geocloud_type::{Error, IntoDiagnostic};
use tracing::{Level, error};

mod commands;

/// Inspect and convert point cloud files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Log debug events
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Log as JSON lines
	#[arg(long, global = true)]
	json: bool,

	/// Value treated as missing in attribute statistics
	#[arg(long, global = true)]
	no_data: Option<f64>,

	/// Rows sampled per attribute for statistics, 0 for all
	#[arg(long, global = true, default_value_t = 0)]
	max_samples: usize,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the fields, extent and statistics of a point cloud
	Info {
		path: PathBuf,
	},
	/// Print the header side file of a point cloud
	Header {
		path: PathBuf,
	},
	/// Load a point cloud and save it again
	Convert {
		input: PathBuf,
		output: PathBuf,
		/// Overrides the format implied by the output extension
		#[arg(long, value_enum)]
		format: Option<OutputFormat>,
	},
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
	Plain,
	Compressed,
}

impl From<OutputFormat> for FileFormat {
	fn from(format: OutputFormat) -> Self {
		match format {
			OutputFormat::Plain => FileFormat::Plain,
			OutputFormat::Compressed => FileFormat::Compressed,
		}
	}
}

fn main() -> ExitCode {
	let args = Args::parse();

	let level = if args.verbose {
		Level::DEBUG
	} else {
		Level::INFO
	};
	let format = if args.json {
		Format::Json
	} else {
		Format::Text
	};
	geocloud_sub_tracing::init_with(|builder| builder.level(level).format(format));

	let mut config = PointCloudConfig::new().max_samples(args.max_samples);
	if let Some(no_data) = args.no_data {
		config = config.no_data_value(no_data);
	}

	let result = match &args.command {
		Command::Info {
			path,
		} => commands::info(path, config),
		Command::Header {
			path,
		} => commands::header(path),
		Command::Convert {
			input,
			output,
			format,
		} => commands::convert(input, output, format.map(FileFormat::from), config),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			let status = failure_status(&err);
			let diagnostic = err.into_diagnostic();
			error!(code = %diagnostic.code, "{}", diagnostic.message);
			if let Some(help) = diagnostic.help {
				eprintln!("help: {help}");
			}
			ExitCode::from(status)
		}
	}
}

/// Exit status for a failed command: 2 when the input file is malformed.
fn failure_status(err: &Error) -> u8 {
	if err.is_malformed_input() {
		2
	} else {
		1
	}
}
