//! Command-line front end for the `lzpi` codec.
//!
//! Reads an octet stream from standard input and writes the transformed
//! stream to standard output. With no arguments the input is compressed;
//! with `-d` or `--decompress` it is decompressed.

#![forbid(unsafe_code)]

use std::env;
use std::ffi::OsStr;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use lzpi::{compress, decompress, CodecError};

fn main() -> ExitCode {
    let args: Vec<_> = env::args_os().collect();
    let name = program_name(args.first().map(OsStr::new));

    let result = match args.len() {
        1 => run(Mode::Compress),
        2 if args[1] == "-d" || args[1] == "--decompress" => run(Mode::Decompress),
        _ => return usage(&name),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{name}: {err}");
            ExitCode::from(err.os_error() as u8)
        }
    }
}

enum Mode {
    Compress,
    Decompress,
}

fn run(mode: Mode) -> Result<(), CodecError> {
    let input = BufReader::new(io::stdin().lock());
    let mut output = BufWriter::new(io::stdout().lock());

    match mode {
        Mode::Compress => compress(input, &mut output)?,
        Mode::Decompress => decompress(input, &mut output)?,
    }

    output.flush().map_err(CodecError::Write)
}

/// Basename of the invoked executable, for usage and diagnostics.
fn program_name(argv0: Option<&OsStr>) -> String {
    argv0
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

fn usage(name: &str) -> ExitCode {
    eprintln!(
        "Usage:\t\t{name} [-d | --decompress]\n\n\
         Example:\ttar -c archive | {name} >archive.tar.lzpi\n\
         \t\t{name} <archive.tar.lzpi | tar -x\n\
         \t\t{name} -d <archive.tar.lzpi >archive.tar"
    );
    ExitCode::from(1)
}
