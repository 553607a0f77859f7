//! npyread CLI: decode a `.npy` file and report what it contains.

use std::{fs::File, io::BufReader, path::PathBuf, process};

use clap::Parser;
use serde::Serialize;

use npyread::data_type::{FloatSize, IntSize};
use npyread::prelude::*;

#[derive(Parser)]
#[command(name = "npyread")]
#[command(about = "Decode a NumPy .npy array file and report its shape")]
#[command(version)]
struct Cli {
    /// Element type to decode as: i8, i16, i32, i64, u8, u16, u32, u64, f32 or f64
    /// (defaults to the type stored in the file)
    #[arg(long = "type")]
    dtype: Option<String>,

    /// File to read
    #[arg(long)]
    file: PathBuf,

    /// Print a JSON summary instead of plain text
    #[arg(long)]
    json: bool,
}

fn parse_type_code(code: &str) -> Option<DataType> {
    use DataType::*;
    Some(match code {
        "i8" => Int(IntSize::b8),
        "i16" => Int(IntSize::b16),
        "i32" => Int(IntSize::b32),
        "i64" => Int(IntSize::b64),
        "u8" => UInt(IntSize::b8),
        "u16" => UInt(IntSize::b16),
        "u32" => UInt(IntSize::b32),
        "u64" => UInt(IntSize::b64),
        "f32" => Float(FloatSize::b32),
        "f64" => Float(FloatSize::b64),
        _ => return None,
    })
}

#[derive(Serialize)]
struct Summary<'a> {
    descr: String,
    data_type: DataType,
    endian: Endian,
    fortran_order: bool,
    shape: &'a [u64],
    len: usize,
}

fn main() {
    let cli = Cli::parse();

    let requested = match cli.dtype.as_deref().map(|c| (c, parse_type_code(c))) {
        Some((code, None)) => {
            eprintln!("Unrecognized datatype: {code}");
            process::exit(1);
        }
        Some((_, Some(dt))) => Some(dt),
        None => None,
    };

    let file = match File::open(&cli.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open file: {e}");
            process::exit(1);
        }
    };
    let mut reader = BufReader::new(file);

    let result = read_header(&mut reader).and_then(|header| {
        let descriptor = *header.descriptor();
        let arr = match requested {
            Some(dt) => header.read_data_as(&mut reader, dt)?,
            None => header.read_data_dyn(&mut reader)?,
        };
        Ok((descriptor, arr))
    });
    // the file is closed here on every path
    drop(reader);

    let (descriptor, arr) = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        let summary = Summary {
            descr: descriptor.to_string(),
            data_type: arr.data_type(),
            endian: descriptor.endian(),
            fortran_order: arr.metadata().fortran_order(),
            shape: arr.shape(),
            len: arr.len(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("Parsed {} elements with shape {:?}", arr.len(), arr.shape());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ten_codes() {
        let codes = [
            "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64",
        ];
        for code in codes {
            let dt = parse_type_code(code).unwrap_or_else(|| panic!("Rejected {code}"));
            assert_eq!(dt.nbits().to_string(), code[1..]);
        }
    }

    #[test]
    fn unknown_codes() {
        for code in ["", "i4", "f16", "int32", "c64", "I8"] {
            assert_eq!(parse_type_code(code), None);
        }
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::parse_from(["npyread", "--type", "f32", "--file", "a.npy"]);
        assert_eq!(cli.dtype.as_deref(), Some("f32"));
        assert_eq!(cli.file, PathBuf::from("a.npy"));
        assert!(!cli.json);

        assert!(Cli::try_parse_from(["npyread", "--type", "f32"]).is_err());
    }
}
