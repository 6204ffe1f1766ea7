use webshim::reexports::ct_codecs::{Encoder, Hex};
use webshim::{DigestEncoding, Environment, HostCapabilities, ShimError};

#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs::File;
use std::io::{self, prelude::*};

fn read_input(input_file: Option<&str>, data: Option<&str>) -> Result<String, ShimError> {
    if let Some(data) = data {
        return Ok(data.to_string());
    }
    let mut bin = vec![];
    match input_file {
        Some(input_file) => File::open(input_file)?.read_to_end(&mut bin)?,
        None => io::stdin().read_to_end(&mut bin)?,
    };
    Ok(std::str::from_utf8(&bin)?.to_string())
}

fn write_output(output_file: Option<&str>, text: &str) -> Result<(), ShimError> {
    match output_file {
        Some(output_file) => File::create(output_file)?.write_all(text.as_bytes())?,
        None => writeln!(io::stdout(), "{}", text)?,
    }
    Ok(())
}

fn start() -> Result<(), ShimError> {
    let matches = command!()
        .arg(
            Arg::new("in")
                .value_name("input_file")
                .long("input-file")
                .short('i')
                .takes_value(true)
                .help("Input file (default: standard input)"),
        )
        .arg(
            Arg::new("data")
                .value_name("text")
                .long("data")
                .short('D')
                .takes_value(true)
                .help("Input text, instead of a file"),
        )
        .arg(
            Arg::new("out")
                .value_name("output_file")
                .long("output-file")
                .short('o')
                .takes_value(true)
                .help("Output file (default: standard output)"),
        )
        .arg(
            Arg::new("action")
                .long("action")
                .short('a')
                .value_name("action (hash, hmac, encode, decode, uuid, random, polyfills)")
                .takes_value(true)
                .required(true)
                .help("Action"),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('A')
                .value_name("md5, sha1, sha256, sha512")
                .takes_value(true)
                .default_value("sha256")
                .help("Hash or HMAC algorithm"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .short('e')
                .value_name("hex, base64")
                .takes_value(true)
                .default_value("hex")
                .help("Digest encoding"),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .short('k')
                .value_name("key")
                .takes_value(true)
                .help("HMAC key"),
        )
        .arg(
            Arg::new("codec")
                .long("codec")
                .short('c')
                .value_name("base64, hex, url, uri, uri-component")
                .takes_value(true)
                .default_value("base64")
                .help("Codec used by encode and decode"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_name("count")
                .takes_value(true)
                .default_value("16")
                .help("Number of random bytes"),
        )
        .arg(
            Arg::new("host")
                .long("host-provides")
                .short('H')
                .value_name("global names")
                .takes_value(true)
                .help("Comma-separated globals already provided by the host"),
        )
        .arg(Arg::new("verbose").short('v').help("Verbose output"))
        .arg(Arg::new("debug").short('d').help("Debug information"))
        .get_matches();

    let input_file = matches.value_of("in");
    let data = matches.value_of("data");
    let output_file = matches.value_of("out");
    let action = matches
        .value_of("action")
        .ok_or(ShimError::UsageError("Action required"))?;
    let verbose = matches.is_present("verbose");
    let debug = matches.is_present("debug");

    env_logger::builder()
        .format_timestamp(None)
        .format_level(false)
        .format_module_path(false)
        .format_target(false)
        .filter_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let host = match matches.value_of("host") {
        None => HostCapabilities::none(),
        Some(names) => HostCapabilities::parse(names)?,
    };
    let env = Environment::install(&host);
    let algorithm = matches.value_of("algorithm").unwrap_or("sha256");
    let encoding = DigestEncoding::from_name(matches.value_of("encoding").unwrap_or("hex"));

    match action {
        "hash" => {
            let input = read_input(input_file, data)?;
            let mut h = env.crypto_utils().create_hash(algorithm);
            h.update(input);
            write_output(output_file, &h.digest_encoded(encoding)?)?;
        }
        "hmac" => {
            let key = matches
                .value_of("key")
                .ok_or(ShimError::UsageError("Missing HMAC key"))?;
            let input = read_input(input_file, data)?;
            let mut mac = env.crypto_utils().create_hmac(algorithm, key);
            mac.update(input);
            write_output(output_file, &mac.digest_encoded(encoding)?)?;
        }
        "encode" => {
            let input = read_input(input_file, data)?;
            let utils = env.crypto_utils();
            let encoded = match matches.value_of("codec").unwrap_or("base64") {
                "base64" => env.btoa(input)?,
                "hex" => utils.hex_encode(input)?,
                "url" => utils.url_encode(input)?,
                "uri" => env.encode_uri(input)?,
                "uri-component" => env.encode_uri_component(input)?,
                _ => return Err(ShimError::UsageError("Unknown codec")),
            };
            write_output(output_file, &encoded)?;
        }
        "decode" => {
            let input = read_input(input_file, data)?;
            let input = input.trim_end_matches(['\r', '\n']);
            let utils = env.crypto_utils();
            let decoded = match matches.value_of("codec").unwrap_or("base64") {
                "base64" => env.atob(input)?,
                "hex" => utils.hex_decode(input)?,
                "url" => utils.url_decode(input)?,
                "uri" => env.decode_uri(input)?,
                "uri-component" => env.decode_uri_component(input)?,
                _ => return Err(ShimError::UsageError("Unknown codec")),
            };
            write_output(output_file, &decoded)?;
        }
        "uuid" => {
            write_output(output_file, &env.crypto().random_uuid()?)?;
        }
        "random" => {
            let count: usize = matches
                .value_of("count")
                .unwrap_or("16")
                .parse()
                .map_err(|_| ShimError::InvalidArgument)?;
            let mut values = vec![0u8; count];
            env.crypto().get_random_values(&mut values)?;
            let hex = Hex::encode_to_string(&values)
                .map_err(|_| ShimError::InternalError("hex encoding".to_string()))?;
            write_output(output_file, &hex)?;
        }
        "polyfills" => {
            let installed = env.installed();
            if installed.is_empty() {
                println!("The host provides everything: no polyfills installed.");
            } else {
                println!("Installed polyfills:");
                for capability in installed {
                    println!("  - {}", capability);
                }
            }
            if verbose {
                println!("\nGlobal names:");
                for name in env.global_names() {
                    println!("  - {}", name);
                }
            }
        }
        _ => {
            return Err(ShimError::UsageError("Unknown action"));
        }
    }
    Ok(())
}

fn main() -> Result<(), ShimError> {
    let res = start();
    match res {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
