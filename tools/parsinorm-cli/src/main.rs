use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};

use clap::{Arg, ArgAction, Command};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use tracing::debug;

use parsinorm::{Normalizer, NormalizerConfig};

const MODE_LIST: [&str; 2] = ["normalize", "pinglish"];

fn read_input(input: &mut dyn Read, is_console: bool) -> Result<Vec<u8>, io::Error> {
    let mut buffer = Vec::new();

    if is_console {
        let mut chunk = [0; 1024];
        while let Ok(bytes_read) = input.read(&mut chunk) {
            if bytes_read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..bytes_read]);
        }
    } else {
        input.read_to_end(&mut buffer)?;
    }

    Ok(buffer)
}

fn decode_input(buffer: &[u8], in_enc: &str) -> Result<String, io::Error> {
    match in_enc {
        "UTF-8" => Ok(String::from_utf8_lossy(buffer).into_owned()),
        _ => {
            let encoding = Encoding::for_label(in_enc.as_bytes()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unsupported input encoding: {}", in_enc),
                )
            })?;
            let mut decoder = DecodeReaderBytesBuilder::new()
                .encoding(Some(encoding))
                .build(buffer);
            let mut decoded = String::new();
            decoder.read_to_string(&mut decoded)?;
            Ok(decoded)
        }
    }
}

fn encode_and_write_output(output_str: &str, out_enc: &str, output: &mut dyn Write) -> Result<(), io::Error> {
    match out_enc {
        "UTF-8" => write!(output, "{}", output_str),
        _ => {
            let encoding = Encoding::for_label(out_enc.as_bytes()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unsupported output encoding: {}", out_enc),
                )
            })?;
            let (encoded_bytes, _, _) = encoding.encode(output_str);
            output.write_all(&encoded_bytes)
        }
    }
}

fn remove_utf8_bom(input: &mut Vec<u8>) {
    if input.starts_with(&[0xEF, 0xBB, 0xBF]) {
        input.drain(0..3);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m";
    const RESET: &str = "\x1B[0m";

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = Command::new("parsinorm")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .help("Read original text from <file>."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write converted text to <file>."),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("mode")
                .default_value("normalize")
                .help("Operation: [normalize|pinglish]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("file")
                .help("JSON normalizer configuration."),
        )
        .arg(
            Arg::new("reference")
                .short('r')
                .long("reference")
                .value_name("file")
                .help("Persian reference text for --mode pinglish, one sentence per input line."),
        )
        .arg(
            Arg::new("per_line")
                .long("per-line")
                .action(ArgAction::SetTrue)
                .help("Normalize each line separately (batch mode)."),
        )
        .arg(
            Arg::new("in_enc")
                .long("in-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for input: UTF-8|windows-1256|ISO-8859-6|UTF-16LE"),
        )
        .arg(
            Arg::new("out_enc")
                .long("out-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for output: UTF-8|windows-1256|ISO-8859-6"),
        )
        .about(format!(
            "{BLUE}parsinorm: Persian text normalizer and Pinglish transliterator{RESET}"
        ))
        .get_matches();

    let input_file = matches.get_one::<String>("input");
    let output_file = matches.get_one::<String>("output");
    let mode = matches
        .get_one::<String>("mode")
        .map(String::as_str)
        .unwrap_or("normalize");
    if !MODE_LIST.contains(&mode) {
        eprintln!("Invalid mode: {}", mode);
        eprintln!("Valid modes: {:?}", MODE_LIST);
        return Ok(());
    }
    let in_enc = matches
        .get_one::<String>("in_enc")
        .map(String::as_str)
        .unwrap_or("UTF-8");
    let out_enc = matches
        .get_one::<String>("out_enc")
        .map(String::as_str)
        .unwrap_or("UTF-8");

    let mut input: Box<dyn Read> = match input_file {
        Some(file_name) => Box::new(BufReader::new(File::open(file_name)?)),
        None => {
            if io::stdin().is_terminal() {
                println!("{BLUE}Input text to convert, <ctrl-z> or <ctrl-d> to submit:{RESET}");
            }
            Box::new(io::stdin())
        }
    };

    let is_console = input_file.is_none();
    let mut buffer = read_input(&mut *input, is_console)?;
    if in_enc == "UTF-8" {
        remove_utf8_bom(&mut buffer);
    }
    let input_str = decode_input(&buffer, in_enc)?;

    let output_str = match mode {
        "pinglish" => {
            let references = match matches.get_one::<String>("reference") {
                Some(path) => fs::read_to_string(path)?,
                None => String::new(),
            };
            let mut references = references.lines();
            input_str
                .lines()
                .map(|line| {
                    let reference = references.next().filter(|r| !r.trim().is_empty());
                    parsinorm::pinglish::pinglish_to_persian(line, reference)
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        _ => {
            let config = match matches.get_one::<String>("config") {
                Some(path) => NormalizerConfig::from_json_file(path)?,
                None => NormalizerConfig::default(),
            };
            debug!(?config, "normalizer config");
            let normalizer = Normalizer::with_config(config)?;
            if matches.get_flag("per_line") {
                let lines: Vec<&str> = input_str.lines().collect();
                normalizer.normalize_batch(lines.as_slice()).join("\n")
            } else {
                normalizer.normalize(&input_str)
            }
        }
    };

    let mut output = BufWriter::new(match output_file {
        Some(file_name) => Box::new(File::create(file_name)?) as Box<dyn Write>,
        None => Box::new(io::stdout()) as Box<dyn Write>,
    });
    encode_and_write_output(&output_str, out_enc, &mut output)?;
    writeln!(output)?;
    output.flush()?;

    let source = input_file.map_or("<stdin>", String::as_str);
    let target = output_file.map_or("stdout", String::as_str);
    eprintln!("{BLUE}Done ({mode}): {source} -> {target}{RESET}");

    Ok(())
}
