use clap::{Arg, Command};
use parsinorm::{Lexicon, ResourcePolicy};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m"; // Bold Blue
    const RESET: &str = "\x1B[0m"; // Reset color

    let matches = Command::new("Lexicon Generator")
        .about(format!(
            "{BLUE}Dict Generator: lexicon bundles from the text resources in a directory{RESET}"
        ))
        .after_help(
            "Examples:\n\
         \n\
         dict-generate --format cbor --output lexicon.cbor\n\
         dict-generate --input src/dicts --format zstd --output lexicon.zstd\n\
         \n\
         Bundles load with Lexicon::deserialize_from_cbor() / Lexicon::load_cbor_compressed().\n",
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("dir")
                .default_value("dicts")
                .help("Directory holding dic1.txt, dic2.txt, dic3.txt and the optional tables"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("format")
                .default_value("zstd")
                .value_parser(["zstd", "cbor", "json"])
                .help("Bundle format: [zstd|cbor|json]"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(clap::ArgAction::SetTrue)
                .help("Pretty-print JSON when --format json"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(clap::ArgAction::SetTrue)
                .help("Fail if any resource file is missing"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("filename")
                .help("Write the bundle to <filename>. If not specified, a default filename is used."),
        )
        .get_matches();

    let dict_dir = Path::new(matches.get_one::<String>("input").map(String::as_str).unwrap_or("dicts"));
    if !dict_dir.exists() {
        eprintln!(
            "{BLUE}Resource directory '{}' not found.{RESET}\n\
         Please place the lexicon resources (dic1.txt, zwnj_table.tsv, ...) under it.",
            dict_dir.display()
        );
        return Ok(());
    }

    let dict_format = matches.get_one::<String>("format").map(String::as_str);
    let pretty_json = matches.get_flag("pretty");
    let policy = if matches.get_flag("strict") {
        ResourcePolicy::strict()
    } else {
        ResourcePolicy::default()
    };

    let default_output = match dict_format {
        Some("zstd") => "lexicon.zstd",
        Some("cbor") => "lexicon.cbor",
        Some("json") => "lexicon.json",
        _ => "lexicon.unknown",
    };

    let output_file = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or(default_output);

    match dict_format {
        Some("zstd") => {
            let lexicon = Lexicon::from_dir(dict_dir, policy)?;
            lexicon.save_cbor_compressed(output_file)?;
            eprintln!("{BLUE}Lexicon saved in ZSTD format at: {output_file}{RESET}");
        }
        Some("cbor") => {
            let lexicon = Lexicon::from_dir(dict_dir, policy)?;
            lexicon.serialize_to_cbor(output_file)?;
            eprintln!("{BLUE}Lexicon saved in CBOR format at: {output_file}{RESET}");
        }
        Some("json") => {
            let lexicon = Lexicon::from_dir(dict_dir, policy)?;
            write_json(&lexicon, output_file, pretty_json)?;
            let style = if pretty_json { "pretty" } else { "compact" };
            eprintln!("{BLUE}Lexicon saved in JSON ({style}) at: {output_file}{RESET}");
        }
        other => {
            let format_str = other.unwrap_or("unknown");
            eprintln!("{BLUE}Unsupported format: {format_str}{RESET}");
        }
    }

    Ok(())
}

fn write_json(lexicon: &Lexicon, path: impl AsRef<Path>, pretty: bool) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut w, lexicon).map_err(to_io)?;
    } else {
        serde_json::to_writer(&mut w, lexicon).map_err(to_io)?;
        // newline for POSIX-y tools
        w.write_all(b"\n")?;
    }
    w.flush()
}

fn to_io<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}
