use std::fs;
use std::io::{self, Read, Write};
use std::path;

use clap::Parser;

use sajs::event::{Event, Prefix};
use sajs::lexer::Lexer;
use sajs::writer::Writer;

const INDENT_UNIT: &[u8] = b"  ";

#[derive(Parser, Debug)]
#[command(name = "sajs")]
#[command(author, version, about = "Stream JSON through a byte-incremental lexer and writer", long_about = None)]
struct Settings {
    /// Suppress pretty-printing whitespace.
    #[arg(short = 't', long)]
    terse: bool,

    /// Redirect output to FILE instead of standard output.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<path::PathBuf>,

    /// Container-nesting stack size, in frames (one frame per byte in
    /// the original design, so this doubles as the byte-size knob).
    #[arg(short = 'k', long, value_name = "SIZE", default_value_t = 64)]
    stack_size: usize,

    /// Input file; reads standard input if omitted.
    input: Option<path::PathBuf>,
}

fn materialize_prefix(out: &mut dyn Write, prefix: Prefix, indent: usize, terse: bool) -> io::Result<()> {
    match prefix {
        Prefix::None => Ok(()),
        Prefix::ObjectStart | Prefix::ArrayStart | Prefix::ObjectEnd | Prefix::ArrayEnd => {
            if terse { Ok(()) } else { write_newline_indent(out, indent) }
        }
        Prefix::MemberColon => out.write_all(if terse { b":" } else { b": " }),
        Prefix::MemberComma | Prefix::ArrayComma => {
            out.write_all(b",")?;
            if terse { Ok(()) } else { write_newline_indent(out, indent) }
        }
    }
}

fn write_newline_indent(out: &mut dyn Write, indent: usize) -> io::Result<()> {
    out.write_all(b"\n")?;
    for _ in 0..indent {
        out.write_all(INDENT_UNIT)?;
    }
    Ok(())
}

fn run() -> anyhow::Result<i32> {
    let settings = Settings::parse();

    if settings.stack_size == 0 {
        anyhow::bail!("--stack-size must be a positive integer");
    }

    let mut input: Box<dyn Read> = match &settings.input {
        Some(path) => Box::new(fs::File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut output: Box<dyn Write> = match &settings.output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let mut lexer = Lexer::new(settings.stack_size)
        .ok_or_else(|| anyhow::anyhow!("failed to initialize the lexer with stack size {}", settings.stack_size))?;
    let mut writer = Writer::new();

    let mut top_level_values = 0usize;
    let mut input_bytes = input.bytes();

    loop {
        let c = match input_bytes.next() {
            Some(Ok(b)) => b as i32,
            Some(Err(e)) => return Err(e.into()),
            None => -1,
        };
        let at_eof = c < 0;

        let result = lexer.read_byte(c);
        if result.status.is_error() {
            eprintln!("error: {}", result.status);
            return Ok(result.status as i32 + 100);
        }

        if result.event != Event::Nothing {
            let text = writer.write(&result, lexer.bytes());
            if text.status.is_error() {
                eprintln!("error: {}", text.status);
                return Ok(text.status as i32 + 100);
            }
            materialize_prefix(output.as_mut(), text.prefix, text.indent, settings.terse)?;
            output.write_all(text.bytes())?;

            let completed_top_level_value = matches!(result.event, Event::End | Event::DoubleEnd) && lexer.depth() == 0;
            if completed_top_level_value {
                top_level_values += 1;
                output.write_all(b"\n")?;
            }
        }

        if at_eof {
            break;
        }
    }

    output.flush()?;

    if top_level_values != 1 {
        return Ok(65);
    }
    Ok(0)
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    };
    std::process::exit(exit_code);
}
