// inputmask-check: Check values against a mask.
//
// Prints "M: value" for values that match the mask's regex as a whole and
// "N: value" for the rest. With --regex, prints the compiled regex first.
//
// Usage:
//   inputmask-check --mask MASK [OPTIONS] [--] [VALUE...]
//
// Options:
//   -m, --mask MASK          Mask pattern, e.g. "00/00/0000"
//   -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]
//   --regex                  Print the compiled regex source
//   -v, --verbose            Debug logging
//   -h, --help               Print help

use std::io::{self, Write};

use inputmask_engine::Mask;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if inputmask_cli::wants_help(&args) {
        println!("inputmask-check: Check values against a mask.");
        println!();
        println!("Usage: inputmask-check --mask MASK [OPTIONS] [--] [VALUE...]");
        println!();
        println!("Prints M: for values that fully match the mask, N: otherwise.");
        println!("If no VALUE arguments are given, reads values from stdin.");
        println!();
        println!("Options:");
        println!("  -m, --mask MASK          Mask pattern, e.g. \"00/00/0000\"");
        println!("  -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]");
        println!("  --regex                  Print the compiled regex source");
        println!("  -v, --verbose            Debug logging");
        println!("  -h, --help               Print this help");
        println!();
        println!("Values starting with '-' go after --. Empty stdin lines are values too.");
        return;
    }

    let opts = inputmask_cli::parse_mask_args(&args).unwrap_or_else(|e| inputmask_cli::fatal(&e));
    inputmask_cli::init_logger(opts.verbose);

    let mut show_regex = false;
    for flag in &opts.flags {
        match flag.as_str() {
            "--regex" => show_regex = true,
            other => inputmask_cli::unknown_option(other),
        }
    }
    let values = &opts.values;

    let table = opts.token_table().unwrap_or_else(|e| inputmask_cli::fatal(&e));
    let mask =
        Mask::new(&opts.mask, &table).unwrap_or_else(|e| inputmask_cli::fatal(&e.to_string()));
    let regex = mask
        .to_regex()
        .unwrap_or_else(|e| inputmask_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if show_regex {
        let _ = writeln!(out, "{}", regex.as_str());
        if values.is_empty() {
            return;
        }
    }

    inputmask_cli::for_each_value(values, |value| {
        let tag = if regex.is_full_match(value) { 'M' } else { 'N' };
        let _ = writeln!(out, "{tag}: {value}");
    });
}
