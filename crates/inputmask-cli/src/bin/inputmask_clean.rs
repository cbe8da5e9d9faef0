// inputmask-clean: Strip mask literals from values.
//
// Reads values from the arguments, or from stdin (one per line), and prints
// the clean value for each: the characters the mask's tokens accept, without
// literals.
//
// Usage:
//   inputmask-clean --mask MASK [OPTIONS] [--] [VALUE...]
//
// Options:
//   -m, --mask MASK          Mask pattern, e.g. "000.000.000-00"
//   -r, --reverse            Scan right to left (currency masks)
//   -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]
//   -v, --verbose            Debug logging
//   -h, --help               Print help

use std::io::{self, Write};

use inputmask_engine::Mask;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if inputmask_cli::wants_help(&args) {
        println!("inputmask-clean: Strip mask literals from values.");
        println!();
        println!("Usage: inputmask-clean --mask MASK [OPTIONS] [--] [VALUE...]");
        println!();
        println!("If VALUE arguments are given, cleans each value.");
        println!("Otherwise reads values from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -m, --mask MASK          Mask pattern, e.g. \"000.000.000-00\"");
        println!("  -r, --reverse            Scan right to left (currency masks)");
        println!("  -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]");
        println!("  -v, --verbose            Debug logging");
        println!("  -h, --help               Print this help");
        println!();
        println!("Values starting with '-' go after --. Empty stdin lines are values too.");
        return;
    }

    let opts = inputmask_cli::parse_mask_args(&args).unwrap_or_else(|e| inputmask_cli::fatal(&e));
    inputmask_cli::init_logger(opts.verbose);

    if let Some(flag) = opts.flags.first() {
        inputmask_cli::unknown_option(flag);
    }

    let table = opts.token_table().unwrap_or_else(|e| inputmask_cli::fatal(&e));
    let mask =
        Mask::new(&opts.mask, &table).unwrap_or_else(|e| inputmask_cli::fatal(&e.to_string()));
    let direction = opts.direction();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    inputmask_cli::for_each_value(&opts.values, |value| {
        let _ = writeln!(out, "{}", mask.clean(value, direction).value);
    });
}
