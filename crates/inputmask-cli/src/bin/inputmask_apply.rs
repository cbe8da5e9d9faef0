// inputmask-apply: Mask values.
//
// Reads values from the arguments, or from stdin (one per line), and prints
// the masked value for each.
//
// Usage:
//   inputmask-apply --mask MASK [OPTIONS] [--] [VALUE...]
//
// Options:
//   -m, --mask MASK          Mask pattern, e.g. "(00) 00000-0000"
//   -r, --reverse            Scan right to left (currency masks)
//   -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]
//   --rejections             Also print rejected characters
//   -v, --verbose            Debug logging
//   -h, --help               Print help

use std::io::{self, Write};

use inputmask_engine::Mask;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if inputmask_cli::wants_help(&args) {
        println!("inputmask-apply: Mask values.");
        println!();
        println!("Usage: inputmask-apply --mask MASK [OPTIONS] [--] [VALUE...]");
        println!();
        println!("If VALUE arguments are given, masks each value.");
        println!("Otherwise reads values from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -m, --mask MASK          Mask pattern, e.g. \"(00) 00000-0000\"");
        println!("  -r, --reverse            Scan right to left (currency masks)");
        println!("  -t, --translation SPEC   Token override C=PATTERN[:optional|:recursive|:fallback=X]");
        println!("  --rejections             Also print rejected characters as R: lines");
        println!("  -v, --verbose            Debug logging");
        println!("  -h, --help               Print this help");
        println!();
        println!("Values starting with '-' go after --. Empty stdin lines are values too.");
        return;
    }

    let opts = inputmask_cli::parse_mask_args(&args).unwrap_or_else(|e| inputmask_cli::fatal(&e));
    inputmask_cli::init_logger(opts.verbose);

    let mut show_rejections = false;
    for flag in &opts.flags {
        match flag.as_str() {
            "--rejections" => show_rejections = true,
            other => inputmask_cli::unknown_option(other),
        }
    }
    let values = &opts.values;

    let table = opts.token_table().unwrap_or_else(|e| inputmask_cli::fatal(&e));
    let mask =
        Mask::new(&opts.mask, &table).unwrap_or_else(|e| inputmask_cli::fatal(&e.to_string()));
    let direction = opts.direction();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    inputmask_cli::for_each_value(values, |value| {
        let masked = mask.apply(value, direction);
        let _ = writeln!(out, "{}", masked.value);
        if show_rejections {
            for r in &masked.rejected {
                let _ = writeln!(out, "R: {} {:?} {}", r.position, r.character, r.expected);
            }
        }
    });
}
