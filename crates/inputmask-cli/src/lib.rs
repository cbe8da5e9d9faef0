// inputmask-cli: shared utilities for CLI tools.

use std::io::{self, BufRead};
use std::process;

use inputmask_core::enums::Direction;
use inputmask_engine::{TokenSpec, TokenTable};

/// Options shared by every inputmask tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskArgs {
    /// Mask pattern (`--mask`).
    pub mask: String,
    /// Scan right to left (`--reverse`).
    pub reverse: bool,
    /// Token overrides (`--translation`), later entries win.
    pub translation: Vec<(char, TokenSpec)>,
    /// Debug logging (`-v`).
    pub verbose: bool,
    /// Options not consumed here, left for the tool to interpret.
    pub flags: Vec<String>,
    /// Positional values. Everything after `--` is a value, even when it
    /// starts with `-`.
    pub values: Vec<String>,
}

impl MaskArgs {
    pub fn direction(&self) -> Direction {
        Direction::from_reverse(self.reverse)
    }

    /// The default token table with the `--translation` overrides merged in.
    pub fn token_table(&self) -> Result<TokenTable, String> {
        let mut table = TokenTable::default();
        for (c, spec) in &self.translation {
            let token = spec.build(*c).map_err(|e| e.to_string())?;
            log::debug!(target: "inputmask.cli", "token {c:?} -> {}", token.pattern());
            table.insert(*c, token);
        }
        Ok(table)
    }
}

/// Parse the shared options out of `args`.
///
/// Accepts `--mask M`, `--mask=M`, `-m M`, `--reverse`, `-r`,
/// `--translation SPEC` (repeatable), `--translation=SPEC`, `-v`,
/// `--verbose`. Other options go to `flags`, other arguments to `values`.
/// `--` ends option parsing.
pub fn parse_mask_args(args: &[String]) -> Result<MaskArgs, String> {
    let mut parsed = MaskArgs::default();
    let mut mask = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--mask=") {
            mask = Some(val.to_string());
        } else if let Some(val) = arg.strip_prefix("--translation=") {
            parsed.translation.push(parse_translation(val)?);
        } else {
            match arg.as_str() {
                "--mask" | "-m" => {
                    let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
                    mask = Some(val.clone());
                }
                "--translation" | "-t" => {
                    let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
                    parsed.translation.push(parse_translation(val)?);
                }
                "--reverse" | "-r" => parsed.reverse = true,
                "--verbose" | "-v" => parsed.verbose = true,
                "--" => {
                    parsed.values.extend(iter.by_ref().cloned());
                }
                s if s.len() > 1 && s.starts_with('-') => parsed.flags.push(arg.clone()),
                _ => parsed.values.push(arg.clone()),
            }
        }
    }

    parsed.mask = mask.ok_or("--mask is required")?;
    Ok(parsed)
}

/// Parse a token override: `C=PATTERN[:optional][:recursive][:fallback=X]`.
///
/// Modifiers are stripped from the end, so patterns may contain `:`.
pub fn parse_translation(s: &str) -> Result<(char, TokenSpec), String> {
    let (key, mut pattern) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid translation {s:?}: expected C=PATTERN"))?;
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(format!("invalid translation {s:?}: token must be one character"));
    };

    let mut spec = TokenSpec::new("");
    while let Some((head, modifier)) = pattern.rsplit_once(':') {
        match modifier {
            "optional" => spec.optional = true,
            "recursive" => spec.recursive = true,
            m if m.starts_with("fallback=") => {
                let mut fb = m["fallback=".len()..].chars();
                match (fb.next(), fb.next()) {
                    (Some(f), None) => spec.fallback = Some(f),
                    _ => return Err(format!("invalid fallback in {s:?}: expected one character")),
                }
            }
            _ => break,
        }
        pattern = head;
    }
    if pattern.is_empty() {
        return Err(format!("invalid translation {s:?}: empty pattern"));
    }
    spec.pattern = pattern.to_string();
    Ok((c, spec))
}

/// Call `f` for each value: the arguments if any, otherwise stdin lines.
pub fn for_each_value(values: &[String], mut f: impl FnMut(&str)) {
    if !values.is_empty() {
        for value in values {
            f(value);
        }
        return;
    }
    for_each_line(io::stdin().lock(), f);
}

/// Call `f` for each line of `reader`. Empty lines are values too, so output
/// stays aligned with input.
pub fn for_each_line(reader: impl BufRead, mut f: impl FnMut(&str)) {
    for line in reader.lines() {
        match line {
            Ok(line) => f(&line),
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        }
    }
}

/// Report an option the tool does not know and exit.
pub fn unknown_option(flag: &str) -> ! {
    fatal(&format!("unknown option {flag} (use -- before values starting with '-')"))
}

/// Install the logger. `RUST_LOG` wins; otherwise `-v` selects `debug`.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args before any `--`.
pub fn wants_help(args: &[String]) -> bool {
    args.iter()
        .take_while(|a| *a != "--")
        .any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn shared_options() {
        let parsed =
            parse_mask_args(&args(&["-m", "#.##0,00", "-r", "--rejections", "123"])).unwrap();
        assert_eq!(parsed.mask, "#.##0,00");
        assert!(parsed.reverse);
        assert_eq!(parsed.direction(), Direction::Reverse);
        assert_eq!(parsed.flags, args(&["--rejections"]));
        assert_eq!(parsed.values, args(&["123"]));
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed =
            parse_mask_args(&args(&["-m", "#0,00", "--", "-12", "--reverse", "-"])).unwrap();
        assert!(!parsed.reverse);
        assert!(parsed.flags.is_empty());
        assert_eq!(parsed.values, args(&["-12", "--reverse", "-"]));

        let parsed = parse_mask_args(&args(&["-m", "00", "-12"])).unwrap();
        assert_eq!(parsed.flags, args(&["-12"]));
        assert!(parsed.values.is_empty());
    }

    #[test]
    fn help_before_double_dash_only() {
        assert!(wants_help(&args(&["-m", "00", "-h"])));
        assert!(!wants_help(&args(&["-m", "00", "--", "-h"])));
    }

    #[test]
    fn empty_lines_are_values() {
        let mut seen = Vec::new();
        for_each_line(io::Cursor::new("12\n\n34\n"), |v| seen.push(v.to_string()));
        assert_eq!(seen, ["12", "", "34"]);
    }

    #[test]
    fn mask_is_required() {
        assert!(parse_mask_args(&args(&["123"])).is_err());
        assert!(parse_mask_args(&args(&["--mask"])).is_err());
        assert_eq!(parse_mask_args(&args(&["--mask=00"])).unwrap().mask, "00");
    }

    #[test]
    fn translation_modifiers() {
        let (c, spec) = parse_translation("Z=[xyz]:optional:fallback=x").unwrap();
        assert_eq!(c, 'Z');
        assert_eq!(spec.pattern, "[xyz]");
        assert!(spec.optional && !spec.recursive);
        assert_eq!(spec.fallback, Some('x'));

        let (_, spec) = parse_translation("L=[[:alpha:]]:recursive").unwrap();
        assert_eq!(spec.pattern, "[[:alpha:]]");
        assert!(spec.recursive);
    }

    #[test]
    fn bad_translations() {
        assert!(parse_translation("Z").is_err());
        assert!(parse_translation("ZZ=[a-z]").is_err());
        assert!(parse_translation("Z=").is_err());
        assert!(parse_translation("Z=[a-z]:fallback=ab").is_err());
    }

    #[test]
    fn translation_overrides_defaults() {
        let parsed = parse_mask_args(&args(&["--mask", "00", "-t", "0=[a-f]"])).unwrap();
        let table = parsed.token_table().unwrap();
        assert!(table.get('0').unwrap().matches('c'));
        assert!(!table.get('0').unwrap().matches('1'));

        let parsed = parse_mask_args(&args(&["--mask", "00", "-t", "0=[a-"])).unwrap();
        assert!(parsed.token_table().is_err());
    }
}
