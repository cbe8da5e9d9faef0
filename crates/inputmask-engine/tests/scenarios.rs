//! Golden scenarios and whole-mask properties.
//!
//! Run: cargo test -p inputmask-engine --test scenarios

use std::path::PathBuf;

use inputmask_core::enums::Direction;
use inputmask_core::text::char_len;
use inputmask_engine::{Mask, MaskSpec, TokenTable};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Golden file
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    mask: String,
    #[serde(default)]
    reverse: bool,
    input: String,
    masked: String,
    clean: String,
    rejected: usize,
}

fn load_scenarios() -> Vec<Scenario> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/scenarios.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

#[test]
fn golden_scenarios() {
    let table = TokenTable::default();
    let scenarios = load_scenarios();
    assert!(!scenarios.is_empty());

    let mut failures = Vec::new();
    for s in &scenarios {
        let mask = Mask::new(&s.mask, &table)
            .unwrap_or_else(|e| panic!("{}: bad mask {:?}: {}", s.name, s.mask, e));
        let direction = Direction::from_reverse(s.reverse);

        let masked = mask.apply(&s.input, direction);
        if masked.value != s.masked {
            failures.push(format!("{}: masked {:?}, expected {:?}", s.name, masked.value, s.masked));
        }
        if masked.rejected.len() != s.rejected {
            failures.push(format!(
                "{}: {} rejections, expected {}",
                s.name,
                masked.rejected.len(),
                s.rejected
            ));
        }

        let clean = mask.clean(&s.input, direction);
        if clean.value != s.clean {
            failures.push(format!("{}: clean {:?}, expected {:?}", s.name, clean.value, s.clean));
        }

        let regex = mask.to_regex().unwrap();
        // Complete values fill every token; recursive masks may fill more.
        let complete = s.rejected == 0 && char_len(&s.clean) >= mask.token_count();
        if complete && !regex.is_full_match(&s.masked) {
            failures.push(format!("{}: {:?} does not match /{}/", s.name, s.masked, regex.as_str()));
        }
    }

    assert!(failures.is_empty(), "golden mismatches:\n{}", failures.join("\n"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const DIGIT_MASKS: &[&str] = &["(00) 00000-0000", "000.000.000-00", "00/00/0000", "00000-000"];

const INPUTS: &[&str] = &[
    "",
    "4",
    "41999887766",
    "4a1b9",
    "(41) 999",
    "12 34 56",
    "999887766554433",
    "--12--",
    "abc",
];

#[test]
fn mask_then_unmask_extracts_token_characters() {
    let table = TokenTable::default();
    for pattern in DIGIT_MASKS {
        let mask = Mask::new(pattern, &table).unwrap();
        for input in INPUTS {
            let masked = mask.apply(input, Direction::Forward).value;
            let clean = mask.clean(&masked, Direction::Forward).value;
            let expected: String = input
                .chars()
                .filter(char::is_ascii_digit)
                .take(mask.token_count())
                .collect();
            assert_eq!(clean, expected, "mask {pattern:?}, input {input:?}");
        }
    }
}

#[test]
fn clean_value_has_no_fabricated_literals() {
    let table = TokenTable::default();
    for pattern in DIGIT_MASKS {
        let mask = Mask::new(pattern, &table).unwrap();
        for input in INPUTS {
            let clean = mask.clean(input, Direction::Forward).value;
            assert!(clean.chars().all(|c| c.is_ascii_digit()), "{pattern:?} / {input:?} -> {clean:?}");
        }
    }
}

#[test]
fn rejection_positions_index_the_raw_value() {
    let table = TokenTable::default();
    for pattern in DIGIT_MASKS.iter().chain(["SS-0000", "#.##0,00"].iter()) {
        let mask = Mask::new(pattern, &table).unwrap();
        for input in INPUTS {
            for direction in [Direction::Forward, Direction::Reverse] {
                let chars: Vec<char> = input.chars().collect();
                for r in mask.apply(input, direction).rejected {
                    assert!(r.position < chars.len());
                    assert_eq!(chars[r.position], r.character);
                }
            }
        }
    }
}

#[test]
fn symmetric_masks_agree_across_directions() {
    let table = TokenTable::default();
    for (pattern, input) in [("00-00", "1234"), ("000 000", "123456"), ("0.0.0", "123")] {
        let mask = Mask::new(pattern, &table).unwrap();
        assert_eq!(
            mask.apply(input, Direction::Forward).value,
            mask.apply(input, Direction::Reverse).value,
            "{pattern:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Dynamic masks
// ---------------------------------------------------------------------------

fn phone_spec() -> MaskSpec {
    MaskSpec::dynamic(|value| {
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if digits == 11 {
            "(00) 00000-0000".to_string()
        } else {
            "(00) 0000-00009".to_string()
        }
    })
}

#[test]
fn dynamic_mask_switches_without_losing_digits() {
    let table = TokenTable::default();
    let spec = phone_spec();
    let mut value = String::new();

    for (typed, digit) in "41999887766".chars().enumerate() {
        value.push(digit);
        let pattern = spec.resolve(&value);
        let mask = Mask::new(&pattern, &table).unwrap();
        value = mask.apply(&value, Direction::Forward).value;
        let kept = value.chars().filter(char::is_ascii_digit).count();
        assert_eq!(kept, typed + 1, "lost digits at {value:?}");
    }

    assert_eq!(value, "(41) 99988-7766");

    let pattern = spec.resolve(&value);
    let mask = Mask::new(&pattern, &table).unwrap();
    assert_eq!(mask.clean(&value, Direction::Forward).value, "41999887766");
}

#[test]
fn dynamic_mask_ten_digits() {
    let table = TokenTable::default();
    let spec = phone_spec();
    let pattern = spec.resolve("4199988776");
    let mask = Mask::new(&pattern, &table).unwrap();
    assert_eq!(mask.apply("4199988776", Direction::Forward).value, "(41) 9998-8776");
}
