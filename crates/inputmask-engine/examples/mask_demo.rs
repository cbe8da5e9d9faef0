// Quick demo: mask a few values and print clean values and rejections.
//
//   cargo run -p inputmask-engine --example mask_demo -- "(00) 00000-0000" 41999887766
use inputmask_core::enums::Direction;
use inputmask_engine::{Mask, TokenTable};

fn main() {
    let mut args = std::env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| "(00) 00000-0000".to_string());
    let mut values: Vec<String> = args.collect();
    if values.is_empty() {
        values = vec!["41999887766".into(), "4199".into(), "41a99".into()];
    }

    let table = TokenTable::default();
    let mask = Mask::new(&pattern, &table).expect("Failed to parse mask");
    let regex = mask.to_regex().expect("Failed to compile mask regex");
    println!("mask {:?}  regex /{}/", pattern, regex.as_str());

    for value in &values {
        let masked = mask.apply(value, Direction::Forward);
        let clean = mask.clean(value, Direction::Forward);
        println!(
            "\n{:15} → {:20} clean={:15} complete={}",
            value,
            masked.value,
            clean.value,
            regex.is_full_match(&masked.value)
        );
        for r in &masked.rejected {
            println!("  rejected {r}");
        }
    }
}
