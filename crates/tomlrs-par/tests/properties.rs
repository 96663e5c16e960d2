//! Property tests for the universal invariants in spec §8: key uniqueness
//! and the nesting bound.

use quickcheck_macros::quickcheck;

use tomlrs_par::Parser;
use tomlrs_util::Config;

fn safe_key(seed: u8) -> String {
    format!("k{}", seed % 40)
}

/// Builds `k0 = 0\nk1 = 1\n...` from a set of seeds, deduplicating keys the
/// way a real document would have to (TOML forbids writing the same key
/// twice), then asserts the parsed table has exactly that many entries —
/// spec §8 "Key uniqueness".
#[quickcheck]
fn distinct_keys_all_survive(seeds: Vec<u8>) -> bool {
    let mut keys: Vec<String> = seeds.iter().map(|&s| safe_key(s)).collect();
    keys.sort();
    keys.dedup();

    let mut src = String::new();
    for (i, key) in keys.iter().enumerate() {
        src.push_str(key);
        src.push_str(" = ");
        src.push_str(&i.to_string());
        src.push('\n');
    }

    let mut parser = Parser::new(Config::default());
    let doc = match parser.parse(src.as_bytes()) {
        Ok(doc) => doc,
        Err(_) => return keys.is_empty(),
    };
    doc.root().len() == keys.len()
}

/// A table-header path of `depth` segments must parse iff `depth` is
/// within `max_nesting` (spec §8 "Nesting bound").
#[quickcheck]
fn nesting_bound_is_enforced(depth: u8) -> bool {
    let depth = (depth % 12) + 1;
    let config = Config::default().with_max_nesting(6);
    let path: Vec<String> = (0..depth).map(|i| format!("t{i}")).collect();
    let src = format!("[{}]\n", path.join("."));

    let mut parser = Parser::new(config);
    let result = parser.parse(src.as_bytes());
    result.is_ok() == (depth as usize <= config.max_nesting as usize)
}
