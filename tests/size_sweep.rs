//! Size sweep tests for the lexer:
//!  - all target lengths < 32 (0..=31) with several seeds — runs by default
//!  - powers of two from 32 up to ~1,000,000 — opt-in (ignored by default)
//!
//! Sources come from the shared generator (same as fuzz_lex), which also
//! reports the token stream the lexer must produce.

use frontc::{
    dev::generator::gen_valid_case,
    lexer::{Lexed, lex_bytes},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn check_case(seed: u64, len: usize) -> Lexed {
    let mut rng = StdRng::seed_from_u64(seed);
    let (src, expected) = gen_valid_case(&mut rng, len);
    let lexed = lex_bytes(src.as_bytes(), "sweep");

    assert!(
        lexed.diagnostics.is_empty(),
        "seed={seed} len={len}: {}\n{src:?}",
        lexed.diagnostics[0]
    );
    let got: Vec<_> = lexed
        .tokens
        .iter()
        .map(|t| (t.label, t.lexeme.clone()))
        .collect();
    assert_eq!(got, expected, "seed={seed} len={len}\n{src:?}");

    // Row never decreases; column only restarts on a new row.
    for w in lexed.tokens.windows(2) {
        assert!(w[1].row >= w[0].row, "seed={seed}: {:?} -> {:?}", w[0], w[1]);
        if w[1].row == w[0].row {
            assert!(w[1].col > w[0].col, "seed={seed}: {:?} -> {:?}", w[0], w[1]);
        }
    }
    lexed
}

#[test]
fn sweep_small_lengths() {
    let seed = env_u64("SWEEP_SEED", 7);
    for len in 0..=31usize {
        for s in 0..8 {
            check_case(seed + s, len);
        }
    }
}

#[test]
#[ignore]
fn sweep_powers_of_two() {
    let seed = env_u64("SWEEP_SEED", 7);
    let mut len = 32usize;
    while len <= 1 << 20 {
        let lexed = check_case(seed, len);
        eprintln!("len={len}: {} tokens", lexed.tokens.len());
        len *= 2;
    }
}
