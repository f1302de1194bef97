// src/bin/fuzz_lex.rs
// Generate big random-but-valid inputs, lex them, check the stream.
// Extras:
//   - FUZZ_SAVE=1 and FUZZ_DIR=... save generated fuzz cases
//   - FUZZ_INPUT=path         replay a saved case (stream invariants only)
//   - FUZZ_LEN / FUZZ_ITERS / FUZZ_SEED

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use frontc::{
    dev::generator::gen_valid_case,
    lexer::{Token, TokenKind, lex_bytes},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Row never decreases; a row change always restarts the column count.
fn check_positions(toks: &[Token]) -> Result<(), String> {
    for (i, w) in toks.windows(2).enumerate() {
        let (a, b) = (&w[0], &w[1]);
        if b.row < a.row {
            return Err(format!("row went backwards at #{}: {} -> {}", i + 1, a.row, b.row));
        }
        if b.row == a.row && b.col <= a.col {
            return Err(format!("col not increasing at #{}: {} -> {}", i + 1, a.col, b.col));
        }
    }
    Ok(())
}

fn check_expected(toks: &[Token], expected: &[(TokenKind, String)]) -> Result<(), String> {
    if toks.len() != expected.len() {
        return Err(format!(
            "count mismatch: got={} expected={}",
            toks.len(),
            expected.len()
        ));
    }
    for (i, (t, (k, text))) in toks.iter().zip(expected).enumerate() {
        if t.label != *k || &t.lexeme != text {
            return Err(format!(
                "mismatch at #{i}: got {:?} {:?}, want {:?} {:?} ({}:{})",
                t.label, t.lexeme, k, text, t.row, t.col
            ));
        }
    }
    Ok(())
}

fn save_case(dir: &str, seed: u64, iter: usize, src: &str) -> PathBuf {
    let path = Path::new(dir).join(format!("fuzz_seed{seed}_iter{iter}.src"));
    if let Err(e) = fs::write(&path, src) {
        eprintln!("[save] failed to write {}: {e}", path.display());
    }
    path
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // --- REPLAY A SINGLE CASE ---
    if let Ok(path) = std::env::var("FUZZ_INPUT") {
        eprintln!("[replay] reading {path}");
        let data = match fs::read(&path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: failed to read {path}: {e}");
                std::process::exit(1);
            }
        };
        let lexed = lex_bytes(&data, &path);
        eprintln!(
            "[replay] {} tokens, {} diagnostics",
            lexed.tokens.len(),
            lexed.diagnostics.len()
        );
        if let Err(e) = check_positions(&lexed.tokens) {
            eprintln!("[replay] {e}");
            std::process::exit(1);
        }
        return;
    }

    // --- FUZZ MODE ---
    let save_cases = std::env::var("FUZZ_SAVE").ok().as_deref() == Some("1");
    let out_dir = std::env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".to_string());
    let len: usize = env_or("FUZZ_LEN", 1_000_000);
    let iters: usize = env_or("FUZZ_ITERS", 3);
    let seed: u64 = env_or("FUZZ_SEED", 42);

    eprintln!("[fuzz] len={len} iters={iters} seed={seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    if save_cases {
        if let Err(e) = fs::create_dir_all(&out_dir) {
            eprintln!("error: failed to create {out_dir}: {e}");
            std::process::exit(1);
        }
    }

    for i in 0..iters {
        let (src, expected) = gen_valid_case(&mut rng, len);
        eprintln!("[fuzz] iter {i}: generated {} bytes", src.len());
        if save_cases {
            let path = save_case(&out_dir, seed, i, &src);
            eprintln!("[save] wrote {}", path.display());
        }

        let t0 = Instant::now();
        let lexed = lex_bytes(src.as_bytes(), "<fuzz>");
        let ms = t0.elapsed().as_secs_f64() * 1e3;
        eprintln!(
            "[fuzz] iter {i}: {} tokens in {ms:.3} ms ({:.1} MB/s)",
            lexed.tokens.len(),
            src.len() as f64 / 1e6 / (ms / 1e3).max(1e-9)
        );

        let verdict = if !lexed.diagnostics.is_empty() {
            Err(format!("unexpected diagnostic: {}", lexed.diagnostics[0]))
        } else {
            check_expected(&lexed.tokens, &expected).and_then(|_| check_positions(&lexed.tokens))
        };
        if let Err(e) = verdict {
            eprintln!("[fuzz] iter {i}: {e}");
            let path = save_case(&out_dir, seed, i, &src);
            eprintln!("[fuzz] case saved to {}", path.display());
            std::process::exit(1);
        }
    }
    eprintln!("[fuzz] all iterations matched");
}
