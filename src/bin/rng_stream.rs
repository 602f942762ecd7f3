//! External collaborator: iterates [`kinfolk::core::unit::prng`] and writes
//! raw little-endian bytes to stdout, for feeding a general-purpose
//! statistical randomness test suite (e.g. `dieharder -g200`).
//!
//! Not part of the crate's public surface — a thin driver, not a core
//! function, per spec.md §6.
//!
//! Usage: `rng_stream [count]`, where `count` is the number of 8-byte ids
//! to emit (unbounded if omitted). Ported from
//! `original_source/src/heads/rng.c`.

use std::io::{self, Write};

use kinfolk::core::unit::prng;

const INITIAL_X: u64 = 7817298123;
const SEED: u64 = 1092809123;

fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt::init();
    }

    let mut args = std::env::args();
    let _bin = args.next();

    let limit: u64 = match args.next() {
        None => 0,
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(_) => {
                println!("Error: couldn't parse '{arg}' as an output limit.");
                std::process::exit(1);
            }
        },
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut x = INITIAL_X;
    let mut count: u64 = 0;
    while limit == 0 || count < limit {
        x = prng(x, SEED);
        out.write_all(&x.to_le_bytes()).expect("stdout write failed");
        count += 1;
    }
    out.flush().expect("stdout flush failed");
}
