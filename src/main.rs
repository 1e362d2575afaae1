//! primecurve - random primes, RSA keys and elliptic curve arithmetic
//!
//! Command-line front end over the `primecurve` library.

mod cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
