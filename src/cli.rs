//! Command-line interface

use anyhow::Context;
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use num_traits::Num;

use primecurve::crypto::{elgamal, PointArithmetic, ProjectivePoint};
use primecurve::keygen::{check_keypair, RsaKeyBuilder};
use primecurve::prime::sieve::format_factors;
use primecurve::prime::{factorize, primes_below, random_prime, random_prime_in_range};
use primecurve::types::{NamedCurve, CURVE_NAMES};
use primecurve::{Params, RandomSource, SearchLimits};

#[derive(Parser)]
#[command(name = "primecurve")]
#[command(version = "1.0.0")]
#[command(about = "Random primes, RSA keys and elliptic curve arithmetic")]
pub struct Cli {
    /// TOML file overriding the default parameters
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Use a fixed seed instead of the clock (reproducible output)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Wall-clock budget for each prime search, in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Random probable prime of an exact bit length
    Prime {
        #[arg(long)]
        bits: u64,
    },

    /// Random probable prime in [min, max] (decimal or 0x-prefixed hex)
    PrimeRange {
        #[arg(long)]
        min: String,
        #[arg(long)]
        max: String,
    },

    /// Generate an RSA key and optionally round-trip a message through it
    Rsa {
        #[arg(long, default_value_t = 512)]
        p_bits: u64,
        #[arg(long, default_value_t = 512)]
        q_bits: u64,
        #[arg(long, default_value_t = 5)]
        e_bits: u64,
        #[arg(long)]
        message: Option<String>,
    },

    /// Scalar multiplication k*G on a named curve
    EcMul {
        #[arg(long, default_value = "prime192v1")]
        curve: String,
        /// Scalar (decimal or 0x-prefixed hex)
        #[arg(long)]
        k: String,
        /// Use affine instead of projective arithmetic
        #[arg(long)]
        affine: bool,
    },

    /// EC-ElGamal round trip of a short message
    Elgamal {
        #[arg(long)]
        message: String,
        #[arg(long, default_value = "prime192v1")]
        curve: String,
    },

    /// List primes below a bound
    Primes {
        #[arg(long)]
        below: usize,
    },

    /// Factor a 64-bit number by trial division
    Factor { n: u64 },

    /// List the named curves
    Curves,
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            Params::load(path).with_context(|| format!("failed to load config {}", path))?
        }
        None => Params::default(),
    };
    if cli.timeout_ms.is_some() {
        params.prime.timeout_ms = cli.timeout_ms;
    }

    let mut rng = match cli.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::new(),
    };

    match cli.command {
        Command::Prime { bits } => {
            let p = random_prime(&mut rng, bits, &limits(&params))?;
            println!("{}", to_hex(&p));
        }
        Command::PrimeRange { min, max } => {
            let pmin = parse_number(&min)?;
            let pmax = parse_number(&max)?;
            let p = random_prime_in_range(&mut rng, &pmax, &pmin, &limits(&params))?;
            println!("{}", to_hex(&p));
        }
        Command::Rsa {
            p_bits,
            q_bits,
            e_bits,
            message,
        } => run_rsa(&params, &mut rng, p_bits, q_bits, e_bits, message.as_deref())?,
        Command::EcMul { curve, k, affine } => {
            let group = named_curve(&curve)?;
            let k = parse_number(&k)?;
            let point = if affine {
                group.generator.mul(&k, &group.curve)?
            } else {
                ProjectivePoint::from_affine(&group.generator)
                    .mul(&k, &group.curve)?
                    .to_affine(&group.curve)?
            };
            if point.is_identity() {
                println!("O (point at infinity)");
            } else {
                println!("x = {}", to_hex(&point.x));
                println!("y = {}", to_hex(&point.y));
            }
        }
        Command::Elgamal { message, curve } => {
            run_elgamal(&mut rng, &curve, message.as_bytes())?
        }
        Command::Primes { below } => {
            let primes = primes_below(below);
            let line: Vec<String> = primes.iter().map(u32::to_string).collect();
            println!("{}", line.join(" "));
            println!("({} primes below {})", primes.len(), below);
        }
        Command::Factor { n } => {
            println!("{} = {}", n, format_factors(&factorize(n)));
        }
        Command::Curves => {
            println!("Named curves:");
            for (name, description) in CURVE_NAMES {
                println!("  {:<12} {}", name, description);
            }
        }
    }

    Ok(())
}

fn run_rsa(
    params: &Params,
    rng: &mut RandomSource,
    p_bits: u64,
    q_bits: u64,
    e_bits: u64,
    message: Option<&str>,
) -> anyhow::Result<()> {
    let builder = RsaKeyBuilder::new(params.rsa.clone(), limits(params));
    let key = builder.generate(rng, p_bits, q_bits, e_bits)?;
    check_keypair(&key, params.rsa.max_gap_bits)?;

    println!("p = {}", to_hex(&key.p));
    println!("q = {}", to_hex(&key.q));
    println!("n = {} ({} bits)", to_hex(&key.n), key.bits());
    println!("e = {}", to_hex(&key.e));
    println!("d = {}", to_hex(&key.d));

    if let Some(message) = message {
        let ciphertext = key.public_key().encrypt_bytes(message.as_bytes())?;
        let plaintext = key.decrypt_bytes(&ciphertext)?;
        println!();
        println!("ciphertext = {}", hex::encode(&ciphertext));
        println!("plaintext  = {}", String::from_utf8_lossy(&plaintext));
    }
    Ok(())
}

fn run_elgamal(rng: &mut RandomSource, curve: &str, message: &[u8]) -> anyhow::Result<()> {
    let group = named_curve(curve)?;
    let keys = elgamal::generate_keypair(&group, rng)?;
    let ciphertext = elgamal::encrypt(&group, &keys.public, message, rng)?;
    let plaintext = elgamal::decrypt(&group, &keys.secret, &ciphertext)?;

    println!("secret = {}", to_hex(&keys.secret));
    println!("public = ({}, {})", to_hex(&keys.public.x), to_hex(&keys.public.y));
    println!("c1     = ({}, {})", to_hex(&ciphertext.c1.x), to_hex(&ciphertext.c1.y));
    println!("c2     = ({}, {})", to_hex(&ciphertext.c2.x), to_hex(&ciphertext.c2.y));
    println!("plaintext = {}", String::from_utf8_lossy(&plaintext));
    Ok(())
}

/// Fresh limits; a configured timeout starts counting here
fn limits(params: &Params) -> SearchLimits {
    SearchLimits::from_params(&params.prime)
}

fn named_curve(name: &str) -> anyhow::Result<NamedCurve> {
    NamedCurve::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = CURVE_NAMES.iter().map(|(known, _)| *known).collect();
        anyhow::anyhow!("unknown curve '{}' (known: {})", name, known.join(", "))
    })
}

fn parse_number(text: &str) -> anyhow::Result<BigUint> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => BigUint::from_str_radix(digits, 16),
        None => BigUint::from_str_radix(text, 10),
    };
    parsed.with_context(|| format!("invalid number '{}'", text))
}

fn to_hex(v: &BigUint) -> String {
    format!("{:X}", v)
}
