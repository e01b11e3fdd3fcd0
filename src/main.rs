// Command-line batch interface
// `rsa generate` prints a key pair, `rsa encrypt`/`rsa decrypt` pipe
// stdin to stdout through the stream adapters

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bignum_rsa::rng;
use bignum_rsa::rsa::{DecryptReader, DecryptionKey, EncryptWriter, EncryptionKey, KeyPair};

/// Key size used by `rsa generate` when no bit count is given.
const DEFAULT_GENERATE_BITS: usize = 1024;

#[derive(Parser)]
#[command(name = "bignum-rsa", about = "Arbitrary-precision arithmetic and textbook RSA")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// RSA batch operations
    Rsa {
        #[command(subcommand)]
        action: RsaAction,
    },
}

#[derive(Subcommand)]
enum RsaAction {
    /// Generate a key pair: public key to stdout, private key to stderr
    Generate {
        /// Total key size in bits (at least 256)
        bits: Option<usize>,
    },
    /// Encrypt bytes from stdin into hex ciphertext integers on stdout
    Encrypt {
        /// Public exponent, decimal or 0x hex
        exponent: String,
        /// Modulus, decimal or 0x hex
        modulus: String,
    },
    /// Decrypt whitespace-separated ciphertext integers from stdin
    Decrypt {
        /// Private exponent, decimal or 0x hex
        exponent: String,
        /// Modulus, decimal or 0x hex
        modulus: String,
    },
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Rsa { action } => match action {
            RsaAction::Generate { bits } => {
                let bits = bits.unwrap_or(DEFAULT_GENERATE_BITS);
                let pair = KeyPair::generate(bits, &mut rng::secure(), &mut rng::seeded())?;
                println!("{}", pair.encryption_key());
                eprintln!("{}", pair.decryption_key());
            }
            RsaAction::Encrypt { exponent, modulus } => {
                let key = EncryptionKey::from_tokens(&exponent, &modulus)?;
                let stdout = io::stdout();
                let mut writer = EncryptWriter::new(key, BufWriter::new(stdout.lock()))?;
                io::copy(&mut io::stdin().lock(), &mut writer)?;
                writer.finish()?;
            }
            RsaAction::Decrypt { exponent, modulus } => {
                let key = DecryptionKey::from_tokens(&exponent, &modulus)?;
                let mut reader = DecryptReader::new(key, io::stdin().lock())?;
                io::copy(&mut reader, &mut io::stdout().lock())?;
            }
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    // Usage errors exit 1 like every other failure, so parse by hand
    // instead of letting clap exit with its own status. Help and version
    // requests still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error : {e}");
            ExitCode::FAILURE
        }
    }
}
