//! Dedicated entry point that always starts the interactive REPL, skipping
//! `tbasic`'s file/output-mode argument handling entirely.

use tbasic::options::LanguageOptions;
use tbasic::repl::run_interactive;
use tbasic::vocabulary::Vocabulary;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run_interactive(LanguageOptions::default(), Vocabulary::english()) {
        eprintln!("REPL terminated: {e}");
        std::process::exit(1);
    }
}
