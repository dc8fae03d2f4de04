use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::{Parser as ClapParser, ValueEnum};
use tracing::{error, info};

use tbasic::codegen::generate_c;
use tbasic::error::ErrorKind;
use tbasic::formatter::format_program;
use tbasic::interpreter::{ByteCharSource, Interpreter};
use tbasic::options::{CommentPolicy, LanguageOptions, LineNumberMode};
use tbasic::parser::parse;
use tbasic::repl::run_interactive;
use tbasic::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineNumbersArg {
    Optional,
    Implied,
    Mandatory,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CommentsArg {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    Lst,
    C,
    Exe,
}

/// Tiny BASIC: interpreter, formatter and C transpiler.
#[derive(Debug, ClapParser)]
#[command(name = "tbasic", version, about)]
struct Cli {
    /// Line-number policy.
    #[arg(short = 'n', long = "line-numbers", value_enum, default_value_t = LineNumbersArg::Optional)]
    line_numbers: LineNumbersArg,

    /// Maximum accepted label value.
    #[arg(short = 'N', long = "line-limit")]
    line_limit: Option<i32>,

    /// Whether REM comments survive into formatted/transpiled output.
    #[arg(short = 'o', long = "comments", value_enum, default_value_t = CommentsArg::Enabled)]
    comments: CommentsArg,

    /// Output mode; omit to interpret the program directly.
    #[arg(short = 'O', long = "output", value_enum)]
    output: Option<OutputArg>,

    /// Maximum GOSUB stack depth.
    #[arg(short = 'g', long = "gosub-limit", default_value_t = 255)]
    gosub_limit: usize,

    /// Input source file. The REPL starts when this is omitted.
    input: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let options = LanguageOptions {
        line_numbers: match cli.line_numbers {
            LineNumbersArg::Optional => LineNumberMode::Optional,
            LineNumbersArg::Implied => LineNumberMode::Implied,
            LineNumbersArg::Mandatory => LineNumberMode::Mandatory,
        },
        line_limit: cli.line_limit,
        comments: match cli.comments {
            CommentsArg::Enabled => CommentPolicy::Enabled,
            CommentsArg::Disabled => CommentPolicy::Disabled,
        },
        gosub_limit: cli.gosub_limit,
    };
    let vocabulary = Vocabulary::english();

    let Some(input_path) = cli.input else {
        info!("no input file given, starting REPL");
        if let Err(e) = run_interactive(options, vocabulary) {
            error!("REPL terminated: {e}");
            std::process::exit(1);
        }
        return;
    };

    let source = match fs::read_to_string(&input_path) {
        Ok(s) => s,
        Err(_) => {
            eprintln!("Runtime error: File not found");
            std::process::exit(ErrorKind::FileNotFound.code());
        }
    };

    let (program, reporter) = parse(&source, &vocabulary, options);
    if let Some(err) = reporter.error() {
        eprintln!("{}", err.render());
        std::process::exit(err.kind.code());
    }

    match cli.output {
        None => {
            let mut interpreter = Interpreter::new(options);
            let mut stdout = std::io::stdout();
            let mut stdin_source = ByteCharSource::new(std::io::stdin());
            let reporter = interpreter.run(&program, &mut stdin_source, &mut stdout);
            if let Some(err) = reporter.error() {
                eprintln!("{}", err.render());
                std::process::exit(err.kind.code());
            }
        }
        Some(OutputArg::Lst) => {
            let rendered = format_program(&program);
            let out_path = append_suffix(&input_path, "lst");
            if let Err(e) = fs::write(&out_path, rendered) {
                error!("failed to write {}: {e}", out_path.display());
                std::process::exit(1);
            }
        }
        Some(OutputArg::C) => {
            let c_path = append_suffix(&input_path, "c");
            if let Err(e) = write_c(&program, &options, &c_path) {
                error!("failed to write {}: {e}", c_path.display());
                std::process::exit(1);
            }
        }
        Some(OutputArg::Exe) => {
            let c_path = append_suffix(&input_path, "c");
            if let Err(e) = write_c(&program, &options, &c_path) {
                error!("failed to write {}: {e}", c_path.display());
                std::process::exit(1);
            }
            let target_path = target_path_for(&input_path);
            let Ok(tbexe) = std::env::var("TBEXE") else {
                let err = tbasic::error::Error::new(
                    ErrorKind::BadCommandLine,
                    Default::default(),
                    None,
                );
                eprintln!("{}", err.render());
                std::process::exit(ErrorKind::BadCommandLine.code());
            };
            let command_line = tbexe
                .replace("$(SOURCE)", &c_path.to_string_lossy())
                .replace("$(TARGET)", &target_path.to_string_lossy());
            let status = Command::new("sh").arg("-c").arg(&command_line).status();
            match status {
                Ok(s) if s.success() => {}
                Ok(s) => std::process::exit(s.code().unwrap_or(1)),
                Err(e) => {
                    error!("failed to run TBEXE command: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn write_c(
    program: &tbasic::parser::ast::Program,
    options: &LanguageOptions,
    path: &Path,
) -> std::io::Result<()> {
    fs::write(path, generate_c(program, options))
}

/// `<input>.<ext>`, matching the original C's `snprintf("%s.ext", ...)` —
/// the suffix is appended, not substituted for an existing extension.
fn append_suffix(input: &Path, ext: &str) -> PathBuf {
    let mut s = input.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// The input filename with everything from its first `.` onward stripped,
/// or `<input>.out` if it has no `.` at all.
fn target_path_for(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    match name.find('.') {
        Some(dot) => PathBuf::from(&name[..dot]),
        None => PathBuf::from(format!("{name}.out")),
    }
}
