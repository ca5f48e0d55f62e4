use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use wavefront_aligner::io::read_sequence;
use wavefront_aligner::report::{PathMatrix, ScoreMatrix, Summary};
use wavefront_aligner::{
    Aligner, AlignerConfig, AlignerParameters, AlignmentMode, AlignmentParams,
};

/// Align two sequence files with a parallel wavefront aligner.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// File holding the query sequence (raw bytes, newlines included).
    query_file: PathBuf,

    /// File holding the subject sequence.
    subject_file: PathBuf,

    /// Worker threads; 0 or negative uses every available core.
    #[arg(allow_negative_numbers = true)]
    num_threads: Option<i64>,

    /// global (Needleman-Wunsch) or local (Smith-Waterman).
    #[arg(short, long, default_value_t = AlignmentMode::Global)]
    mode: AlignmentMode,

    /// Score for identical symbols [default: 5 global, 2 local].
    #[arg(long = "match", allow_negative_numbers = true)]
    match_score: Option<i32>,

    /// Score for differing symbols [default: -1 global, -2 local].
    #[arg(long = "mismatch", allow_negative_numbers = true)]
    mismatch_score: Option<i32>,

    /// Score per gap symbol [default: -5].
    #[arg(long = "gap", allow_negative_numbers = true)]
    gap_score: Option<i32>,

    /// Also print the score matrix and the traceback path.
    #[arg(long)]
    print_matrix: bool,
}

impl Cli {
    fn alignment_params(&self) -> AlignmentParams {
        let mut params = AlignmentParams::for_mode(self.mode);
        if let Some(score) = self.match_score {
            params = params.with_match(score);
        }
        if let Some(score) = self.mismatch_score {
            params = params.with_mismatch(score);
        }
        if let Some(score) = self.gap_score {
            params = params.with_gap(score);
        }
        params
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let query = read_sequence(&cli.query_file)
        .with_context(|| format!("cannot load query {}", cli.query_file.display()))?;
    let subject = read_sequence(&cli.subject_file)
        .with_context(|| format!("cannot load subject {}", cli.subject_file.display()))?;

    let config = AlignerConfig::default().with_thread_hint(cli.num_threads.unwrap_or(0));
    let params = AlignerParameters::new()
        .with_alignment_params(cli.alignment_params())
        .with_config(config);
    let aligner = Aligner::new(params).context("failed to start aligner")?;

    let started = Instant::now();
    let (pair, grid) = aligner
        .align_with_grid(&query, &subject)
        .context("alignment failed")?;
    let elapsed = started.elapsed();

    println!(
        "{}",
        Summary {
            pair: &pair,
            query_len: query.len(),
            subject_len: subject.len(),
            elapsed,
            threads: aligner.threads(),
        }
    );

    if cli.print_matrix {
        println!("\nscore matrix:\n{}", ScoreMatrix(&grid));
        println!("traceback path:\n{}", PathMatrix::new(&grid, &pair));
    }
    Ok(())
}

/// Exit status for a command-line error: help and version requests succeed,
/// anything else (such as a wrong argument count) is status 1.
fn usage_exit_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = usage_exit_status(&e);
            if status == 0 {
                print!("{e}");
            } else {
                eprint!("{e}");
            }
            return ExitCode::from(status);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("wavefront_aligner").chain(args.iter().copied()))
    }

    #[test]
    fn wrong_argument_count_exits_with_one() {
        let err = parse(&["query.txt"]).unwrap_err();
        assert_eq!(usage_exit_status(&err), 1);

        let err = parse(&["q.txt", "s.txt", "4", "extra"]).unwrap_err();
        assert_eq!(usage_exit_status(&err), 1);
    }

    #[test]
    fn help_exits_with_zero() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(usage_exit_status(&err), 0);
    }

    #[test]
    fn negative_thread_hint_and_weights_parse() {
        let cli = parse(&["q.txt", "s.txt", "-2", "--mode", "local", "--gap", "-3"]).unwrap();
        assert_eq!(cli.num_threads, Some(-2));
        assert_eq!(cli.mode, AlignmentMode::Local);
        let params = cli.alignment_params();
        assert_eq!(params.gap_score, -3);
        assert_eq!(params.match_score, 2);
    }
}
