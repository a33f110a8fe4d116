//! Perft command-line driver.
//!
//! Prints the per-root-move breakdown in `<move>: <count>` lines so two
//! engines' outputs can be diffed move by move to localize generator bugs.
//!
//! Usage: `quartz_chess [FEN] <depth>`. The FEN may be quoted as one
//! argument or given as its bare space-separated fields.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use quartz_chess::position::perft::perft_divide;
use quartz_chess::position::position::Position;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some((depth_arg, fen_args)) = args.split_last() else {
        eprintln!("usage: quartz_chess [FEN] <depth>");
        return ExitCode::FAILURE;
    };

    let depth: u32 = match depth_arg.parse() {
        Ok(depth) => depth,
        Err(_) => {
            eprintln!("invalid depth '{depth_arg}'");
            return ExitCode::FAILURE;
        }
    };

    let mut position = if fen_args.is_empty() {
        Position::new_game()
    } else {
        let fen = fen_args.join(" ");
        match Position::from_fen(&fen) {
            Ok(position) => position,
            Err(err) => {
                eprintln!("invalid FEN '{fen}': {err}");
                return ExitCode::FAILURE;
            }
        }
    };

    println!(
        "perft depth {depth} at {} for {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        position.to_fen()
    );

    let start = Instant::now();
    let breakdown = perft_divide(&mut position, depth);
    let elapsed = start.elapsed();

    for (mv, nodes) in &breakdown {
        println!("{mv}: {nodes}");
    }

    let total: u64 = breakdown.iter().map(|(_, nodes)| nodes).sum();
    println!("Total nodes: {total}");
    println!("Elapsed time: {:.3} seconds", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!(
            "Nodes per second: {}",
            (total as f64 / elapsed.as_secs_f64()).floor()
        );
    }

    ExitCode::SUCCESS
}
