//! Klass CLI

use klassc::commands::{parse_bench_options, run_bench, run_demo};
use klassc::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "bench" => {
            let options = match parse_bench_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: klass bench [--types=N] [--fields=N] [--reps=N]");
                    std::process::exit(1);
                }
            };
            if let Err(err) = run_bench(&options) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        "demo" => {
            if let Err(err) = run_demo() {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Klass - shape-cached record types");
    println!();
    println!("Usage: klass <command> [options]");
    println!();
    println!("Commands:");
    println!("  bench    Time type declaration with shared and unshared caches");
    println!("           --types=N   Types per repetition (default: 100)");
    println!("           --fields=N  Fields per type (default: 5)");
    println!("           --reps=N    Repetitions (default: 100)");
    println!("  demo     Declare a few types and exercise their generated methods");
    println!("  help     Show this message");
    println!();
    println!("Set RUST_LOG=klass_eval=debug to log cache compilations.");
}
