//! Dispatch simulator CLI.

use dsim_diagnostic::emitter::ColorMode;
use dsimc::commands::{explain_error, list_scenarios, run_scenarios};
use dsimc::{init_tracing, RunnerConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let code = match command.as_str() {
        "run" => {
            // Scenario is optional, flags can come before or after
            let mut selector: Option<&str> = None;
            let mut config = RunnerConfig::default();

            for arg in args.iter().skip(2) {
                if let Some(filter) = arg.strip_prefix("--filter=") {
                    config.filter = Some(filter.to_string());
                } else if let Some(color) = arg.strip_prefix("--color=") {
                    let Some(mode) = ColorMode::from_flag(color) else {
                        eprintln!("error: invalid color mode '{color}'");
                        eprintln!("Valid modes: auto, always, never");
                        std::process::exit(1);
                    };
                    config.color = mode;
                } else if arg == "--verbose" || arg == "-v" {
                    config.verbose = true;
                } else if arg == "--no-parallel" {
                    config.parallel = false;
                } else if arg == "--tree" {
                    config.tree = true;
                } else if !arg.starts_with('-') && selector.is_none() {
                    selector = Some(arg.as_str());
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(1);
                }
            }

            init_tracing(config.tree);
            run_scenarios(selector, &config)
        }
        "list" => list_scenarios(),
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: dsim explain <ERROR_CODE>");
                eprintln!("Example: dsim explain E2003");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("dsim {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            1
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("Dispatch simulator: static method resolution over interface and class hierarchies");
    println!();
    println!("Usage: dsim <command> [options]");
    println!();
    println!("Commands:");
    println!("  run [scenario]       Check built-in scenarios (default: all)");
    println!("  list                 List built-in scenarios");
    println!("  explain <code>       Explain an error code (e.g., E2003)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --filter=<pattern>  Only check cases whose scenario/label contains pattern");
    println!("  --verbose, -v       Show passing cases and expected diagnostics");
    println!("  --no-parallel       Resolve call sites sequentially");
    println!("  --color=<mode>      Diagnostic colors: auto (default), always, never");
    println!("  --tree              Show RUST_LOG spans as an indented tree");
    println!();
    println!("Scenarios:");
    println!("  linear, diamond, zigzag, overload/source, overload/bytecode");
    println!("  (`overload` selects both overload scenarios)");
    println!();
    println!("Examples:");
    println!("  dsim run                        # Check every scenario");
    println!("  dsim run diamond -v");
    println!("  dsim run --filter=case2");
    println!("  RUST_LOG=dsim_types=debug dsim run zigzag --tree");
    println!("  dsim explain E2003              # Explain diamond conflicts");
}
