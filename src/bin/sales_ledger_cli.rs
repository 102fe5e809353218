use sales_ledger::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        tracing::error!(error = %err, "sales shell aborted");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
