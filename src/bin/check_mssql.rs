use check_mssql::cli;
use std::io::Write;

#[tokio::main]
async fn main() {
    let code = cli::start().await;

    // exit right away, an abandoned check must not hold the process open
    let _ = std::io::stdout().flush();
    std::process::exit(code);
}
