use career_portal_cli::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        if let Some(message) = err.user_message() {
            eprintln!("{message}");
        }
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
