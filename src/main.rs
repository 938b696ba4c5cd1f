#[tokio::main]
async fn main() {
    if let Err(e) = fintrack::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
