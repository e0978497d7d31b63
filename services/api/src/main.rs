use trichoscalp_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("trichoscalp error: {err}");
        std::process::exit(1);
    }
}
