use logs_provider::runtime::{boot, console};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let state = boot::boot()?;
    console::run(state).await
}
