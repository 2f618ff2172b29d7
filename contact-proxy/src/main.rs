#[tokio::main]
async fn main() {
    contact_proxy::start_server().await;
}
