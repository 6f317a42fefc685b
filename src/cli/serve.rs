use crate::{config, info, server};

pub async fn serve() {
    info!("Listening on {}", config::server_addr());
    info!("Trigger a run with GET /sync");
    server::start_sync_server().await;
}
