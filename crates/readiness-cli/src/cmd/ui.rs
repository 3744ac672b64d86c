use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, no_open: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let name = config.project.name.clone();
    let port = port.unwrap_or(config.server.port);

    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }

    let rt = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();

        println!("Readiness dashboard for '{name}' → http://localhost:{actual_port}");

        tokio::select! {
            res = readiness_server::serve_on(root_buf, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
