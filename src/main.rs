use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use vehicle_registry::config::environment::EnvironmentConfig;
use vehicle_registry::routes::create_app;
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Cadastro de Veículos");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    if config.is_production() && config.redis_url.is_none() {
        warn!("⚠️ Producción sin REDIS_URL: los vehículos se pierden al reiniciar");
    }

    let app_state = match AppState::from_config(config.clone()).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando el panel: {}", e);
            return Err(anyhow::anyhow!("Error de inicialización: {}", e));
        }
    };

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/vehicle - Listar vehículos");
    info!("   GET    /api/vehicle/:id - Obtener vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("   GET    /api/vehicle/form - Estado del formulario");
    info!("   PUT    /api/vehicle/form/:field - Cambiar campo");
    info!("   POST   /api/vehicle/form/:field/blur - Marcar campo como tocado");
    info!("   POST   /api/vehicle/form/submit - Guardar vehículo");
    info!("   POST   /api/vehicle/form/reset - Limpiar formulario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
