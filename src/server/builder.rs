//! ServerBuilder for fluent API to build HTTP servers

use super::router::{build_invoice_routes, health_routes};
use crate::actions::ActionContext;
use crate::core::auth::CredentialProvider;
use crate::core::date::DateFormatPolicy;
use crate::core::repository::InvoiceRepository;
use crate::core::revalidate::RevalidationBus;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the invoice HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(InMemoryInvoiceRepository::new())
///     .with_credentials(config.credential_provider())
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn InvoiceRepository>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    dates: DateFormatPolicy,
    revalidation: RevalidationBus,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            repository: None,
            credentials: None,
            dates: DateFormatPolicy::default(),
            revalidation: RevalidationBus::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice repository (required)
    pub fn with_repository(mut self, repository: impl InvoiceRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set an already shared invoice repository (required)
    pub fn with_shared_repository(mut self, repository: Arc<dyn InvoiceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the credential provider used by `/login`
    ///
    /// Without one every sign-in is rejected as invalid credentials.
    pub fn with_credentials(mut self, credentials: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Set the clock and locale used to date new invoices
    pub fn with_dates(mut self, dates: DateFormatPolicy) -> Self {
        self.dates = dates;
        self
    }

    /// Publish revalidation notices on `bus`
    ///
    /// Keep a clone to [`subscribe`](RevalidationBus::subscribe) to them.
    pub fn with_revalidation(mut self, bus: RevalidationBus) -> Self {
        self.revalidation = bus;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for pages rendered outside this crate, e.g. the dashboard
    /// itself.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the action context handed to every handler
    pub fn build_context(&mut self) -> Result<ActionContext> {
        let repository = self.repository.take().ok_or_else(|| {
            anyhow::anyhow!("InvoiceRepository is required. Call .with_repository()")
        })?;

        let mut ctx = ActionContext::new(repository)
            .with_dates(self.dates.clone())
            .with_revalidation(self.revalidation.clone());

        if let Some(credentials) = self.credentials.take() {
            ctx = ctx.with_credentials(credentials);
        }

        Ok(ctx)
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Login and invoice routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let ctx = self.build_context()?;

        let mut app = health_routes().merge(build_invoice_routes(ctx));

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on Ctrl+C or SIGTERM
///
/// If a handler cannot be installed that signal is ignored and the server
/// keeps running until the other one arrives.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
