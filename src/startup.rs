//! src/startup.rs

use crate::configuration::Settings;
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{health_check, home, method_not_allowed, send_email};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: &Settings) -> Result<Self, anyhow::Error> {
        let sender_email = configuration
            .email_client
            .sender()
            .expect("Failed to parse sender email.");
        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            sender_email,
            configuration.email_client.authorization_token.clone(),
            configuration.email_client.timeout(),
        );
        let recipient = configuration
            .email_client
            .recipient()
            .expect("Failed to parse recipient email.");

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_client, recipient)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Operator address that contact-form notifications are delivered to.
pub struct NotificationRecipient(pub ContactEmail);

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: ContactEmail,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let recipient = web::Data::new(NotificationRecipient(recipient));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/", web::get().to(home))
            .service(
                web::resource("/api/send-email")
                    .route(web::post().to(send_email))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .app_data(email_client.clone())
            .app_data(recipient.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
