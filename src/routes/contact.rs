//! src/routes/contact.rs

use crate::domain::{ContactEmail, ContactName, ContactSubmission, MessageBody, Subject};
use crate::email_client::EmailClient;
use crate::routes::error_chain_fmt;
use crate::startup::NotificationRecipient;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};

/// The raw request payload, before any validation. All fields are optional
/// here so that a missing field is reported as missing data, not as a
/// deserialization failure.
#[derive(serde::Deserialize)]
pub struct SendEmailPayload {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

impl TryFrom<SendEmailPayload> for ContactSubmission {
    type Error = String;

    fn try_from(payload: SendEmailPayload) -> Result<Self, Self::Error> {
        let name = ContactName::parse(payload.name.unwrap_or_default())?;
        let email = ContactEmail::parse(payload.email.unwrap_or_default())?;
        let subject = Subject::parse(payload.subject.unwrap_or_default())?;
        let message = MessageBody::parse(payload.message.unwrap_or_default())?;
        Ok(ContactSubmission {
            name,
            email,
            phone: payload.phone,
            subject,
            message,
        })
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Body vacío")]
    EmptyBody,
    #[error("JSON inválido")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Faltan datos requeridos")]
    MissingFields,
    #[error("Error al enviar el email")]
    DispatchFailed(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::EmptyBody
            | ContactError::InvalidJson(_)
            | ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::DispatchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ContactError::DispatchFailed(source) => serde_json::json!({
                "message": self.to_string(),
                "error": source.to_string(),
            }),
            _ => serde_json::json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Registered as the fallback for every non-POST method on the resource.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "message": "Método no permitido"
    }))
}

#[tracing::instrument(
    name = "Handling a contact submission",
    skip(body, email_client, recipient),
    fields(
        contact_name = tracing::field::Empty,
        contact_email = tracing::field::Empty
    )
)]
pub async fn send_email(
    body: web::Bytes,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<NotificationRecipient>,
) -> Result<HttpResponse, ContactError> {
    // The body is read in full as raw bytes before any decoding; an empty
    // body has its own outcome, distinct from undecodable JSON.
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ContactError::EmptyBody);
    }
    let payload: SendEmailPayload =
        serde_json::from_slice(&body).map_err(ContactError::InvalidJson)?;
    let submission: ContactSubmission = payload.try_into().map_err(|e: String| {
        tracing::warn!(error = %e, "Rejecting a contact submission with missing fields.");
        ContactError::MissingFields
    })?;
    tracing::Span::current().record("contact_name", tracing::field::display(&submission.name));
    tracing::Span::current().record("contact_email", tracing::field::display(&submission.email));

    dispatch_emails(&email_client, &recipient.0, &submission)
        .await
        .map_err(ContactError::DispatchFailed)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Email enviado correctamente"
    })))
}

/// Notification first, confirmation second; the confirmation send does not
/// start unless the notification send has completed.
#[tracing::instrument(
    name = "Dispatching notification and confirmation emails",
    skip(email_client, recipient, submission)
)]
async fn dispatch_emails(
    email_client: &EmailClient,
    recipient: &ContactEmail,
    submission: &ContactSubmission,
) -> Result<(), reqwest::Error> {
    let notification_subject = format!(
        "Nuevo mensaje de {}: {}",
        submission.name,
        submission.subject.as_ref()
    );
    email_client
        .send_email(
            recipient,
            &notification_subject,
            &notification_html(submission),
            &notification_text(submission),
        )
        .await?;
    email_client
        .send_email(
            &submission.email,
            "Hemos recibido tu mensaje",
            &confirmation_html(&submission.name),
            &confirmation_text(&submission.name),
        )
        .await?;
    Ok(())
}

fn notification_html(submission: &ContactSubmission) -> String {
    format!(
        "<h2>Nuevo mensaje de contacto</h2>\
         <p><strong>Nombre:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Teléfono:</strong> {}</p>\
         <p><strong>Asunto:</strong> {}</p>\
         <p><strong>Mensaje:</strong></p>\
         <p>{}</p>",
        submission.name,
        submission.email,
        submission.phone.as_deref().unwrap_or("No proporcionado"),
        submission.subject.as_ref(),
        submission.message.to_html(),
    )
}

fn notification_text(submission: &ContactSubmission) -> String {
    format!(
        "Nuevo mensaje de contacto\n\
         Nombre: {}\n\
         Email: {}\n\
         Teléfono: {}\n\
         Asunto: {}\n\
         Mensaje:\n{}",
        submission.name,
        submission.email,
        submission.phone.as_deref().unwrap_or("No proporcionado"),
        submission.subject.as_ref(),
        submission.message.as_ref(),
    )
}

fn confirmation_html(name: &ContactName) -> String {
    format!(
        "<h2>¡Gracias por contactarnos!</h2>\
         <p>Hola {},</p>\
         <p>Hemos recibido tu mensaje y te responderemos pronto.</p>\
         <p>Saludos,<br>aseofi®</p>",
        name
    )
}

fn confirmation_text(name: &ContactName) -> String {
    format!(
        "Hola {},\n\
         Hemos recibido tu mensaje y te responderemos pronto.\n\
         Saludos, aseofi®",
        name
    )
}
