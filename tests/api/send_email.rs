//! tests/api/send_email.rs

use crate::helpers::spawn_app;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn valid_body() -> String {
    serde_json::json!({
        "name": "Ana",
        "email": "ana@x.com",
        "phone": "600123456",
        "subject": "Consulta",
        "message": "Hola\nGracias"
    })
    .to_string()
}

#[tokio::test]
async fn a_valid_submission_returns_200_and_sends_two_emails() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(valid_body()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email enviado correctamente");
}

#[tokio::test]
async fn the_notification_goes_out_before_the_confirmation() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    app.post_send_email(valid_body()).await;

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0]["To"], app.recipient_email.as_str());
    assert_eq!(emails[0]["Subject"], "Nuevo mensaje de Ana: Consulta");
    assert_eq!(emails[1]["To"], "ana@x.com");
    assert_eq!(emails[1]["Subject"], "Hemos recibido tu mensaje");
}

#[tokio::test]
async fn the_notification_carries_the_submission_and_renders_line_breaks() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    app.post_send_email(valid_body()).await;

    let emails = app.sent_emails().await;
    let notification_html = emails[0]["HtmlBody"].as_str().unwrap();
    assert!(notification_html.contains("Ana"));
    assert!(notification_html.contains("ana@x.com"));
    assert!(notification_html.contains("600123456"));
    assert!(notification_html.contains("Hola<br>Gracias"));

    let confirmation_html = emails[1]["HtmlBody"].as_str().unwrap();
    assert!(confirmation_html.contains("Hola Ana,"));
}

#[tokio::test]
async fn a_submission_without_phone_is_dispatched_with_a_placeholder() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "name": "Ana",
        "email": "ana@x.com",
        "subject": "Consulta",
        "message": "Hola"
    })
    .to_string();
    let response = app.post_send_email(body).await;

    assert_eq!(200, response.status().as_u16());
    let emails = app.sent_emails().await;
    assert!(emails[0]["HtmlBody"]
        .as_str()
        .unwrap()
        .contains("No proporcionado"));
}

#[tokio::test]
async fn non_post_requests_are_rejected_with_a_405() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_send_email().await;

    // Assert
    assert_eq!(405, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Método no permitido");
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn an_empty_body_is_rejected_with_a_400() {
    let app = spawn_app().await;

    for body in ["", "   "] {
        let response = app.post_send_email(body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not reject the body {:?}.",
            body
        );
        let payload: serde_json::Value = response.json().await.unwrap();
        assert_eq!(payload["message"], "Body vacío");
    }
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_body_that_is_not_json_is_rejected_with_a_400() {
    let app = spawn_app().await;

    for body in ["not json", "{\"name\": ", "<name>Ana</name>"] {
        let response = app.post_send_email(body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not reject the body {:?}.",
            body
        );
        let payload: serde_json::Value = response.json().await.unwrap();
        assert_eq!(payload["message"], "JSON inválido");
    }
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_submission_with_missing_fields_is_rejected_with_a_400() {
    let app = spawn_app().await;

    let test_cases = vec![
        (
            serde_json::json!({"email": "ana@x.com", "subject": "Consulta", "message": "Hola"}),
            "missing the name",
        ),
        (
            serde_json::json!({"name": "Ana", "subject": "Consulta", "message": "Hola"}),
            "missing the email",
        ),
        (
            serde_json::json!({"name": "Ana", "email": "ana@x.com", "message": "Hola"}),
            "missing the subject",
        ),
        (
            serde_json::json!({"name": "Ana", "email": "ana@x.com", "subject": "Consulta"}),
            "missing the message",
        ),
        (
            serde_json::json!({"name": "Ana", "email": "ana@x.com"}),
            "missing the subject and the message",
        ),
        (
            serde_json::json!({"name": "", "email": "ana@x.com", "subject": "Consulta", "message": "Hola"}),
            "an empty name",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_send_email(body.to_string()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not reject a payload with {}.",
            description
        );
        let payload: serde_json::Value = response.json().await.unwrap();
        assert_eq!(payload["message"], "Faltan datos requeridos");
    }
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_failed_notification_returns_500_and_skips_the_confirmation() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(valid_body()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Error al enviar el email");
    assert!(!body["error"].as_str().unwrap().is_empty());
    // The confirmation send never started.
    assert_eq!(app.email_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn a_failed_confirmation_returns_500_even_though_the_operator_was_notified() {
    // Arrange
    let app = spawn_app().await;

    // The first send succeeds, the second hits a failing transport.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(valid_body()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Error al enviar el email");
    assert_eq!(app.email_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_fields_in_the_payload_are_ignored() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "name": "Ana",
        "email": "ana@x.com",
        "subject": "Consulta",
        "message": "Hola",
        "company": "aseofi"
    })
    .to_string();
    let response = app.post_send_email(body).await;

    assert_eq!(200, response.status().as_u16());
}
