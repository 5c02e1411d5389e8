//! Evolution API (WhatsApp) client.

mod client;
mod error;
mod repository;
mod time;
mod types;

pub use client::EvolutionClient;
pub use error::EvolutionError;
pub use repository::{GroupRepository, MessageSender};
pub use time::{TimeZoneSetting, DISPLAY_FORMAT, WINDOW_FORMAT};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_test_client(mock_server: &MockServer) -> EvolutionClient {
        EvolutionClient::new(
            mock_server.uri(),
            "test-api-key",
            "test-instance",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_time_zone(TimeZoneSetting::utc())
    }

    fn record(jid: &str, name: &str, timestamp: i64, text: &str) -> serde_json::Value {
        serde_json::json!({
            "key": { "id": "ABC", "remoteJid": jid, "fromMe": false },
            "pushName": name,
            "messageType": "conversation",
            "message": { "conversation": text },
            "messageTimestamp": timestamp
        })
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_connection_state() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/instance/connectionState/test-instance"))
            .and(header("apikey", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "instance": { "instanceName": "test-instance", "state": "open" }
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert_eq!(client.connection_state().await.unwrap(), "open");
    }

    #[tokio::test]
    async fn test_fetch_groups() {
        let mock_server = MockServer::start().await;

        let groups = serde_json::json!([
            { "id": "120363400728341590@g.us", "subject": "Team", "size": 12 },
            { "id": "120363000000000000@g.us", "subject": null }
        ]);

        Mock::given(method("GET"))
            .and(path("/group/fetchAllGroups/test-instance"))
            .and(query_param("getParticipants", "false"))
            .and(header("apikey", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&groups))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.fetch_groups().await.unwrap();

        assert_eq!(
            result,
            vec![
                Group {
                    group_id: "120363400728341590@g.us".into(),
                    name: "Team".into(),
                },
                Group {
                    group_id: "120363000000000000@g.us".into(),
                    name: String::new(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_groups_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/group/fetchAllGroups/test-instance"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.fetch_groups().await;

        assert!(matches!(
            result,
            Err(EvolutionError::Api { status: 401, ref message }) if message == "Unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_get_messages_sends_window_and_filters() {
        let mock_server = MockServer::start().await;

        let expected_body = serde_json::json!({
            "where": {
                "key": { "remoteJid": "1@g.us" },
                "messageTimestamp": { "gte": 1713052800, "lte": 1713139199 }
            }
        });

        let response = serde_json::json!({
            "messages": {
                "total": 4,
                "pages": 1,
                "currentPage": 1,
                "records": [
                    record("1@g.us", "Ana", 1713100800, "bom dia"),
                    record("1@g.us", "Bia", 1713139200, "too late"),
                    record("2@g.us", "Caio", 1713100900, "other chat"),
                    record("1@g.us", "Duda", 1713052800, "first second"),
                ]
            }
        });

        Mock::given(method("POST"))
            .and(path("/chat/findMessages/test-instance"))
            .and(header("apikey", "test-api-key"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let messages = client
            .get_messages("1@g.us", "2024-04-14 00:00:00", "2024-04-14 23:59:59")
            .await
            .unwrap();

        let names: Vec<&str> = messages.iter().map(|m| m.push_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Duda"]);
        assert_eq!(messages[0].text(), "bom dia");
    }

    #[tokio::test]
    async fn test_get_messages_accepts_bare_array() {
        let mock_server = MockServer::start().await;

        let response = serde_json::json!([
            {
                "key": { "remoteJid": "1@g.us" },
                "pushName": null,
                "messageType": "imageMessage",
                "message": { "imageMessage": { "caption": "foto" } },
                "messageTimestamp": "1713100800"
            }
        ]);

        Mock::given(method("POST"))
            .and(path("/chat/findMessages/test-instance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let messages = client
            .get_messages("1@g.us", "2024-04-14 00:00:00", "2024-04-14 23:59:59")
            .await
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].push_name, "");
        assert_eq!(messages[0].message_timestamp, 1713100800);
        assert_eq!(messages[0].text(), "foto");
    }

    #[tokio::test]
    async fn test_get_messages_reversed_window_is_empty() {
        let mock_server = MockServer::start().await;

        let response = serde_json::json!({
            "messages": { "records": [record("1@g.us", "Ana", 1713100800, "oi")] }
        });

        Mock::given(method("POST"))
            .and(path("/chat/findMessages/test-instance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let messages = client
            .get_messages("1@g.us", "2024-04-15 00:00:00", "2024-04-14 00:00:00")
            .await
            .unwrap();

        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_get_messages_invalid_date() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server).await;

        let result = client
            .get_messages("1@g.us", "yesterday", "2024-04-14 23:59:59")
            .await;

        assert!(matches!(result, Err(EvolutionError::InvalidDate(ref d)) if d == "yesterday"));
    }

    #[tokio::test]
    async fn test_send_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/message/sendText/test-instance"))
            .and(header("apikey", "test-api-key"))
            .and(body_json(serde_json::json!({
                "number": "5511999999999",
                "text": "Olá!"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "key": { "id": "BAE5" },
                "status": "PENDING"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = MessageSender::send_text(&client, "5511999999999", "Olá!").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_text_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/message/sendText/test-instance"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid number"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.send_text("123", "Hello!").await;

        assert!(matches!(result, Err(EvolutionError::SendFailed(_))));
        assert_eq!(result.unwrap_err().to_string(), "Invalid number");
    }

    #[tokio::test]
    async fn test_send_text_failure_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/message/sendText/test-instance"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let err = client.send_text("1@g.us", "Hello!").await.unwrap_err();

        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_message_text_extraction() {
        let extended: Message = serde_json::from_value(serde_json::json!({
            "messageTimestamp": 0,
            "messageType": "extendedTextMessage",
            "message": { "extendedTextMessage": { "text": "link https://example.com" } }
        }))
        .unwrap();
        assert_eq!(extended.text(), "link https://example.com");

        let document: Message = serde_json::from_value(serde_json::json!({
            "messageTimestamp": 0,
            "messageType": "documentMessage",
            "message": { "documentMessage": { "caption": "", "fileName": "ata.pdf" } }
        }))
        .unwrap();
        assert_eq!(document.text(), "ata.pdf");

        let sticker: Message = serde_json::from_value(serde_json::json!({
            "messageTimestamp": 0,
            "messageType": "stickerMessage",
            "message": { "stickerMessage": { "url": "https://mmg.whatsapp.net/x" } }
        }))
        .unwrap();
        assert_eq!(sticker.text(), "");

        let empty: Message = serde_json::from_value(serde_json::json!({
            "messageTimestamp": 0,
            "messageType": "protocolMessage"
        }))
        .unwrap();
        assert_eq!(empty.text(), "");
    }

    fn text_of(message_type: &str, payload: serde_json::Value) -> String {
        let message: Message = serde_json::from_value(serde_json::json!({
            "messageTimestamp": 0,
            "messageType": message_type,
            "message": payload
        }))
        .unwrap();
        message.text().to_string()
    }

    #[test]
    fn test_message_text_extraction_per_payload() {
        let cases = [
            (
                "conversation",
                serde_json::json!({ "conversation": "oi" }),
                "oi",
            ),
            (
                "videoMessage",
                serde_json::json!({ "videoMessage": { "caption": "vídeo da reunião" } }),
                "vídeo da reunião",
            ),
            (
                "buttonsResponseMessage",
                serde_json::json!({ "buttonsResponseMessage": { "selectedDisplayText": "Sim" } }),
                "Sim",
            ),
            (
                "listResponseMessage",
                serde_json::json!({ "listResponseMessage": { "title": "Opção 2" } }),
                "Opção 2",
            ),
            (
                "templateButtonReplyMessage",
                serde_json::json!({ "templateButtonReplyMessage": { "selectedDisplayText": "Confirmar" } }),
                "Confirmar",
            ),
            (
                "reactionMessage",
                serde_json::json!({ "reactionMessage": { "text": "👍" } }),
                "👍",
            ),
        ];

        for (message_type, payload, expected) in cases {
            assert_eq!(text_of(message_type, payload), expected, "{}", message_type);
        }
    }

    #[test]
    fn test_message_text_skips_empty_candidates() {
        assert_eq!(
            text_of(
                "extendedTextMessage",
                serde_json::json!({
                    "conversation": "",
                    "extendedTextMessage": { "text": "texto estendido" }
                }),
            ),
            "texto estendido"
        );

        assert_eq!(
            text_of(
                "imageMessage",
                serde_json::json!({
                    "conversation": "primeiro",
                    "imageMessage": { "caption": "segundo" }
                }),
            ),
            "primeiro"
        );

        assert_eq!(
            text_of(
                "reactionMessage",
                serde_json::json!({
                    "videoMessage": { "caption": "" },
                    "reactionMessage": { "text": "❤️" }
                }),
            ),
            "❤️"
        );
    }

    #[tokio::test]
    async fn test_fetch_groups_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/group/fetchAllGroups/test-instance"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.fetch_groups().await;

        assert!(matches!(result, Err(EvolutionError::Json(_))));
    }
}
