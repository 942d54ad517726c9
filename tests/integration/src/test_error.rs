//! Error handling integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{TestServer, create_list};

    async fn error_body(resp: reqwest::Response) -> serde_json::Value {
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        resp.json().await.unwrap()
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_missing_list() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let resp = client
            .get(server.url("/list/999999"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = error_body(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "list 999999 not found");
    }

    #[tokio::test]
    async fn test_should_reject_invalid_ids() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        for path in ["/list/abc", "/list/-1", "/todo/1.5", "/list/99999999999999999999"] {
            let resp = client.get(server.url(path)).send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{path}");
            let body = error_body(resp).await;
            assert_eq!(
                body,
                serde_json::json!({
                    "message": "Invalid id",
                    "status": 422,
                    "error": "Unprocessable Entity",
                })
            );
        }
    }

    #[tokio::test]
    async fn test_should_reject_non_json_content_type_without_side_effects() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();
        let list = create_list(&client, &server, "Groceries", "").await;
        let list_id = list["id"].as_i64().unwrap();

        let resp = client
            .put(server.url("/lists/add"))
            .header("content-type", "text/plain")
            .body(r#"{"name":"Sneaky"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_body(resp).await["message"], "Content type is not JSON");

        let resp = client
            .put(server.url(&format!("/list/{list_id}/createTodo")))
            .body(r#"{"description":"Sneaky"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(server.store().select_all_lists().await.unwrap().len(), 1);
        let todos = server
            .store()
            .select_todos_by_list_id(listkeeper_model::ListId::new(list_id))
            .await
            .unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_bad_bodies_as_bad_request() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        for body in [
            "{not json",
            r#"{"description":"no name"}"#,
            r#"{"name":""}"#,
            r#"{"name":"Groceries","colour":"red"}"#,
        ] {
            let resp = client
                .put(server.url("/lists/add"))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(error_body(resp).await["error"], "Bad Request");
        }
        assert!(server.store().select_all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_unknown_routes() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let resp = client.get(server.url("/nowhere")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_body(resp).await["status"], 404);

        let resp = client.delete(server.url("/lists/")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_reject_missing_path_segment() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let resp = client.get(server.url("/list/")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = client
            .put(server.url("/list/5"))
            .json(&serde_json::json!({"description": "x"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_should_tag_every_response_with_request_id() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let ok = client.get(server.url("/lists/")).send().await.unwrap();
        let err = client.get(server.url("/list/abc")).send().await.unwrap();
        let ok_id = ok.headers().get("x-request-id").unwrap();
        let err_id = err.headers().get("x-request-id").unwrap();
        assert_ne!(ok_id, err_id);
        assert_eq!(ok.headers().get("server").unwrap(), "ListKeeper");
    }
}
