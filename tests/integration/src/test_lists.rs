//! List lifecycle integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{TestServer, create_list};

    #[tokio::test]
    async fn test_should_start_with_no_lists() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let resp = client.get(server.url("/lists/")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_should_create_and_fetch_list() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created = create_list(&client, &server, "Groceries", "Weekly shop").await;
        assert_eq!(created["name"], "Groceries");
        assert_eq!(created["description"], "Weekly shop");
        let id = created["id"].as_i64().unwrap();

        let resp = client
            .get(server.url(&format!("/list/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "id": id,
                "name": "Groceries",
                "description": "Weekly shop",
                "todos": [],
            })
        );
    }

    #[tokio::test]
    async fn test_should_list_all_in_creation_order() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        for name in ["first", "second", "third"] {
            create_list(&client, &server, name, "").await;
        }

        for path in ["/lists", "/lists/"] {
            let body: serde_json::Value = client
                .get(server.url(path))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            let names: Vec<&str> = body
                .as_array()
                .unwrap()
                .iter()
                .map(|l| l["name"].as_str().unwrap())
                .collect();
            assert_eq!(names, ["first", "second", "third"], "{path}");
        }
    }

    #[tokio::test]
    async fn test_should_default_missing_description() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let resp = client
            .put(server.url("/lists/add"))
            .json(&serde_json::json!({"name": "Chores"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["description"], "");
    }

    #[tokio::test]
    async fn test_should_store_hostile_text_verbatim() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let name = "x'); DROP TABLE lists; --";
        let created = create_list(&client, &server, name, "").await;
        let id = created["id"].as_i64().unwrap();

        let body: serde_json::Value = client
            .get(server.url(&format!("/list/{id}")))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["name"], name);
        assert_eq!(server.store().select_all_lists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_should_assign_distinct_ids_to_concurrent_creates() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let creates = (0..50).map(|i| {
            let client = client.clone();
            let url = server.url("/lists/add");
            async move {
                let resp = client
                    .put(url)
                    .json(&serde_json::json!({"name": format!("list-{i}")}))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(resp.status(), StatusCode::CREATED);
                let body: serde_json::Value = resp.json().await.unwrap();
                body["id"].as_i64().unwrap()
            }
        });

        let mut ids = futures::future::join_all(creates).await;
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);

        let all: serde_json::Value = client
            .get(server.url("/lists/"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(all.as_array().unwrap().len(), 50);
    }
}
