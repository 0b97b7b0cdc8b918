//! Resource Methods
//!
//! Typed wrappers mapping API endpoints onto the HTTP verbs.

use crate::api::models::{Contact, File, Me, Member, Message, MyTask, Room, Status, Task};
use crate::client::Params;
use crate::error::Result;
use crate::ChatworkClient;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::io::AsyncRead;

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

impl ChatworkClient {
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &Params) -> Result<T> {
        let body = self.get(endpoint, params).await?;
        decode(&body)
    }

    /// GET /me
    pub async fn me(&self) -> Result<Me> {
        self.get_json("/me", &Params::new()).await
    }

    /// GET /my/status
    pub async fn my_status(&self) -> Result<Status> {
        self.get_json("/my/status", &Params::new()).await
    }

    /// GET /my/tasks
    ///
    /// Accepted params: `assigned_by_account_id`, `status` (`open` or `done`).
    pub async fn my_tasks(&self, params: &Params) -> Result<Vec<MyTask>> {
        self.get_json("/my/tasks", params).await
    }

    /// GET /contacts
    pub async fn contacts(&self) -> Result<Vec<Contact>> {
        self.get_json("/contacts", &Params::new()).await
    }

    /// GET /rooms
    pub async fn rooms(&self) -> Result<Vec<Room>> {
        self.get_json("/rooms", &Params::new()).await
    }

    /// GET /rooms/{room_id}
    pub async fn room(&self, room_id: &str) -> Result<Room> {
        self.get_json(&format!("/rooms/{}", room_id), &Params::new()).await
    }

    /// POST /rooms
    ///
    /// Required params: `name`, `members_admin_ids`. Optional:
    /// `description`, `icon_preset`, `members_member_ids`,
    /// `members_readonly_ids`.
    pub async fn create_room(&self, params: &Params) -> Result<Bytes> {
        self.post("/rooms", params).await
    }

    /// PUT /rooms/{room_id}
    pub async fn update_room(&self, room_id: &str, params: &Params) -> Result<Bytes> {
        self.put(&format!("/rooms/{}", room_id), params).await
    }

    /// DELETE /rooms/{room_id}
    ///
    /// Required param: `action_type` (`leave` or `delete`).
    pub async fn delete_room(&self, room_id: &str, params: &Params) -> Result<Bytes> {
        self.delete(&format!("/rooms/{}", room_id), params).await
    }

    /// GET /rooms/{room_id}/members
    pub async fn room_members(&self, room_id: &str) -> Result<Vec<Member>> {
        self.get_json(&format!("/rooms/{}/members", room_id), &Params::new())
            .await
    }

    /// PUT /rooms/{room_id}/members
    pub async fn update_room_members(&self, room_id: &str, params: &Params) -> Result<Bytes> {
        self.put(&format!("/rooms/{}/members", room_id), params).await
    }

    /// GET /rooms/{room_id}/messages
    ///
    /// An empty body (no new messages) decodes to an empty list.
    pub async fn room_messages(&self, room_id: &str, params: &Params) -> Result<Vec<Message>> {
        let body = self
            .get(&format!("/rooms/{}/messages", room_id), params)
            .await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        decode(&body)
    }

    /// POST /rooms/{room_id}/messages
    pub async fn post_room_message(&self, room_id: &str, body: &str) -> Result<Bytes> {
        let params: Params = [("body".to_string(), body.to_string())].into_iter().collect();
        self.post(&format!("/rooms/{}/messages", room_id), &params)
            .await
    }

    /// GET /rooms/{room_id}/messages/{message_id}
    pub async fn room_message(&self, room_id: &str, message_id: &str) -> Result<Message> {
        self.get_json(
            &format!("/rooms/{}/messages/{}", room_id, message_id),
            &Params::new(),
        )
        .await
    }

    /// GET /rooms/{room_id}/tasks
    ///
    /// Accepted params: `account_id`, `assigned_by_account_id`, `status`.
    pub async fn room_tasks(&self, room_id: &str, params: &Params) -> Result<Vec<Task>> {
        self.get_json(&format!("/rooms/{}/tasks", room_id), params)
            .await
    }

    /// POST /rooms/{room_id}/tasks
    ///
    /// Required params: `body`, `to_ids`. Optional: `limit`.
    pub async fn post_room_task(&self, room_id: &str, params: &Params) -> Result<Bytes> {
        self.post(&format!("/rooms/{}/tasks", room_id), params).await
    }

    /// GET /rooms/{room_id}/tasks/{task_id}
    pub async fn room_task(&self, room_id: &str, task_id: &str) -> Result<Task> {
        self.get_json(
            &format!("/rooms/{}/tasks/{}", room_id, task_id),
            &Params::new(),
        )
        .await
    }

    /// GET /rooms/{room_id}/files
    ///
    /// Accepted param: `account_id`.
    pub async fn room_files(&self, room_id: &str, params: &Params) -> Result<Vec<File>> {
        self.get_json(&format!("/rooms/{}/files", room_id), params)
            .await
    }

    /// GET /rooms/{room_id}/files/{file_id}
    ///
    /// Accepted param: `create_download_url` (`0` or `1`).
    pub async fn room_file(&self, room_id: &str, file_id: &str, params: &Params) -> Result<File> {
        self.get_json(&format!("/rooms/{}/files/{}", room_id, file_id), params)
            .await
    }

    /// POST /rooms/{room_id}/files
    pub async fn upload_room_file<R>(
        &self,
        room_id: &str,
        message: &str,
        file_name: &str,
        file: R,
    ) -> Result<Bytes>
    where
        R: AsyncRead + Unpin,
    {
        self.post_file(&format!("/rooms/{}/files", room_id), message, file_name, file)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::{ChatworkClient, ChatworkError, Params};
    use mockito::Matcher;

    fn client(server: &mockito::ServerGuard) -> ChatworkClient {
        ChatworkClient::new(ClientConfig::new("token").with_base_url(server.url()))
    }

    #[tokio::test]
    async fn test_me() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(200)
            .with_body(r#"{"account_id":123,"name":"John Smith","chatwork_id":"tarochatworkid"}"#)
            .create_async()
            .await;

        let me = client(&server).me().await.unwrap();
        assert_eq!(me.account_id, 123);
        assert_eq!(me.name, "John Smith");
    }

    #[tokio::test]
    async fn test_room_tasks_passes_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rooms/10/tasks")
            .match_query(Matcher::UrlEncoded("status".into(), "done".into()))
            .with_status(200)
            .with_body(r#"[{"task_id":3,"body":"buy milk","status":"done"}]"#)
            .create_async()
            .await;

        let params: Params = [("status".to_string(), "done".to_string())].into_iter().collect();
        let tasks = client(&server).room_tasks("10", &params).await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, "done");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_room_message_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rooms/10/messages")
            .match_body(Matcher::Exact("body=hello".to_string()))
            .with_status(200)
            .with_body(r#"{"message_id":"1234"}"#)
            .create_async()
            .await;

        let body = client(&server).post_room_message("10", "hello").await.unwrap();
        assert_eq!(&body[..], br#"{"message_id":"1234"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_room_messages_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rooms/10/messages")
            .with_status(204)
            .create_async()
            .await;

        let messages = client(&server).room_messages("10", &Params::new()).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_bad_json_is_response_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rooms")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server).rooms().await.unwrap_err();
        assert!(matches!(err, ChatworkError::Response(_)));
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rooms/99")
            .with_status(404)
            .with_body(r#"{"errors":["The room does not exist"]}"#)
            .create_async()
            .await;

        let err = client(&server).room("99").await.unwrap_err();
        assert_eq!(err.to_string(), "The room does not exist");
    }
}
