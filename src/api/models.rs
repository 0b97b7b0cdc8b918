//! Resource Records
//!
//! Typed records for the JSON returned by the v2 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// The authenticated account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Me {
    /// Account ID
    pub account_id: i64,

    /// ID of the account's personal chat room
    pub room_id: i64,

    /// Display name
    pub name: String,

    /// ChatWork ID chosen by the user
    pub chatwork_id: String,

    /// Organization ID
    pub organization_id: i64,

    /// Organization name
    pub organization_name: String,

    /// Department
    pub department: String,

    /// Job title
    pub title: String,

    /// Personal URL
    pub url: String,

    /// Self introduction
    pub introduction: String,

    /// Email address
    pub mail: String,

    /// Organization phone number
    pub tel_organization: String,

    /// Extension number
    pub tel_extension: String,

    /// Mobile phone number
    pub tel_mobile: String,

    /// Skype ID
    pub skype: String,

    /// Facebook ID
    pub facebook: String,

    /// Twitter ID
    pub twitter: String,

    /// Avatar image URL
    pub avatar_image_url: String,
}

/// Unread and task counters for the authenticated account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Status {
    /// Rooms with unread messages
    pub unread_room_num: i64,

    /// Rooms with unread mentions
    pub mention_room_num: i64,

    /// Rooms with open tasks for this account
    pub mytask_room_num: i64,

    /// Total unread messages
    pub unread_num: i64,

    /// Total unread mentions
    pub mention_num: i64,

    /// Total open tasks for this account
    pub mytask_num: i64,
}

/// Minimal account reference embedded in messages, tasks, and files
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Account {
    /// Account ID
    pub account_id: i64,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub avatar_image_url: String,
}

/// A task
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Task {
    /// Task ID
    pub task_id: i64,

    /// Assignee
    pub account: Account,

    /// Who assigned the task
    pub assigned_by_account: Account,

    /// Message the task was created from
    pub message_id: String,

    /// Task text
    pub body: String,

    /// Due date in seconds since the Unix epoch, zero if none
    pub limit_time: i64,

    /// `open` or `done`
    pub status: String,
}

impl Task {
    /// Due date as a UTC timestamp
    pub fn limit_date(&self) -> Option<DateTime<Utc>> {
        unix(self.limit_time)
    }
}

/// Room reference embedded in the account's own tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaskRoom {
    /// Room ID
    pub room_id: i64,

    /// Room name
    pub name: String,

    /// Room icon URL
    pub icon_path: String,
}

/// A task assigned to the authenticated account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MyTask {
    /// The task itself
    #[serde(flatten)]
    pub task: Task,

    /// Room the task belongs to
    #[serde(default)]
    pub room: TaskRoom,
}

/// A contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Contact {
    /// Account ID
    pub account_id: i64,

    /// ID of the direct chat room with this contact
    pub room_id: i64,

    /// Display name
    pub name: String,

    /// ChatWork ID chosen by the user
    pub chatwork_id: String,

    /// Organization ID
    pub organization_id: i64,

    /// Organization name
    pub organization_name: String,

    /// Department
    pub department: String,

    /// Avatar image URL
    pub avatar_image_url: String,
}

/// A chat room
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Room {
    /// Room ID
    pub room_id: i64,

    /// Room name
    pub name: String,

    /// `my`, `direct`, or `group`
    #[serde(rename = "type")]
    pub room_type: String,

    /// This account's role: `admin`, `member`, or `readonly`
    pub role: String,

    /// Pinned to the top of the room list
    pub sticky: bool,

    /// Unread messages
    pub unread_num: i64,

    /// Unread mentions
    pub mention_num: i64,

    /// Open tasks for this account
    pub mytask_num: i64,

    /// Total messages
    pub message_num: i64,

    /// Total files
    pub file_num: i64,

    /// Total tasks
    pub task_num: i64,

    /// Room icon URL
    pub icon_path: String,

    /// Last update in seconds since the Unix epoch
    pub last_update_time: i64,

    /// Room description, only returned for a single room
    pub description: String,
}

impl Room {
    /// Last update as a UTC timestamp
    pub fn last_update_date(&self) -> Option<DateTime<Utc>> {
        unix(self.last_update_time)
    }
}

/// A room member
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Member {
    /// Account ID
    pub account_id: i64,

    /// `admin`, `member`, or `readonly`
    pub role: String,

    /// Display name
    pub name: String,

    /// ChatWork ID chosen by the user
    pub chatwork_id: String,

    /// Organization ID
    pub organization_id: i64,

    /// Organization name
    pub organization_name: String,

    /// Department
    pub department: String,

    /// Avatar image URL
    pub avatar_image_url: String,
}

/// A chat message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Message {
    /// Message ID
    pub message_id: String,

    /// Sender
    pub account: Account,

    /// Message text
    pub body: String,

    /// Send time in seconds since the Unix epoch
    pub send_time: i64,

    /// Last edit in seconds since the Unix epoch, zero if never edited
    pub update_time: i64,
}

impl Message {
    /// Send time as a UTC timestamp
    pub fn send_date(&self) -> Option<DateTime<Utc>> {
        unix(self.send_time)
    }

    /// Last edit as a UTC timestamp. Unedited messages give the Unix epoch.
    pub fn update_date(&self) -> Option<DateTime<Utc>> {
        unix(self.update_time)
    }
}

/// A file shared in a room
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct File {
    /// File ID
    pub file_id: i64,

    /// Uploader
    pub account: Account,

    /// Message the file was posted with
    pub message_id: String,

    /// File name
    pub filename: String,

    /// Size in bytes
    pub filesize: i64,

    /// Upload time in seconds since the Unix epoch
    pub upload_time: i64,

    /// Download URL, only present when requested
    pub download_url: String,
}

impl File {
    /// Upload time as a UTC timestamp
    pub fn upload_date(&self) -> Option<DateTime<Utc>> {
        unix(self.upload_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_room() {
        let json = r#"{
            "room_id": 123,
            "name": "Group Chat Name",
            "type": "group",
            "role": "admin",
            "sticky": false,
            "unread_num": 10,
            "mention_num": 1,
            "mytask_num": 0,
            "message_num": 122,
            "file_num": 10,
            "task_num": 17,
            "icon_path": "https://example.com/ico_group.png",
            "last_update_time": 1298905200
        }"#;

        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.room_id, 123);
        assert_eq!(room.room_type, "group");
        assert_eq!(room.description, "");
        assert_eq!(room.last_update_date().unwrap().timestamp(), 1298905200);
    }

    #[test]
    fn test_deserialize_my_task() {
        let json = r#"{
            "task_id": 3,
            "room": {"room_id": 5, "name": "Group Chat Name", "icon_path": "ico.png"},
            "assigned_by_account": {"account_id": 456, "name": "Anna", "avatar_image_url": "a.png"},
            "message_id": "13",
            "body": "buy milk",
            "limit_time": 1384354799,
            "status": "open"
        }"#;

        let task: MyTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.task.task_id, 3);
        assert_eq!(task.task.assigned_by_account.name, "Anna");
        assert_eq!(task.room.room_id, 5);
        assert_eq!(task.task.limit_date().unwrap().timestamp(), 1384354799);
    }

    #[test]
    fn test_deserialize_message() {
        let json = r#"{
            "message_id": "5",
            "account": {"account_id": 123, "name": "Bob", "avatar_image_url": "b.png"},
            "body": "Hello Chatwork!",
            "send_time": 1384242850,
            "update_time": 0
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.account.name, "Bob");
        assert_eq!(message.send_date().unwrap().timestamp(), 1384242850);
    }

    #[test]
    fn test_deserialize_file() {
        let json = r#"{
            "file_id": 3,
            "account": {"account_id": 123, "name": "Bob", "avatar_image_url": "b.png"},
            "message_id": "22",
            "filename": "README.md",
            "filesize": 2232,
            "upload_time": 1384414750
        }"#;

        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.filename, "README.md");
        assert_eq!(file.download_url, "");
        assert_eq!(file.upload_date().unwrap().timestamp(), 1384414750);
    }

    #[test]
    fn test_unedited_message_update_date_is_epoch() {
        let message = Message::default();
        assert_eq!(message.update_date().unwrap().timestamp(), 0);
    }
}
