//! API Module
//!
//! Resource records and the typed methods that fetch them.

pub mod models;
mod resources;

pub use models::{
    Account, Contact, File, Me, Member, Message, MyTask, Room, Status, Task, TaskRoom,
};
