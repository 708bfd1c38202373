//! # User Directory
//!
//! Browsing and adding user records, built as a small actor system.
//!
//! - **Filter pipeline** → [`actors::FilterService`] / [`clients::FilterClient`]: role and
//!   age are answered by a [`remote::DataSource`], with only the latest query's answer
//!   ever applied; name and company are matched locally by [`local_filter::filter_users`].
//! - **Submission** → [`submission::SubmissionController`]: drafts are checked by
//!   [`validation`] before they are handed to a [`submission::UserWriter`].
//! - **Store** → [`actor_framework::ResourceActor`] specialised to [`domain::User`], reached
//!   through [`clients::UserStoreClient`].
//! - **System** → [`app_system::DirectorySystem`] wires everything together;
//!   [`app_system::setup_tracing`] configures logging.

pub mod actor_framework;
pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod local_filter;
pub mod messages;
pub mod remote;
pub mod submission;
pub mod user_actor;
pub mod validation;

#[cfg(test)]
mod mock_framework;
