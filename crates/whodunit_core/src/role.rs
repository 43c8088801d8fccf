//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a chat exchange.
///
/// # Examples
///
/// ```
/// use whodunit_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the task
    User,
    /// Assistant messages are from the model
    Assistant,
}
