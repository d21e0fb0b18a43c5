use serde::{Deserialize, Serialize};

/// The signed-in admin identity returned by the login endpoint and kept in
/// the session store next to the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
}
