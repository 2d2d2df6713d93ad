// Account data model
// Mocked credentials list and the explicit session handed to store calls

use serde::{Deserialize, Serialize};

/// Entry of the `fitbuddy-users` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisteredUser {
    pub fn session(&self) -> Session {
        Session {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The logged-in user, passed explicitly to every profile operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
}
