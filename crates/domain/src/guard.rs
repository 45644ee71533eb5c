use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Voter,
    Candidate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Voter => "voter",
            Role::Candidate => "candidate",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "voter" | "student" => Ok(Role::Voter),
            "candidate" => Ok(Role::Candidate),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl GuardDecision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some("/login"),
            GuardDecision::RedirectToUnauthorized => Some("/unauthorized"),
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    /// An empty `allowed` list admits any authenticated role.
    pub fn decide(session: Option<&Session>, allowed: &[Role]) -> GuardDecision {
        let Some(session) = session.filter(|s| !s.token.trim().is_empty()) else {
            return GuardDecision::RedirectToLogin;
        };

        if allowed.is_empty() || allowed.contains(&session.role) {
            GuardDecision::Allow
        } else {
            GuardDecision::RedirectToUnauthorized
        }
    }
}

pub fn logout_destination(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/login",
        Role::Candidate => "/candidate/login",
        Role::Voter => "/login",
    }
}
