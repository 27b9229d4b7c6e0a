use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{Role, SigninRequest, SignupRequest};
use crate::auth::error::AuthError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Signup input that passed validation: name trimmed, email trimmed and
/// lowercased, role defaulted when absent.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct SigninData {
    pub email: String,
    pub password: String,
}

/// Ordered issue messages joined for display. An empty list collapses to the
/// generic message rather than an empty string.
fn format_issues(issues: Vec<String>) -> String {
    if issues.is_empty() {
        "Validation failed".to_string()
    } else {
        issues.join(", ")
    }
}

/// Field checks only; never touches storage.
pub fn validate_signup(req: &SignupRequest) -> Result<SignupData, AuthError> {
    let mut issues = Vec::new();

    let name = req.name.trim().to_string();
    if name.len() < 2 || name.len() > 255 {
        issues.push("Name must be between 2 and 255 characters".to_string());
    }

    let email = req.email.trim().to_lowercase();
    if email.len() > 255 || !is_valid_email(&email) {
        issues.push("Email is invalid".to_string());
    }

    if req.password.len() < 6 || req.password.len() > 128 {
        issues.push("Password must be between 6 and 128 characters".to_string());
    }

    let mut role = Role::default();
    if let Some(raw) = req.role.as_deref() {
        match raw.parse::<Role>() {
            Ok(parsed) => role = parsed,
            Err(()) => issues.push("Role must be one of: user, admin".to_string()),
        }
    }

    if !issues.is_empty() {
        return Err(AuthError::Validation {
            details: format_issues(issues),
        });
    }

    Ok(SignupData {
        name,
        email,
        password: req.password.clone(),
        role,
    })
}

pub fn validate_signin(req: &SigninRequest) -> Result<SigninData, AuthError> {
    let mut issues = Vec::new();

    let email = req.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        issues.push("Email is invalid".to_string());
    }

    if req.password.is_empty() {
        issues.push("Password is required".to_string());
    }

    if !issues.is_empty() {
        return Err(AuthError::Validation {
            details: format_issues(issues),
        });
    }

    Ok(SigninData {
        email,
        password: req.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: "secret123".into(),
            role: None,
        }
    }

    fn details(err: AuthError) -> String {
        match err {
            AuthError::Validation { details } => details,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn valid_signup_defaults_role_to_user() {
        let data = validate_signup(&signup_request()).expect("valid input");
        assert_eq!(data.role, Role::User);
        assert_eq!(data.email, "ann@x.com");
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let mut req = signup_request();
        req.email = "  Ann@X.Com ".into();
        let data = validate_signup(&req).expect("valid input");
        assert_eq!(data.email, "ann@x.com");
    }

    #[test]
    fn explicit_admin_role_is_accepted() {
        let mut req = signup_request();
        req.role = Some("admin".into());
        let data = validate_signup(&req).expect("valid input");
        assert_eq!(data.role, Role::Admin);
    }

    #[test]
    fn malformed_email_is_reported() {
        let mut req = signup_request();
        req.email = "not-an-email".into();
        let details = details(validate_signup(&req).unwrap_err());
        assert_eq!(details, "Email is invalid");
    }

    #[test]
    fn short_password_is_reported() {
        let mut req = signup_request();
        req.password = "short".into();
        let details = details(validate_signup(&req).unwrap_err());
        assert_eq!(details, "Password must be between 6 and 128 characters");
    }

    #[test]
    fn unknown_role_is_reported() {
        let mut req = signup_request();
        req.role = Some("superuser".into());
        let details = details(validate_signup(&req).unwrap_err());
        assert_eq!(details, "Role must be one of: user, admin");
    }

    #[test]
    fn issues_are_joined_in_field_order() {
        let req = SignupRequest {
            name: "A".into(),
            email: "bad".into(),
            password: "p".into(),
            role: Some("root".into()),
        };
        let details = details(validate_signup(&req).unwrap_err());
        assert_eq!(
            details,
            "Name must be between 2 and 255 characters, Email is invalid, \
             Password must be between 6 and 128 characters, Role must be one of: user, admin"
        );
    }

    #[test]
    fn empty_issue_list_falls_back_to_generic_message() {
        assert_eq!(format_issues(Vec::new()), "Validation failed");
    }

    #[test]
    fn signin_requires_well_formed_email_and_password() {
        let err = validate_signin(&SigninRequest {
            email: "nope".into(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(details(err), "Email is invalid, Password is required");

        let data = validate_signin(&SigninRequest {
            email: "Ann@X.com".into(),
            password: "secret123".into(),
        })
        .expect("valid input");
        assert_eq!(data.email, "ann@x.com");
    }
}
