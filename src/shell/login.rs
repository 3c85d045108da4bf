use crate::services::sign_in::SignInFlow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginScreen {
    pub title: &'static str,
    pub email_placeholder: &'static str,
    pub password_placeholder: &'static str,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub error: Option<String>,
}

impl LoginScreen {
    pub fn from_flow(flow: &SignInFlow) -> Self {
        let loading = flow.loading();
        Self {
            title: "Admin Login",
            email_placeholder: "admin@zorphix.com",
            password_placeholder: "Enter your password",
            submit_label: if loading { "Logging in..." } else { "Login" },
            submit_disabled: loading,
            error: flow.error().map(str::to_string),
        }
    }
}
