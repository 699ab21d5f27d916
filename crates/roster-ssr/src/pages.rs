//! Template bindings.

use askama::Template;

/// One rendered table row; timestamps are already formatted.
pub(crate) struct UserRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub verified_at: String,
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub(crate) struct UserListPage<'a> {
    pub app_name: &'a str,
    pub rows: Vec<UserRow<'a>>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct WelcomePage<'a> {
    pub app_name: &'a str,
    pub version: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorPage<'a> {
    pub app_name: &'a str,
    pub status: u16,
    pub message: &'a str,
}
