//! The API endpoints URIs.

/// The root route which redirects to the account page.
pub const ROOT: &str = "/";
/// The page showing the transaction overview for the account.
pub const ACCOUNT_VIEW: &str = "/account";
/// The daily income and expense summary as JSON.
pub const ACCOUNT_SUMMARY_API: &str = "/api/account/summary";
/// The route for static files.
pub const STATIC: &str = "/static";
