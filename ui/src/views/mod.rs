mod dashboard;
pub use dashboard::DashboardScreen;

mod login;
pub use login::LoginScreen;

mod shell;
pub use shell::Shell;
