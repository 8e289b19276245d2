pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        login_path: String,
        logout_path: String,
        failure_path: String,
        success_path: String,
        use_referrer: bool,
        user: String,
        password: String,
    },
}
