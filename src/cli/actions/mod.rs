pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        config_url: Option<String>,
        config_token: Option<String>,
        frontend_url: String,
        state_file: String,
        issuer: String,
        account: String,
    },
}
