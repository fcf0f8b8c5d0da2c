use qminder_deploy::config::{self, ClientOptions};
use qminder_deploy::constants::DOTENV_FILE;
use qminder_deploy::s3::{UploadRequest, connect_with};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::fmt::time::LocalTime;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 加载 .env 文件
    let dotenv_loaded = config::load_dotenv(Path::new(DOTENV_FILE));

    tracing_subscriber::fmt()
        .with_timer(LocalTime::rfc_3339())
        .with_target(false)
        .init();

    if dotenv_loaded {
        tracing::debug!("Loaded environment from {}", DOTENV_FILE);
    }

    let options = ClientOptions::from_env();
    let request = UploadRequest::artifact();

    let result = qminder_deploy::deploy(config::env_lookup, &request, move |credentials| async move {
        connect_with(&credentials, &options).await
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}
