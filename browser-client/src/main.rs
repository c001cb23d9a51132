use browser_client::app::App;
use browser_client::commands::{parse_command, Command, HELP};
use browser_client::config::ClientConfig;
use browser_client::services::history_store::FileStore;
use browser_client::services::relay::RelayClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("browser_client=info")
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match ClientConfig::from_env().with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            info!("Usage: browser-client [--relay <url>] [--history <path>]");
            std::process::exit(1);
        }
    };

    info!(
        "Using relay {} with history in {}",
        config.relay_url,
        config.history_path.display()
    );

    let mut app = App::new(
        RelayClient::new(config.relay_url.clone()),
        FileStore::new(&config.history_path),
    );
    app.probe_status().await;

    println!("{}", app.render());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line, app.session()) {
            Ok(Command::Act(action)) => {
                app.dispatch(action).await;
                println!("{}", app.render());
            }
            Ok(Command::WriteHtml(path)) => match std::fs::write(&path, app.render().to_html()) {
                Ok(()) => println!("Wrote {}", path.display()),
                Err(e) => error!("Failed to write {}: {}", path.display(), e),
            },
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
