use anyhow::Result;
use folio::ai::FolioAI;
use folio::config::Settings;
use folio::session::ConversationSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn init_tracing(settings: &Settings) -> Result<()> {
    let level = settings.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_last(session: &ConversationSession) {
    if let Some(content) = session.messages().last().and_then(|msg| msg.content()) {
        println!("jordan> {content}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(&settings)?;

    let ai = FolioAI::from_settings(settings)?;
    info!(online = ai.is_online(), "chat ready");

    let mut session = ConversationSession::new();
    print_last(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/clear" => {
                session.clear();
                print_last(&session);
            }
            text => {
                if text.is_empty() {
                    continue;
                }
                eprintln!("typing…");
                if let Some(reply) = session.send(text, &ai).await {
                    println!("jordan> {}", reply.content().unwrap_or_default());
                }
            }
        }
    }

    Ok(())
}
