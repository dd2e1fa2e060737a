use chrono::Local;
use futures_util::{SinkExt, StreamExt};
use rink_api::badge::BadgeCache;
use rink_api::client::RinkApi;
use rink_api::config::{self, SourceConfig};
use rink_api::{TeamQuery, TeamReport};
use serde::Serialize;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{RwLock, broadcast};
use tokio_tungstenite::{accept_async, tungstenite::Message};

const FEED_BIND_ENV: &str = "RINKSIDE_FEED_BIND";

/// Last serialized update, replayed to clients as soon as they connect.
type Latest = Arc<RwLock<Option<String>>>;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FeedMessage<'a> {
    Report {
        updated_at: String,
        report: &'a TeamReport,
    },
    Error {
        updated_at: String,
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = env::var(FEED_BIND_ENV).unwrap_or_else(|_| "0.0.0.0:8788".to_string());
    let client = RinkApi::new(SourceConfig::from_env());
    let team = config::team_query_from_env();
    let every = config::refresh_interval_from_env();

    let listener = TcpListener::bind(&addr).await?;
    let (tx, _rx) = broadcast::channel::<String>(16);
    let latest: Latest = Arc::new(RwLock::new(None));

    eprintln!(
        "report feed for '{}' listening on {addr}, refreshing every {}s",
        team.tag(),
        every.as_secs()
    );

    tokio::spawn(refresh_loop(client, team, every, tx.clone(), latest.clone()));

    loop {
        let (stream, peer) = listener.accept().await?;
        let rx = tx.subscribe();
        let latest = latest.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, latest, rx).await {
                eprintln!("client {peer} disconnected: {e}");
            }
        });
    }
}

async fn refresh_loop(
    client: RinkApi,
    team: TeamQuery,
    every: Duration,
    tx: broadcast::Sender<String>,
    latest: Latest,
) {
    let mut badges = BadgeCache::default();
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;
        let updated_at = Local::now().to_rfc3339();

        let (message, is_report) = match client.fetch_team_report(&team, &mut badges).await {
            Ok(report) => (
                serde_json::to_string(&FeedMessage::Report {
                    updated_at,
                    report: &report,
                }),
                true,
            ),
            Err(e) => {
                eprintln!("refresh failed: {e}");
                (
                    serde_json::to_string(&FeedMessage::Error {
                        updated_at,
                        message: e.to_string(),
                    }),
                    false,
                )
            }
        };

        let text = match message {
            Ok(text) => text,
            Err(e) => {
                eprintln!("could not serialize feed update: {e}");
                continue;
            }
        };

        // Failed refreshes are broadcast but never replace the last good report.
        if is_report {
            *latest.write().await = Some(text.clone());
        }
        // No subscribers is not an error.
        let _ = tx.send(text);
    }
}

async fn handle_client(
    stream: TcpStream,
    latest: Latest,
    mut rx: broadcast::Receiver<String>,
) -> anyhow::Result<()> {
    let ws = accept_async(stream).await?;
    let (mut write, mut read) = ws.split();

    let snapshot = latest.read().await.clone();
    if let Some(text) = snapshot {
        write.send(Message::Text(text.into())).await?;
    }

    loop {
        tokio::select! {
            inbound = read.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
            outbound = rx.recv() => {
                match outbound {
                    Ok(text) => {
                        write.send(Message::Text(text.into())).await?;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(())
}
