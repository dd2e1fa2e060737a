use mockito::{Matcher, Server};
use rink_api::badge::BadgeCache;
use rink_api::client::{ApiError, RinkApi};
use rink_api::config::SourceConfig;
use rink_api::{Outcome, TeamQuery};

const SCHEDULE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><script>var kickoff = "19:00";</script></head>
<body>
<table class="tblContent">
  <tr><th colspan="6">2025-11-28</th></tr>
  <tr>
    <td>19:00</td><td>19:00</td>
    <td>MoDo Hockey - Östersunds IK 3 - 1 (0-0, 1-1, 2-0) 7298 Hägglunds&nbsp;Arena</td>
  </tr>
  <tr>
    <td>19:00</td>
    <td>Leksands IF - Timrå IK 2 - 0 7650 Tegera Arena</td>
  </tr>
  <tr><th colspan="6">2025-12-02</th></tr>
  <tr>
    <td>19:00</td><td>19:00</td>
    <td>MoDo Hockey</td><td>-</td><td>IF Björklöven</td><td>-</td><td>Hägglunds Arena</td>
  </tr>
</table>
</body>
</html>"#;

fn config_for(server: &Server) -> SourceConfig {
    SourceConfig {
        schedule_url: format!("{}/ScheduleAndResults/Schedule/18266", server.url()),
        sportsdb_base: format!("{}/api/v1/json", server.url()),
        ..Default::default()
    }
}

#[tokio::test]
async fn schedule_page_parses_into_records() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", "/ScheduleAndResults/Schedule/18266")
        .match_header("user-agent", "Mozilla/5.0")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(SCHEDULE_HTML)
        .create_async()
        .await;

    let api = RinkApi::new(config_for(&server));
    let parsed = api.fetch_matches().await.unwrap();

    page.assert_async().await;
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.stats.records, 3);
    assert_eq!(parsed.records[0].venue, "Hägglunds Arena");
    assert_eq!(parsed.records[1].date, "2025-11-28");
    assert_eq!(parsed.records[2].date, "2025-12-02");
    assert!(parsed.records[2].is_upcoming());
}

#[tokio::test]
async fn team_report_has_badges_and_result() {
    let mut server = Server::new_async().await;
    let _page = server
        .mock("GET", "/ScheduleAndResults/Schedule/18266")
        .with_status(200)
        .with_body(SCHEDULE_HTML)
        .create_async()
        .await;

    // Any name containing "modo" is searched as "Modo"; the cache keeps the
    // second MoDo lookup off the wire.
    let modo = server
        .mock("GET", "/api/v1/json/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Modo".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"teams":[{"strTeam":"Modo","strBadge":"https://www.thesportsdb.com/images/media/team/badge/modo.png"}]}"#)
        .expect(1)
        .create_async()
        .await;
    let _ostersund = server
        .mock("GET", "/api/v1/json/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Östersunds IK".into()))
        .with_status(200)
        .with_body(r#"{"teams":null}"#)
        .create_async()
        .await;
    let _bjorkloven = server
        .mock("GET", "/api/v1/json/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "IF Björklöven".into()))
        .with_status(200)
        .with_body(r#"{"teams":[{"strTeam":"Björklöven","strBadge":"","strTeamBadge":"https://cdn.example.org/bjorkloven.png"}]}"#)
        .create_async()
        .await;

    let api = RinkApi::new(config_for(&server));
    let mut cache = BadgeCache::default();
    let snapshot = api
        .fetch_team_snapshot(&TeamQuery::new("modo"), &mut cache)
        .await
        .unwrap();
    let report = &snapshot.report;

    modo.assert_async().await;
    assert_eq!(report.team_tag, "modo");
    assert_eq!(report.team_name, "MoDo Hockey");
    assert_eq!(report.last_game.team_result, Some(Outcome::Win));
    assert_eq!(
        report.last_game.home_badge.as_deref(),
        Some("https://r2.thesportsdb.com/images/media/team/badge/modo.png")
    );
    assert_eq!(report.last_game.away_badge, None);
    assert_eq!(
        report.next_game.away_badge.as_deref(),
        Some("https://cdn.example.org/bjorkloven.png")
    );
    assert_eq!(snapshot.tracked.len(), 2);
    assert_eq!(cache.len(), 3);

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["last_game"]["home_score"], 3);
    assert_eq!(json["last_game"]["team_result"], "win");
    assert!(json["next_game"]["home_score"].is_null());
}

#[tokio::test]
async fn badge_errors_are_not_cached() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/api/v1/json/123/searchteams.php")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let api = RinkApi::new(config_for(&server));
    let mut cache = BadgeCache::default();
    assert_eq!(api.fetch_badge("Luleå HF", &mut cache).await, None);
    assert_eq!(api.fetch_badge("Luleå HF", &mut cache).await, None);
    assert!(cache.is_empty());
    assert_eq!(api.fetch_badge("   ", &mut cache).await, None);

    failing.assert_async().await;
}

#[tokio::test]
async fn missing_schedule_page_is_not_found() {
    let mut server = Server::new_async().await;
    let _page = server
        .mock("GET", "/ScheduleAndResults/Schedule/18266")
        .with_status(404)
        .create_async()
        .await;

    let api = RinkApi::new(config_for(&server));
    let err = api.fetch_schedule_lines().await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn server_error_on_schedule_page_is_api_error() {
    let mut server = Server::new_async().await;
    let _page = server
        .mock("GET", "/ScheduleAndResults/Schedule/18266")
        .with_status(503)
        .create_async()
        .await;

    let api = RinkApi::new(config_for(&server));
    let mut cache = BadgeCache::default();
    let err = api
        .fetch_team_report(&TeamQuery::new("modo"), &mut cache)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api(..)), "unexpected error: {err}");
}
