//! Integration tests for the scrape coordinator
//!
//! These tests drive the full load, consent, read, and paginate cycle against
//! a scripted in-memory browser session.

use pl_stats_scraper::config::TimeoutConfig;
use pl_stats_scraper::scrape::{CONSENT_ACCEPT, CONSENT_PREFERENCES, NEXT_PAGE};
use pl_stats_scraper::{
    extract_rows, ConsentOutcome, Coordinator, ScraperError, Session, SessionError, StatKind,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BASE_URL: &str = "https://www.premierleague.com/stats/top/players/";

/// How the scripted page presents the cookie dialog
#[derive(Debug, Clone, Copy)]
enum ConsentScript {
    /// Preferences and accept controls both appear
    Present,
    /// No dialog at all
    Absent,
    /// Preferences opens, but the accept control never appears
    AcceptMissing,
}

/// Everything the session was asked to do
#[derive(Debug, Default)]
struct CallLog {
    navigations: Vec<String>,
    consent_clicks: Vec<String>,
    next_lookups: u32,
    next_clicks: u32,
    closes: u32,
}

struct ScriptedSession {
    pages: Vec<String>,
    consent: ConsentScript,
    fail_navigation: bool,
    fail_consent: bool,
    fail_close: bool,
    current: Mutex<Option<usize>>,
    log: Arc<Mutex<CallLog>>,
}

impl ScriptedSession {
    fn new(pages: Vec<String>, consent: ConsentScript) -> (Self, Arc<Mutex<CallLog>>) {
        let log = Arc::new(Mutex::new(CallLog::default()));
        let session = Self {
            pages,
            consent,
            fail_navigation: false,
            fail_consent: false,
            fail_close: false,
            current: Mutex::new(None),
            log: Arc::clone(&log),
        };
        (session, log)
    }

    fn failing_navigation() -> (Self, Arc<Mutex<CallLog>>) {
        let (mut session, log) = Self::new(vec![page(&[])], ConsentScript::Absent);
        session.fail_navigation = true;
        (session, log)
    }
}

#[async_trait::async_trait]
impl Session for ScriptedSession {
    type Control = String;

    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.log.lock().unwrap().navigations.push(url.to_string());
        if self.fail_navigation {
            return Err(SessionError::Command("net::ERR_NAME_NOT_RESOLVED".to_string()));
        }
        *self.current.lock().unwrap() = Some(0);
        Ok(())
    }

    async fn current_content(&self) -> Result<String, SessionError> {
        Ok(match *self.current.lock().unwrap() {
            Some(index) => self.pages[index].clone(),
            None => "<html><body></body></html>".to_string(),
        })
    }

    async fn find_clickable(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Option<String>, SessionError> {
        if self.fail_consent && selector == CONSENT_PREFERENCES {
            return Err(SessionError::Command("chrome not reachable".to_string()));
        }

        let found = match selector {
            CONSENT_PREFERENCES => !matches!(self.consent, ConsentScript::Absent),
            CONSENT_ACCEPT => matches!(self.consent, ConsentScript::Present),
            NEXT_PAGE => {
                self.log.lock().unwrap().next_lookups += 1;
                let current = self.current.lock().unwrap().unwrap_or(0);
                current + 1 < self.pages.len()
            }
            _ => false,
        };

        Ok(found.then(|| selector.to_string()))
    }

    async fn click(&self, control: String) -> Result<(), SessionError> {
        let mut log = self.log.lock().unwrap();
        if control == NEXT_PAGE {
            let mut current = self.current.lock().unwrap();
            *current = current.map(|index| index + 1);
            log.next_clicks += 1;
        } else {
            log.consent_clicks.push(control);
        }
        Ok(())
    }

    async fn close(self) -> Result<(), SessionError> {
        self.log.lock().unwrap().closes += 1;
        if self.fail_close {
            return Err(SessionError::Command("session already deleted".to_string()));
        }
        Ok(())
    }
}

fn row(rank: u32, name: Option<&str>, club: &str, stat: u32) -> String {
    let name_cell = name
        .map(|n| {
            format!(
                r#"<td><a class="playerName" href="//www.premierleague.com/players/{}/overview">{}</a></td>"#,
                rank, n
            )
        })
        .unwrap_or_else(|| "<td></td>".to_string());

    format!(
        r#"<tr class="table__row">
            <td class="stats-table__rank">{}.</td>
            {}
            <td><a class="stats-table__cell-icon-align" href="/clubs/1">{}</a></td>
            <td><span class="playerCountry">England</span></td>
            <td class="stats-table__main-stat">{}</td>
        </tr>"#,
        rank, name_cell, club, stat
    )
}

fn page(rows: &[String]) -> String {
    format!(
        r#"<html><body><table><tbody class="stats-table__container">{}</tbody></table></body></html>"#,
        rows.join("\n")
    )
}

fn two_pages() -> Vec<String> {
    vec![
        page(&[
            row(1, Some("Gareth Barry"), "Everton", 1017),
            row(2, Some("Lucas Leiva"), "Liverpool", 998),
        ]),
        page(&[
            row(3, Some("Frank Lampard"), "Chelsea", 951),
            row(4, None, "Arsenal", 940),
        ]),
    ]
}

fn fast_timeouts() -> TimeoutConfig {
    TimeoutConfig {
        consent_ms: 50,
        next_page_ms: 50,
        table_ready_ms: 200,
        settle_ms: 200,
        poll_interval_ms: 10,
    }
}

fn coordinator() -> Coordinator {
    Coordinator::new(BASE_URL, fast_timeouts()).unwrap()
}

#[tokio::test]
async fn test_scrape_two_pages_end_to_end() {
    let (session, log) = ScriptedSession::new(two_pages(), ConsentScript::Present);

    let records = coordinator()
        .scrape(session, StatKind::Tackles, 2)
        .await
        .unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Gareth Barry", "Lucas Leiva", "Frank Lampard"]);
    assert_eq!(records[0].rank, 1);
    assert_eq!(records[0].stat_value, "1017");
    assert_eq!(
        records[0].profile_link,
        "www.premierleague.com/players/1/overview"
    );
    assert_eq!(records[2].club, "Chelsea");

    let log = log.lock().unwrap();
    assert_eq!(
        log.navigations,
        vec![format!("{}total_tackle?se=-1", BASE_URL)]
    );
    assert_eq!(
        log.consent_clicks,
        vec![CONSENT_PREFERENCES.to_string(), CONSENT_ACCEPT.to_string()]
    );
    assert_eq!(log.next_clicks, 1);
    assert_eq!(log.next_lookups, 2);
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_run_reports_counts() {
    let (session, _log) = ScriptedSession::new(two_pages(), ConsentScript::Present);

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.pages_read, 2);
    assert_eq!(outcome.advances, 1);
    assert_eq!(outcome.rows_skipped, 1);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.consent, Some(ConsentOutcome::Handled));
}

#[tokio::test]
async fn test_zero_pages_never_advances() {
    let (session, log) = ScriptedSession::new(two_pages(), ConsentScript::Absent);

    let records = coordinator()
        .scrape(session, StatKind::Goals, 0)
        .await
        .unwrap();

    assert!(records.is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.next_lookups, 0);
    assert_eq!(log.next_clicks, 0);
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_single_page_attempts_one_advance() {
    let (session, log) = ScriptedSession::new(two_pages(), ConsentScript::Absent);

    let records = coordinator()
        .scrape(session, StatKind::Tackles, 1)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    let log = log.lock().unwrap();
    assert_eq!(log.next_lookups, 1);
    assert_eq!(log.next_clicks, 1);
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_pagination_failure_mid_run() {
    let pages = vec![two_pages().remove(0)];

    let (session, log) = ScriptedSession::new(pages.clone(), ConsentScript::Absent);
    let result = coordinator().scrape(session, StatKind::Tackles, 3).await;

    assert!(matches!(
        result,
        Err(ScraperError::Pagination { page: 1, .. })
    ));
    {
        let log = log.lock().unwrap();
        assert_eq!(log.next_lookups, 1);
        assert_eq!(log.closes, 1);
    }

    let (session, log) = ScriptedSession::new(pages, ConsentScript::Absent);
    let outcome = coordinator().run(session, StatKind::Tackles, 3).await;

    assert!(!outcome.is_complete());
    assert_eq!(outcome.pages_read, 1);
    assert_eq!(outcome.advances, 0);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[tokio::test]
async fn test_navigation_failure_closes_session() {
    let (session, log) = ScriptedSession::failing_navigation();

    let result = coordinator().scrape(session, StatKind::Appearances, 2).await;

    match result {
        Err(ScraperError::Navigation { url, .. }) => {
            assert_eq!(url, format!("{}appearances?se=-1", BASE_URL));
        }
        other => panic!("expected navigation error, got {:?}", other),
    }

    let log = log.lock().unwrap();
    assert_eq!(log.next_lookups, 0);
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_consent_absent_continues() {
    let (session, log) = ScriptedSession::new(two_pages(), ConsentScript::Absent);

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.consent, Some(ConsentOutcome::NotPresent));
    assert_eq!(outcome.records.len(), 3);
    assert!(log.lock().unwrap().consent_clicks.is_empty());
}

#[tokio::test]
async fn test_consent_accept_missing_times_out() {
    let (session, log) = ScriptedSession::new(two_pages(), ConsentScript::AcceptMissing);

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.consent, Some(ConsentOutcome::TimedOut));
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(
        log.lock().unwrap().consent_clicks,
        vec![CONSENT_PREFERENCES.to_string()]
    );
}

#[tokio::test]
async fn test_consent_driver_error_is_not_fatal() {
    let (mut session, log) = ScriptedSession::new(two_pages(), ConsentScript::Present);
    session.fail_consent = true;

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.consent, Some(ConsentOutcome::TimedOut));
    assert_eq!(outcome.records.len(), 3);

    let log = log.lock().unwrap();
    assert!(log.consent_clicks.is_empty());
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_close_failure_keeps_run_result() {
    let (mut session, log) = ScriptedSession::new(two_pages(), ConsentScript::Present);
    session.fail_close = true;

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.consent, Some(ConsentOutcome::Handled));
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[tokio::test]
async fn test_close_failure_after_scrape_returns_records() {
    let (mut session, log) = ScriptedSession::new(two_pages(), ConsentScript::Absent);
    session.fail_close = true;

    let records = coordinator()
        .scrape(session, StatKind::Tackles, 2)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[tokio::test]
async fn test_unchanged_content_after_click_is_not_fatal() {
    let same = two_pages().remove(0);
    let (session, log) = ScriptedSession::new(vec![same.clone(), same], ConsentScript::Absent);

    let outcome = coordinator().run(session, StatKind::Tackles, 2).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.advances, 1);
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[test]
fn test_extract_rows_is_idempotent() {
    let html = two_pages().remove(1);

    let first = extract_rows(&html, StatKind::Tackles).unwrap();
    let second = extract_rows(&html, StatKind::Tackles).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].nationality, "England");
}
