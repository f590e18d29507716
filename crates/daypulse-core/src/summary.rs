//! Natural-language summary of a score series.
//!
//! Wraps the external Gemini text-generation call with a hard deadline
//! and a mandatory local fallback: whatever goes wrong -- missing
//! credential, timeout, transport failure, quota, empty body -- the
//! caller still receives the deterministic rule-based report from
//! [`crate::stats`], with a one-line disclosure appended. No error from
//! this path ever reaches the caller.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::SummaryConfig;
use crate::error::SummaryError;
use crate::scoring::{DailyScore, DateRange};
use crate::stats;

/// Score summarizer with timeout-bounded external enrichment.
pub struct Summarizer {
    config: SummaryConfig,
    client: reqwest::Client,
}

impl Summarizer {
    /// Create a summarizer from configuration.
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// API key from configuration, falling back to the environment.
    fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.config.api_key {
            let key = key.trim();
            if !key.is_empty() {
                return Some(key.to_string());
            }
        }
        for var in ["GEMINI_API_KEY", "GOOGLE_API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                let key = key.trim().to_string();
                if !key.is_empty() {
                    return Some(key);
                }
            }
        }
        None
    }

    /// Summarize a score series, never failing.
    ///
    /// Resolution order: with no API key, return the local report
    /// directly; otherwise call the model under
    /// [`tokio::time::timeout`] and fall back to the local report on
    /// any failure, appending a disclosure line naming the cause class.
    pub async fn summarize(&self, range: &DateRange, series: &[DailyScore]) -> String {
        let fallback = stats::local_report(range, series);

        let Some(api_key) = self.resolve_api_key() else {
            return format!("{fallback}\n\n{}", disclosure(&SummaryError::MissingKey));
        };

        let prompt = build_prompt(range, series, &fallback);
        let deadline = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(deadline, self.generate(&api_key, &prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => format!("{fallback}\n\n{}", disclosure(&err)),
            Err(_) => format!(
                "{fallback}\n\n{}",
                disclosure(&SummaryError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                })
            ),
        }
    }

    /// One generateContent call; all failure shapes become [`SummaryError`].
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, SummaryError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            api_key,
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(SummaryError::Status {
                status: response.status().as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|_| SummaryError::EmptyResponse)?;
        let text = payload
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if text.is_empty() {
            return Err(SummaryError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Build the coaching prompt: instructions, the rule-based report as a
/// seed the model may rewrite, then the raw per-day data.
fn build_prompt(range: &DateRange, series: &[DailyScore], fallback: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a coach helping a user review how consistently they execute their plans. \
         Below are their daily planning scores and supporting metrics for a period. \
         Write an insightful summary.\n\n\
         Cover:\n\
         1. Overall assessment: how well plans were completed and how disciplined the period was.\n\
         2. Trend: improving, declining or stable, and roughly when it changed.\n\
         3. Patterns: e.g. strong weekends and weak weekdays, or an early sprint followed by a slump.\n\
         4. Suggestions: 2-4 concrete, actionable ways to improve goal breakdown, task selection and note habits.\n\
         5. Constraints: never say you are an AI model and never describe the scoring implementation.\n\n",
    );

    prompt.push_str(&format!("Date range: {} ~ {}\n\n", range.start, range.end));
    prompt.push_str(
        "A preliminary rule-based summary follows; rewrite, extend or correct it as the data warrants:\n",
    );
    prompt.push_str(fallback);
    prompt.push_str("\n\nRaw data in ascending date order:\n");
    prompt.push_str(
        "Fields: date, totalScore(0-100), plannedTasks, completedTasks, noteCount, \
         weightedTaskCompletionRate(0-1), goalsCompletedToday, avgGoalProgress(0-1)\n",
    );

    let mut ordered: Vec<&DailyScore> = series.iter().collect();
    ordered.sort_by_key(|s| s.date);
    for score in ordered {
        prompt.push_str(&format!(
            "{}: totalScore={}, planned={}, done={}, notes={}, weightedCompletion={:.2}, goalsDone={}, avgGoalProgress={:.2}\n",
            score.date,
            score.total_score,
            score.planned_tasks,
            score.completed_tasks,
            score.note_count,
            score.weighted_task_completion_rate,
            score.goals_completed_today,
            score.avg_goal_progress,
        ));
    }

    prompt.push_str(
        "\nWrite 4-8 short paragraphs, natural in tone, concise and focused.",
    );
    prompt
}

/// Disclosure line appended to the fallback report.
fn disclosure(err: &SummaryError) -> String {
    match err {
        SummaryError::MissingKey => {
            "(Note: no API key is configured; this summary was generated by local rules.)"
                .to_string()
        }
        SummaryError::Timeout { timeout_secs } => format!(
            "(Note: the summary service did not answer within {timeout_secs} seconds; this summary was generated by local rules.)"
        ),
        SummaryError::Transport(_) | SummaryError::Status { .. } | SummaryError::EmptyResponse => {
            "(Note: the summary service call failed; this summary was generated by local rules.)"
                .to_string()
        }
    }
}
