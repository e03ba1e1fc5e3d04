// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TxnKind};
use crate::utils::{get_setting, http_client};

pub const ADVISOR_URL_KEY: &str = "advisor_url";
pub const ADVISOR_TOKEN_KEY: &str = "advisor_token";

/// Instruction template the spending data is embedded into. The model's
/// reply is relayed back verbatim.
const SAVINGS_TIPS_PROMPT: &str = "You are a personal finance advisor. Analyze the following spending data and provide actionable savings tips.

Spending Data:
{{spendingData}}

Provide specific and practical suggestions on how the user can save money based on their spending habits.";

#[derive(Debug, Clone, Serialize)]
pub struct SavingsTipsInput {
    #[serde(rename = "spendingData")]
    pub spending_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsTipsOutput {
    #[serde(rename = "savingsTips")]
    pub savings_tips: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}

/// Serializes expense transactions as "category: $amount" pairs joined by
/// commas, the shape the advisor prompt expects.
pub fn spending_data(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .filter(|t| t.kind == TxnKind::Expense)
        .map(|t| format!("{}: ${:.2}", t.category, t.amount))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_prompt(input: &SavingsTipsInput) -> String {
    SAVINGS_TIPS_PROMPT.replace("{{spendingData}}", &input.spending_data)
}

/// One request/response call against the configured advisor endpoint. No
/// retry, no streaming; the response text passes through unmodified.
pub fn generate_savings_tips(conn: &Connection, input: &SavingsTipsInput) -> Result<SavingsTipsOutput> {
    let url = get_setting(conn, ADVISOR_URL_KEY)?
        .context("Advisor endpoint not configured; run 'finview advisor configure --url <URL>'")?;
    let prompt = render_prompt(input);
    let client = http_client()?;
    let mut req = client.post(&url).json(&CompletionRequest { prompt: &prompt });
    if let Some(token) = get_setting(conn, ADVISOR_TOKEN_KEY)? {
        req = req.bearer_auth(token);
    }
    tracing::debug!(%url, "requesting savings tips");
    let resp = req.send()?.error_for_status()?;
    let out: SavingsTipsOutput = resp.json().context("Advisor response missing savingsTips")?;
    Ok(out)
}
