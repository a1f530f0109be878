use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::currency::{self, CurrencyLocale};
use crate::domain::ledger::standing_pledge;
use crate::domain::pledge::Pledge;
use crate::PledgeId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    /// Highest first, earliest first on equal amounts
    #[default]
    AmountDesc,
    /// Most recent first
    TimeDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    /// Only the initial and the last name are shown
    Redacted,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub pledge_id:        PledgeId,
    pub donor:            String,
    pub amount:           u64,
    pub formatted_amount: String,
    pub created_at:       DateTime<Utc>,
    pub is_standing:      bool,
}

/// Order the pledges for display. The rows only reflect the pledges given.
pub fn present(
    pledges: &[Pledge],
    order: HistoryOrder,
    privacy: Privacy,
    locale: CurrencyLocale,
) -> Vec<DisplayRow> {
    let standing = standing_pledge(pledges).map(|pledge| pledge.id.clone());

    let mut sorted = pledges.iter().collect::<Vec<_>>();
    match order {
        HistoryOrder::AmountDesc => sorted.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.created_at.cmp(&b.created_at))
        }),
        HistoryOrder::TimeDesc => sorted.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| b.amount.cmp(&a.amount))
        }),
    }

    sorted
        .into_iter()
        .map(|pledge| DisplayRow {
            pledge_id:        pledge.id.clone(),
            donor:            match privacy {
                Privacy::Redacted => redact_name(&pledge.name),
                Privacy::Full => pledge.name.trim().to_string(),
            },
            amount:           pledge.amount,
            formatted_amount: currency::format(pledge.amount, locale),
            created_at:       pledge.created_at,
            is_standing:      standing.as_ref() == Some(&pledge.id),
        })
        .collect()
}

/// `Jane Doe` becomes `J. Doe`, a single name only keeps its initial.
pub fn redact_name(name: &str) -> String {
    let words = name.split_whitespace().collect::<Vec<_>>();
    let Some(first) = words.first() else {
        return "Anonymous".to_string();
    };
    let initial = first
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    match words.last() {
        Some(last) if words.len() > 1 => format!("{initial}. {last}"),
        _ => format!("{initial}."),
    }
}
