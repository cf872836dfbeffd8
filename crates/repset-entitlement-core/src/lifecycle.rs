//! Subscription lifecycle evaluation
//!
//! Pure calendar arithmetic over a subscription's persisted state. Expiry is
//! lazy: nothing flips a row to expired on a timer, the read path evaluates
//! the dates and asks the repository to record the transition when one is
//! due. Running the evaluation twice for the same day is a no-op the second
//! time.

use chrono::NaiveDate;

use repset_types::SubscriptionStatus;

/// Outcome of evaluating a subscription's dates against a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCheck {
    /// Within its trial or paid period
    Active,
    /// Past its end date; the row should be marked expired
    Expire,
    /// In a terminal or suspended state; dates are irrelevant
    Inactive,
}

/// Evaluate a subscription's status and dates against `today`.
///
/// The end date itself is still in-period; access lapses the day after. A
/// trial or active row missing its end date cannot prove entitlement and
/// expires.
pub fn evaluate(
    status: SubscriptionStatus,
    trial_end: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    today: NaiveDate,
) -> LifecycleCheck {
    let end = match status {
        SubscriptionStatus::Trial => trial_end,
        SubscriptionStatus::Active => period_end,
        SubscriptionStatus::Expired
        | SubscriptionStatus::Suspended
        | SubscriptionStatus::Cancelled => return LifecycleCheck::Inactive,
    };
    match end {
        Some(end) if today <= end => LifecycleCheck::Active,
        _ => LifecycleCheck::Expire,
    }
}

/// Days left in the current trial or billing period, zero on the last day.
/// `None` for states without a running period.
pub fn days_remaining(
    status: SubscriptionStatus,
    trial_end: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<i64> {
    let end = match status {
        SubscriptionStatus::Trial => trial_end?,
        SubscriptionStatus::Active => period_end?,
        _ => return None,
    };
    Some(end.signed_duration_since(today).num_days().max(0))
}
