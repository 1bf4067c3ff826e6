//! Distribution of a pooled currency balance across eligible recipients.
//!
//! Splitting is per denomination: each recipient receives
//! `floor(amount / n)` coins of every tier, and the indivisible remainder
//! is consumed by the split. The holder's purse is unconditionally reset
//! to zero afterwards; the remainder is discarded, not retained or
//! awarded.

use coinward_types::{Denomination, DistributionOutcome, Purse, TraderState};

use crate::error::TradeError;
use crate::ports::{PurseVault, RecipientResolver, TradeReporter};

/// Split a purse into an equal integer share for `share_count` recipients
/// plus the indivisible remainder.
///
/// With zero recipients the share is empty and the whole purse is the
/// remainder.
pub fn split_purse(purse: &Purse, share_count: usize) -> (Purse, Purse) {
    let Ok(n) = u64::try_from(share_count) else {
        return (Purse::EMPTY, *purse);
    };
    if n == 0 {
        return (Purse::EMPTY, *purse);
    }

    let mut share = Purse::EMPTY;
    let mut remainder = Purse::EMPTY;
    for denomination in Denomination::ALL {
        let amount = purse.amount(denomination);
        let per_recipient = amount.checked_div(n).unwrap_or(0);
        let distributed = per_recipient.saturating_mul(n);
        share.set_amount(denomination, per_recipient);
        remainder.set_amount(denomination, amount.saturating_sub(distributed));
    }
    (share, remainder)
}

/// Split the holder's entire balance across the eligible recipients.
///
/// - Zero eligible recipients is a no-op: the holder's purse is untouched
///   and no error is raised -- there is simply nothing eligible to receive.
/// - Every recipient is credited the identical share, additively onto
///   their existing balance, through the awaited vault port.
/// - The holder's purse is reset to all-zero regardless of remainder size.
pub async fn distribute<Res, V, R>(
    holder: &mut TraderState,
    resolver: &Res,
    vault: &mut V,
    reporter: &mut R,
) -> Result<DistributionOutcome, TradeError>
where
    Res: RecipientResolver,
    V: PurseVault,
    R: TradeReporter,
{
    let recipients = resolver.eligible_recipients(holder.actor_id).await;
    if recipients.is_empty() {
        tracing::debug!(holder = %holder.actor_id, "no eligible recipients; distribution skipped");
        return Ok(DistributionOutcome {
            share: Purse::EMPTY,
            recipients: Vec::new(),
            discarded: Purse::EMPTY,
        });
    }

    let (share, discarded) = split_purse(&holder.purse, recipients.len());
    for recipient in &recipients {
        vault.credit(*recipient, &share).await?;
    }
    holder.purse = Purse::EMPTY;

    tracing::debug!(
        holder = %holder.actor_id,
        recipients = recipients.len(),
        share = %share,
        discarded = %discarded,
        "distribution settled"
    );
    let outcome = DistributionOutcome {
        share,
        recipients,
        discarded,
    };
    reporter.report_distribution(&outcome).await;
    Ok(outcome)
}
