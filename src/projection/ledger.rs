//! Savings ledger: running account balances and the deficit waterfall

use crate::household::SavingsAccount;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct LedgerAccount {
    id: String,
    balance: f64,
    annual_contribution: f64,
    annual_interest_rate: f64,
}

/// Result of drawing savings down to cover a cash shortfall
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Withdrawal {
    /// Amount taken out of accounts
    pub withdrawn: f64,

    /// Part of the deficit no account could cover
    pub unrecovered: f64,
}

/// Run-local copy of every savings account balance
///
/// Created fresh for each projection; the caller's accounts are never touched.
#[derive(Debug, Clone, Default)]
pub struct SavingsLedger {
    accounts: Vec<LedgerAccount>,

    /// Indices into `accounts` in withdrawal order
    waterfall: Vec<usize>,
}

impl SavingsLedger {
    pub fn from_accounts(accounts: &[SavingsAccount]) -> Self {
        let ledger_accounts = accounts
            .iter()
            .map(|a| LedgerAccount {
                id: a.id.clone(),
                balance: a.balance,
                annual_contribution: a.annual_contribution,
                annual_interest_rate: a.annual_interest_rate,
            })
            .collect();

        // Stable sort keeps input order among equal priorities
        let mut waterfall: Vec<usize> = (0..accounts.len()).collect();
        waterfall.sort_by_key(|&i| accounts[i].effective_withdraw_priority());

        Self {
            accounts: ledger_accounts,
            waterfall,
        }
    }

    /// Add every account's fixed contribution; returns the cash paid in
    pub fn contribute(&mut self) -> f64 {
        let mut total = 0.0;
        for account in &mut self.accounts {
            account.balance += account.annual_contribution;
            total += account.annual_contribution;
        }
        total
    }

    /// Withdraw in priority order until the deficit is covered or savings run out
    pub fn cover_deficit(&mut self, deficit: f64) -> Withdrawal {
        let mut remaining = deficit.max(0.0);
        let mut withdrawn = 0.0;

        for &i in &self.waterfall {
            if remaining <= 0.0 {
                break;
            }
            let account = &mut self.accounts[i];
            let take = account.balance.min(remaining).max(0.0);
            account.balance -= take;
            remaining -= take;
            withdrawn += take;
        }

        Withdrawal {
            withdrawn,
            unrecovered: remaining,
        }
    }

    /// Grow each balance by its annual interest rate
    pub fn apply_interest(&mut self) {
        for account in &mut self.accounts {
            account.balance *= 1.0 + account.annual_interest_rate;
        }
    }

    pub fn total(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    pub fn balance(&self, id: &str) -> Option<f64> {
        self.accounts.iter().find(|a| a.id == id).map(|a| a.balance)
    }

    /// Snapshot of balances keyed by account id
    pub fn balances(&self) -> BTreeMap<String, f64> {
        self.accounts
            .iter()
            .map(|a| (a.id.clone(), a.balance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AccountKind, AccountRole};
    use approx::assert_relative_eq;

    fn account(id: &str, kind: AccountKind, balance: f64) -> SavingsAccount {
        SavingsAccount {
            id: id.into(),
            label: id.into(),
            kind,
            role: None,
            balance,
            annual_contribution: 0.0,
            annual_interest_rate: 0.0,
            adjustable: true,
            withdraw_priority: None,
            contribution_policy: None,
        }
    }

    #[test]
    fn test_single_account_shortfall() {
        let mut ledger = SavingsLedger::from_accounts(&[account("dep", AccountKind::Deposit, 3_000_000.0)]);
        let w = ledger.cover_deficit(3_500_000.0);
        assert_relative_eq!(w.withdrawn, 3_000_000.0);
        assert_relative_eq!(w.unrecovered, 500_000.0);
        assert_eq!(ledger.balance("dep"), Some(0.0));
    }

    #[test]
    fn test_deposits_drawn_before_investments() {
        let accounts = vec![
            account("fund", AccountKind::Investment, 1_000_000.0),
            account("bank", AccountKind::Deposit, 400_000.0),
        ];
        let mut ledger = SavingsLedger::from_accounts(&accounts);

        let w = ledger.cover_deficit(600_000.0);
        assert_relative_eq!(w.withdrawn, 600_000.0);
        assert_relative_eq!(w.unrecovered, 0.0);
        assert_eq!(ledger.balance("bank"), Some(0.0));
        assert_eq!(ledger.balance("fund"), Some(800_000.0));
    }

    #[test]
    fn test_explicit_priority_overrides_type() {
        let mut fund = account("fund", AccountKind::Investment, 1_000_000.0);
        fund.withdraw_priority = Some(0);
        let mut bank = account("bank", AccountKind::Deposit, 400_000.0);
        bank.role = Some(AccountRole::Emergency);

        let mut ledger = SavingsLedger::from_accounts(&[bank, fund]);
        ledger.cover_deficit(300_000.0);
        assert_eq!(ledger.balance("fund"), Some(700_000.0));
        assert_eq!(ledger.balance("bank"), Some(400_000.0));
    }

    #[test]
    fn test_contributions_then_interest() {
        let mut a = account("a", AccountKind::Investment, 1_000_000.0);
        a.annual_contribution = 200_000.0;
        a.annual_interest_rate = 0.05;
        let mut ledger = SavingsLedger::from_accounts(&[a]);

        let paid = ledger.contribute();
        ledger.apply_interest();

        assert_relative_eq!(paid, 200_000.0);
        assert_relative_eq!(ledger.total(), 1_260_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_no_deficit_is_noop() {
        let mut ledger = SavingsLedger::from_accounts(&[account("a", AccountKind::Deposit, 10.0)]);
        assert_eq!(ledger.cover_deficit(0.0), Withdrawal::default());
        assert_eq!(ledger.total(), 10.0);
    }

    #[test]
    fn test_caller_accounts_untouched() {
        let accounts = vec![account("a", AccountKind::Deposit, 100.0)];
        let mut ledger = SavingsLedger::from_accounts(&accounts);
        ledger.cover_deficit(100.0);
        assert_eq!(accounts[0].balance, 100.0);
        assert_eq!(ledger.balances().get("a"), Some(&0.0));
    }
}
