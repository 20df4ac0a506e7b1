use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::debug;

use super::error::ErrorPolicy;
use crate::engine::{Bank, Command, Outcome};
use crate::storage::AccountStore;

/// Applies a stream of commands to a shared bank, in order.
///
/// Several sessions may drive the same bank concurrently; the bank's own
/// locking keeps each command atomic.
pub struct CommandSession<S, P>
where
    S: AccountStore,
    P: ErrorPolicy,
{
    bank: Arc<Bank<S>>,
    error_policy: P,
    outcomes: Vec<Outcome>,
}

impl<S, P> CommandSession<S, P>
where
    S: AccountStore,
    P: ErrorPolicy,
{
    /// Create a new processing session
    pub fn new(bank: Arc<Bank<S>>, error_policy: P) -> Self {
        Self {
            bank,
            error_policy,
            outcomes: Vec::new(),
        }
    }

    /// Process a stream of commands
    /// Returns true if every command was applied (or skipped per policy)
    /// Returns false if processing was aborted due to error policy
    pub async fn process_stream<St>(&mut self, mut stream: St) -> bool
    where
        St: Stream<Item = Command> + Unpin,
    {
        while let Some(command) = stream.next().await {
            debug!(
                command = command.name(),
                account = ?command.account(),
                to = ?command.counterparty(),
                "Processing command"
            );

            match self.bank.execute(command.clone()) {
                Ok(outcome) => self.outcomes.push(outcome),
                Err(e) => {
                    if !self.error_policy.handle_ledger_error(&command, e) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Outcomes of the successfully applied commands, in order
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Get a reference to the underlying bank
    pub fn bank(&self) -> &Bank<S> {
        &self.bank
    }

    /// Consume the session and return its outcomes
    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountConfig, AccountId, LedgerError, Money};
    use crate::storage::ConcurrentAccountStore;
    use crate::streaming::error::{AbortOnError, SilentSkip, SkipErrors};
    use futures::stream;

    fn money(minor: i64) -> Money {
        Money::from_minor(minor)
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    fn bank_with_account(initial: i64) -> (Arc<Bank<ConcurrentAccountStore>>, AccountId) {
        let bank = Bank::new("Stream Bank");
        let config = AccountConfig::Current {
            overdraft_limit: Money::ZERO,
        };
        let id = bank.create_account(config, "Raj", money(initial)).unwrap();
        (Arc::new(bank), id)
    }

    fn commands(id: AccountId) -> Vec<Command> {
        vec![
            Command::Deposit {
                id,
                amount: money(10_000),
            },
            // More than the balance: rejected
            Command::Withdraw {
                id,
                amount: money(50_000),
            },
            Command::Withdraw {
                id,
                amount: money(4_000),
            },
        ]
    }

    #[tokio::test]
    async fn processes_valid_commands() {
        init_tracing();
        let (bank, id) = bank_with_account(0);
        let mut session = CommandSession::new(bank, SilentSkip);

        let success = session
            .process_stream(stream::iter(vec![
                Command::Deposit {
                    id,
                    amount: money(10_000),
                },
                Command::TotalDeposits,
            ]))
            .await;

        assert!(success);
        assert_eq!(
            session.outcomes(),
            &[
                Outcome::Balance(money(10_000)),
                Outcome::Total(money(10_000))
            ]
        );
    }

    #[tokio::test]
    async fn skip_errors_continues_after_rejection() {
        init_tracing();
        let (bank, id) = bank_with_account(0);
        let mut session = CommandSession::new(bank, SkipErrors);

        let success = session.process_stream(stream::iter(commands(id))).await;

        assert!(success);
        assert_eq!(session.bank().balance(id), Ok(money(6_000)));
        assert_eq!(session.outcomes().len(), 2);
    }

    #[tokio::test]
    async fn abort_on_error_stops_at_rejection() {
        init_tracing();
        let (bank, id) = bank_with_account(0);
        let mut session = CommandSession::new(bank, AbortOnError);

        let success = session.process_stream(stream::iter(commands(id))).await;

        assert!(!success);
        // Third command never ran
        assert_eq!(session.bank().balance(id), Ok(money(10_000)));
        assert_eq!(session.into_outcomes(), vec![Outcome::Balance(money(10_000))]);
    }

    #[tokio::test]
    async fn processes_empty_stream() {
        let (bank, _) = bank_with_account(0);
        let mut session = CommandSession::new(bank, SilentSkip);

        assert!(session.process_stream(stream::iter(Vec::new())).await);
        assert!(session.outcomes().is_empty());
    }

    #[tokio::test]
    async fn concurrent_sessions_share_one_bank() {
        init_tracing();
        let bank = Arc::new(Bank::new("Shared Bank"));
        let a = bank
            .create_account(AccountConfig::current(), "A", money(100_000))
            .unwrap();
        let b = bank
            .create_account(AccountConfig::current(), "B", money(100_000))
            .unwrap();

        let spawn_transfers = |from: AccountId, to: AccountId| {
            let bank = Arc::clone(&bank);
            tokio::spawn(async move {
                let transfers: Vec<_> = (0..200)
                    .map(|_| Command::Transfer {
                        from,
                        to,
                        amount: money(100),
                    })
                    .collect();
                let mut session = CommandSession::new(bank, AbortOnError);
                session.process_stream(stream::iter(transfers)).await
            })
        };

        let forward = spawn_transfers(a, b);
        let backward = spawn_transfers(b, a);
        assert!(forward.await.unwrap());
        assert!(backward.await.unwrap());

        assert_eq!(bank.balance(a), Ok(money(100_000)));
        assert_eq!(bank.balance(b), Ok(money(100_000)));
        assert_eq!(bank.get_statement(a, None).unwrap().len(), 401);
    }

    #[tokio::test]
    async fn rejected_commands_do_not_record_outcomes() {
        let (bank, id) = bank_with_account(0);
        let mut session = CommandSession::new(bank, SilentSkip);

        session
            .process_stream(stream::iter(vec![Command::CloseAccount { id }, Command::CloseAccount { id }]))
            .await;

        assert_eq!(session.outcomes(), &[Outcome::Done]);
        assert_eq!(
            session.bank().close_account(id),
            Err(LedgerError::AlreadyClosed)
        );
    }
}
