use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use futures::stream;
use ledger::prelude::*;
use rayon::prelude::*;
use std::sync::Arc;
use tokio::runtime::Runtime;

const TRANSFERS: usize = 10_000;

fn money(minor: i64) -> Money {
    Money::from_minor(minor)
}

fn bank_with_accounts(count: usize) -> (Arc<Bank>, Vec<AccountId>) {
    let bank = Bank::new("Bench");
    let ids = (0..count)
        .map(|i| {
            bank.create_account(AccountConfig::current(), format!("holder-{i}"), money(10_000_000))
                .unwrap()
        })
        .collect();
    (Arc::new(bank), ids)
}

/// Parallel transfers over a shrinking pool of accounts (rising contention)
fn bench_parallel_transfers_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_transfers_contention");

    for accounts in [2, 16, 256, 4_096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(accounts),
            &accounts,
            |b, &accounts| {
                b.iter_batched(
                    || bank_with_accounts(accounts),
                    |(bank, ids)| {
                        (0..TRANSFERS).into_par_iter().for_each(|i| {
                            let from = ids[i % ids.len()];
                            let to = ids[(i * 7 + 1) % ids.len()];
                            // Same-account pairs are rejected
                            black_box(bank.transfer(from, to, money(100)).ok());
                        });
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Opposing transfers between one pair, exercising lock ordering
fn bench_opposing_transfers(c: &mut Criterion) {
    c.bench_function("opposing_transfers", |b| {
        b.iter_batched(
            || bank_with_accounts(2),
            |(bank, ids)| {
                (0..TRANSFERS).into_par_iter().for_each(|i| {
                    let (from, to) = if i % 2 == 0 {
                        (ids[0], ids[1])
                    } else {
                        (ids[1], ids[0])
                    };
                    bank.transfer(from, to, money(100)).unwrap();
                });
            },
            BatchSize::SmallInput,
        );
    });
}

/// Command sessions sharing one bank on the tokio runtime
fn bench_concurrent_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_sessions");
    let runtime = Runtime::new().unwrap();

    for sessions in [1, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(sessions),
            &sessions,
            |b, &sessions| {
                b.to_async(&runtime).iter_batched(
                    || {
                        let (bank, ids) = bank_with_accounts(sessions * 2);
                        let scripts: Vec<Vec<Command>> = ids
                            .chunks(2)
                            .map(|pair| {
                                (0..100)
                                    .map(|_| Command::Transfer {
                                        from: pair[0],
                                        to: pair[1],
                                        amount: money(100),
                                    })
                                    .collect()
                            })
                            .collect();
                        (bank, scripts)
                    },
                    |(bank, scripts)| async move {
                        let handles: Vec<_> = scripts
                            .into_iter()
                            .map(|script| {
                                let bank = Arc::clone(&bank);
                                tokio::spawn(async move {
                                    let mut session = CommandSession::new(bank, SilentSkip);
                                    session.process_stream(stream::iter(script)).await
                                })
                            })
                            .collect();

                        for handle in handles {
                            black_box(handle.await.unwrap());
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parallel_transfers_contention,
    bench_opposing_transfers,
    bench_concurrent_sessions
);
criterion_main!(benches);
