use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ledger::prelude::*;

fn money(minor: i64) -> Money {
    Money::from_minor(minor)
}

fn bank_with_accounts<S: AccountStore>(bank: Bank<S>, count: usize) -> (Bank<S>, Vec<AccountId>) {
    let ids = (0..count)
        .map(|i| {
            bank.create_account(AccountConfig::current(), format!("holder-{i}"), money(1_000_000))
                .unwrap()
        })
        .collect();
    (bank, ids)
}

/// Benchmark account creation, including id allocation and validation
fn bench_create_accounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_accounts");

    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || Bank::new("Bench"),
                |bank| {
                    for _ in 0..count {
                        black_box(
                            bank.create_account(AccountConfig::savings(), "holder", money(500_000))
                                .unwrap(),
                        );
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark deposit then withdrawal on an existing account
fn bench_deposit_withdraw(c: &mut Criterion) {
    let (bank, ids) = bank_with_accounts(Bank::new("Bench"), 1);
    let id = ids[0];

    c.bench_function("deposit_withdraw", |b| {
        b.iter(|| {
            black_box(bank.deposit(id, money(1_000)).unwrap());
            black_box(bank.withdraw(id, money(1_000)).unwrap());
        })
    });
}

/// Compare transfer cost across store backends
fn bench_transfer_by_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_by_store");

    let (fine, fine_ids) = bank_with_accounts(Bank::new("Fine"), 2);
    group.bench_function("concurrent", |b| {
        b.iter(|| {
            fine.transfer(fine_ids[0], fine_ids[1], money(100)).unwrap();
            fine.transfer(fine_ids[1], fine_ids[0], money(100)).unwrap();
        })
    });

    let (coarse, coarse_ids) =
        bank_with_accounts(Bank::with_store("Coarse", CoarseAccountStore::new()), 2);
    group.bench_function("coarse", |b| {
        b.iter(|| {
            coarse.transfer(coarse_ids[0], coarse_ids[1], money(100)).unwrap();
            coarse.transfer(coarse_ids[1], coarse_ids[0], money(100)).unwrap();
        })
    });

    group.finish();
}

/// Benchmark rejected withdrawals (floor check without a log append)
fn bench_rejected_withdrawal(c: &mut Criterion) {
    let (bank, ids) = bank_with_accounts(Bank::new("Bench"), 1);
    let id = ids[0];

    c.bench_function("rejected_withdrawal", |b| {
        b.iter(|| black_box(bank.withdraw(id, money(i64::MAX / 2)).is_err()))
    });
}

/// Benchmark statement retrieval over logs of increasing length
fn bench_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement");

    for entries in [10, 1_000, 10_000] {
        let (bank, ids) = bank_with_accounts(Bank::new("Bench"), 1);
        let id = ids[0];
        for _ in 0..entries {
            bank.deposit(id, money(1)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("last_10", entries), &id, |b, &id| {
            b.iter(|| black_box(bank.get_statement(id, Some(10)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("full", entries), &id, |b, &id| {
            b.iter(|| black_box(bank.get_statement(id, None).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the bank-wide total across many accounts
fn bench_total_deposits(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_deposits");

    for count in [100, 1_000, 10_000] {
        let (bank, _) = bank_with_accounts(Bank::new("Bench"), count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &bank, |b, bank| {
            b.iter(|| black_box(bank.total_deposits()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_create_accounts,
    bench_deposit_withdraw,
    bench_transfer_by_store,
    bench_rejected_withdrawal,
    bench_statement,
    bench_total_deposits
);
criterion_main!(benches);
