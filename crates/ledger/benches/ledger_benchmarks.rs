use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use splitledger_ledger::{AddExpense, ExpenseLedger, SettlementPlanner, SplitType};

fn member_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("member-{i:03}")).collect()
}

/// Ledger with `expenses` equal and shares splits rotating through the group.
fn populated_ledger(members: usize, expenses: usize) -> ExpenseLedger {
    let names = member_names(members);
    let mut ledger = ExpenseLedger::new();

    for i in 0..expenses {
        let payer = names[i % members].clone();
        let total = Decimal::new(1_000 + (i as i64 * 37) % 50_000, 2);
        let cmd = if i % 2 == 0 {
            AddExpense::new(payer, total, names.clone(), SplitType::Equal)
        } else {
            AddExpense::new(payer, total, names.clone(), SplitType::Shares)
                .with_details(names.iter().enumerate().map(|(j, n)| (n.clone(), Decimal::from(j as u32 % 4 + 1))))
        };
        if let Err(e) = ledger.add_expense(cmd) {
            panic!("benchmark fixture rejected: {e}");
        }
    }

    ledger
}

fn bench_add_expense(c: &mut Criterion) {
    let names = member_names(8);
    c.bench_function("add_expense/equal_8_members", |b| {
        b.iter(|| {
            let mut ledger = ExpenseLedger::new();
            let cmd = AddExpense::new("member-000", Decimal::new(12_345, 2), names.clone(), SplitType::Equal);
            black_box(ledger.add_expense(cmd).map(|_| ()))
        })
    });
}

fn bench_balances_and_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger");

    for &members in &[4usize, 16, 64] {
        let ledger = populated_ledger(members, 500);
        let planner = SettlementPlanner::default();

        group.bench_with_input(BenchmarkId::new("compute_balances", members), &ledger, |b, l| {
            b.iter(|| black_box(l.compute_balances()))
        });

        let sheet = ledger.compute_balances();
        group.bench_with_input(BenchmarkId::new("plan_settlements", members), &sheet, |b, s| {
            b.iter(|| black_box(planner.plan(s)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_expense, bench_balances_and_settlement);
criterion_main!(benches);
