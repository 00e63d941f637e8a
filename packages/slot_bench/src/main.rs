//! Runs one compiled-in benchmark configuration and prints the per-slot report.
//!
//! There are no runtime flags: thread count, countdown start, stride and the
//! strategy under measurement are compile-time constants, so each strategy is
//! measured in isolation with nothing decided inside the process.

use std::num::NonZero;
use std::process::ExitCode;

use new_zealand::nz;
use slot_bench::{RunConfig, Strategy, execute};

const THREADS: NonZero<usize> = nz!(12);
const START_COUNT: u32 = 1 << 24;
const STRIDE: NonZero<usize> = nz!(32);
const STRATEGY: Strategy = Strategy::CachedSlot;

fn main() -> ExitCode {
    let config = RunConfig::new(THREADS, START_COUNT, STRIDE, STRATEGY);

    let report = execute(&config);

    println!(
        "ThreadProc Threads finished: MegaCycles:{:.2}\n",
        report.megacycles()
    );

    for slot in report.slots() {
        let index = slot.index();
        let count = slot.count();

        match slot.thread_id() {
            Some(id) => println!("Index: {index} ThreadID: {id} Count: {count}"),
            None => println!("Index: {index} Count: {count}"),
        }
    }

    println!("EXIT_SUCCESS");

    ExitCode::SUCCESS
}
