use std::sync::mpsc;

/// Creates a connected completion signal/wait pair for one benchmark run.
///
/// Clone the [`CompletionSignal`] once per worker; keep the [`CompletionWait`]
/// on the orchestrating thread and wait on it once per worker.
#[must_use]
pub fn completion_channel() -> (CompletionSignal, CompletionWait) {
    let (tx, rx) = mpsc::channel();

    (CompletionSignal { tx }, CompletionWait { rx })
}

/// The worker-side half of the completion channel.
///
/// N workers signaling exactly once each satisfy N [`CompletionWait::wait_one`]
/// calls, with no lost wakeups and no double counting.
#[derive(Clone, Debug)]
pub struct CompletionSignal {
    tx: mpsc::Sender<()>,
}

impl CompletionSignal {
    /// Announces that the calling worker has finished its counting loop.
    ///
    /// Consumes the signal - each worker signals exactly once, on exit.
    pub fn signal(self) {
        self.tx
            .send(())
            .expect("orchestrator owns the receiver for the whole run, so sending cannot fail");
    }
}

/// The orchestrator-side half of the completion channel.
#[derive(Debug)]
pub struct CompletionWait {
    rx: mpsc::Receiver<()>,
}

impl CompletionWait {
    /// Blocks until one worker has signaled completion.
    ///
    /// There is deliberately no timeout: in a benchmark, a worker that never
    /// signals indicates a synchronization bug that should surface as a hang
    /// rather than be silently truncated.
    pub fn wait_one(&self) {
        self.rx
            .recv()
            .expect("a worker exited without signaling completion");
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn n_signals_satisfy_n_waits() {
        const WORKERS: usize = 5;

        let (signal, wait) = completion_channel();

        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let signal = signal.clone();
                thread::spawn(move || signal.signal())
            })
            .collect();

        for _ in 0..WORKERS {
            wait.wait_one();
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn waits_beyond_signals_block() {
        let (signal, wait) = completion_channel();

        signal.clone().signal();
        wait.wait_one();

        // One signal, one wait consumed; a further wait must not complete.
        // Probe the raw receiver so the test itself cannot hang.
        assert!(
            wait.rx.recv_timeout(Duration::from_millis(50)).is_err(),
            "an extra wait completed without a matching signal"
        );
    }

    #[test]
    fn signals_buffered_before_waiting_are_not_lost() {
        let (signal, wait) = completion_channel();

        for _ in 0..3 {
            signal.clone().signal();
        }
        drop(signal);

        for _ in 0..3 {
            wait.wait_one();
        }
    }
}
