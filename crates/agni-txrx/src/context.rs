//! Shared TX/RX context: send/recv timestamp arrays, the "all received"
//! predicate, and the completion condition variable.
//!
//! Lifetime is one `txrx_run` call: allocated by the coordinator, shared by
//! reference between the TX and RX workers, consumed back by the
//! coordinator once both have joined.

use std::sync::{Condvar, Mutex};
use std::time::Instant;

use once_cell::sync::OnceCell;

struct State {
    send_ts: Vec<u64>,
    recv_ts: Vec<u64>,
    received: usize,
    done: bool,
}

pub struct TxRxContext {
    state: Mutex<State>,
    cond: Condvar,
    total: usize,
    base: Instant,
    tx_finished_at: OnceCell<Instant>,
}

impl TxRxContext {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            state: Mutex::new(State {
                send_ts: vec![0; total],
                recv_ts: vec![0; total],
                received: 0,
                done: false,
            }),
            cond: Condvar::new(),
            total,
            base: Instant::now(),
            tx_finished_at: OnceCell::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Nanosecond timestamp relative to this context's base `Instant`.
    /// Monotonic, comparable across both workers; 0 only ever means "unset".
    #[inline]
    #[must_use]
    pub fn now_ns(&self) -> u64 {
        self.base.elapsed().as_nanos() as u64
    }

    /// Record the send timestamp for the packet at 0-based index `idx`.
    pub fn record_send(&self, idx: usize, ts_ns: u64) {
        let mut st = self.state.lock().expect("txrx context mutex poisoned");
        if let Some(slot) = st.send_ts.get_mut(idx) {
            *slot = ts_ns;
        }
    }

    /// Record the receive timestamp for 1-based packet `id`, first-wins.
    /// Signals completion if this was the last outstanding slot.
    pub fn record_recv(&self, id: usize, ts_ns: u64) {
        if id == 0 || id > self.total {
            return;
        }
        let mut st = self.state.lock().expect("txrx context mutex poisoned");
        let slot = &mut st.recv_ts[id - 1];
        if *slot == 0 {
            *slot = ts_ns;
            st.received += 1;
            if st.received == self.total {
                st.done = true;
                self.cond.notify_all();
            }
        }
    }

    /// Force completion (grace timeout elapsed).
    pub fn mark_timed_out(&self) {
        let mut st = self.state.lock().expect("txrx context mutex poisoned");
        if !st.done {
            st.done = true;
            self.cond.notify_all();
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state.lock().expect("txrx context mutex poisoned").done
    }

    /// Block until completion is signaled (all received, or timed out).
    pub fn wait_for_completion(&self) {
        let st = self.state.lock().expect("txrx context mutex poisoned");
        let _guard = self
            .cond
            .wait_while(st, |s| !s.done)
            .expect("txrx context mutex poisoned");
    }

    pub fn mark_tx_finished(&self) {
        let _ = self.tx_finished_at.set(Instant::now());
    }

    #[must_use]
    pub fn tx_finished_at(&self) -> Option<Instant> {
        self.tx_finished_at.get().copied()
    }

    /// Consume the context, returning the final `(send_ts, recv_ts)` arrays.
    #[must_use]
    pub fn into_arrays(self) -> (Vec<u64>, Vec<u64>) {
        let st = self.state.into_inner().expect("txrx context mutex poisoned");
        (st.send_ts, st.recv_ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_wins_receive_semantics() {
        let ctx = TxRxContext::new(3);
        ctx.record_recv(1, 100);
        ctx.record_recv(1, 200); // duplicate, must not overwrite
        let (_, recv) = ctx.into_arrays();
        assert_eq!(recv[0], 100);
    }

    #[test]
    fn completion_signals_when_all_received() {
        let ctx = TxRxContext::new(2);
        assert!(!ctx.is_done());
        ctx.record_recv(1, 10);
        assert!(!ctx.is_done());
        ctx.record_recv(2, 20);
        assert!(ctx.is_done());
    }

    #[test]
    fn out_of_range_id_is_ignored() {
        let ctx = TxRxContext::new(2);
        ctx.record_recv(0, 10);
        ctx.record_recv(99, 10);
        assert!(!ctx.is_done());
    }

    #[test]
    fn timeout_forces_completion() {
        let ctx = TxRxContext::new(5);
        ctx.mark_timed_out();
        assert!(ctx.is_done());
    }
}
