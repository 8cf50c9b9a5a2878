//! Summary printing for a completed TX/RX run.

use agni_txrx::TxRxOutcome;

pub fn print_summary(outcome: &TxRxOutcome) {
    println!();
    println!("{:-<40}", "");
    println!("{:<16} {:>10}", "Sent", outcome.sent);
    println!("{:<16} {:>10}", "Received", outcome.received);
    println!("{:<16} {:>10}", "Lost", outcome.lost);
    println!("{:<16} {:>9.2}%", "Loss", outcome.loss_percent);
    println!("{:-<40}", "");

    match &outcome.metrics_path {
        Some(path) => println!("Latency CSV: {}", path.display()),
        None => println!("Latency CSV: not written (see log)"),
    }
    println!();
}
