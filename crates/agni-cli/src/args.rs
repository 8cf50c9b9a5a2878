use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "agni")]
#[command(version = "0.1.0")]
#[command(about = "Packet generator, injector, and round-trip correlator", long_about = None)]
pub struct Cli {
    /// JSON packet template file
    #[arg(short = 'f', long = "file", required = true)]
    pub file: PathBuf,

    /// Interface to capture replies on
    #[arg(short = 'r', long = "iface-in", required = true)]
    pub iface_in: String,

    /// Interface to inject packets on
    #[arg(short = 's', long = "iface-out", required = true)]
    pub iface_out: String,

    /// Optional pcap dump of the built packet list
    #[arg(short = 'o', long = "pcap")]
    pub pcap: Option<PathBuf>,

    /// Grace timeout in milliseconds; 0 means use the default (5000 ms)
    #[arg(short = 't', long = "timeout", default_value = "0")]
    pub timeout_ms: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
